//! Contract error types for the marketplace service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Marketplace service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    /// Record not found (or a referenced record does not exist)
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (ticket_body, seller_item, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Uniqueness conflict (duplicate email, phone, link row, ...)
    #[error("Conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Acting user lacks the permission for the requested action
    #[error("Forbidden: missing permission '{action}'")]
    Forbidden {
        /// Permission key that was required
        action: String,
    },
    /// Invalid input
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },
    /// Operation is not legal in the record's current state
    #[error("Precondition failed: {reason}")]
    PreconditionFailed {
        /// Why the transition was rejected
        reason: String,
    },
    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl MarketplaceError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}
