//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod action;
pub mod client;
pub mod error;
pub mod model;

pub use action::Action;
pub use client::TicketingApi;
pub use error::MarketplaceError;
pub use model::*;
