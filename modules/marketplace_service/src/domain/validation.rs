//! Input validation for editable fields

use crate::contract::{MarketplaceError, PageRequest};

/// Reject empty or whitespace-only required text
pub fn require_text(field: &str, value: &str) -> Result<(), MarketplaceError> {
    if value.trim().is_empty() {
        return Err(MarketplaceError::validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and no whitespace
pub fn validate_email(field: &str, value: &str) -> Result<(), MarketplaceError> {
    require_text(field, value)?;

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(MarketplaceError::validation(format!(
            "{} '{}' is not a valid email address",
            field, value
        )));
    }
    Ok(())
}

/// Optional email: absent is fine, present must be well formed
pub fn validate_optional_email(field: &str, value: Option<&str>) -> Result<(), MarketplaceError> {
    match value {
        Some(v) => validate_email(field, v),
        None => Ok(()),
    }
}

pub fn validate_quantity(quantity: i32) -> Result<(), MarketplaceError> {
    if quantity <= 0 {
        return Err(MarketplaceError::validation(format!(
            "quantity must be greater than 0, got {}",
            quantity
        )));
    }
    Ok(())
}

pub fn validate_budget(budget_cents: Option<i64>) -> Result<(), MarketplaceError> {
    if let Some(budget) = budget_cents {
        if budget < 0 {
            return Err(MarketplaceError::validation(format!(
                "budget cannot be negative, got {}",
                budget
            )));
        }
    }
    Ok(())
}

/// Pages are 1-indexed; page size must be within `1..=max_page_size`
pub fn validate_page_request(
    request: &PageRequest,
    max_page_size: u64,
) -> Result<(), MarketplaceError> {
    require_text("columnkey", &request.column_key)?;

    if request.page == 0 {
        return Err(MarketplaceError::validation("page must be at least 1"));
    }

    if request.page_size == 0 || request.page_size > max_page_size {
        return Err(MarketplaceError::validation(format!(
            "pagesize must be between 1 and {}, got {}",
            max_page_size, request.page_size
        )));
    }

    Ok(())
}

/// Trim, and turn blank optional text into `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
