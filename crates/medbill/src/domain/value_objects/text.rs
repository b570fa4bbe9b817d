//! Text field checks shared by entities

use crate::domain::errors::DomainError;

/// Reject blank values and values longer than `max_len` characters
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
