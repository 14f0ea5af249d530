//! Validation helper functions for configuration types.

use crate::core::errors::{Result, RenameError};

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(RenameError::config_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a name is usable as an identifier to match against.
pub fn validate_identifier(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RenameError::config_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(RenameError::config_field(
            format!("{} must not contain whitespace (got '{}')", field, value),
            field,
        ));
    }
    Ok(())
}

/// Validate every entry of a list of identifiers.
pub fn validate_identifiers(values: &[String], field: &str) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        validate_identifier(value, &format!("{field}[{index}]"))?;
    }
    Ok(())
}
