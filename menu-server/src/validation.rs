//! Input validation helpers

use shared::error::AppError;

/// Table location labels
pub const MAX_LOCATION_LEN: usize = 100;

/// Descriptions and free-form notes
pub const MAX_NOTE_LEN: usize = 500;

/// Modifier group and option names
pub const MAX_MODIFIER_NAME_LEN: usize = 100;

/// Menu item names
pub const MAX_ITEM_NAME_LEN: usize = 80;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate an inclusive integer range.
pub fn validate_range(value: i32, field: &str, min: i32, max: i32) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
