//! Payload validation helpers

use super::error::{AppError, AppResult};

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_TEXT_LEN: usize = 500;

/// Require a non-empty trimmed string within `max_len` characters.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} exceeds {max_len} characters"
        )));
    }
    Ok(())
}

/// Require a non-negative finite number.
pub fn validate_non_negative(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Milk", "name", 10).is_ok());
        assert!(validate_required_text("   ", "name", 10).is_err());
        assert!(validate_required_text("abcdefghijk", "name", 10).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(0.0, "mrp").is_ok());
        assert!(validate_non_negative(24.5, "mrp").is_ok());
        assert!(validate_non_negative(-1.0, "mrp").is_err());
        assert!(validate_non_negative(f64::NAN, "mrp").is_err());
    }
}
