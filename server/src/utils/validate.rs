//! Request field validators

use validator::ValidationError;

/// Phone numbers: at least 10 characters, digits plus `+ ( ) -` and spaces
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < 10 {
        return Err(ValidationError::new("phone_too_short"));
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '(' | ')' | '-');
    if !value.chars().all(allowed) {
        return Err(ValidationError::new("phone_invalid_chars"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_formats() {
        assert!(validate_phone("+79990001111").is_ok());
        assert!(validate_phone("+7 (999) 000-11-11").is_ok());
        assert!(validate_phone("89990001111").is_ok());
    }

    #[test]
    fn test_rejects_short_numbers() {
        assert!(validate_phone("+7999").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_rejects_letters() {
        assert!(validate_phone("+7999000111a").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }
}
