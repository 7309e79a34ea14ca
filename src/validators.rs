/// Request input validators
///
/// Field-level checks shared by the auth, user and password reset handlers.
/// Emails are matched against a simplified RFC 5322 pattern; names are
/// length-checked and must not carry control characters.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
const MIN_EMAIL_LENGTH: usize = 5;
const MAX_NAME_LENGTH: usize = 256;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
}

/// Validates an email address and returns the trimmed form.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }

    if trimmed.len() < MIN_EMAIL_LENGTH {
        return Err(ValidationError::TooShort("email", MIN_EMAIL_LENGTH));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email", MAX_EMAIL_LENGTH));
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("email"));
    }

    Ok(trimmed.to_string())
}

/// Validates a name field and returns the trimmed form.
///
/// `field` is the client-facing field name used in error messages.
pub fn validate_name(field: &'static str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong(field, MAX_NAME_LENGTH));
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidFormat(field));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.email@domain.co.uk").is_ok());
        assert!(validate_email("user+tag@example.com").is_ok());
        assert!(validate_email("a@x.com").is_ok());
    }

    #[test]
    fn test_invalid_email_format() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@@example.com").is_err());
    }

    #[test]
    fn test_email_length_limits() {
        let too_long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&too_long).is_err());

        assert!(validate_email("a@b").is_err()); // Too short
    }

    #[test]
    fn test_email_is_trimmed() {
        assert_eq!(validate_email("  user@example.com  ").unwrap(), "user@example.com");
    }

    #[test]
    fn test_empty_email_reports_missing_field() {
        assert_eq!(
            validate_email("   "),
            Err(ValidationError::MissingField("email"))
        );
    }

    #[test]
    fn test_valid_name() {
        assert!(validate_name("name", "John Doe").is_ok());
        assert!(validate_name("name", "Jean-Pierre").is_ok());
        assert!(validate_name("lastName", "O'Brien").is_ok());
    }

    #[test]
    fn test_name_length_limits() {
        let too_long = "a".repeat(257);
        assert!(validate_name("name", &too_long).is_err());

        assert!(validate_name("name", "").is_err());
    }

    #[test]
    fn test_name_control_characters() {
        assert!(validate_name("name", "Name\0with\0null").is_err());
        assert!(validate_name("name", "Name\twith\ttabs").is_err());
    }
}
