//! Input validation and sanitizing for booking forms

use vitrine_types::ValidationError;

/// Free text is capped at this many characters
pub const MAX_INPUT_CHARS: usize = 1000;

const MIN_NAME_CHARS: usize = 2;
const PHONE_LEN: std::ops::RangeInclusive<usize> = 8..=20;

/// Strip angle brackets, trim, and cap the length
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect::<String>()
        .trim()
        .chars()
        .take(MAX_INPUT_CHARS)
        .collect()
}

/// `local@domain.tld` shape, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < last)
}

/// Digits, spaces and `+ - ( )`, 8 to 20 characters. A spaced international
/// number such as `+225 07 48 73 51 15` is 19 characters.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    PHONE_LEN.contains(&phone.chars().count())
        && phone.chars().any(|c| c.is_ascii_digit())
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

/// Check the customer contact fields, collecting one message per bad field
pub fn validate_contact(name: &str, email: &str, phone: &str) -> Result<(), ValidationError> {
    let mut messages = Vec::new();

    if name.trim().chars().count() < MIN_NAME_CHARS {
        messages.push(format!("name is required (min. {MIN_NAME_CHARS} characters)"));
    }
    if !is_valid_email(email.trim()) {
        messages.push("invalid email".to_string());
    }
    if !is_valid_phone(phone) {
        messages.push("invalid phone number".to_string());
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_input("  <b>Bonjour</b> "), "bBonjour/b");
        assert_eq!(sanitize_input(&"x".repeat(1500)).len(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("client@example.ci"));
        assert!(!is_valid_email("client@example"));
        assert!(!is_valid_email("client@.ci"));
        assert!(!is_valid_email("cli ent@example.ci"));
        assert!(!is_valid_email("@example.ci"));
        assert!(!is_valid_email("a@b@c.ci"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("+225 07 48 73 51 15"));
        assert!(is_valid_phone("(01) 234-5678"));
        assert!(is_valid_phone("07487351"));
        assert!(!is_valid_phone("+225 07 48 73 51 15 99"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn test_validate_contact_collects_all() {
        let err = validate_contact("A", "nope", "123").unwrap_err();
        assert_eq!(err.messages.len(), 3);
        assert!(validate_contact("Awa", "awa@example.ci", "0748735115").is_ok());
    }
}
