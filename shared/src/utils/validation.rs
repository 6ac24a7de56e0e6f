//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email shape check, not a full RFC 5322 parser
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Check if a string looks like a deliverable email address
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging (e.g. a***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user.name+tag@example.co.uk"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_is_valid_email_rejects_overlong() {
        let local = "a".repeat(250);
        assert!(!is_valid_email(&format!("{}@example.com", local)));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@b.com"), "a***@b.com");
        assert_eq!(mask_email("broken"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }
}
