use crate::domain::{error::DomainError, models::credential::HashedPassword};

/// Service for hashing passwords before they are persisted
pub trait PasswordHasher: Clone {
    /// Hash a plain text password
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;
}

/// Strong-password predicate: at least one uppercase letter, one
/// lowercase letter and one digit, minimum 8 characters.
pub fn strong_password(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_upper && has_lower && has_digit && password.chars().count() >= 8
}

#[cfg(test)]
mod tests {
    use super::strong_password;

    #[test]
    fn accepts_mixed_case_with_digit() {
        assert!(strong_password("Abcdef12"));
    }

    #[test]
    fn rejects_missing_uppercase() {
        assert!(!strong_password("alllowercase1"));
    }

    #[test]
    fn rejects_missing_lowercase() {
        assert!(!strong_password("ALLUPPERCASE1"));
    }

    #[test]
    fn rejects_missing_digit() {
        assert!(!strong_password("NoDigitsHere"));
    }

    #[test]
    fn rejects_short_password() {
        assert!(!strong_password("Abc12"));
    }

    #[test]
    fn minimum_length_counts_characters_not_bytes() {
        // 8 characters, more than 8 bytes
        assert!(strong_password("Abc12çãé"));
    }
}
