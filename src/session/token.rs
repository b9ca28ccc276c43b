use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config;

/// mints an opaque session token. Uniqueness only, nothing cryptographic
pub fn new_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(config::SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_have_fixed_length() {
        assert_eq!(new_token().len(), config::SESSION_TOKEN_LENGTH);
    }

    #[test]
    fn test_tokens_are_distinct() {
        let a = new_token();
        let b = new_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tokens_are_alphanumeric() {
        assert!(new_token().chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
