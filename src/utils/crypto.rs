//! Cryptographic utilities

use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Generate a cryptographically secure random token
pub fn generate_secure_token(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Hex SHA-256 of `input`; reset tokens are stored only in this form
pub fn hash_string(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Constant-time comparison of two shared secrets
pub fn secrets_match(given: &str, expected: &str) -> bool {
    bool::from(given.as_bytes().ct_eq(expected.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secure_token() {
        let token1 = generate_secure_token(48);
        let token2 = generate_secure_token(48);

        assert_eq!(token1.len(), 48);
        assert!(token1.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_hash_string() {
        let hash = hash_string("reset-token");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_string("reset-token"));
        assert_ne!(hash, hash_string("other-token"));
    }

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("open-sesame", "open-sesame"));
        assert!(!secrets_match("open-sesame", "open-sesamE"));
        assert!(!secrets_match("open", "open-sesame"));
        assert!(!secrets_match("", "x"));
    }
}
