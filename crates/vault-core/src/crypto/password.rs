//! Master password verification
//!
//! A fast SHA-256 digest used only to check a candidate password at unlock.
//! It is computed independently of the PBKDF2 key; the two values never
//! stand in for each other.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Lowercase hex SHA-256 digest of the UTF-8 password bytes
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a candidate password against a stored digest in constant time
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    let candidate = hash_password(password);
    candidate.as_bytes().ct_eq(stored_digest.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_vector() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash_password("abc"), hash_password("abc"));
        assert_eq!(hash_password("мастер-пароль"), hash_password("мастер-пароль"));
    }

    #[test]
    fn test_hash_distinct_inputs() {
        assert_ne!(hash_password("pw1"), hash_password("pw2"));
        assert_ne!(hash_password(""), hash_password(" "));
    }

    #[test]
    fn test_verify() {
        let stored = hash_password("Sup3r$ecret");

        assert!(verify_password("Sup3r$ecret", &stored));
        assert!(!verify_password("wrong", &stored));
        assert!(!verify_password("Sup3r$ecret", ""));
        assert!(!verify_password("Sup3r$ecret", &stored.to_uppercase()));
    }
}
