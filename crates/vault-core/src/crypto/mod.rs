//! Cryptographic primitives for secret field storage
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key derivation from the master password
//! - AES-256-GCM authenticated encryption of individual fields
//! - SHA-256 master password verification
//! - Secure memory handling with zeroize

mod encryption;
mod key_derivation;
mod password;
mod secure_memory;

pub use encryption::{EncryptedField, FieldCipher, FORMAT_VERSION};
pub use key_derivation::{
    derive_key, derive_key_offloaded, generate_salt, KeyDerivationParams, DEFAULT_ITERATIONS,
    SALT_LEN,
};
pub use password::{hash_password, verify_password};
pub use secure_memory::{DerivedKey, SecretString, KEY_LEN};
