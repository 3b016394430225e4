//! # vault-core
//!
//! Core of Access Vault, a local store for remote-access credentials:
//! - PBKDF2-HMAC-SHA256 key derivation from a single master password
//! - AES-256-GCM encryption of individual secret fields
//! - SHA-256 master password verification, independent of the key
//! - Organizations, users, access records and VPN entries in a JSON file store

pub mod crypto;
pub mod error;
pub mod records;
pub mod settings;
pub mod storage;
mod vault;

pub use crypto::{
    derive_key, generate_salt, hash_password, verify_password, DerivedKey, EncryptedField,
    FieldCipher, KeyDerivationParams, SecretString,
};
pub use error::{DecryptionError, Result, VaultError};
pub use records::{AccessListing, AccessRecord, NewAccess, NewVpn, Organization, User, VpnRecord};
pub use settings::{Settings, SettingsManager};
pub use storage::{JsonFileStore, MasterCredential, SecretFields, VaultStore};
pub use vault::{Vault, VaultState};
pub use zeroize::Zeroizing;
