//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Vault is locked - unlock with the master password first")]
    VaultLocked,

    #[error("Vault is not initialized - create a new vault first")]
    VaultNotInitialized,

    #[error("Vault is already initialized")]
    VaultAlreadyInitialized,

    /// Wrong master password. Deliberately carries no detail.
    #[error("Incorrect password")]
    InvalidPassword,

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error(transparent)]
    Decryption(#[from] DecryptionError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(u64),

    #[error("Organization already exists: {0}")]
    DuplicateOrganization(String),

    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("Access record not found: {0}")]
    AccessNotFound(u64),

    #[error("VPN entry not found: {0}")]
    VpnNotFound(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Failure to turn an encrypted field back into plaintext.
///
/// Every variant means no plaintext was produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptionError {
    #[error("Decryption failed: unsupported format version {0:?}")]
    UnsupportedVersion(String),

    #[error("Decryption failed: malformed encrypted field ({0})")]
    Malformed(String),

    #[error("Decryption failed: authentication tag mismatch")]
    AuthenticationFailed,

    #[error("Decryption failed: plaintext is not valid UTF-8")]
    InvalidUtf8,
}
