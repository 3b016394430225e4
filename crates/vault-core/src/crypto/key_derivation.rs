//! Password-based key derivation using PBKDF2-HMAC-SHA256

use hmac::Hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::secure_memory::{DerivedKey, KEY_LEN};
use crate::error::{Result, VaultError};

/// Length of the per-vault salt in bytes
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Parameters for PBKDF2 key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// HMAC-SHA256 rounds (default: 100_000)
    pub iterations: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Generate a cryptographically secure random salt
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit key from the master password
///
/// # Arguments
/// * `password` - The master password (hashed as UTF-8 bytes)
/// * `salt` - The vault salt, exactly 16 bytes
/// * `params` - Optional derivation parameters
///
/// # Returns
/// A 32-byte key suitable for AES-256-GCM
pub fn derive_key(
    password: &str,
    salt: &[u8],
    params: Option<KeyDerivationParams>,
) -> Result<DerivedKey> {
    let params = params.unwrap_or_default();

    if salt.len() != SALT_LEN {
        return Err(VaultError::KeyDerivationError(format!(
            "Invalid salt length: expected {}, got {}",
            SALT_LEN,
            salt.len()
        )));
    }
    if params.iterations == 0 {
        return Err(VaultError::KeyDerivationError(
            "Iteration count must be non-zero".to_string(),
        ));
    }

    let mut key_bytes = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(
        password.as_bytes(),
        salt,
        params.iterations,
        &mut key_bytes[..],
    )
    .map_err(|e| VaultError::KeyDerivationError(e.to_string()))?;

    Ok(DerivedKey::new(*key_bytes))
}

/// Derive a key on tokio's blocking pool.
///
/// Derivation is CPU-bound for a noticeable fraction of a second; this keeps
/// async executors responsive. The task always runs to completion.
pub async fn derive_key_offloaded(
    password: &str,
    salt: [u8; SALT_LEN],
    params: Option<KeyDerivationParams>,
) -> Result<DerivedKey> {
    let password = Zeroizing::new(password.to_owned());

    tokio::task::spawn_blocking(move || derive_key(&password, &salt, params))
        .await
        .map_err(|e| VaultError::KeyDerivationError(format!("Derivation task failed: {}", e)))?
}
