//! AES-256-GCM authenticated encryption of individual secret fields
//!
//! Field format: `v1:{nonce_hex}:{auth_tag_hex}:{ciphertext_hex}`
//! - Version tag: `v1`
//! - Nonce: 12 bytes (96 bits) - standard for GCM, random per call
//! - Auth tag: 16 bytes (128 bits)
//! - Ciphertext: variable length
//!
//! Hex is lowercase only, so every field has exactly one textual encoding
//! and any edit to the stored string is rejected.
//!
//! The empty string is a sentinel for "no secret" and bypasses the cipher
//! in both directions.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use super::DerivedKey;
use crate::error::{DecryptionError, Result, VaultError};

/// Current field format version tag
pub const FORMAT_VERSION: &str = "v1";

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Parsed encrypted field with nonce and auth tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedField {
    /// Nonce (12 bytes for GCM)
    pub nonce: [u8; NONCE_LEN],
    /// Authentication tag (16 bytes)
    pub auth_tag: [u8; TAG_LEN],
    /// Encrypted ciphertext
    pub ciphertext: Vec<u8>,
}

impl std::fmt::Display for EncryptedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            FORMAT_VERSION,
            hex::encode(self.nonce),
            hex::encode(self.auth_tag),
            hex::encode(&self.ciphertext)
        )
    }
}

impl EncryptedField {
    /// Parse from the format: `v1:{nonce_hex}:{auth_tag_hex}:{ciphertext_hex}`
    pub fn parse(s: &str) -> std::result::Result<Self, DecryptionError> {
        let (version, rest) = s
            .split_once(':')
            .ok_or_else(|| DecryptionError::Malformed("missing version tag".to_string()))?;

        if version != FORMAT_VERSION {
            return Err(DecryptionError::UnsupportedVersion(version.to_string()));
        }

        let parts: Vec<&str> = rest.split(':').collect();
        if parts.len() != 3 {
            return Err(DecryptionError::Malformed(
                "expected version:nonce:tag:ciphertext".to_string(),
            ));
        }

        let nonce: [u8; NONCE_LEN] = decode_canonical_hex(parts[0], "nonce")?
            .try_into()
            .map_err(|v: Vec<u8>| {
                DecryptionError::Malformed(format!(
                    "nonce length: expected {}, got {}",
                    NONCE_LEN,
                    v.len()
                ))
            })?;

        let auth_tag: [u8; TAG_LEN] = decode_canonical_hex(parts[1], "auth tag")?
            .try_into()
            .map_err(|v: Vec<u8>| {
                DecryptionError::Malformed(format!(
                    "auth tag length: expected {}, got {}",
                    TAG_LEN,
                    v.len()
                ))
            })?;

        let ciphertext = decode_canonical_hex(parts[2], "ciphertext")?;

        Ok(Self {
            nonce,
            auth_tag,
            ciphertext,
        })
    }
}

fn decode_canonical_hex(part: &str, what: &str) -> std::result::Result<Vec<u8>, DecryptionError> {
    let bytes = hex::decode(part)
        .map_err(|e| DecryptionError::Malformed(format!("invalid {} hex: {}", what, e)))?;

    // hex::decode accepts uppercase; a re-encode mismatch means the string was altered
    if hex::encode(&bytes) != part {
        return Err(DecryptionError::Malformed(format!(
            "non-canonical {} hex",
            what
        )));
    }

    Ok(bytes)
}

/// Authenticated cipher for secret fields, bound to one session key.
///
/// Holds no mutable state, so a single instance can be shared across
/// threads for concurrent `encrypt`/`decrypt` calls. The AES key schedule
/// is rebuilt per call; only the zeroizing `DerivedKey` stays resident.
pub struct FieldCipher {
    key: DerivedKey,
}

impl FieldCipher {
    /// Create a cipher that owns the session key
    pub fn new(key: DerivedKey) -> Self {
        Self { key }
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()))
    }

    /// Encrypt a plaintext field and return the serialized format
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        Ok(self.seal(plaintext.as_bytes())?.to_string())
    }

    /// Decrypt a serialized field
    ///
    /// Fails closed: no bytes are returned unless the tag verifies.
    pub fn decrypt(&self, field: &str) -> std::result::Result<String, DecryptionError> {
        if field.is_empty() {
            return Ok(String::new());
        }

        let parsed = EncryptedField::parse(field)?;
        let plaintext = self.open(&parsed)?;

        String::from_utf8(plaintext).map_err(|_| DecryptionError::InvalidUtf8)
    }

    /// Encrypt raw bytes with a fresh random nonce
    pub fn seal(&self, plaintext: &[u8]) -> Result<EncryptedField> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        // aes-gcm appends the auth tag to the ciphertext
        let ciphertext_with_tag = self
            .cipher()
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

        if ciphertext_with_tag.len() < TAG_LEN {
            return Err(VaultError::EncryptionError(
                "Ciphertext too short".to_string(),
            ));
        }

        let tag_start = ciphertext_with_tag.len() - TAG_LEN;
        let mut auth_tag = [0u8; TAG_LEN];
        auth_tag.copy_from_slice(&ciphertext_with_tag[tag_start..]);

        Ok(EncryptedField {
            nonce,
            auth_tag,
            ciphertext: ciphertext_with_tag[..tag_start].to_vec(),
        })
    }

    /// Verify and decrypt a parsed field to raw bytes
    pub fn open(&self, field: &EncryptedField) -> std::result::Result<Vec<u8>, DecryptionError> {
        // Reconstruct ciphertext with tag appended (as expected by aes-gcm)
        let mut ciphertext_with_tag = Vec::with_capacity(field.ciphertext.len() + TAG_LEN);
        ciphertext_with_tag.extend_from_slice(&field.ciphertext);
        ciphertext_with_tag.extend_from_slice(&field.auth_tag);

        self.cipher()
            .decrypt(Nonce::from_slice(&field.nonce), ciphertext_with_tag.as_slice())
            .map_err(|_| DecryptionError::AuthenticationFailed)
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}
