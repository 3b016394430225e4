//! Master credential persisted alongside the records

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{KeyDerivationParams, SALT_LEN};

/// Password digest and key derivation inputs for a vault.
///
/// One per vault. Replacing it without re-encrypting every secret makes the
/// existing ciphertexts unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterCredential {
    /// SHA-256 hex digest of the master password
    pub password_hash: String,
    /// PBKDF2 salt
    #[serde(with = "salt_base64")]
    pub salt: [u8; SALT_LEN],
    /// PBKDF2 rounds used for this vault's key
    pub kdf_iterations: u32,
}

impl MasterCredential {
    /// Derivation parameters recorded for this vault
    pub fn kdf_params(&self) -> KeyDerivationParams {
        KeyDerivationParams {
            iterations: self.kdf_iterations,
        }
    }
}

mod salt_base64 {
    use super::*;

    pub fn serialize<S: Serializer>(salt: &[u8; SALT_LEN], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(salt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; SALT_LEN], D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)?;

        bytes.try_into().map_err(|v: Vec<u8>| {
            serde::de::Error::custom(format!(
                "invalid salt length: expected {}, got {}",
                SALT_LEN,
                v.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_serialized_as_base64() {
        let credential = MasterCredential {
            password_hash: "ab".repeat(32),
            salt: [0xffu8; SALT_LEN],
            kdf_iterations: 100_000,
        };

        let json = serde_json::to_value(&credential).unwrap();
        assert_eq!(json["salt"], "/////////////////////w==");

        let parsed: MasterCredential = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, credential);
    }

    #[test]
    fn test_wrong_salt_length_rejected() {
        let json = serde_json::json!({
            "password_hash": "00",
            "salt": "AAAA",
            "kdf_iterations": 1
        });

        assert!(serde_json::from_value::<MasterCredential>(json).is_err());
    }
}
