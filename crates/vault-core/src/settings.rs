//! Vault configuration
//!
//! `settings.json` sits next to `vault.json` and holds only non-secret
//! tuning values, so it can be read before the vault is unlocked.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::crypto::{KeyDerivationParams, DEFAULT_ITERATIONS};
use crate::error::{Result, VaultError};

/// Contents of `settings.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// File layout version
    pub version: u32,
    /// PBKDF2 rounds for newly created or re-keyed vaults.
    /// Existing vaults keep the count stored in their master credential.
    pub kdf_iterations: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            kdf_iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Settings {
    /// Derivation parameters for new master credentials.
    ///
    /// Counts below the default work factor are refused rather than used.
    pub fn kdf_params(&self) -> Result<KeyDerivationParams> {
        if self.kdf_iterations < DEFAULT_ITERATIONS {
            return Err(VaultError::KeyDerivationError(format!(
                "kdfIterations {} is below the minimum of {}",
                self.kdf_iterations, DEFAULT_ITERATIONS
            )));
        }

        Ok(KeyDerivationParams {
            iterations: self.kdf_iterations,
        })
    }
}

/// Reads and writes `settings.json` for one vault directory
pub struct SettingsManager {
    path: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    /// Load `settings.json` from `dir`; a missing or unreadable file yields defaults
    pub fn new(dir: &Path) -> Self {
        let path = dir.join("settings.json");
        let settings = Self::read(&path).unwrap_or_else(|e| {
            warn!("Ignoring unreadable settings file: {}", e);
            Settings::default()
        });

        Self { path, settings }
    }

    fn read(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Settings::default());
        }

        let settings = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        debug!("Read settings from {:?}", path);
        Ok(settings)
    }

    /// Write the current values, replacing the file via a temp file
    pub async fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.settings)?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!("Wrote settings to {:?}", self.path);
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Edit in place; call `save` to persist
    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Replace all values and persist them
    pub async fn update(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(temp_dir.path());

        assert_eq!(manager.get().kdf_iterations, 100_000);
        assert_eq!(
            manager.get().kdf_params().unwrap(),
            KeyDerivationParams::default()
        );
    }

    #[tokio::test]
    async fn test_settings_persistence() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut manager = SettingsManager::new(temp_dir.path());
            manager.get_mut().kdf_iterations = 250_000;
            manager.save().await.unwrap();
        }

        {
            let manager = SettingsManager::new(temp_dir.path());
            assert_eq!(manager.get().kdf_iterations, 250_000);
            assert_eq!(manager.get().kdf_params().unwrap().iterations, 250_000);
        }
    }

    #[tokio::test]
    async fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        manager
            .update(Settings {
                version: 1,
                kdf_iterations: 300_000,
            })
            .await
            .unwrap();

        let reloaded = SettingsManager::new(temp_dir.path());
        assert_eq!(reloaded.get().kdf_iterations, 300_000);
    }

    #[test]
    fn test_low_iteration_count_refused() {
        for iterations in [0, 1, 1_000, DEFAULT_ITERATIONS - 1] {
            let settings = Settings {
                version: 1,
                kdf_iterations: iterations,
            };
            assert!(matches!(
                settings.kdf_params(),
                Err(VaultError::KeyDerivationError(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_corrupt_settings_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.json"), "{not json").unwrap();

        let manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.get(), &Settings::default());
    }

    #[test]
    fn test_camel_case_file_format() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["kdfIterations"], 100_000);
    }
}
