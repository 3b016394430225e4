//! Vault session: master password lifecycle and record access
//!
//! `Vault` is the explicit handle every record operation goes through. It
//! owns the store and, while unlocked, the session's `FieldCipher`.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{
    derive_key_offloaded, generate_salt, hash_password, verify_password, FieldCipher,
    KeyDerivationParams, SecretString,
};
use crate::error::{Result, VaultError};
use crate::records::{
    AccessListing, AccessRecord, NewAccess, NewVpn, Organization, User, VpnRecord,
};
use crate::settings::SettingsManager;
use crate::storage::{JsonFileStore, MasterCredential, SecretFields, VaultStore};

/// Vault state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No master password has been set yet
    NotInitialized,
    /// Master password required
    Locked,
    /// Key derived and ready
    Unlocked,
}

/// An open vault
pub struct Vault {
    /// Storage backend
    store: Arc<dyn VaultStore>,
    /// PBKDF2 parameters for new master credentials
    kdf_params: KeyDerivationParams,
    /// Session cipher (when unlocked); dropping it zeroizes the key
    cipher: Option<FieldCipher>,
    /// Current state
    state: VaultState,
}

impl Vault {
    /// Open a vault over an existing store
    pub async fn open(store: Arc<dyn VaultStore>, kdf_params: KeyDerivationParams) -> Result<Self> {
        let state = match store.load_master_credential().await? {
            Some(_) => VaultState::Locked,
            None => VaultState::NotInitialized,
        };

        debug!("Opened vault on {} ({:?})", store.backend_name(), state);

        Ok(Self {
            store,
            kdf_params,
            cipher: None,
            state,
        })
    }

    /// Open the JSON file vault and its settings in `dir`
    pub async fn open_in(dir: &Path) -> Result<Self> {
        let kdf_params = SettingsManager::new(dir).get().kdf_params()?;
        let store = JsonFileStore::open(dir.to_path_buf()).await?;

        Self::open(Arc::new(store), kdf_params).await
    }

    /// Get the current vault state
    pub fn state(&self) -> VaultState {
        self.state
    }

    /// Check if the vault is unlocked
    pub fn is_unlocked(&self) -> bool {
        self.state == VaultState::Unlocked
    }

    fn cipher(&self) -> Result<&FieldCipher> {
        self.cipher.as_ref().ok_or(VaultError::VaultLocked)
    }

    fn ensure_unlocked(&self) -> Result<()> {
        self.cipher().map(|_| ())
    }

    /// Set the master password of a new vault and unlock it
    pub async fn initialize(&mut self, password: &str) -> Result<()> {
        if self.state != VaultState::NotInitialized {
            return Err(VaultError::VaultAlreadyInitialized);
        }

        info!("Initializing new vault");

        let salt = generate_salt();
        let key = derive_key_offloaded(password, salt, Some(self.kdf_params)).await?;

        let credential = MasterCredential {
            password_hash: hash_password(password),
            salt,
            kdf_iterations: self.kdf_params.iterations,
        };
        self.store.save_master_credential(&credential).await?;

        self.cipher = Some(FieldCipher::new(key));
        self.state = VaultState::Unlocked;

        info!("Vault initialized");
        Ok(())
    }

    /// Unlock the vault with the master password
    ///
    /// A wrong password leaves the vault locked and derives no key.
    pub async fn unlock(&mut self, password: &str) -> Result<()> {
        if self.state == VaultState::NotInitialized {
            return Err(VaultError::VaultNotInitialized);
        }

        if self.state == VaultState::Unlocked {
            debug!("Vault already unlocked");
            return Ok(());
        }

        let credential = self
            .store
            .load_master_credential()
            .await?
            .ok_or(VaultError::VaultNotInitialized)?;

        if !verify_password(password, &credential.password_hash) {
            warn!("Rejected unlock attempt");
            return Err(VaultError::InvalidPassword);
        }

        let key =
            derive_key_offloaded(password, credential.salt, Some(credential.kdf_params())).await?;

        self.cipher = Some(FieldCipher::new(key));
        self.state = VaultState::Unlocked;

        info!("Vault unlocked");
        Ok(())
    }

    /// Lock the vault, dropping the session key
    pub fn lock(&mut self) {
        if self.state == VaultState::NotInitialized {
            return;
        }

        self.cipher = None;
        self.state = VaultState::Locked;

        info!("Vault locked");
    }

    /// Change the master password, re-encrypting every stored secret.
    ///
    /// Runs as one exclusive operation: all secrets are decrypted with the
    /// old key and encrypted with a key from a fresh salt in memory, then
    /// committed together with the new credential in a single store write.
    /// Any failure before the commit leaves the vault as it was.
    pub async fn change_master_password(&mut self, old_password: &str, new_password: &str) -> Result<()> {
        if self.state == VaultState::NotInitialized {
            return Err(VaultError::VaultNotInitialized);
        }

        let credential = self
            .store
            .load_master_credential()
            .await?
            .ok_or(VaultError::VaultNotInitialized)?;

        if !verify_password(old_password, &credential.password_hash) {
            warn!("Rejected master password change");
            return Err(VaultError::InvalidPassword);
        }

        let old_key =
            derive_key_offloaded(old_password, credential.salt, Some(credential.kdf_params()))
                .await?;
        let old_cipher = FieldCipher::new(old_key);

        let new_salt = generate_salt();
        let new_key = derive_key_offloaded(new_password, new_salt, Some(self.kdf_params)).await?;
        let new_cipher = FieldCipher::new(new_key);

        let secrets = self.store.secret_fields().await?;
        let reencrypt = |fields: Vec<(u64, String)>| -> Result<Vec<(u64, String)>> {
            fields
                .into_iter()
                .map(|(id, encrypted)| {
                    let plaintext = Zeroizing::new(old_cipher.decrypt(&encrypted)?);
                    Ok((id, new_cipher.encrypt(&plaintext)?))
                })
                .collect()
        };
        let reencrypted = SecretFields {
            access: reencrypt(secrets.access)?,
            vpn: reencrypt(secrets.vpn)?,
        };
        let count = reencrypted.access.len() + reencrypted.vpn.len();

        let new_credential = MasterCredential {
            password_hash: hash_password(new_password),
            salt: new_salt,
            kdf_iterations: self.kdf_params.iterations,
        };
        self.store.rekey(&new_credential, reencrypted).await?;

        self.cipher = Some(new_cipher);
        self.state = VaultState::Unlocked;

        info!("Master password changed, {} secrets re-encrypted", count);
        Ok(())
    }

    // Organizations

    /// Add an organization
    pub async fn add_organization(&self, name: &str) -> Result<Organization> {
        self.ensure_unlocked()?;
        self.store.add_organization(name).await
    }

    /// All organizations sorted by name
    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        self.ensure_unlocked()?;
        self.store.list_organizations().await
    }

    /// Organizations whose name contains `query`
    pub async fn search_organizations(&self, query: &str) -> Result<Vec<Organization>> {
        self.ensure_unlocked()?;
        self.store.search_organizations(query).await
    }

    /// Delete an organization with its users, access records and VPN entries
    pub async fn delete_organization(&self, id: u64) -> Result<()> {
        self.ensure_unlocked()?;
        self.store.delete_organization(id).await?;
        info!("Deleted organization {}", id);
        Ok(())
    }

    // Users

    pub async fn add_user(&self, org_id: u64, name: &str) -> Result<User> {
        self.ensure_unlocked()?;
        self.store.add_user(org_id, name).await
    }

    pub async fn users(&self, org_id: u64) -> Result<Vec<User>> {
        self.ensure_unlocked()?;
        self.store.users_by_org(org_id).await
    }

    /// Delete a user; their access records stay with no owner
    pub async fn delete_user(&self, id: u64) -> Result<()> {
        self.ensure_unlocked()?;
        self.store.delete_user(id).await
    }

    // Access records

    /// Add an access record, encrypting its password
    pub async fn add_access(&self, draft: &NewAccess) -> Result<AccessRecord> {
        let encrypted = self.cipher()?.encrypt(&draft.password)?;
        self.store.add_access(draft.to_record(encrypted)).await
    }

    /// Access records of an organization (passwords stay encrypted)
    pub async fn accesses(&self, org_id: u64) -> Result<Vec<AccessListing>> {
        self.ensure_unlocked()?;
        self.store.accesses_by_org(org_id).await
    }

    /// Access records owned by a user (passwords stay encrypted)
    pub async fn user_accesses(&self, user_id: u64) -> Result<Vec<AccessRecord>> {
        self.ensure_unlocked()?;
        self.store.accesses_by_user(user_id).await
    }

    /// Decrypt the password of one access record
    pub async fn reveal_access_password(&self, id: u64) -> Result<SecretString> {
        let cipher = self.cipher()?;
        let access = self
            .store
            .get_access(id)
            .await?
            .ok_or(VaultError::AccessNotFound(id))?;

        Ok(SecretString::new(cipher.decrypt(&access.password_encrypted)?))
    }

    pub async fn delete_access(&self, id: u64) -> Result<()> {
        self.ensure_unlocked()?;
        self.store.delete_access(id).await
    }

    // VPN entries

    /// Add a VPN entry, encrypting its password
    pub async fn add_vpn(&self, draft: &NewVpn) -> Result<VpnRecord> {
        let encrypted = self.cipher()?.encrypt(&draft.password)?;
        self.store.add_vpn(draft.to_record(encrypted)).await
    }

    pub async fn vpn_entries(&self, org_id: u64) -> Result<Vec<VpnRecord>> {
        self.ensure_unlocked()?;
        self.store.vpn_by_org(org_id).await
    }

    /// Decrypt the password of one VPN entry
    pub async fn reveal_vpn_password(&self, id: u64) -> Result<SecretString> {
        let cipher = self.cipher()?;
        let vpn = self
            .store
            .get_vpn(id)
            .await?
            .ok_or(VaultError::VpnNotFound(id))?;

        Ok(SecretString::new(cipher.decrypt(&vpn.password_encrypted)?))
    }

    pub async fn delete_vpn(&self, id: u64) -> Result<()> {
        self.ensure_unlocked()?;
        self.store.delete_vpn(id).await
    }
}
