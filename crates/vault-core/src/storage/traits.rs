//! Storage trait definitions

use async_trait::async_trait;

use super::MasterCredential;
use crate::error::Result;
use crate::records::{AccessListing, AccessRecord, Organization, User, VpnRecord};

/// Every encrypted secret in a vault, keyed by record id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretFields {
    /// `(access id, password_encrypted)`
    pub access: Vec<(u64, String)>,
    /// `(vpn id, password_encrypted)`
    pub vpn: Vec<(u64, String)>,
}

/// Persistence backend for a vault.
///
/// Stores the master credential and records with their encrypted fields as
/// opaque text. Never receives keys or plaintext.
///
/// Referential rules:
/// - deleting an organization deletes its users, access records and VPN entries
/// - deleting a user keeps its access records with `user_id` cleared
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Load the master credential; `None` before first setup
    async fn load_master_credential(&self) -> Result<Option<MasterCredential>>;

    /// Save the master credential, replacing any existing one
    async fn save_master_credential(&self, credential: &MasterCredential) -> Result<()>;

    /// Add an organization with a unique name
    async fn add_organization(&self, name: &str) -> Result<Organization>;

    /// All organizations sorted by name
    async fn list_organizations(&self) -> Result<Vec<Organization>>;

    /// Organizations whose name contains `query`, case-insensitively
    async fn search_organizations(&self, query: &str) -> Result<Vec<Organization>>;

    /// Delete an organization and everything it owns
    async fn delete_organization(&self, id: u64) -> Result<()>;

    /// Add a user to an existing organization
    async fn add_user(&self, org_id: u64, name: &str) -> Result<User>;

    /// Users of an organization sorted by name
    async fn users_by_org(&self, org_id: u64) -> Result<Vec<User>>;

    /// Delete a user, detaching their access records
    async fn delete_user(&self, id: u64) -> Result<()>;

    /// Insert an access record; the store assigns the id
    async fn add_access(&self, access: AccessRecord) -> Result<AccessRecord>;

    /// Get an access record by id
    async fn get_access(&self, id: u64) -> Result<Option<AccessRecord>>;

    /// Access records of an organization, sorted by type then protocol
    async fn accesses_by_org(&self, org_id: u64) -> Result<Vec<AccessListing>>;

    /// Access records owned by a user, sorted by type then protocol
    async fn accesses_by_user(&self, user_id: u64) -> Result<Vec<AccessRecord>>;

    /// Delete an access record
    async fn delete_access(&self, id: u64) -> Result<()>;

    /// Insert a VPN entry; the store assigns the id
    async fn add_vpn(&self, vpn: VpnRecord) -> Result<VpnRecord>;

    /// Get a VPN entry by id
    async fn get_vpn(&self, id: u64) -> Result<Option<VpnRecord>>;

    /// VPN entries of an organization sorted by type
    async fn vpn_by_org(&self, org_id: u64) -> Result<Vec<VpnRecord>>;

    /// Delete a VPN entry
    async fn delete_vpn(&self, id: u64) -> Result<()>;

    /// Every encrypted secret currently stored
    async fn secret_fields(&self) -> Result<SecretFields>;

    /// Atomically replace the master credential and every encrypted secret.
    ///
    /// `secrets` must cover exactly the records that currently exist;
    /// otherwise nothing is written.
    async fn rekey(&self, credential: &MasterCredential, secrets: SecretFields) -> Result<()>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
