//! JSON file storage backend
//!
//! Stores the whole vault as one JSON document in the user's data directory.
//! Secret fields arrive already encrypted and are written byte-for-byte.
//! Every mutation is staged on a copy, written to a temp file and renamed
//! into place, then published to the in-memory cache; a failed write leaves
//! both the file and the cache untouched.

use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

use super::{MasterCredential, SecretFields, VaultStore};
use crate::error::{Result, VaultError};
use crate::records::{AccessListing, AccessRecord, Organization, User, VpnRecord};

/// Document format version
const DOCUMENT_VERSION: u32 = 1;

/// JSON file storage backend
pub struct JsonFileStore {
    /// Directory holding `vault.json`
    storage_dir: PathBuf,
    /// In-memory copy of the document
    document: Arc<RwLock<VaultDocument>>,
}

/// Last id handed out per table; ids start at 1 and are never reused
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IdCounters {
    organization: u64,
    user: u64,
    access: u64,
    vpn: u64,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// File format for persistent storage
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VaultDocument {
    version: u32,
    master: Option<MasterCredential>,
    #[serde(default)]
    last_ids: IdCounters,
    #[serde(default)]
    organizations: BTreeMap<u64, Organization>,
    #[serde(default)]
    users: BTreeMap<u64, User>,
    #[serde(default)]
    accesses: BTreeMap<u64, AccessRecord>,
    #[serde(default)]
    vpn: BTreeMap<u64, VpnRecord>,
}

impl Default for VaultDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            master: None,
            last_ids: IdCounters::default(),
            organizations: BTreeMap::new(),
            users: BTreeMap::new(),
            accesses: BTreeMap::new(),
            vpn: BTreeMap::new(),
        }
    }
}

impl VaultDocument {
    fn require_org(&self, org_id: u64) -> Result<()> {
        if self.organizations.contains_key(&org_id) {
            Ok(())
        } else {
            Err(VaultError::OrganizationNotFound(org_id))
        }
    }
}

impl JsonFileStore {
    /// Open (or create) the store in `storage_dir`
    pub async fn open(storage_dir: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(&storage_dir).await?;

        let path = storage_dir.join("vault.json");
        let document = if path.exists() {
            let contents = tokio::fs::read_to_string(&path).await?;
            let document: VaultDocument = serde_json::from_str(&contents)?;

            if document.version != DOCUMENT_VERSION {
                return Err(VaultError::StorageError(format!(
                    "Unsupported vault file version {}",
                    document.version
                )));
            }

            debug!(
                "Loaded vault from {:?} ({} organizations, {} access records, {} VPN entries)",
                path,
                document.organizations.len(),
                document.accesses.len(),
                document.vpn.len()
            );
            document
        } else {
            debug!("No existing vault file at {:?}", path);
            VaultDocument::default()
        };

        Ok(Self {
            storage_dir,
            document: Arc::new(RwLock::new(document)),
        })
    }

    /// Get the default storage directory
    pub fn default_dir() -> Result<PathBuf> {
        ProjectDirs::from("org", "access-vault", "access-vault")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| VaultError::StorageError("Could not determine data directory".to_string()))
    }

    /// Get the path to the vault file
    fn vault_file_path(&self) -> PathBuf {
        self.storage_dir.join("vault.json")
    }

    /// Write a document to disk atomically
    async fn persist(&self, document: &VaultDocument) -> Result<()> {
        let contents = serde_json::to_string_pretty(document)?;
        let path = self.vault_file_path();

        let temp_path = path.with_extension("tmp");
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        // Owner only; `mode` is not applied to a temp file left by an earlier crash
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tokio::fs::rename(&temp_path, &path).await?;

        debug!("Saved vault to {:?}", path);
        Ok(())
    }

    /// Apply `change` to a copy of the document, persist it, then publish it
    async fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut VaultDocument) -> Result<T> + Send,
    {
        let mut document = self.document.write().await;

        let mut staged = document.clone();
        let output = change(&mut staged)?;
        self.persist(&staged).await?;

        *document = staged;
        Ok(output)
    }
}

#[async_trait]
impl VaultStore for JsonFileStore {
    async fn load_master_credential(&self) -> Result<Option<MasterCredential>> {
        Ok(self.document.read().await.master.clone())
    }

    async fn save_master_credential(&self, credential: &MasterCredential) -> Result<()> {
        let credential = credential.clone();
        self.mutate(move |doc| {
            doc.master = Some(credential);
            Ok(())
        })
        .await?;

        debug!("Saved master credential");
        Ok(())
    }

    async fn add_organization(&self, name: &str) -> Result<Organization> {
        let name = name.to_string();
        let org = self
            .mutate(move |doc| {
                if doc.organizations.values().any(|o| o.name == name) {
                    return Err(VaultError::DuplicateOrganization(name));
                }

                let org = Organization {
                    id: next_id(&mut doc.last_ids.organization),
                    name,
                    created_at: chrono::Utc::now(),
                };
                doc.organizations.insert(org.id, org.clone());
                Ok(org)
            })
            .await?;

        debug!("Added organization {}", org.id);
        Ok(org)
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let doc = self.document.read().await;

        let mut orgs: Vec<Organization> = doc.organizations.values().cloned().collect();
        orgs.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(orgs)
    }

    async fn search_organizations(&self, query: &str) -> Result<Vec<Organization>> {
        let query = query.to_lowercase();

        Ok(self
            .list_organizations()
            .await?
            .into_iter()
            .filter(|o| o.name.to_lowercase().contains(&query))
            .collect())
    }

    async fn delete_organization(&self, id: u64) -> Result<()> {
        self.mutate(move |doc| {
            if doc.organizations.remove(&id).is_none() {
                return Err(VaultError::OrganizationNotFound(id));
            }

            doc.users.retain(|_, u| u.org_id != id);
            doc.accesses.retain(|_, a| a.org_id != id);
            doc.vpn.retain(|_, v| v.org_id != id);
            Ok(())
        })
        .await?;

        debug!("Deleted organization {} with its users, accesses and VPN entries", id);
        Ok(())
    }

    async fn add_user(&self, org_id: u64, name: &str) -> Result<User> {
        let name = name.to_string();
        let user = self
            .mutate(move |doc| {
                doc.require_org(org_id)?;

                let user = User {
                    id: next_id(&mut doc.last_ids.user),
                    org_id,
                    name,
                    created_at: chrono::Utc::now(),
                };
                doc.users.insert(user.id, user.clone());
                Ok(user)
            })
            .await?;

        debug!("Added user {} to organization {}", user.id, org_id);
        Ok(user)
    }

    async fn users_by_org(&self, org_id: u64) -> Result<Vec<User>> {
        let doc = self.document.read().await;

        let mut users: Vec<User> = doc
            .users
            .values()
            .filter(|u| u.org_id == org_id)
            .cloned()
            .collect();
        users.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(users)
    }

    async fn delete_user(&self, id: u64) -> Result<()> {
        self.mutate(move |doc| {
            if doc.users.remove(&id).is_none() {
                return Err(VaultError::UserNotFound(id));
            }

            for access in doc.accesses.values_mut() {
                if access.user_id == Some(id) {
                    access.user_id = None;
                }
            }
            Ok(())
        })
        .await?;

        debug!("Deleted user {}", id);
        Ok(())
    }

    async fn add_access(&self, access: AccessRecord) -> Result<AccessRecord> {
        let access = self
            .mutate(move |doc| {
                doc.require_org(access.org_id)?;
                if let Some(user_id) = access.user_id {
                    if !doc.users.contains_key(&user_id) {
                        return Err(VaultError::UserNotFound(user_id));
                    }
                }

                let mut access = access;
                access.id = next_id(&mut doc.last_ids.access);
                doc.accesses.insert(access.id, access.clone());
                Ok(access)
            })
            .await?;

        debug!("Added access record {}", access.id);
        Ok(access)
    }

    async fn get_access(&self, id: u64) -> Result<Option<AccessRecord>> {
        Ok(self.document.read().await.accesses.get(&id).cloned())
    }

    async fn accesses_by_org(&self, org_id: u64) -> Result<Vec<AccessListing>> {
        let doc = self.document.read().await;

        let mut listings: Vec<AccessListing> = doc
            .accesses
            .values()
            .filter(|a| a.org_id == org_id)
            .map(|a| AccessListing {
                access: a.clone(),
                user_name: a
                    .user_id
                    .and_then(|uid| doc.users.get(&uid))
                    .map(|u| u.name.clone()),
            })
            .collect();
        listings.sort_by(|a, b| access_order(&a.access).cmp(&access_order(&b.access)));
        Ok(listings)
    }

    async fn accesses_by_user(&self, user_id: u64) -> Result<Vec<AccessRecord>> {
        let doc = self.document.read().await;

        let mut accesses: Vec<AccessRecord> = doc
            .accesses
            .values()
            .filter(|a| a.user_id == Some(user_id))
            .cloned()
            .collect();
        accesses.sort_by(|a, b| access_order(a).cmp(&access_order(b)));
        Ok(accesses)
    }

    async fn delete_access(&self, id: u64) -> Result<()> {
        self.mutate(move |doc| {
            doc.accesses
                .remove(&id)
                .map(|_| ())
                .ok_or(VaultError::AccessNotFound(id))
        })
        .await?;

        debug!("Deleted access record {}", id);
        Ok(())
    }

    async fn add_vpn(&self, vpn: VpnRecord) -> Result<VpnRecord> {
        let vpn = self
            .mutate(move |doc| {
                doc.require_org(vpn.org_id)?;

                let mut vpn = vpn;
                vpn.id = next_id(&mut doc.last_ids.vpn);
                doc.vpn.insert(vpn.id, vpn.clone());
                Ok(vpn)
            })
            .await?;

        debug!("Added VPN entry {}", vpn.id);
        Ok(vpn)
    }

    async fn get_vpn(&self, id: u64) -> Result<Option<VpnRecord>> {
        Ok(self.document.read().await.vpn.get(&id).cloned())
    }

    async fn vpn_by_org(&self, org_id: u64) -> Result<Vec<VpnRecord>> {
        let doc = self.document.read().await;

        let mut entries: Vec<VpnRecord> = doc
            .vpn
            .values()
            .filter(|v| v.org_id == org_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| (&a.vpn_type, a.id).cmp(&(&b.vpn_type, b.id)));
        Ok(entries)
    }

    async fn delete_vpn(&self, id: u64) -> Result<()> {
        self.mutate(move |doc| {
            doc.vpn
                .remove(&id)
                .map(|_| ())
                .ok_or(VaultError::VpnNotFound(id))
        })
        .await?;

        debug!("Deleted VPN entry {}", id);
        Ok(())
    }

    async fn secret_fields(&self) -> Result<SecretFields> {
        let doc = self.document.read().await;

        Ok(SecretFields {
            access: doc
                .accesses
                .values()
                .map(|a| (a.id, a.password_encrypted.clone()))
                .collect(),
            vpn: doc
                .vpn
                .values()
                .map(|v| (v.id, v.password_encrypted.clone()))
                .collect(),
        })
    }

    async fn rekey(&self, credential: &MasterCredential, secrets: SecretFields) -> Result<()> {
        let credential = credential.clone();
        self.mutate(move |doc| {
            let access_ids: BTreeSet<u64> = secrets.access.iter().map(|(id, _)| *id).collect();
            let vpn_ids: BTreeSet<u64> = secrets.vpn.iter().map(|(id, _)| *id).collect();

            if access_ids.len() != secrets.access.len()
                || vpn_ids.len() != secrets.vpn.len()
                || !access_ids.iter().eq(doc.accesses.keys())
                || !vpn_ids.iter().eq(doc.vpn.keys())
            {
                return Err(VaultError::StorageError(
                    "Re-encrypted secrets do not match the stored records".to_string(),
                ));
            }

            for (id, encrypted) in secrets.access {
                if let Some(access) = doc.accesses.get_mut(&id) {
                    access.password_encrypted = encrypted;
                }
            }
            for (id, encrypted) in secrets.vpn {
                if let Some(vpn) = doc.vpn.get_mut(&id) {
                    vpn.password_encrypted = encrypted;
                }
            }
            doc.master = Some(credential);
            Ok(())
        })
        .await?;

        debug!("Replaced master credential and re-encrypted secrets");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "JSON File Storage"
    }
}

fn access_order(access: &AccessRecord) -> (&str, &str, u64) {
    (access.access_type.as_str(), access.protocol.as_str(), access.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().to_path_buf()).await.unwrap();
        (store, temp_dir)
    }

    fn credential(tag: &str) -> MasterCredential {
        MasterCredential {
            password_hash: tag.repeat(32),
            salt: [7u8; 16],
            kdf_iterations: 1_000,
        }
    }

    fn access(org_id: u64, user_id: Option<u64>, access_type: &str, protocol: &str) -> AccessRecord {
        AccessRecord {
            id: 0,
            org_id,
            user_id,
            access_type: access_type.to_string(),
            protocol: protocol.to_string(),
            host: "10.0.0.1".to_string(),
            port: "22".to_string(),
            login: "admin".to_string(),
            password_encrypted: format!("v1:{}:{}", access_type, protocol),
            description: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    fn vpn(org_id: u64, vpn_type: &str) -> VpnRecord {
        VpnRecord {
            id: 0,
            org_id,
            vpn_type: vpn_type.to_string(),
            server: "vpn.example.org".to_string(),
            login: "vpnuser".to_string(),
            password_encrypted: format!("v1:{}", vpn_type),
            description: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_master_credential_roundtrip() {
        let (store, temp) = test_store().await;
        assert!(store.load_master_credential().await.unwrap().is_none());

        store.save_master_credential(&credential("ab")).await.unwrap();
        store.save_master_credential(&credential("cd")).await.unwrap();
        assert_eq!(
            store.load_master_credential().await.unwrap(),
            Some(credential("cd"))
        );

        let reopened = JsonFileStore::open(temp.path().to_path_buf()).await.unwrap();
        assert_eq!(
            reopened.load_master_credential().await.unwrap(),
            Some(credential("cd"))
        );
    }

    #[tokio::test]
    async fn test_organizations_sorted_and_searchable() {
        let (store, _temp) = test_store().await;

        store.add_organization("Zeta Systems").await.unwrap();
        store.add_organization("Acme Corp").await.unwrap();
        store.add_organization("Horns and Hooves LLC").await.unwrap();

        let names: Vec<String> = store
            .list_organizations()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["Acme Corp", "Horns and Hooves LLC", "Zeta Systems"]);

        let found = store.search_organizations("HOOVES").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Horns and Hooves LLC");

        assert!(store.search_organizations("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_organization_rejected() {
        let (store, _temp) = test_store().await;

        store.add_organization("Acme").await.unwrap();
        let result = store.add_organization("Acme").await;

        assert!(matches!(result, Err(VaultError::DuplicateOrganization(_))));
        assert_eq!(store.list_organizations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_organization_cascades() {
        let (store, _temp) = test_store().await;

        let keep = store.add_organization("Keep").await.unwrap();
        let doomed = store.add_organization("Doomed").await.unwrap();

        let user = store.add_user(doomed.id, "alice").await.unwrap();
        store.add_access(access(doomed.id, Some(user.id), "server", "SSH")).await.unwrap();
        store.add_vpn(vpn(doomed.id, "OpenVPN")).await.unwrap();
        store.add_access(access(keep.id, None, "server", "RDP")).await.unwrap();

        store.delete_organization(doomed.id).await.unwrap();

        assert!(store.users_by_org(doomed.id).await.unwrap().is_empty());
        assert!(store.accesses_by_org(doomed.id).await.unwrap().is_empty());
        assert!(store.vpn_by_org(doomed.id).await.unwrap().is_empty());
        assert_eq!(store.accesses_by_org(keep.id).await.unwrap().len(), 1);

        let secrets = store.secret_fields().await.unwrap();
        assert_eq!(secrets.access.len(), 1);
        assert!(secrets.vpn.is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_detaches_accesses() {
        let (store, _temp) = test_store().await;

        let org = store.add_organization("Acme").await.unwrap();
        let user = store.add_user(org.id, "bob").await.unwrap();
        let record = store.add_access(access(org.id, Some(user.id), "db", "PostgreSQL")).await.unwrap();

        let listing = store.accesses_by_org(org.id).await.unwrap();
        assert_eq!(listing[0].user_name.as_deref(), Some("bob"));
        assert_eq!(store.accesses_by_user(user.id).await.unwrap().len(), 1);

        store.delete_user(user.id).await.unwrap();

        let kept = store.get_access(record.id).await.unwrap().unwrap();
        assert_eq!(kept.user_id, None);
        assert_eq!(store.accesses_by_org(org.id).await.unwrap()[0].user_name, None);
    }

    #[tokio::test]
    async fn test_missing_references_rejected() {
        let (store, _temp) = test_store().await;

        assert!(matches!(
            store.add_user(42, "ghost").await,
            Err(VaultError::OrganizationNotFound(42))
        ));

        let org = store.add_organization("Acme").await.unwrap();
        assert!(matches!(
            store.add_access(access(org.id, Some(9), "server", "SSH")).await,
            Err(VaultError::UserNotFound(9))
        ));
        assert!(matches!(
            store.add_vpn(vpn(77, "IPsec")).await,
            Err(VaultError::OrganizationNotFound(77))
        ));
        assert!(matches!(
            store.delete_access(5).await,
            Err(VaultError::AccessNotFound(5))
        ));
    }

    #[tokio::test]
    async fn test_accesses_sorted_by_type_then_protocol() {
        let (store, _temp) = test_store().await;
        let org = store.add_organization("Acme").await.unwrap();

        store.add_access(access(org.id, None, "server", "SSH")).await.unwrap();
        store.add_access(access(org.id, None, "database", "MySQL")).await.unwrap();
        store.add_access(access(org.id, None, "server", "RDP")).await.unwrap();

        let order: Vec<(String, String)> = store
            .accesses_by_org(org.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| (l.access.access_type, l.access.protocol))
            .collect();

        assert_eq!(
            order,
            vec![
                ("database".to_string(), "MySQL".to_string()),
                ("server".to_string(), "RDP".to_string()),
                ("server".to_string(), "SSH".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_ids_not_reused() {
        let (store, _temp) = test_store().await;
        let org = store.add_organization("Acme").await.unwrap();

        let first = store.add_vpn(vpn(org.id, "WireGuard")).await.unwrap();
        store.delete_vpn(first.id).await.unwrap();
        let second = store.add_vpn(vpn(org.id, "WireGuard")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_ciphertext_persisted_byte_for_byte() {
        let (store, temp) = test_store().await;
        let org = store.add_organization("Acme").await.unwrap();

        let mut record = access(org.id, None, "server", "SSH");
        record.password_encrypted = "v1:00ff:  odd \u{0} text \u{e9}\n".to_string();
        let stored = store.add_access(record.clone()).await.unwrap();

        let reopened = JsonFileStore::open(temp.path().to_path_buf()).await.unwrap();
        let loaded = reopened.get_access(stored.id).await.unwrap().unwrap();

        assert_eq!(loaded.password_encrypted, record.password_encrypted);
    }

    #[tokio::test]
    async fn test_rekey_replaces_everything() {
        let (store, _temp) = test_store().await;
        store.save_master_credential(&credential("ab")).await.unwrap();

        let org = store.add_organization("Acme").await.unwrap();
        let a = store.add_access(access(org.id, None, "server", "SSH")).await.unwrap();
        let v = store.add_vpn(vpn(org.id, "OpenVPN")).await.unwrap();

        let secrets = SecretFields {
            access: vec![(a.id, "new-a".to_string())],
            vpn: vec![(v.id, "new-v".to_string())],
        };
        store.rekey(&credential("cd"), secrets).await.unwrap();

        assert_eq!(
            store.load_master_credential().await.unwrap(),
            Some(credential("cd"))
        );
        assert_eq!(store.get_access(a.id).await.unwrap().unwrap().password_encrypted, "new-a");
        assert_eq!(store.get_vpn(v.id).await.unwrap().unwrap().password_encrypted, "new-v");
    }

    #[tokio::test]
    async fn test_rekey_incomplete_changes_nothing() {
        let (store, temp) = test_store().await;
        store.save_master_credential(&credential("ab")).await.unwrap();

        let org = store.add_organization("Acme").await.unwrap();
        let a = store.add_access(access(org.id, None, "server", "SSH")).await.unwrap();
        store.add_access(access(org.id, None, "server", "RDP")).await.unwrap();
        let before = store.secret_fields().await.unwrap();

        let partial = SecretFields {
            access: vec![(a.id, "new-a".to_string())],
            vpn: vec![],
        };
        let result = store.rekey(&credential("cd"), partial).await;

        assert!(matches!(result, Err(VaultError::StorageError(_))));
        assert_eq!(store.secret_fields().await.unwrap(), before);
        assert_eq!(
            store.load_master_credential().await.unwrap(),
            Some(credential("ab"))
        );

        let reopened = JsonFileStore::open(temp.path().to_path_buf()).await.unwrap();
        assert_eq!(reopened.secret_fields().await.unwrap(), before);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_vault_file_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (store, temp) = test_store().await;
        let path = temp.path().join("vault.json");

        // Leftover temp file from an interrupted save
        std::fs::write(path.with_extension("tmp"), "{}").unwrap();
        std::fs::set_permissions(path.with_extension("tmp"), std::fs::Permissions::from_mode(0o644))
            .unwrap();

        store.save_master_credential(&credential("ab")).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[tokio::test]
    async fn test_unsupported_file_version() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::write(temp_dir.path().join("vault.json"), r#"{"version": 99, "master": null}"#)
            .await
            .unwrap();

        let result = JsonFileStore::open(temp_dir.path().to_path_buf()).await;
        assert!(matches!(result, Err(VaultError::StorageError(_))));
    }
}
