//! Record type definitions
//!
//! Stored records carry secrets only as encrypted fields. Plaintext enters
//! through the `New*` drafts and leaves through `SecretString`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Organization grouping users, access records and VPN entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Store-assigned identifier
    pub id: u64,
    /// Unique display name
    pub name: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// Person within an organization that access records can belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub org_id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Remote access login (RDP, SSH, database, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Store-assigned identifier (ignored on insert)
    pub id: u64,
    pub org_id: u64,
    /// Owning user; cleared when the user is deleted
    pub user_id: Option<u64>,
    /// Kind of access (e.g. "server", "database")
    pub access_type: String,
    /// Protocol (e.g. "RDP", "SSH")
    pub protocol: String,
    pub host: String,
    pub port: String,
    pub login: String,
    /// Encrypted field (`v1:nonce:tag:ciphertext`), or empty for no password
    pub password_encrypted: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Access record joined with its owner's name for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessListing {
    pub access: AccessRecord,
    pub user_name: Option<String>,
}

/// VPN profile for an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnRecord {
    /// Store-assigned identifier (ignored on insert)
    pub id: u64,
    pub org_id: u64,
    /// VPN flavour (e.g. "OpenVPN", "WireGuard")
    pub vpn_type: String,
    pub server: String,
    pub login: String,
    /// Encrypted field, or empty for no password
    pub password_encrypted: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// New access record with its plaintext password
#[derive(Clone, Default)]
pub struct NewAccess {
    pub org_id: u64,
    pub user_id: Option<u64>,
    pub access_type: String,
    pub protocol: String,
    pub host: String,
    pub port: String,
    pub login: String,
    /// Plaintext, wiped when the draft is dropped
    pub password: Zeroizing<String>,
    pub description: String,
}

impl NewAccess {
    /// Build the stored form around an already encrypted password
    pub(crate) fn to_record(&self, password_encrypted: String) -> AccessRecord {
        AccessRecord {
            id: 0,
            org_id: self.org_id,
            user_id: self.user_id,
            access_type: self.access_type.clone(),
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port.clone(),
            login: self.login.clone(),
            password_encrypted,
            description: self.description.clone(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for NewAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccess")
            .field("org_id", &self.org_id)
            .field("user_id", &self.user_id)
            .field("access_type", &self.access_type)
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("description", &self.description)
            .finish()
    }
}

/// New VPN entry with its plaintext password
#[derive(Clone, Default)]
pub struct NewVpn {
    pub org_id: u64,
    pub vpn_type: String,
    pub server: String,
    pub login: String,
    /// Plaintext, wiped when the draft is dropped
    pub password: Zeroizing<String>,
    pub description: String,
}

impl NewVpn {
    pub(crate) fn to_record(&self, password_encrypted: String) -> VpnRecord {
        VpnRecord {
            id: 0,
            org_id: self.org_id,
            vpn_type: self.vpn_type.clone(),
            server: self.server.clone(),
            login: self.login.clone(),
            password_encrypted,
            description: self.description.clone(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for NewVpn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewVpn")
            .field("org_id", &self.org_id)
            .field("vpn_type", &self.vpn_type)
            .field("server", &self.server)
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("description", &self.description)
            .finish()
    }
}
