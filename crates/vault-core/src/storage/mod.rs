//! Storage backends for vault persistence
//!
//! Records are persisted with their secrets already encrypted; the backends
//! treat every encrypted field as opaque text.

mod credential;
mod json_file;
mod traits;

pub use credential::MasterCredential;
pub use json_file::JsonFileStore;
pub use traits::{SecretFields, VaultStore};
