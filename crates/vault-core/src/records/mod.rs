//! Organizations, users, access records and VPN entries

mod types;

pub use types::{AccessListing, AccessRecord, NewAccess, NewVpn, Organization, User, VpnRecord};
