//! Access Vault CLI
//!
//! Stores RDP/SSH/database logins and VPN profiles per organization, with
//! every password encrypted under a key derived from the master password.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Access Vault - encrypted store for remote-access credentials
#[derive(Parser, Debug)]
#[command(name = "access-vault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Vault directory (defaults to the platform data directory)
    #[arg(long, env = "ACCESS_VAULT_DIR")]
    data_dir: Option<PathBuf>,

    /// Master password (prompted for when omitted)
    #[arg(long, env = "ACCESS_VAULT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new vault and set its master password
    Init,

    /// Change the master password and re-encrypt every secret
    ChangePassword,

    /// Manage organizations
    #[command(subcommand)]
    Org(OrgCommand),

    /// Manage users of an organization
    #[command(subcommand)]
    User(UserCommand),

    /// Manage access records (RDP, SSH, databases, ...)
    #[command(subcommand)]
    Access(AccessCommand),

    /// Manage VPN entries
    #[command(subcommand)]
    Vpn(VpnCommand),
}

#[derive(Subcommand, Debug)]
enum OrgCommand {
    /// Add an organization
    Add { name: String },
    /// List organizations
    List,
    /// Search organizations by name
    Search { query: String },
    /// Delete an organization with all its users, accesses and VPN entries
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Add a user to an organization
    Add { org_id: u64, name: String },
    /// List users of an organization
    List { org_id: u64 },
    /// Delete a user (their access records are kept)
    Delete { id: u64 },
}

#[derive(Args, Debug)]
struct AccessArgs {
    /// Organization id
    org_id: u64,
    /// Kind of access, e.g. "server" or "database"
    #[arg(long = "type")]
    access_type: String,
    /// Protocol, e.g. RDP, SSH, PostgreSQL
    #[arg(long)]
    protocol: String,
    #[arg(long, default_value = "")]
    host: String,
    #[arg(long, default_value = "")]
    port: String,
    #[arg(long, default_value = "")]
    login: String,
    /// Owning user id
    #[arg(long)]
    user: Option<u64>,
    #[arg(long, default_value = "")]
    description: String,
    /// Store without a password instead of prompting for one
    #[arg(long)]
    no_secret: bool,
}

#[derive(Subcommand, Debug)]
enum AccessCommand {
    /// Add an access record (the password is prompted for)
    Add(AccessArgs),
    /// List access records of an organization
    List {
        org_id: u64,
        /// List a user's records instead; `org_id` is ignored
        #[arg(long)]
        user: Option<u64>,
    },
    /// Print the decrypted password of an access record
    Show { id: u64 },
    /// Delete an access record
    Delete { id: u64 },
}

#[derive(Args, Debug)]
struct VpnArgs {
    /// Organization id
    org_id: u64,
    /// VPN type, e.g. OpenVPN, WireGuard, L2TP
    #[arg(long = "type")]
    vpn_type: String,
    #[arg(long, default_value = "")]
    server: String,
    #[arg(long, default_value = "")]
    login: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Store without a password instead of prompting for one
    #[arg(long)]
    no_secret: bool,
}

#[derive(Subcommand, Debug)]
enum VpnCommand {
    /// Add a VPN entry (the password is prompted for)
    Add(VpnArgs),
    /// List VPN entries of an organization
    List { org_id: u64 },
    /// Print the decrypted password of a VPN entry
    Show { id: u64 },
    /// Delete a VPN entry
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => vault_core::JsonFileStore::default_dir()
            .context("No --data-dir given and no platform data directory")?,
    };

    commands::run(&data_dir, cli.password, cli.command).await
}
