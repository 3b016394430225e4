//! Command implementations

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;
use vault_core::{NewAccess, NewVpn, Vault, VaultState, Zeroizing};

use crate::{AccessArgs, AccessCommand, Command, OrgCommand, UserCommand, VpnArgs, VpnCommand};

/// Open the vault in `data_dir` and run one command against it
pub async fn run(data_dir: &Path, password: Option<String>, command: Command) -> Result<()> {
    let mut vault = Vault::open_in(data_dir)
        .await
        .with_context(|| format!("Failed to open vault in {}", data_dir.display()))?;
    debug!("Vault directory: {}", data_dir.display());

    match command {
        Command::Init => init(&mut vault, password).await,
        Command::ChangePassword => change_password(&mut vault, password).await,
        Command::Org(cmd) => {
            unlock(&mut vault, password).await?;
            org(&vault, cmd).await
        }
        Command::User(cmd) => {
            unlock(&mut vault, password).await?;
            user(&vault, cmd).await
        }
        Command::Access(cmd) => {
            unlock(&mut vault, password).await?;
            access(&vault, cmd).await
        }
        Command::Vpn(cmd) => {
            unlock(&mut vault, password).await?;
            vpn(&vault, cmd).await
        }
    }
}

async fn init(vault: &mut Vault, password: Option<String>) -> Result<()> {
    if vault.state() != VaultState::NotInitialized {
        bail!("Vault is already initialized");
    }

    let password = match password {
        Some(p) => Zeroizing::new(p),
        None => new_password("Choose a master password: ")?,
    };

    vault
        .initialize(&password)
        .await
        .context("Failed to initialize vault")?;

    println!("Vault initialized.");
    Ok(())
}

async fn change_password(vault: &mut Vault, password: Option<String>) -> Result<()> {
    let old = match password {
        Some(p) => Zeroizing::new(p),
        None => get_password("Current master password: ")?,
    };
    vault.unlock(&old).await?;

    let new = new_password("New master password: ")?;
    vault
        .change_master_password(&old, &new)
        .await
        .context("Failed to change master password")?;

    println!("Master password changed.");
    Ok(())
}

async fn unlock(vault: &mut Vault, password: Option<String>) -> Result<()> {
    if vault.state() == VaultState::NotInitialized {
        bail!("Vault is not initialized. Run `access-vault init` first.");
    }

    let password = match password {
        Some(p) => Zeroizing::new(p),
        None => get_password("Master password: ")?,
    };

    vault.unlock(&password).await?;
    Ok(())
}

async fn org(vault: &Vault, cmd: OrgCommand) -> Result<()> {
    match cmd {
        OrgCommand::Add { name } => {
            let org = vault.add_organization(&name).await?;
            println!("Added organization {} ({})", org.name, org.id);
        }
        OrgCommand::List => {
            let orgs = vault.organizations().await?;
            if orgs.is_empty() {
                println!("No organizations.");
            }
            for org in orgs {
                println!("{:>4}  {}", org.id, org.name);
            }
        }
        OrgCommand::Search { query } => {
            for org in vault.search_organizations(&query).await? {
                println!("{:>4}  {}", org.id, org.name);
            }
        }
        OrgCommand::Delete { id } => {
            vault.delete_organization(id).await?;
            println!("Deleted organization {}", id);
        }
    }
    Ok(())
}

async fn user(vault: &Vault, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::Add { org_id, name } => {
            let user = vault.add_user(org_id, &name).await?;
            println!("Added user {} ({})", user.name, user.id);
        }
        UserCommand::List { org_id } => {
            for user in vault.users(org_id).await? {
                println!("{:>4}  {}", user.id, user.name);
            }
        }
        UserCommand::Delete { id } => {
            vault.delete_user(id).await?;
            println!("Deleted user {}", id);
        }
    }
    Ok(())
}

async fn access(vault: &Vault, cmd: AccessCommand) -> Result<()> {
    match cmd {
        AccessCommand::Add(args) => add_access(vault, args).await?,
        AccessCommand::List { org_id, user } => match user {
            Some(user_id) => {
                for record in vault.user_accesses(user_id).await? {
                    println!(
                        "{:>4}  {:<10} {:<12} {}:{}  {}",
                        record.id,
                        record.access_type,
                        record.protocol,
                        record.host,
                        record.port,
                        record.login
                    );
                }
            }
            None => {
                for listing in vault.accesses(org_id).await? {
                    let record = &listing.access;
                    println!(
                        "{:>4}  {:<10} {:<12} {}:{}  {}  [{}]",
                        record.id,
                        record.access_type,
                        record.protocol,
                        record.host,
                        record.port,
                        record.login,
                        listing.user_name.as_deref().unwrap_or("-")
                    );
                }
            }
        },
        AccessCommand::Show { id } => {
            let secret = vault.reveal_access_password(id).await?;
            println!("{}", secret.expose());
        }
        AccessCommand::Delete { id } => {
            vault.delete_access(id).await?;
            println!("Deleted access {}", id);
        }
    }
    Ok(())
}

async fn add_access(vault: &Vault, args: AccessArgs) -> Result<()> {
    let password = if args.no_secret {
        Zeroizing::new(String::new())
    } else {
        get_password("Access password: ")?
    };

    let record = vault
        .add_access(&NewAccess {
            org_id: args.org_id,
            user_id: args.user,
            access_type: args.access_type,
            protocol: args.protocol,
            host: args.host,
            port: args.port,
            login: args.login,
            password,
            description: args.description,
        })
        .await?;

    println!("Added access {}", record.id);
    Ok(())
}

async fn vpn(vault: &Vault, cmd: VpnCommand) -> Result<()> {
    match cmd {
        VpnCommand::Add(args) => add_vpn(vault, args).await?,
        VpnCommand::List { org_id } => {
            for record in vault.vpn_entries(org_id).await? {
                println!(
                    "{:>4}  {:<10} {}  {}",
                    record.id, record.vpn_type, record.server, record.login
                );
            }
        }
        VpnCommand::Show { id } => {
            let secret = vault.reveal_vpn_password(id).await?;
            println!("{}", secret.expose());
        }
        VpnCommand::Delete { id } => {
            vault.delete_vpn(id).await?;
            println!("Deleted VPN entry {}", id);
        }
    }
    Ok(())
}

async fn add_vpn(vault: &Vault, args: VpnArgs) -> Result<()> {
    let password = if args.no_secret {
        Zeroizing::new(String::new())
    } else {
        get_password("VPN password: ")?
    };

    let record = vault
        .add_vpn(&NewVpn {
            org_id: args.org_id,
            vpn_type: args.vpn_type,
            server: args.server,
            login: args.login,
            password,
            description: args.description,
        })
        .await?;

    println!("Added VPN entry {}", record.id);
    Ok(())
}

fn get_password(prompt: &str) -> Result<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .context("Failed to read password")
}

fn new_password(prompt: &str) -> Result<Zeroizing<String>> {
    let password = get_password(prompt)?;
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let confirm = get_password("Confirm password: ")?;
    if *password != *confirm {
        bail!("Passwords do not match");
    }

    Ok(password)
}
