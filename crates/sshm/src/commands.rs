// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.

use std::io::{BufRead, Write};
use std::sync::Arc;

use colored::Colorize;
use sshm_config::SshmConfig;
use sshm_core::VaultError;
use sshm_storage::SqliteStore;
use sshm_vault::{prompt, ConnectionTarget, CredentialVault};
use tracing::info;

use crate::error::CliError;
use crate::launch;

const RESET_WARNING: &str =
    "This is a destructive operation! Reset the database and delete every profile and login?";

/// Open the configured database and wrap it in a vault.
pub async fn open_vault(config: &SshmConfig) -> Result<CredentialVault, CliError> {
    let store = SqliteStore::open(&config.storage).await?;
    Ok(CredentialVault::new(Arc::new(store), config.vault.kdf_params()))
}

/// Pick the profile name: explicit flag, then configured default, then the
/// OS login name.
pub fn resolve_profile(
    explicit: Option<&str>,
    configured: Option<&str>,
    os_user: Option<String>,
) -> Result<String, CliError> {
    explicit
        .map(str::to_string)
        .or_else(|| configured.map(str::to_string))
        .or(os_user)
        .filter(|name| !name.trim().is_empty())
        .ok_or(CliError::NoProfileName)
}

/// The current OS login name.
pub fn os_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
}

fn profile_for(explicit: Option<&str>, config: &SshmConfig) -> Result<String, CliError> {
    resolve_profile(explicit, config.default_profile.as_deref(), os_user())
}

pub async fn db_init(config: &SshmConfig) -> Result<(), CliError> {
    open_vault(config).await?.initialize_storage().await?;
    println!("{} {}", "Database initialized at".green(), config.storage.database_path);
    Ok(())
}

pub async fn db_reset(config: &SshmConfig, yes: bool) -> Result<(), CliError> {
    if !yes {
        let question = RESET_WARNING.red().to_string();
        let stdin = std::io::stdin();
        if !confirm(&question, &mut stdin.lock())? {
            return Err(CliError::Aborted);
        }
    }
    open_vault(config).await?.reset_storage().await?;
    info!(path = %config.storage.database_path, "database reset");
    println!("{}", "Database has been reset.".green());
    Ok(())
}

/// Ask a `y/N` question on stderr. Anything but `y`/`yes` is a no.
fn confirm(question: &str, input: &mut impl BufRead) -> Result<bool, CliError> {
    eprint!("{question} [y/N] ");
    std::io::stderr().flush().map_err(CliError::Confirm)?;
    let mut answer = String::new();
    input.read_line(&mut answer).map_err(CliError::Confirm)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub async fn init_profile(config: &SshmConfig, name: Option<&str>) -> Result<(), CliError> {
    let name = profile_for(name, config)?;
    let vault = open_vault(config).await?;
    let password = prompt::read_new_master_password(&name)?;
    let profile = vault.create_profile(&name, &password).await?;
    println!("{} `{}` (id {})", "Created profile".green(), profile.name, profile.id);
    Ok(())
}

pub async fn add(
    config: &SshmConfig,
    name: &str,
    host: &str,
    username: &str,
    profile: Option<&str>,
    with_secret: bool,
) -> Result<(), CliError> {
    let profile = profile_for(profile, config)?;
    let vault = open_vault(config).await?;

    let secret = if with_secret {
        Some(prompt::read_login_secret(name)?)
    } else {
        None
    };
    let password = prompt::read_master_password(&profile)?;
    let session = vault.authenticate_profile(&profile, &password).await?;

    let login = vault
        .add_login(&session, name, username, host, secret.as_ref())
        .await?;
    println!("{} `{}` (id {})", "Created login".green(), login.name, login.id);
    Ok(())
}

pub async fn list(config: &SshmConfig, profile: Option<&str>) -> Result<(), CliError> {
    let profile = profile_for(profile, config)?;
    let logins = open_vault(config).await?.list_logins(&profile).await?;

    if logins.is_empty() {
        println!("{}", format!("No logins for profile `{profile}`.").yellow());
        return Ok(());
    }
    let width = logins.iter().map(|l| l.name.len()).max().unwrap_or(0);
    for login in logins {
        let secret = if login.has_secret() {
            "secret".cyan()
        } else {
            "no secret".dimmed()
        };
        println!(
            "{}  {}@{}  {secret}",
            format!("{:<width$}", login.name).bold(),
            login.username,
            login.host
        );
    }
    Ok(())
}

pub async fn ssh(config: &SshmConfig, name: &str, profile: Option<&str>) -> Result<(), CliError> {
    let profile = profile_for(profile, config)?;
    let vault = open_vault(config).await?;
    let (login, owner) = vault.find_login(name).await?;

    let target = if login.has_secret() {
        let password = prompt::read_master_password(&profile)?;
        let session = vault.authenticate_profile(&profile, &password).await?;
        eprintln!("{}", "Authenticated.".green());
        vault.connection_target(&session, name).await?
    } else {
        if owner.name != profile {
            return Err(VaultError::AccessDenied.into());
        }
        ConnectionTarget {
            username: login.username,
            host: login.host,
            secret: None,
        }
    };

    eprintln!("ssh {}@{}", target.username, target.host);
    let in_tmux = launch::inside_tmux(
        std::env::var("TERM").ok().as_deref(),
        std::env::var("TMUX").ok().as_deref(),
    );
    let status = launch::run(launch::build_command(&config.launcher, &target, in_tmux))?;
    eprintln!("SSH process ended with {status}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn explicit_profile_wins() {
        let name = resolve_profile(Some("ops"), Some("dev"), Some("alice".into())).unwrap();
        assert_eq!(name, "ops");
    }

    #[test]
    fn configured_default_beats_os_user() {
        let name = resolve_profile(None, Some("dev"), Some("alice".into())).unwrap();
        assert_eq!(name, "dev");
    }

    #[test]
    fn os_user_is_the_fallback() {
        let name = resolve_profile(None, None, Some("alice".into())).unwrap();
        assert_eq!(name, "alice");
    }

    #[test]
    fn no_source_is_an_error() {
        assert!(matches!(
            resolve_profile(None, None, None),
            Err(CliError::NoProfileName)
        ));
        assert!(matches!(
            resolve_profile(Some("  "), None, None),
            Err(CliError::NoProfileName)
        ));
    }

    #[test]
    fn confirm_accepts_only_yes() {
        assert!(confirm("reset?", &mut Cursor::new("y\n")).unwrap());
        assert!(confirm("reset?", &mut Cursor::new("YES\n")).unwrap());
        assert!(!confirm("reset?", &mut Cursor::new("\n")).unwrap());
        assert!(!confirm("reset?", &mut Cursor::new("nope\n")).unwrap());
        assert!(!confirm("reset?", &mut Cursor::new("")).unwrap());
    }
}
