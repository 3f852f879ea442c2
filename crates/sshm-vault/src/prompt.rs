// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hidden input of master passwords and login secrets.
//!
//! The master password comes from `SSHM_MASTER_PASSWORD` when set (headless
//! use), otherwise from an interactive TTY prompt via `rpassword`.

use secrecy::SecretString;
use sshm_core::VaultError;

/// Environment variable holding the master password for non-interactive use.
pub const MASTER_PASSWORD_ENV: &str = "SSHM_MASTER_PASSWORD";

fn from_env() -> Option<SecretString> {
    match std::env::var(MASTER_PASSWORD_ENV) {
        Ok(value) if !value.is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

fn require_terminal() -> Result<(), VaultError> {
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        Ok(())
    } else {
        Err(VaultError::Prompt(format!(
            "no master password provided; set {MASTER_PASSWORD_ENV} or run interactively"
        )))
    }
}

fn read_hidden(label: &str) -> Result<String, VaultError> {
    rpassword::prompt_password(label)
        .map_err(|e| VaultError::Prompt(format!("failed to read input: {e}")))
}

fn non_empty(value: String, what: &str) -> Result<SecretString, VaultError> {
    if value.is_empty() {
        return Err(VaultError::Prompt(format!("empty {what} not allowed")));
    }
    Ok(SecretString::from(value))
}

/// Master password for profile `profile`.
pub fn read_master_password(profile: &str) -> Result<SecretString, VaultError> {
    if let Some(password) = from_env() {
        return Ok(password);
    }
    require_terminal()?;
    non_empty(
        read_hidden(&format!("Master password for `{profile}`: "))?,
        "master password",
    )
}

/// New master password, typed twice when prompted interactively.
pub fn read_new_master_password(profile: &str) -> Result<SecretString, VaultError> {
    if let Some(password) = from_env() {
        return Ok(password);
    }
    require_terminal()?;
    let first = read_hidden(&format!("New master password for `{profile}`: "))?;
    let second = read_hidden("Confirm master password: ")?;
    if first != second {
        return Err(VaultError::Prompt("passwords do not match".to_string()));
    }
    non_empty(first, "master password")
}

/// Secret of login `login`. Always interactive.
pub fn read_login_secret(login: &str) -> Result<SecretString, VaultError> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(VaultError::Prompt(
            "a login secret can only be entered interactively".to_string(),
        ));
    }
    non_empty(read_hidden(&format!("Secret for `{login}`: "))?, "secret")
}
