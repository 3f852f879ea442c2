// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/sshm/sshm.toml` < `~/.config/sshm/sshm.toml` <
//! `./sshm.toml`, then `SSHM_*` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SshmConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sshm/sshm.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "sshm.toml";

/// Config sections whose keys may be set from the environment.
const ENV_SECTIONS: &[&str] = &["storage", "vault", "launcher"];

/// `SSHM_` variables that are not configuration keys.
const ENV_IGNORED: &[&str] = &["master_password"];

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sshm").join("sshm.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SshmConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SshmConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SshmConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SshmConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SshmConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for standard config loading.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(SshmConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(path) = user_config_path() {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider: `SSHM_STORAGE_DATABASE_PATH` -> `storage.database_path`.
///
/// Only the leading section name is turned into a dot, so keys that contain
/// underscores (`database_path`, `kdf_memory_cost`) stay intact.
fn env_provider() -> Env {
    Env::prefixed("SSHM_")
        .ignore(ENV_IGNORED)
        .map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
