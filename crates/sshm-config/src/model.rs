// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for sshm.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};
use sshm_core::KdfParams;

/// Top-level sshm configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SshmConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Profile used when a command is not given `--profile`.
    /// `None` falls back to the OS login name.
    #[serde(default)]
    pub default_profile: Option<String>,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub vault: VaultConfig,

    #[serde(default)]
    pub launcher: LauncherConfig,
}

impl Default for SshmConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_profile: None,
            storage: StorageConfig::default(),
            vault: VaultConfig::default(),
            launcher: LauncherConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("sshm").join("sshm.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("sshm.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Key-derivation cost for newly created profiles.
///
/// Existing profiles keep the parameters they were created with.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB).
    #[serde(default = "default_kdf_memory_cost")]
    pub kdf_memory_cost: u32,

    /// Argon2id iteration count (default: 3).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2id parallelism lanes (default: 4).
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_memory_cost: default_kdf_memory_cost(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

impl VaultConfig {
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_cost: self.kdf_memory_cost,
            iterations: self.kdf_iterations,
            parallelism: self.kdf_parallelism,
        }
    }
}

fn default_kdf_memory_cost() -> u32 {
    65536
}

fn default_kdf_iterations() -> u32 {
    3
}

fn default_kdf_parallelism() -> u32 {
    4
}

/// How `sshm ssh` starts the connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherConfig {
    /// The ssh client executable.
    #[serde(default = "default_ssh_program")]
    pub ssh_program: String,

    /// Executable used to feed a stored secret to ssh.
    #[serde(default = "default_sshpass_program")]
    pub sshpass_program: String,

    /// Open the session in a new tmux pane when running inside tmux.
    #[serde(default = "default_tmux_split")]
    pub tmux_split: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            ssh_program: default_ssh_program(),
            sshpass_program: default_sshpass_program(),
            tmux_split: default_tmux_split(),
        }
    }
}

fn default_ssh_program() -> String {
    "ssh".to_string()
}

fn default_sshpass_program() -> String {
    "sshpass".to_string()
}

fn default_tmux_split() -> bool {
    true
}
