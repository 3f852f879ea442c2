// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for sshm.
//!
//! Layered TOML files plus `SSHM_*` environment overrides, strict key
//! checking, and miette diagnostics for anything that does not parse or
//! validate.
//!
//! ```no_run
//! use sshm_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("database: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SshmConfig;

/// Load configuration and validate it.
///
/// With `explicit_path`, only that file (plus env overrides) is read;
/// otherwise the standard hierarchy is used.
pub fn load_and_validate(explicit_path: Option<&Path>) -> Result<SshmConfig, Vec<ConfigError>> {
    let loaded = match explicit_path {
        Some(path) => loader::load_config_from_path(path),
        None => loader::load_config(),
    };
    finish(loaded)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<SshmConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

#[allow(clippy::result_large_err)]
fn finish(loaded: Result<SshmConfig, figment::Error>) -> Result<SshmConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
