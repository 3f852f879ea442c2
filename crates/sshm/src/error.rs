// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors surfaced by the command-line front end.

use sshm_core::{StoreError, VaultError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("cannot determine a profile name; pass --profile or set default_profile")]
    NoProfileName,

    /// The user declined a confirmation prompt.
    #[error("aborted, nothing was changed")]
    Aborted,

    #[error("failed to read confirmation: {0}")]
    Confirm(std::io::Error),

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        CliError::Vault(err.into())
    }
}
