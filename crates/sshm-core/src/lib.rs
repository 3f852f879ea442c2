// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the sshm credential vault.
//!
//! Holds the error taxonomy, the value types that flow between storage and
//! the vault, and the [`CredentialStore`] trait storage backends implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{StoreError, VaultError};
pub use traits::CredentialStore;
pub use types::{
    KdfParams, Login, LoginId, NewLogin, NewProfile, Profile, ProfileCredentials, ProfileId,
    StoredProfile,
};
