// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the sshm credential vault.
//!
//! [`StoreError`] is what storage backends report. [`VaultError`] is the
//! taxonomy the vault exposes to its callers; storage failures reach callers
//! either mapped to a domain variant (not found, duplicate) or wrapped in
//! [`VaultError::Storage`].
//!
//! No variant ever carries a password, a password hash, a derived key or a
//! decrypted secret.

use thiserror::Error;

/// Errors reported by a [`CredentialStore`](crate::traits::CredentialStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A single-row select matched zero rows.
    #[error("no {entity} matches `{key}`")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness constraint on a `name` column was violated.
    #[error("{entity} `{key}` already exists")]
    Conflict { entity: &'static str, key: String },

    /// `create_schema` found the tables already present.
    #[error("schema is already initialized")]
    AlreadyInitialized,

    /// A row was read but did not have the expected shape.
    #[error("malformed {entity} row: {reason}")]
    MalformedRow { entity: &'static str, reason: String },

    /// Connection, query or migration failure.
    #[error("storage backend error: {source}")]
    Backend {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors returned by vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("profile `{0}` not found")]
    ProfileNotFound(String),

    #[error("login `{0}` not found")]
    LoginNotFound(String),

    #[error("profile `{0}` already exists")]
    DuplicateProfile(String),

    #[error("login `{0}` already exists")]
    DuplicateLogin(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    /// The session's profile does not own the requested login.
    #[error("access denied")]
    AccessDenied,

    /// Wrong key, tampered or truncated ciphertext.
    #[error("secret could not be decrypted -- wrong key or corrupted data")]
    Decryption,

    #[error("storage is already initialized")]
    SchemaAlreadyInitialized,

    #[error(transparent)]
    Storage(StoreError),

    /// Failure inside a cryptographic primitive (RNG, invalid KDF parameters).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Failure collecting input from the user.
    #[error("input error: {0}")]
    Prompt(String),
}

impl From<StoreError> for VaultError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyInitialized => VaultError::SchemaAlreadyInitialized,
            other => VaultError::Storage(other),
        }
    }
}
