// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential protection and access control for sshm.
//!
//! - [`kdf`]: Argon2id password hashing and key derivation.
//! - [`crypto`]: AES-256-GCM sealing of login secrets.
//! - [`CredentialVault`]: the orchestrator tying identity, cipher and storage
//!   together behind [`AuthenticatedSession`] checks.
//! - [`prompt`]: hidden input of passwords and secrets.

pub mod crypto;
pub mod kdf;
pub mod prompt;
pub mod session;
pub mod vault;

pub use session::AuthenticatedSession;
pub use vault::{ConnectionTarget, CredentialVault};
