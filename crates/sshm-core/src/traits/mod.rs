// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the vault and its backends.

pub mod storage;

pub use storage::CredentialStore;
