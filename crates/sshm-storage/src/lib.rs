// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the sshm credential vault.
//!
//! Stores profiles and logins in two tables created by embedded refinery
//! migrations. All access goes through a single `tokio-rusqlite`
//! connection thread. No cryptography happens here: secrets arrive and
//! leave as opaque blobs.

pub mod adapter;
pub mod database;
pub mod migrations;
mod models;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
