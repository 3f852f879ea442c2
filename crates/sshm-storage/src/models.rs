// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed mapping from SQLite rows to domain values.
//!
//! Rows are read column by column into plain row structs, then validated
//! before becoming [`StoredProfile`] or [`Login`] values. A row that fails
//! either step is reported as [`StoreError::MalformedRow`].

use sshm_core::{
    KdfParams, Login, LoginId, Profile, ProfileCredentials, ProfileId, StoreError, StoredProfile,
};

pub(crate) const PROFILE_COLUMNS: &str =
    "id, name, password_hash, key_salt, kdf_memory_cost, kdf_iterations, kdf_parallelism";

pub(crate) const LOGIN_COLUMNS: &str = "id, name, username, host, secret, profile_id";

/// A `profiles` row as stored.
#[derive(Debug)]
pub(crate) struct ProfileRow {
    id: i64,
    name: String,
    password_hash: String,
    key_salt: Vec<u8>,
    kdf_memory_cost: i64,
    kdf_iterations: i64,
    kdf_parallelism: i64,
}

impl ProfileRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            password_hash: row.get(2)?,
            key_salt: row.get(3)?,
            kdf_memory_cost: row.get(4)?,
            kdf_iterations: row.get(5)?,
            kdf_parallelism: row.get(6)?,
        })
    }

    pub(crate) fn into_stored(self) -> Result<StoredProfile, StoreError> {
        if self.name.is_empty() {
            return Err(malformed("profile", "empty name"));
        }
        if !self.password_hash.starts_with('$') {
            return Err(malformed("profile", "password_hash is not a PHC string"));
        }
        let key_salt: [u8; 16] = self.key_salt.try_into().map_err(|salt: Vec<u8>| {
            malformed(
                "profile",
                &format!("key_salt must be 16 bytes, got {}", salt.len()),
            )
        })?;
        let kdf = KdfParams {
            memory_cost: positive_u32("kdf_memory_cost", self.kdf_memory_cost)?,
            iterations: positive_u32("kdf_iterations", self.kdf_iterations)?,
            parallelism: positive_u32("kdf_parallelism", self.kdf_parallelism)?,
        };

        Ok(StoredProfile {
            profile: Profile {
                id: ProfileId(self.id),
                name: self.name,
            },
            credentials: ProfileCredentials {
                password_hash: self.password_hash,
                key_salt,
                kdf,
            },
        })
    }
}

/// A `logins` row as stored.
#[derive(Debug)]
pub(crate) struct LoginRow {
    id: i64,
    name: String,
    username: String,
    host: String,
    secret: Option<Vec<u8>>,
    profile_id: i64,
}

impl LoginRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            username: row.get(2)?,
            host: row.get(3)?,
            secret: row.get(4)?,
            profile_id: row.get(5)?,
        })
    }

    pub(crate) fn into_login(self) -> Result<Login, StoreError> {
        if self.name.is_empty() {
            return Err(malformed("login", "empty name"));
        }
        if matches!(&self.secret, Some(blob) if blob.is_empty()) {
            return Err(malformed("login", "secret is present but empty"));
        }

        Ok(Login {
            id: LoginId(self.id),
            name: self.name,
            username: self.username,
            host: self.host,
            secret: self.secret,
            profile_id: ProfileId(self.profile_id),
        })
    }
}

fn positive_u32(column: &str, value: i64) -> Result<u32, StoreError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(malformed(
            "profile",
            &format!("{column} out of range: {value}"),
        )),
    }
}

fn malformed(entity: &'static str, reason: &str) -> StoreError {
    StoreError::MalformedRow {
        entity,
        reason: reason.to_string(),
    }
}
