// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile inserts and lookups.

use rusqlite::{params, OptionalExtension};
use sshm_core::{NewProfile, Profile, ProfileId, StoreError, StoredProfile};

use crate::database::{constraint_violation, map_tr_err, Database, Violation};
use crate::models::{ProfileRow, PROFILE_COLUMNS};

/// Insert a profile. A taken name fails with [`StoreError::Conflict`].
pub async fn insert_profile(
    db: &Database,
    profile: NewProfile,
) -> Result<StoredProfile, StoreError> {
    let NewProfile { name, credentials } = profile;
    let row_name = name.clone();
    let row_hash = credentials.password_hash.clone();
    let row_salt = credentials.key_salt;
    let kdf = credentials.kdf;

    let id = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO profiles (name, password_hash, key_salt, kdf_memory_cost, kdf_iterations, kdf_parallelism)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row_name,
                    row_hash,
                    &row_salt[..],
                    kdf.memory_cost,
                    kdf.iterations,
                    kdf.parallelism,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(Violation::Unique) => StoreError::Conflict {
                entity: "profile",
                key: name.clone(),
            },
            _ => map_tr_err(e, "profile"),
        })?;

    Ok(StoredProfile {
        profile: Profile {
            id: ProfileId(id),
            name,
        },
        credentials,
    })
}

/// Fetch a profile by its unique name.
pub async fn get_profile_by_name(db: &Database, name: &str) -> Result<StoredProfile, StoreError> {
    let key = name.to_string();
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<ProfileRow>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE name = ?1"),
                params![key],
                ProfileRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err(e, "profile"))?;

    row.ok_or_else(|| StoreError::NotFound {
        entity: "profile",
        key: name.to_string(),
    })?
    .into_stored()
}

/// Fetch a profile by id.
pub async fn get_profile_by_id(db: &Database, id: ProfileId) -> Result<StoredProfile, StoreError> {
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<ProfileRow>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                params![id.0],
                ProfileRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err(e, "profile"))?;

    row.ok_or_else(|| StoreError::NotFound {
        entity: "profile",
        key: id.to_string(),
    })?
    .into_stored()
}
