// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login inserts and lookups.

use rusqlite::{params, OptionalExtension};
use sshm_core::{Login, LoginId, NewLogin, ProfileId, StoreError};

use crate::database::{constraint_violation, map_tr_err, Database, Violation};
use crate::models::{LoginRow, LOGIN_COLUMNS};

/// Insert a login.
///
/// A taken name fails with [`StoreError::Conflict`]; an owner id with no
/// matching profile fails with [`StoreError::NotFound`].
pub async fn insert_login(db: &Database, login: NewLogin) -> Result<Login, StoreError> {
    let row = login.clone();
    let id = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO logins (name, username, host, secret, profile_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.name, row.username, row.host, row.secret, row.profile_id.0],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(Violation::Unique) => StoreError::Conflict {
                entity: "login",
                key: login.name.clone(),
            },
            Some(Violation::ForeignKey) => StoreError::NotFound {
                entity: "profile",
                key: login.profile_id.to_string(),
            },
            None => map_tr_err(e, "login"),
        })?;

    Ok(Login {
        id: LoginId(id),
        name: login.name,
        username: login.username,
        host: login.host,
        secret: login.secret,
        profile_id: login.profile_id,
    })
}

/// Fetch a login by its vault-wide unique name.
pub async fn get_login_by_name(db: &Database, name: &str) -> Result<Login, StoreError> {
    let key = name.to_string();
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<LoginRow>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {LOGIN_COLUMNS} FROM logins WHERE name = ?1"),
                params![key],
                LoginRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(|e| map_tr_err(e, "login"))?;

    row.ok_or_else(|| StoreError::NotFound {
        entity: "login",
        key: name.to_string(),
    })?
    .into_login()
}

/// All logins owned by a profile, ordered by name.
pub async fn list_logins_for_profile(
    db: &Database,
    profile_id: ProfileId,
) -> Result<Vec<Login>, StoreError> {
    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<LoginRow>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {LOGIN_COLUMNS} FROM logins WHERE profile_id = ?1 ORDER BY name"
            ))?;
            let rows = stmt.query_map(params![profile_id.0], LoginRow::from_row)?;
            rows.collect()
        })
        .await
        .map_err(|e| map_tr_err(e, "login"))?;

    rows.into_iter().map(LoginRow::into_login).collect()
}
