// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema creation and destructive reset.
//!
//! The schema ships as refinery migrations compiled into the binary via
//! `embed_migrations!`. Unlike an auto-migrating service, creation is an
//! explicit step that refuses to run twice.

use sshm_core::StoreError;
use tracing::info;

use crate::database::{flatten_tr_err, map_sql_err, Database};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Tables dropped by [`reset_schema`], children first.
const RESET_ORDER: &[&str] = &["logins", "profiles", "refinery_schema_history"];

/// Create the schema. Fails with [`StoreError::AlreadyInitialized`] if the
/// vault tables already exist.
pub async fn create_schema(db: &Database) -> Result<(), StoreError> {
    db.connection()
        .call(|conn| -> Result<(), StoreError> {
            if schema_present(conn).map_err(|e| map_sql_err(e, "schema"))? {
                return Err(StoreError::AlreadyInitialized);
            }
            run_migrations(conn)
        })
        .await
        .map_err(flatten_tr_err)?;
    info!("schema created");
    Ok(())
}

/// Drop all vault tables and recreate them. Every profile and login is lost.
pub async fn reset_schema(db: &Database) -> Result<(), StoreError> {
    db.connection()
        .call(|conn| -> Result<(), StoreError> {
            drop_tables(conn).map_err(|e| map_sql_err(e, "schema"))?;
            run_migrations(conn)
        })
        .await
        .map_err(flatten_tr_err)?;
    info!("schema reset");
    Ok(())
}

fn schema_present(conn: &rusqlite::Connection) -> Result<bool, rusqlite::Error> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('profiles', 'logins')",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn drop_tables(conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
    let tx = conn.transaction()?;
    for table in RESET_ORDER {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    tx.commit()
}

/// Apply pending migrations. Refinery records applied versions in
/// `refinery_schema_history`.
fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), StoreError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| StoreError::Backend {
            source: Box::new(e),
        })?;
    Ok(())
}
