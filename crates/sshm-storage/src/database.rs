// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management and SQLite error classification.
//!
//! All statements run on tokio-rusqlite's single background thread, which
//! serializes every read and write issued through one [`Database`].

use std::path::Path;

use sshm_core::StoreError;
use tracing::debug;

/// Handle to the SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// Missing parent directories are created. Foreign keys are enforced on
    /// the connection; WAL journaling is enabled when `wal_mode` is set.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, StoreError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| StoreError::Backend {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(wal_mode).await?;
        debug!(path = %path, wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::Backend {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(false).await?;
        Ok(db)
    }

    async fn configure(&self, wal_mode: bool) -> Result<(), StoreError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA foreign_keys = ON;")?;
                if wal_mode {
                    let _mode: String =
                        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tr_err(e, "pragma"))
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Classify a failed `call` whose closure reported a `rusqlite::Error`.
///
/// Column type and conversion failures mean the row does not have the shape
/// `entity` requires.
pub(crate) fn map_tr_err(
    e: tokio_rusqlite::Error<rusqlite::Error>,
    entity: &'static str,
) -> StoreError {
    match e {
        tokio_rusqlite::Error::Error(err) => map_sql_err(err, entity),
        other => StoreError::Backend {
            source: Box::new(other),
        },
    }
}

pub(crate) fn map_sql_err(err: rusqlite::Error, entity: &'static str) -> StoreError {
    use rusqlite::Error as E;

    match err {
        E::InvalidColumnType(..)
        | E::FromSqlConversionFailure(..)
        | E::IntegralValueOutOfRange(..)
        | E::InvalidColumnIndex(..)
        | E::InvalidColumnName(..) => StoreError::MalformedRow {
            entity,
            reason: err.to_string(),
        },
        other => StoreError::Backend {
            source: Box::new(other),
        },
    }
}

/// Unwrap a failed `call` whose closure already produced a [`StoreError`].
pub(crate) fn flatten_tr_err(e: tokio_rusqlite::Error<StoreError>) -> StoreError {
    match e {
        tokio_rusqlite::Error::Error(err) => err,
        other => StoreError::Backend {
            source: other.to_string().into(),
        },
    }
}

/// Which constraint a failed write tripped, if any.
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

pub(crate) fn constraint_violation(
    e: &tokio_rusqlite::Error<rusqlite::Error>,
) -> Option<Violation> {
    match e {
        tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(failure, _)) => {
            match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => Some(Violation::Unique),
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Violation::ForeignKey),
                _ => None,
            }
        }
        _ => None,
    }
}
