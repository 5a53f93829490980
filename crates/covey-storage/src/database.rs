// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Query modules accept `&Database` and call through
//! `connection().call()`. Do NOT create additional Connection instances for
//! writes.

use covey_core::CoveyError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Handle to the single-writer SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if absent) the database at `path`, configure pragmas,
    /// and run embedded migrations.
    pub async fn open(path: &str) -> Result<Self, CoveyError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| CoveyError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(std::time::Duration::from_millis(5000))?;
            Ok::<_, rusqlite::Error>(())
        })
        .await
        .map_err(map_tr_err)?;

        // Separate call: migrations carry their own error type.
        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), CoveyError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok::<_, rusqlite::Error>(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}

/// Map a tokio-rusqlite error (closure error or channel failure) into the
/// workspace error type.
pub(crate) fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> CoveyError
where
    E: std::error::Error + Send + Sync + 'static,
{
    CoveyError::Storage {
        source: Box::new(e),
    }
}

/// Whether this error is a UNIQUE (or primary-key) constraint violation.
pub(crate) fn is_unique_violation(e: &tokio_rusqlite::Error<rusqlite::Error>) -> bool {
    matches!(
        e,
        tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
