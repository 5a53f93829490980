// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session registration rows consumed by startup restoration.

use rusqlite::params;

use covey_core::CoveyError;

use crate::database::Database;

/// Register an identity. Idempotent: re-registering is a no-op.
pub async fn register_session(db: &Database, identity: &str) -> Result<(), CoveyError> {
    let identity = identity.to_string();
    let session_name = format!("session_{identity}");
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO sessions (identity, session_name) VALUES (?1, ?2)",
                params![identity, session_name],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}

/// All registered identities in registration order.
pub async fn load_all_sessions(db: &Database) -> Result<Vec<String>, CoveyError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT identity FROM sessions ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut identities = Vec::new();
            for row in rows {
                identities.push(row?);
            }
            Ok(identities)
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn register_is_idempotent() {
        let (db, _dir) = setup_db().await;

        register_session(&db, "5551234567").await.unwrap();
        register_session(&db, "5551234567").await.unwrap();

        let all = load_all_sessions(&db).await.unwrap();
        assert_eq!(all, vec!["5551234567"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn load_preserves_registration_order() {
        let (db, _dir) = setup_db().await;

        register_session(&db, "222").await.unwrap();
        register_session(&db, "111").await.unwrap();
        register_session(&db, "333").await.unwrap();

        let all = load_all_sessions(&db).await.unwrap();
        assert_eq!(all, vec!["222", "111", "333"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn load_empty_table_yields_nothing() {
        let (db, _dir) = setup_db().await;
        assert!(load_all_sessions(&db).await.unwrap().is_empty());
        db.close().await.unwrap();
    }
}
