// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment rows. Every file references an already-persisted message.

use rusqlite::params;

use covey_core::CoveyError;

use crate::database::Database;
use crate::models::{FileRecord, NewFile};

/// Insert an attachment row and return its generated id.
pub async fn insert_file(db: &Database, file: &NewFile) -> Result<i64, CoveyError> {
    let file = file.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO files
                 (message_id, provider_media_id, filename, mime_type, file_size, storage_path)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    file.message_id,
                    file.provider_media_id,
                    file.filename,
                    file.mime_type,
                    file.file_size,
                    file.storage_path,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}

/// All attachment rows linked to one message.
pub async fn files_for_message(
    db: &Database,
    message_id: i64,
) -> Result<Vec<FileRecord>, CoveyError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message_id, provider_media_id, filename, mime_type,
                        file_size, storage_path, created_at
                 FROM files WHERE message_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![message_id], |row| {
                Ok(FileRecord {
                    id: row.get(0)?,
                    message_id: row.get(1)?,
                    provider_media_id: row.get(2)?,
                    filename: row.get(3)?,
                    mime_type: row.get(4)?,
                    file_size: row.get(5)?,
                    storage_path: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?;
            let mut files = Vec::new();
            for row in rows {
                files.push(row?);
            }
            Ok(files)
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}

/// Total number of attachment rows.
pub async fn count_files(db: &Database) -> Result<i64, CoveyError> {
    db.connection()
        .call(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMessage;
    use crate::queries::messages::insert_message;
    use covey_core::types::MessageKind;
    use tempfile::tempdir;

    async fn setup_db_with_message() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let msg = NewMessage {
            provider_message_id: "prov-file-owner".to_string(),
            from_identity: "1115550000".to_string(),
            to_identity: "5551234567".to_string(),
            kind: MessageKind::Image,
            text_body: None,
            timestamp: 1_700_000_000,
            raw_payload: "{}".to_string(),
        };
        let message_id = insert_message(&db, &msg).await.unwrap();
        (db, message_id, dir)
    }

    fn make_file(message_id: i64, filename: &str) -> NewFile {
        NewFile {
            message_id,
            provider_media_id: None,
            filename: filename.to_string(),
            mime_type: "image/png".to_string(),
            file_size: 1024,
            storage_path: format!("/tmp/media/{filename}"),
        }
    }

    #[tokio::test]
    async fn insert_and_list_for_message() {
        let (db, message_id, _dir) = setup_db_with_message().await;

        let id = insert_file(&db, &make_file(message_id, "a.png")).await.unwrap();
        assert!(id > 0);

        let files = files_for_message(&db, message_id).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "a.png");
        assert_eq!(files[0].mime_type, "image/png");
        assert_eq!(files[0].file_size, 1024);
        assert!(files[0].provider_media_id.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn file_requires_existing_message() {
        let (db, _message_id, _dir) = setup_db_with_message().await;

        // foreign_keys is ON, so a dangling message_id must be rejected.
        let err = insert_file(&db, &make_file(9999, "dangling.bin")).await;
        assert!(err.is_err());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn count_files_counts_all_rows() {
        let (db, message_id, _dir) = setup_db_with_message().await;

        assert_eq!(count_files(&db).await.unwrap(), 0);
        insert_file(&db, &make_file(message_id, "a.png")).await.unwrap();
        insert_file(&db, &make_file(message_id, "b.png")).await.unwrap();
        assert_eq!(count_files(&db).await.unwrap(), 2);

        db.close().await.unwrap();
    }
}
