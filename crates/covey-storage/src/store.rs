// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`MessageStore`] collaborator trait.

use async_trait::async_trait;

use covey_core::traits::MessageStore;
use covey_core::types::{NewFile, NewMessage};
use covey_core::CoveyError;

use crate::database::Database;
use crate::queries;

/// SQLite-backed message store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (creating if absent) the store at `path` and run migrations.
    pub async fn open(path: &str) -> Result<Self, CoveyError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// The underlying database handle, for direct queries.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint and close the store.
    pub async fn close(self) -> Result<(), CoveyError> {
        self.db.close().await
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn register_session(&self, identity: &str) -> Result<(), CoveyError> {
        queries::sessions::register_session(&self.db, identity).await
    }

    async fn load_all_sessions(&self) -> Result<Vec<String>, CoveyError> {
        queries::sessions::load_all_sessions(&self.db).await
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<i64, CoveyError> {
        queries::messages::insert_message(&self.db, message).await
    }

    async fn insert_file(&self, file: &NewFile) -> Result<i64, CoveyError> {
        queries::files::insert_file(&self.db, file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covey_core::types::MessageKind;
    use tempfile::tempdir;

    #[tokio::test]
    async fn trait_surface_round_trips() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");
        let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();

        store.register_session("5551234567").await.unwrap();
        store.register_session("5559876543").await.unwrap();
        assert_eq!(
            store.load_all_sessions().await.unwrap(),
            vec!["5551234567", "5559876543"]
        );

        let msg = NewMessage {
            provider_message_id: "prov-trait-1".to_string(),
            from_identity: "1115550000".to_string(),
            to_identity: "5551234567".to_string(),
            kind: MessageKind::Document,
            text_body: None,
            timestamp: 1_700_000_000,
            raw_payload: "{}".to_string(),
        };
        let message_id = store.insert_message(&msg).await.unwrap();

        let file_id = store
            .insert_file(&NewFile {
                message_id,
                provider_media_id: Some("media-1".to_string()),
                filename: "report.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                file_size: 2048,
                storage_path: "/tmp/media/report.pdf".to_string(),
            })
            .await
            .unwrap();
        assert!(file_id > 0);

        store.close().await.unwrap();
    }
}
