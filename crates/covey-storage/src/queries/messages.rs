// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message rows. Immutable once inserted; `provider_message_id`
//! uniqueness is the dedup key.

use rusqlite::params;

use covey_core::CoveyError;
use covey_core::types::MessageKind;

use crate::database::Database;
use crate::models::{MessageRecord, NewMessage};

/// Insert an inbound message and return its generated id.
///
/// A redelivered `provider_message_id` fails with
/// [`CoveyError::DuplicateMessage`].
pub async fn insert_message(db: &Database, msg: &NewMessage) -> Result<i64, CoveyError> {
    let msg = msg.clone();
    let provider_message_id = msg.provider_message_id.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages
                 (provider_message_id, from_identity, to_identity, message_type,
                  text_body, timestamp, raw_payload)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    msg.provider_message_id,
                    msg.from_identity,
                    msg.to_identity,
                    msg.kind.to_string(),
                    msg.text_body,
                    msg.timestamp,
                    msg.raw_payload,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|e| {
            if crate::database::is_unique_violation(&e) {
                CoveyError::DuplicateMessage {
                    provider_message_id,
                }
            } else {
                crate::database::map_tr_err(e)
            }
        })
}

/// Look up a message by its provider id.
pub async fn get_by_provider_id(
    db: &Database,
    provider_message_id: &str,
) -> Result<Option<MessageRecord>, CoveyError> {
    let provider_message_id = provider_message_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, provider_message_id, from_identity, to_identity,
                        message_type, text_body, timestamp, raw_payload, created_at
                 FROM messages WHERE provider_message_id = ?1",
            )?;
            let result = stmt.query_row(params![provider_message_id], |row| {
                Ok(MessageRecord {
                    id: row.get(0)?,
                    provider_message_id: row.get(1)?,
                    from_identity: row.get(2)?,
                    to_identity: row.get(3)?,
                    kind: MessageKind::parse_lossy(&row.get::<_, String>(4)?),
                    text_body: row.get(5)?,
                    timestamp: row.get(6)?,
                    raw_payload: row.get(7)?,
                    created_at: row.get(8)?,
                })
            });
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}

/// Count persisted messages from one sender identity.
pub async fn count_from(db: &Database, from_identity: &str) -> Result<i64, CoveyError> {
    let from_identity = from_identity.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE from_identity = ?1",
                params![from_identity],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err::<rusqlite::Error>)
}
