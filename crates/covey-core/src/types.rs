// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Covey workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Inbound message kind as reported by the transport.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Document,
    Audio,
    Other,
}

impl MessageKind {
    /// Parse a kind label, mapping anything unrecognized to [`MessageKind::Other`].
    pub fn parse_lossy(label: &str) -> Self {
        label.parse().unwrap_or(MessageKind::Other)
    }
}

/// One inbound message event delivered by the transport.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Transport-assigned opaque id, globally unique per provider.
    pub provider_message_id: String,
    /// Sender identity (normalized phone string).
    pub from: String,
    /// Receiver identity; equals the owning session identity.
    pub to: String,
    pub kind: MessageKind,
    pub text_body: Option<String>,
    /// Provider timestamp, seconds since the epoch.
    pub timestamp: i64,
    /// Opaque serialized event blob kept for audit.
    pub raw_payload: String,
    pub has_media: bool,
}

/// Lifecycle and message events emitted by one session's transport connection.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A pairing challenge; carries the raw encoded payload.
    Qr(String),
    Authenticated,
    Ready,
    /// Authentication failed; carries the transport's reason string.
    AuthFailure(String),
    /// Connection lost; carries the transport's reason string.
    Disconnected(String),
    Message(MessageEvent),
}

/// Decoded media bytes downloaded for one message.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub provider_media_id: Option<String>,
}

/// A message row to be persisted. Immutable once inserted.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub provider_message_id: String,
    pub from_identity: String,
    pub to_identity: String,
    pub kind: MessageKind,
    pub text_body: Option<String>,
    pub timestamp: i64,
    pub raw_payload: String,
}

/// An attachment row to be persisted. References an already-persisted message.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub message_id: i64,
    pub provider_media_id: Option<String>,
    pub filename: String,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_path: String,
}

/// A persisted message row.
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub id: i64,
    pub provider_message_id: String,
    pub from_identity: String,
    pub to_identity: String,
    pub kind: MessageKind,
    pub text_body: Option<String>,
    pub timestamp: i64,
    pub raw_payload: String,
    pub created_at: String,
}

/// A persisted attachment row.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: i64,
    pub message_id: i64,
    pub provider_media_id: Option<String>,
    pub filename: String,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_path: String,
    pub created_at: String,
}

/// Normalize a phone-number identity to its digits.
///
/// Identities are map keys and auth-directory names, so every entry point
/// normalizes before use.
pub fn normalize_identity(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
