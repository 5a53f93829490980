// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Covey responder core.

use thiserror::Error;

/// The primary error type used across all Covey crates.
#[derive(Debug, Error)]
pub enum CoveyError {
    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, file I/O).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An inbound message with this provider id was already persisted.
    ///
    /// Benign: redelivered events are dropped without a reply.
    #[error("duplicate message: {provider_message_id}")]
    DuplicateMessage { provider_message_id: String },

    /// Transport collaborator errors (connection failure, chat operation failure).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A live session is already registered for this identity.
    #[error("session already exists for {identity}")]
    SessionExists { identity: String },

    /// A bounded wait expired.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoveyError {
    /// Whether this error is the benign duplicate-key signal.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, CoveyError::DuplicateMessage { .. })
    }
}
