// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence collaborator trait.

use async_trait::async_trait;

use crate::error::CoveyError;
use crate::types::{NewFile, NewMessage};

/// Persistence operations the core consumes.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Registers an identity for startup restoration. Idempotent.
    async fn register_session(&self, identity: &str) -> Result<(), CoveyError>;

    /// Returns all registered identities in registration order.
    async fn load_all_sessions(&self) -> Result<Vec<String>, CoveyError>;

    /// Inserts an inbound message and returns its generated id.
    ///
    /// A redelivered `provider_message_id` fails with
    /// [`CoveyError::DuplicateMessage`]; other failures propagate.
    async fn insert_message(&self, message: &NewMessage) -> Result<i64, CoveyError>;

    /// Inserts an attachment row linked to a persisted message.
    async fn insert_file(&self, file: &NewFile) -> Result<i64, CoveyError>;
}
