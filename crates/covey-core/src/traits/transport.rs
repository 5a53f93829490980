// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport collaborator traits.
//!
//! The transport speaks the messaging protocol and owns authentication
//! state. The core never reimplements any of it; a session holds the
//! [`ChatSurface`] returned by [`Transport::connect`] as an opaque
//! capability surface and consumes the event stream alongside it.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::CoveyError;
use crate::types::{MediaPayload, TransportEvent};

/// Factory for per-identity transport connections.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Establishes (or restores) the connection for one identity.
    ///
    /// `auth_dir` is where the transport persists authentication state so a
    /// restored session can skip the QR challenge. Returns the chat
    /// capability handle and the tagged event stream for this session; the
    /// stream delivers lifecycle events and inbound messages until the
    /// connection drops.
    async fn connect(
        &self,
        identity: &str,
        auth_dir: &Path,
    ) -> Result<(Arc<dyn ChatSurface>, mpsc::Receiver<TransportEvent>), CoveyError>;
}

/// Chat operations available on one connected session.
///
/// Owned exclusively by that session; never torn down by the core.
#[async_trait]
pub trait ChatSurface: Send + Sync + 'static {
    /// Marks the session's own presence as online.
    async fn set_presence_online(&self) -> Result<(), CoveyError>;

    /// Marks the peer's chat as seen.
    async fn mark_seen(&self, peer: &str) -> Result<(), CoveyError>;

    /// Shows the "typing" indicator in the peer's chat.
    async fn start_typing(&self, peer: &str) -> Result<(), CoveyError>;

    /// Clears the "typing" indicator in the peer's chat.
    async fn clear_typing(&self, peer: &str) -> Result<(), CoveyError>;

    /// Sends a plain-text reply to the peer.
    async fn send_text(&self, peer: &str, body: &str) -> Result<(), CoveyError>;

    /// Downloads the media attached to a message.
    ///
    /// `Ok(None)` means the transport had no payload for this message — a
    /// soft failure, not an error.
    async fn download_media(
        &self,
        provider_message_id: &str,
    ) -> Result<Option<MediaPayload>, CoveyError>;
}
