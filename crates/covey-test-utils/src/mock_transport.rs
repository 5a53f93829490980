// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport adapter for deterministic testing.
//!
//! `MockTransport` implements `Transport` by handing out an in-memory
//! `MockChat` per identity plus an event channel the test can feed.
//! `MockChat` records every chat operation in order and serves staged
//! media payloads, so tests assert on observable behavior only.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use covey_core::traits::{ChatSurface, Transport};
use covey_core::types::{MediaPayload, MessageEvent, MessageKind, TransportEvent};
use covey_core::CoveyError;

/// One recorded chat operation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOp {
    PresenceOnline,
    Seen(String),
    TypingStart(String),
    TypingClear(String),
    SendText { peer: String, body: String },
}

/// In-memory chat surface that records operations and serves staged media.
#[derive(Default)]
pub struct MockChat {
    ops: Mutex<Vec<ChatOp>>,
    media: Mutex<HashMap<String, MediaPayload>>,
    fail_sends: AtomicBool,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations recorded so far, in call order.
    pub async fn ops(&self) -> Vec<ChatOp> {
        self.ops.lock().await.clone()
    }

    /// Just the text replies sent, as `(peer, body)` pairs.
    pub async fn sent_texts(&self) -> Vec<(String, String)> {
        self.ops
            .lock()
            .await
            .iter()
            .filter_map(|op| match op {
                ChatOp::SendText { peer, body } => Some((peer.clone(), body.clone())),
                _ => None,
            })
            .collect()
    }

    /// Stage a media payload to be served for `provider_message_id`.
    /// Unstaged ids download as `Ok(None)`.
    pub async fn stage_media(&self, provider_message_id: &str, payload: MediaPayload) {
        self.media
            .lock()
            .await
            .insert(provider_message_id.to_string(), payload);
    }

    /// Make subsequent `send_text` calls fail until switched off.
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    async fn record(&self, op: ChatOp) {
        self.ops.lock().await.push(op);
    }
}

#[async_trait]
impl ChatSurface for MockChat {
    async fn set_presence_online(&self) -> Result<(), CoveyError> {
        self.record(ChatOp::PresenceOnline).await;
        Ok(())
    }

    async fn mark_seen(&self, peer: &str) -> Result<(), CoveyError> {
        self.record(ChatOp::Seen(peer.to_string())).await;
        Ok(())
    }

    async fn start_typing(&self, peer: &str) -> Result<(), CoveyError> {
        self.record(ChatOp::TypingStart(peer.to_string())).await;
        Ok(())
    }

    async fn clear_typing(&self, peer: &str) -> Result<(), CoveyError> {
        self.record(ChatOp::TypingClear(peer.to_string())).await;
        Ok(())
    }

    async fn send_text(&self, peer: &str, body: &str) -> Result<(), CoveyError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(CoveyError::Transport {
                message: "mock send failure".to_string(),
                source: None,
            });
        }
        self.record(ChatOp::SendText {
            peer: peer.to_string(),
            body: body.to_string(),
        })
        .await;
        Ok(())
    }

    async fn download_media(
        &self,
        provider_message_id: &str,
    ) -> Result<Option<MediaPayload>, CoveyError> {
        Ok(self.media.lock().await.get(provider_message_id).cloned())
    }
}

/// The chat surface and event feed handed out for one connected identity.
#[derive(Clone)]
pub struct SessionLink {
    pub chat: Arc<MockChat>,
    pub events: mpsc::Sender<TransportEvent>,
}

/// Mock transport: every `connect` yields a fresh [`SessionLink`] the test
/// can drive through [`MockTransport::link`] and [`MockTransport::emit`].
#[derive(Default)]
pub struct MockTransport {
    links: Mutex<HashMap<String, SessionLink>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The link for `identity`, once it has connected.
    pub async fn link(&self, identity: &str) -> Option<SessionLink> {
        self.links.lock().await.get(identity).cloned()
    }

    /// Send one event into `identity`'s session loop.
    ///
    /// Panics if the identity never connected; tests call this only after
    /// observing the connection.
    pub async fn emit(&self, identity: &str, event: TransportEvent) {
        let link = self
            .link(identity)
            .await
            .unwrap_or_else(|| panic!("no mock link for {identity}"));
        link.events.send(event).await.expect("session loop gone");
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(
        &self,
        identity: &str,
        _auth_dir: &Path,
    ) -> Result<(Arc<dyn ChatSurface>, mpsc::Receiver<TransportEvent>), CoveyError> {
        let (tx, rx) = mpsc::channel(64);
        let chat = Arc::new(MockChat::new());
        self.links.lock().await.insert(
            identity.to_string(),
            SessionLink {
                chat: chat.clone(),
                events: tx,
            },
        );
        Ok((chat, rx))
    }
}

/// Build a plain-text inbound event with a fresh provider id.
pub fn text_event(from: &str, to: &str, body: &str) -> MessageEvent {
    MessageEvent {
        provider_message_id: format!("mock-{}", uuid::Uuid::new_v4()),
        from: from.to_string(),
        to: to.to_string(),
        kind: MessageKind::Text,
        text_body: Some(body.to_string()),
        timestamp: chrono::Utc::now().timestamp(),
        raw_payload: "{}".to_string(),
        has_media: false,
    }
}

/// Build a media-bearing inbound event. Stage the matching payload on the
/// session's [`MockChat`] keyed by the returned `provider_message_id`.
pub fn media_event(from: &str, to: &str, kind: MessageKind) -> MessageEvent {
    MessageEvent {
        provider_message_id: format!("mock-{}", uuid::Uuid::new_v4()),
        from: from.to_string(),
        to: to.to_string(),
        kind,
        text_body: None,
        timestamp: chrono::Utc::now().timestamp(),
        raw_payload: "{}".to_string(),
        has_media: true,
    }
}
