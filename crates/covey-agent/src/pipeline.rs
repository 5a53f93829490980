// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message pipeline: guard, persist, pace, reply, cool down.
//!
//! One pipeline instance is shared by every session; all per-run state
//! lives on the stack of a single `handle` call. Failures in one run are
//! logged and contained, never propagated to the session event loop.

use std::sync::Arc;

use tracing::{debug, warn};

use covey_config::CoveyConfig;
use covey_core::traits::{ChatSurface, MessageStore};
use covey_core::types::{MessageEvent, NewFile, NewMessage};
use covey_core::CoveyError;

use crate::behavior::HumanBehavior;
use crate::guard::PeerGuard;
use crate::media::MediaStore;
use crate::replies::{ReplyCategory, ReplyPools};

/// Fallback length for pacing when the inbound message has no text body.
const DEFAULT_TEXT_LEN: usize = 10;

/// Shared message-processing pipeline.
pub struct MessagePipeline {
    store: Arc<dyn MessageStore>,
    media: MediaStore,
    guard: PeerGuard,
    replies: ReplyPools,
    behavior: HumanBehavior,
}

impl MessagePipeline {
    pub fn new(config: &CoveyConfig, store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            media: MediaStore::new(config.media.root_dir.clone()),
            guard: PeerGuard::new(),
            replies: ReplyPools::from_config(&config.replies),
            behavior: HumanBehavior::new(config.behavior.clone()),
        }
    }

    /// Process one inbound event end to end.
    ///
    /// Takes the per-peer lock first; if the peer already has a run in
    /// flight the event is dropped. The lock is released on every exit
    /// path, including errors, and any error is absorbed here.
    pub async fn handle(&self, chat: Arc<dyn ChatSurface>, session: &str, event: MessageEvent) {
        let peer = event.from.clone();
        if !self.guard.acquire(&peer) {
            debug!(session, peer = %peer, "peer busy, dropping event");
            return;
        }

        match self.process(chat.as_ref(), &event).await {
            Ok(()) => {}
            Err(e) if e.is_duplicate() => {
                debug!(
                    session,
                    peer = %peer,
                    provider_message_id = %event.provider_message_id,
                    "redelivered message dropped"
                );
            }
            Err(e) => {
                warn!(
                    session,
                    peer = %peer,
                    provider_message_id = %event.provider_message_id,
                    error = %e,
                    "message pipeline failed"
                );
            }
        }

        self.guard.release(&peer);
    }

    async fn process(&self, chat: &dyn ChatSurface, event: &MessageEvent) -> Result<(), CoveyError> {
        // Persist first: dedup rides on the unique provider id, so a
        // redelivery bails out here before any visible behavior.
        let message_id = self
            .store
            .insert_message(&NewMessage {
                provider_message_id: event.provider_message_id.clone(),
                from_identity: event.from.clone(),
                to_identity: event.to.clone(),
                kind: event.kind,
                text_body: event.text_body.clone(),
                timestamp: event.timestamp,
                raw_payload: event.raw_payload.clone(),
            })
            .await?;
        debug!(message_id, peer = %event.from, kind = %event.kind, "persisted inbound message");

        if self.behavior.should_ignore(&mut rand::thread_rng()) {
            debug!(peer = %event.from, "randomly ignoring message");
            return Ok(());
        }

        let text_len = event.text_body.as_deref().map_or(DEFAULT_TEXT_LEN, str::len);
        self.behavior.reply_pause().await;
        self.behavior.simulate_typing(chat, &event.from, text_len).await?;

        if event.has_media {
            self.reply_to_media(chat, event, message_id).await?;
        } else {
            let reply = self.replies.pick_any(ReplyCategory::Text);
            chat.send_text(&event.from, &reply).await?;
        }

        self.behavior.cooldown_pause().await;
        Ok(())
    }

    async fn reply_to_media(
        &self,
        chat: &dyn ChatSurface,
        event: &MessageEvent,
        message_id: i64,
    ) -> Result<(), CoveyError> {
        let Some(payload) = chat.download_media(&event.provider_message_id).await? else {
            debug!(
                peer = %event.from,
                provider_message_id = %event.provider_message_id,
                "media unavailable, skipping reply"
            );
            return Ok(());
        };

        let stored = self
            .media
            .persist(&payload.data, &payload.mime_type, &event.from)
            .await?;
        self.store
            .insert_file(&NewFile {
                message_id,
                provider_media_id: payload.provider_media_id.clone(),
                filename: stored.filename.clone(),
                mime_type: payload.mime_type.clone(),
                file_size: stored.file_size as i64,
                storage_path: stored.storage_path.to_string_lossy().into_owned(),
            })
            .await?;

        let reply = self.replies.pick_any(ReplyCategory::for_mime(&payload.mime_type));
        chat.send_text(&event.from, &reply).await?;
        Ok(())
    }
}
