// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session state machine and event dispatch loop.
//!
//! Each session owns a spawned task that drains its transport event
//! stream, drives the lifecycle status through a validated transition
//! table, and forks inbound messages into detached pipeline runs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use strum::Display;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use covey_core::traits::ChatSurface;
use covey_core::types::TransportEvent;

use crate::pipeline::MessagePipeline;

/// Session lifecycle status.
///
/// `AuthFailed` and `Disconnected` are terminal; a terminal registration
/// stays in the registry for status queries until replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Starting,
    QrRequired,
    Authenticated,
    Ready,
    AuthFailed,
    Disconnected,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::AuthFailed | SessionStatus::Disconnected)
    }

    /// Whether `next` is a legal successor of `self`.
    ///
    /// A restored session authenticates without a QR round, so
    /// `Starting -> Authenticated` is legal alongside the fresh-pairing
    /// path through `QrRequired`.
    pub fn can_transition(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Starting, QrRequired)
                | (Starting, Authenticated)
                | (QrRequired, Authenticated)
                | (Authenticated, Ready)
                | (Starting | QrRequired | Authenticated, AuthFailed)
                | (Authenticated | Ready, Disconnected)
        )
    }
}

/// Handle to one live (or terminally parked) session.
pub struct SessionHandle {
    pub identity: String,
    pub created_at: DateTime<Utc>,
    status_rx: watch::Receiver<SessionStatus>,
    qr_rx: watch::Receiver<Option<String>>,
}

impl SessionHandle {
    pub fn status(&self) -> SessionStatus {
        *self.status_rx.borrow()
    }

    pub(crate) fn watchers(
        &self,
    ) -> (watch::Receiver<SessionStatus>, watch::Receiver<Option<String>>) {
        (self.status_rx.clone(), self.qr_rx.clone())
    }
}

/// Spawn the dispatch loop for one connected session.
///
/// The loop runs until the transport closes the event stream. Message
/// events are handed to the shared pipeline on their own tasks so a slow
/// reply never blocks lifecycle events.
pub(crate) fn spawn_session_loop(
    identity: String,
    chat: Arc<dyn ChatSurface>,
    mut events: mpsc::Receiver<TransportEvent>,
    pipeline: Arc<MessagePipeline>,
    suppress_qr_log: bool,
) -> SessionHandle {
    let (status_tx, status_rx) = watch::channel(SessionStatus::Starting);
    let (qr_tx, qr_rx) = watch::channel(None::<String>);

    let handle = SessionHandle {
        identity: identity.clone(),
        created_at: Utc::now(),
        status_rx,
        qr_rx,
    };

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                TransportEvent::Qr(challenge) => {
                    if transition(&status_tx, &identity, SessionStatus::QrRequired) {
                        if !suppress_qr_log {
                            info!(identity = %identity, "pairing required, scan QR:\n{challenge}");
                        }
                        let _ = qr_tx.send(Some(challenge));
                    }
                }
                TransportEvent::Authenticated => {
                    if transition(&status_tx, &identity, SessionStatus::Authenticated) {
                        let _ = qr_tx.send(None);
                    }
                }
                TransportEvent::Ready => {
                    if transition(&status_tx, &identity, SessionStatus::Ready) {
                        let _ = qr_tx.send(None);
                    }
                }
                TransportEvent::AuthFailure(reason) => {
                    error!(identity = %identity, reason = %reason, "authentication failed");
                    transition(&status_tx, &identity, SessionStatus::AuthFailed);
                }
                TransportEvent::Disconnected(reason) => {
                    info!(identity = %identity, reason = %reason, "session disconnected");
                    transition(&status_tx, &identity, SessionStatus::Disconnected);
                }
                TransportEvent::Message(message) => {
                    if message.from == identity {
                        debug!(identity = %identity, "ignoring self-authored message");
                        continue;
                    }
                    let pipeline = pipeline.clone();
                    let chat = chat.clone();
                    let session = identity.clone();
                    tokio::spawn(async move {
                        pipeline.handle(chat, &session, message).await;
                    });
                }
            }
        }
        debug!(identity = %identity, "event stream closed");
    });

    handle
}

/// Apply a status transition if legal. Returns whether the session is in
/// `next` afterwards (repeated events like QR refreshes count as applied).
fn transition(
    status_tx: &watch::Sender<SessionStatus>,
    identity: &str,
    next: SessionStatus,
) -> bool {
    let current = *status_tx.borrow();
    if current == next {
        return true;
    }
    if !current.can_transition(next) {
        warn!(
            identity = %identity,
            from = %current,
            to = %next,
            "ignoring illegal session transition"
        );
        return false;
    }
    info!(identity = %identity, from = %current, to = %next, "session transition");
    let _ = status_tx.send(next);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pairing_path_is_legal() {
        use SessionStatus::*;
        assert!(Starting.can_transition(QrRequired));
        assert!(QrRequired.can_transition(Authenticated));
        assert!(Authenticated.can_transition(Ready));
    }

    #[test]
    fn restored_session_skips_qr() {
        use SessionStatus::*;
        assert!(Starting.can_transition(Authenticated));
    }

    #[test]
    fn terminal_states_admit_no_successors() {
        use SessionStatus::*;
        for next in [Starting, QrRequired, Authenticated, Ready, AuthFailed, Disconnected] {
            assert!(!AuthFailed.can_transition(next));
            assert!(!Disconnected.can_transition(next));
        }
        assert!(AuthFailed.is_terminal());
        assert!(Disconnected.is_terminal());
        assert!(!Ready.is_terminal());
    }

    #[test]
    fn backwards_transitions_are_illegal() {
        use SessionStatus::*;
        assert!(!Ready.can_transition(QrRequired));
        assert!(!Ready.can_transition(Authenticated));
        assert!(!Authenticated.can_transition(QrRequired));
        assert!(!Starting.can_transition(Ready));
    }

    #[test]
    fn status_labels_are_snake_case() {
        assert_eq!(SessionStatus::QrRequired.to_string(), "qr_required");
        assert_eq!(SessionStatus::AuthFailed.to_string(), "auth_failed");
        assert_eq!(SessionStatus::Starting.to_string(), "starting");
    }
}
