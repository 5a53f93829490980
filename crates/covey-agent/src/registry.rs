// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owned session registry: creation, restoration, and status queries.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dashmap::{DashMap, DashSet};
use tokio::sync::watch;
use tracing::{info, warn};

use covey_config::CoveyConfig;
use covey_core::traits::{MessageStore, Transport};
use covey_core::types::normalize_identity;
use covey_core::CoveyError;

use crate::pipeline::MessagePipeline;
use crate::qr;
use crate::session::{spawn_session_loop, SessionHandle, SessionStatus};

/// Registry of sessions keyed by normalized identity.
///
/// Owns the transport and store collaborators plus the shared pipeline;
/// everything hangs off this value, no global state.
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
    creating: DashSet<String>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn MessageStore>,
    pipeline: Arc<MessagePipeline>,
    auth_dir: PathBuf,
    qr_wait_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(
        config: &CoveyConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn MessageStore>,
    ) -> Self {
        let pipeline = Arc::new(MessagePipeline::new(config, store.clone()));
        Self {
            sessions: DashMap::new(),
            creating: DashSet::new(),
            transport,
            store,
            pipeline,
            auth_dir: PathBuf::from(&config.transport.auth_dir),
            qr_wait_timeout: Duration::from_secs(config.agent.qr_wait_timeout_secs),
        }
    }

    /// Reconnect every identity registered in the store.
    ///
    /// Called once at startup. A failure to restore one session is logged
    /// and skipped; the rest still come up. Returns how many connected.
    pub async fn restore_all(&self) -> Result<usize, CoveyError> {
        let identities = self.store.load_all_sessions().await?;
        let mut restored = 0;
        for identity in identities {
            match self.create_session(&identity, false).await {
                Ok(()) => {
                    info!(identity = %identity, "restored session");
                    restored += 1;
                }
                Err(e) => {
                    warn!(identity = %identity, error = %e, "failed to restore session");
                }
            }
        }
        Ok(restored)
    }

    /// Connect a session for `identity` and register its dispatch loop.
    ///
    /// Fails with [`CoveyError::SessionExists`] if a non-terminal session
    /// already holds the identity; a terminal registration is replaced.
    /// The in-flight claim set makes concurrent calls for the same
    /// identity race down to one winner.
    pub async fn create_session(
        &self,
        identity: &str,
        suppress_qr_log: bool,
    ) -> Result<(), CoveyError> {
        let identity = normalize_identity(identity);
        if identity.is_empty() {
            return Err(CoveyError::Config(
                "session identity must contain digits".into(),
            ));
        }

        if !self.creating.insert(identity.clone()) {
            return Err(CoveyError::SessionExists { identity });
        }
        let result = self.connect_locked(&identity, suppress_qr_log).await;
        self.creating.remove(&identity);
        result
    }

    async fn connect_locked(
        &self,
        identity: &str,
        suppress_qr_log: bool,
    ) -> Result<(), CoveyError> {
        if let Some(existing) = self.sessions.get(identity) {
            if !existing.status().is_terminal() {
                return Err(CoveyError::SessionExists {
                    identity: identity.to_string(),
                });
            }
        }

        let (chat, events) = self.transport.connect(identity, &self.auth_dir).await?;
        let handle = spawn_session_loop(
            identity.to_string(),
            chat,
            events,
            self.pipeline.clone(),
            suppress_qr_log,
        );
        self.sessions.insert(identity.to_string(), handle);
        Ok(())
    }

    /// Register `identity` in the store, connect it, and wait for either a
    /// pairing challenge or readiness.
    ///
    /// Returns the QR challenge rendered as a data URL when pairing is
    /// needed, or `None` when stored auth state made the session come up
    /// ready. If the identity already has a live session, attaches to it
    /// instead of failing. The wait is bounded by
    /// `agent.qr_wait_timeout_secs`.
    pub async fn add_session(&self, identity: &str) -> Result<Option<String>, CoveyError> {
        let identity = normalize_identity(identity);
        if identity.is_empty() {
            return Err(CoveyError::Config(
                "session identity must contain digits".into(),
            ));
        }

        self.store.register_session(&identity).await?;
        match self.create_session(&identity, true).await {
            Ok(()) => {}
            // Already live: attach to the existing session's watchers.
            Err(CoveyError::SessionExists { .. }) => {}
            Err(e) => return Err(e),
        }

        let (status_rx, qr_rx) = {
            let handle = self.sessions.get(&identity).ok_or_else(|| {
                CoveyError::Internal(format!("session {identity} vanished during add"))
            })?;
            handle.watchers()
        };

        match self.await_qr_or_ready(&identity, status_rx, qr_rx).await? {
            Some(challenge) => Ok(Some(qr::qr_data_url(&challenge)?)),
            None => Ok(None),
        }
    }

    /// Current status of a session, `None` when the identity is unknown.
    pub fn status(&self, identity: &str) -> Option<SessionStatus> {
        let identity = normalize_identity(identity);
        self.sessions.get(&identity).map(|handle| handle.status())
    }

    /// Status as a stable label, `"not_found"` for unknown identities.
    pub fn status_label(&self, identity: &str) -> String {
        match self.status(identity) {
            Some(status) => status.to_string(),
            None => "not_found".to_string(),
        }
    }

    /// Identities currently registered, live or terminal.
    pub fn identities(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    async fn await_qr_or_ready(
        &self,
        identity: &str,
        mut status_rx: watch::Receiver<SessionStatus>,
        mut qr_rx: watch::Receiver<Option<String>>,
    ) -> Result<Option<String>, CoveyError> {
        let wait = async {
            loop {
                if let Some(challenge) = qr_rx.borrow().clone() {
                    return Ok(Some(challenge));
                }
                match *status_rx.borrow() {
                    SessionStatus::Ready => return Ok(None),
                    status if status.is_terminal() => {
                        return Err(CoveyError::Transport {
                            message: format!("session {identity} ended while pairing: {status}"),
                            source: None,
                        });
                    }
                    _ => {}
                }
                tokio::select! {
                    changed = qr_rx.changed() => {
                        if changed.is_err() {
                            return Err(stream_closed(identity));
                        }
                    }
                    changed = status_rx.changed() => {
                        if changed.is_err() {
                            return Err(stream_closed(identity));
                        }
                    }
                }
            }
        };

        tokio::time::timeout(self.qr_wait_timeout, wait)
            .await
            .map_err(|_| CoveyError::Timeout {
                duration: self.qr_wait_timeout,
            })?
    }
}

fn stream_closed(identity: &str) -> CoveyError {
    CoveyError::Transport {
        message: format!("event stream for {identity} closed while pairing"),
        source: None,
    }
}
