// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-peer non-blocking lock bounding in-flight pipeline runs to one.
//!
//! Acquisition is a single atomic check-and-set; a held peer means the
//! event is dropped, not queued. Deliberate drop-not-queue backpressure.

use dashmap::DashSet;

/// Non-blocking per-peer lock.
#[derive(Default)]
pub struct PeerGuard {
    held: DashSet<String>,
}

impl PeerGuard {
    /// Create an empty guard set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the lock for `peer`.
    ///
    /// Returns `false` if already held; the caller must abandon processing
    /// for that event. `DashSet::insert` makes the check-and-set atomic.
    pub fn acquire(&self, peer: &str) -> bool {
        self.held.insert(peer.to_string())
    }

    /// Release the lock for `peer`. Always succeeds; must be called exactly
    /// once per acquired run, on every exit path.
    pub fn release(&self, peer: &str) {
        self.held.remove(peer);
    }

    /// Whether the lock for `peer` is currently held.
    pub fn is_held(&self, peer: &str) -> bool {
        self.held.contains(peer)
    }
}
