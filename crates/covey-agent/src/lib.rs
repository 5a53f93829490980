// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle and message ingestion for the Covey auto-responder.
//!
//! The [`SessionRegistry`] owns every session: it connects identities
//! through a pluggable [`covey_core::traits::Transport`], drives each
//! session's lifecycle state machine from the transport's event stream,
//! and feeds inbound messages into a shared [`MessagePipeline`] that
//! persists, paces, and replies with a configurable human profile.

pub mod behavior;
pub mod guard;
pub mod media;
pub mod pipeline;
pub mod qr;
pub mod registry;
pub mod replies;
pub mod session;

pub use behavior::HumanBehavior;
pub use guard::PeerGuard;
pub use media::{MediaStore, StoredMedia};
pub use pipeline::MessagePipeline;
pub use registry::SessionRegistry;
pub use replies::{ReplyCategory, ReplyPools};
pub use session::{SessionHandle, SessionStatus};
