// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Covey responder core.
//!
//! The transport and persistence engines live outside this workspace; these
//! traits are the seams the core consumes them through. All traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod store;
pub mod transport;

pub use store::MessageStore;
pub use transport::{ChatSurface, Transport};
