// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Covey workspace.
//!
//! `MockTransport` stands in for a real messaging transport, enabling
//! fast, CI-runnable end-to-end tests without a live connection.

pub mod mock_transport;

pub use mock_transport::{media_event, text_event, ChatOp, MockChat, MockTransport, SessionLink};
