// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `covey-core::types` for use across
//! the collaborator trait boundary. This module re-exports them for
//! convenience within the storage crate.

pub use covey_core::types::{FileRecord, MessageRecord, NewFile, NewMessage};
