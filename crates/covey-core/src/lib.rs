// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Covey automated-responder workspace.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain types used throughout the Covey workspace. The messaging transport
//! and the relational persistence engine are external collaborators reached
//! through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CoveyError;
pub use types::{
    MediaPayload, MessageEvent, MessageKind, NewFile, NewMessage, TransportEvent,
    normalize_identity,
};

pub use traits::{ChatSurface, MessageStore, Transport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covey_error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _config = CoveyError::Config("test".into());
        let _storage = CoveyError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _duplicate = CoveyError::DuplicateMessage {
            provider_message_id: "abc".into(),
        };
        let _transport = CoveyError::Transport {
            message: "test".into(),
            source: None,
        };
        let _exists = CoveyError::SessionExists {
            identity: "5551234567".into(),
        };
        let _timeout = CoveyError::Timeout {
            duration: std::time::Duration::from_secs(60),
        };
        let _internal = CoveyError::Internal("test".into());
    }

    #[test]
    fn duplicate_is_the_only_benign_variant() {
        let dup = CoveyError::DuplicateMessage {
            provider_message_id: "abc".into(),
        };
        assert!(dup.is_duplicate());
        assert!(!CoveyError::Config("x".into()).is_duplicate());
        assert!(
            !CoveyError::Timeout {
                duration: std::time::Duration::from_secs(1),
            }
            .is_duplicate()
        );
    }

    #[test]
    fn all_trait_seams_are_exported() {
        // If any collaborator trait is missing or fails to compile, this
        // test won't compile.
        fn _assert_transport<T: Transport>() {}
        fn _assert_chat_surface<T: ChatSurface>() {}
        fn _assert_message_store<T: MessageStore>() {}
    }
}
