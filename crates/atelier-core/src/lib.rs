// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Heerawalla atelier mail router.
//!
//! This crate provides the error type, domain types (correlation IDs,
//! addresses, inbound/outbound messages), and the collaborator traits the
//! routing engine consumes. Concrete backends live in sibling crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AtelierError;
pub use types::{ClassifiedEmail, CorrelationId, EmailAddress, InboundEmail, OutboundEmail};

// Re-export all collaborator traits at crate root.
pub use traits::{ContactDirectory, KeyValueStore, OutboundDispatcher, TabularLedger};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atelier_error_has_all_variants() {
        let _config = AtelierError::Config("test".into());
        let _store = AtelierError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _dispatch = AtelierError::Dispatch {
            message: "test".into(),
            source: None,
        };
        let _directory = AtelierError::Directory {
            message: "test".into(),
            source: None,
        };
        let _ledger = AtelierError::Ledger {
            message: "test".into(),
            source: None,
        };
        let _auth = AtelierError::Auth {
            message: "test".into(),
            source: None,
        };
        let _internal = AtelierError::Internal("test".into());
    }

    #[test]
    fn all_collaborator_traits_are_exported() {
        // If any trait module is missing or fails to compile, this
        // function itself won't compile.
        fn _assert_dispatcher<T: OutboundDispatcher>() {}
        fn _assert_kv<T: KeyValueStore>() {}
        fn _assert_directory<T: ContactDirectory>() {}
        fn _assert_ledger<T: TabularLedger>() {}
    }

    #[test]
    fn error_display_is_prefixed_by_kind() {
        let err = AtelierError::Dispatch {
            message: "provider returned 500".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "dispatch error: provider returned 500");
    }
}
