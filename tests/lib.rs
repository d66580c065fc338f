//! End-to-end tests that need external infrastructure live in this crate.
