//! Integration tests for grey-rs crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the core container, the codecs and the filters.
