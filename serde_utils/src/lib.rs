//! Adapters for `#[serde(with = "...")]`.
//!
//! Consensus APIs represent integers as decimal strings, while configuration files written by hand
//! usually contain plain numbers. The adapters here accept both and produce strings in
//! human-readable formats.

pub mod string_or_native;
pub mod string_or_native_sequence;
