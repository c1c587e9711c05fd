//! Snapshot reporting
//!
//! Supports multiple output formats:
//! - Text (indented tree, as a view layer would show it)
//! - JSON

pub mod reporter;

pub use reporter::SnapshotReporter;
