//! Transparency module for the device information collector.
//!
//! Tracks how much the collector read, so hosts can surface it to users
//! and auditors.

pub mod log;

// Re-export commonly used types
pub use log::{create_shared_log, CollectionLog, CollectionStats, SharedCollectionLog};
