//! Core functionality for the device information collector.
//!
//! This module contains:
//! - Classifiers mapping raw platform values to the stable vocabulary
//! - Timestamp formatting for install/update times
//! - Snapshot assembly and export

pub mod classify;
pub mod export;
pub mod snapshot;
pub mod timestamp;

// Re-export commonly used types
pub use classify::{DeviceType, OsName, ScreenDensity, ScreenFormat, ScreenSize, PC_FEATURE};
pub use export::DEVICE_INFO_KEYS;
pub use snapshot::{DeviceSnapshot, SnapshotAssembler};
pub use timestamp::{format_epoch_millis, TimestampStyle};
