//! Noctua Device Info - one-shot device snapshot for analytics and
//! attribution payloads.
//!
//! Given a handle to the host platform, the collector produces a flat
//! mapping of stable key/value strings describing the device, the installed
//! application, the display, the locale, and the Facebook attribution id.
//!
//! # Guarantees
//!
//! - **Stable vocabulary**: bucket names and cut-offs never change across
//!   platform upgrades
//! - **Absent, not null**: unavailable fields are omitted from the export
//! - **Pinned trust**: the Facebook provider is only queried when its owner
//!   carries the pinned signing certificate
//! - **One shot**: no network I/O, no persistence, no retries
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Noctua Device Info                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐        │
//! │  │  Platform   │──▶│ Classifiers │──▶│  Snapshot   │        │
//! │  │  Adapter    │   │  (buckets)  │   │  Assembler  │        │
//! │  └─────────────┘   └─────────────┘   └─────────────┘        │
//! │         │                                    │              │
//! │         ▼                                    ▼              │
//! │  ┌─────────────┐                     ┌─────────────┐        │
//! │  │ Signature + │                     │  Exporter   │        │
//! │  │ Attribution │                     │ (key/value) │        │
//! │  └─────────────┘                     └─────────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use noctua_device_info::platform::mock::MockPlatform;
//! use noctua_device_info::DeviceSnapshot;
//!
//! let platform = MockPlatform::new();
//! let snapshot = DeviceSnapshot::collect(&platform);
//! let info = snapshot.to_map();
//!
//! assert_eq!(info["os_name"], "android");
//! assert!(!info.contains_key("fb_attribution_id"));
//! ```

pub mod attribution;
pub mod config;
pub mod core;
pub mod payload;
pub mod platform;
pub mod transparency;

// Re-export key types at crate root for convenience
pub use crate::core::{
    DeviceSnapshot, DeviceType, OsName, ScreenDensity, ScreenFormat, ScreenSize,
    SnapshotAssembler, TimestampStyle, DEVICE_INFO_KEYS,
};
pub use attribution::{AttributionSlots, ProbeOutcome, OFFICIAL_FACEBOOK_SIGNATURE};
pub use config::{CollectorConfig, ConfigError};
pub use payload::EventPayload;
pub use platform::{Platform, PlatformError, VersionedPlatform};
pub use transparency::{CollectionLog, CollectionStats, SharedCollectionLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collection declaration that can be displayed to users.
pub const COLLECTION_DECLARATION: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║             NOCTUA DEVICE INFO - COLLECTION DECLARATION          ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  This SDK attaches device information to analytics events.       ║
║                                                                  ║
║  ✓ WHAT WE READ:                                                 ║
║    • Device model, manufacturer and OS build                     ║
║    • Screen size, aspect and density buckets                     ║
║    • Language and country settings                               ║
║    • App version and install/update times                        ║
║    • Facebook attribution id (official Facebook app only)        ║
║                                                                  ║
║  ✗ WHAT WE NEVER READ:                                           ║
║    • Contacts, messages, photos or files                         ║
║    • Location                                                    ║
║    • Data from apps whose signature is not verified              ║
║                                                                  ║
║  Nothing is stored or sent by the collector itself.              ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;
