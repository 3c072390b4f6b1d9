//! Attribution helpers: signing-certificate pinning, the Facebook
//! attribution-id probe, and host-filled attribution slots.

pub mod probe;
pub mod signature;
pub mod slots;

// Re-export commonly used types
pub use probe::{
    facebook_attribution_id, ProbeOutcome, ATTRIBUTION_ID_COLUMN, ATTRIBUTION_ID_PROVIDER_URI,
};
pub use signature::{matches_pin, verify, FACEBOOK_PACKAGE, OFFICIAL_FACEBOOK_SIGNATURE};
pub use slots::AttributionSlots;
