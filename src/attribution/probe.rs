//! Facebook attribution-id probe.
//!
//! Reads the opaque attribution token that the Facebook application exposes
//! through its content provider, after checking that the provider's owner
//! carries the pinned signing certificate.

use super::signature::{self, FACEBOOK_PACKAGE, OFFICIAL_FACEBOOK_SIGNATURE};
use crate::platform::{CursorGuard, Platform, PlatformError};

/// Content provider exposing the attribution id.
pub const ATTRIBUTION_ID_PROVIDER_URI: &str =
    "content://com.facebook.katana.provider.AttributionIdProvider";

/// Column holding the attribution id.
pub const ATTRIBUTION_ID_COLUMN: &str = "aid";

/// How a probe run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The provider's owner is missing or not signed by the pin.
    SignatureRejected,
    /// The query returned no cursor.
    NoCursor,
    /// The cursor had no first row.
    EmptyCursor,
    /// The first row was read; the provider may itself report no value.
    Found(Option<String>),
    /// The platform failed somewhere in the sequence.
    Failed(PlatformError),
}

impl ProbeOutcome {
    /// The attribution token, if one was read.
    pub fn token(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Found(token) => token.as_deref(),
            _ => None,
        }
    }

    pub fn into_token(self) -> Option<String> {
        match self {
            ProbeOutcome::Found(token) => token,
            _ => None,
        }
    }
}

/// Run the probe and report how it ended. Never fails.
pub fn probe<P: Platform + ?Sized>(platform: &P) -> ProbeOutcome {
    if !signature::verify(platform, FACEBOOK_PACKAGE, OFFICIAL_FACEBOOK_SIGNATURE) {
        return ProbeOutcome::SignatureRejected;
    }

    match read_first_row(platform) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!(error = %e, "attribution id query failed");
            ProbeOutcome::Failed(e)
        }
    }
}

/// Attribution token, or `None` on any failure.
pub fn facebook_attribution_id<P: Platform + ?Sized>(platform: &P) -> Option<String> {
    probe(platform).into_token()
}

fn read_first_row<P: Platform + ?Sized>(platform: &P) -> Result<ProbeOutcome, PlatformError> {
    let cursor = platform.query_content(ATTRIBUTION_ID_PROVIDER_URI, &[ATTRIBUTION_ID_COLUMN])?;
    let mut cursor = match cursor {
        Some(cursor) => CursorGuard::new(cursor),
        None => return Ok(ProbeOutcome::NoCursor),
    };

    if !cursor.move_to_first()? {
        return Ok(ProbeOutcome::EmptyCursor);
    }

    let column = cursor.column_index(ATTRIBUTION_ID_COLUMN).ok_or_else(|| {
        PlatformError::Malformed(format!("missing column {ATTRIBUTION_ID_COLUMN}"))
    })?;
    let token = cursor.get_string(column)?;

    Ok(ProbeOutcome::Found(token))
}
