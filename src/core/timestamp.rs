//! Install/update time formatting.

use chrono::{DateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Output style for epoch-millisecond timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStyle {
    /// ISO-8601 with numeric offset in the host default zone,
    /// e.g. `2024-01-15T17:00:00+07:00`.
    #[default]
    IsoOffset,
    /// Legacy `yyyy-MM-ddTHH:mm:ssZ` rendering in UTC.
    UtcSeconds,
}

/// Format epoch milliseconds in `tz`. Returns `None` for instants outside
/// the representable range.
pub fn format_epoch_millis(millis: i64, tz: Tz, style: TimestampStyle) -> Option<String> {
    let instant = Utc.timestamp_millis_opt(millis).single()?;

    match style {
        TimestampStyle::IsoOffset => Some(iso_offset(&instant.with_timezone(&tz))),
        TimestampStyle::UtcSeconds => Some(instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
    }
}

/// Seconds are always printed; the fraction only when non-zero, without
/// trailing zeros. A zero offset renders as `+00:00`; offsets with a
/// seconds component (historical local mean time) as `+HH:MM:SS`.
fn iso_offset(dt: &DateTime<Tz>) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();

    let nanos = dt.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }

    let offset_format = if dt.offset().fix().local_minus_utc() % 60 != 0 {
        "%::z"
    } else {
        "%:z"
    };
    out.push_str(&dt.format(offset_format).to_string());
    out
}
