//! Timestamp parsing for wire records.
//!
//! The service emits RFC 3339 for `game_date` but offset-less ISO-8601 for
//! `created_at`. Offset-less values are taken as UTC.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, String> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    let naive = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    PrimitiveDateTime::parse(raw, naive)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| format!("unparsable timestamp '{raw}': {e}"))
}

pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, String> {
    ts.format(&Rfc3339)
        .map_err(|e| format!("cannot format timestamp: {e}"))
}
