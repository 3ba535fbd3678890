// Module name shadows the `serde` crate; use `::serde` for the external crate.
use std::fmt::Display;

use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, TimeZone};

/// Serialize a `DateTime` as RFC 3339 with 3-digit fractional seconds, keeping its offset.
/// UTC values render with a `Z` suffix.
pub fn to_rfc3339_ms<Tz, S>(dt: &DateTime<Tz>, s: S) -> Result<S::Ok, S::Error>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
