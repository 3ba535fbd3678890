//! Time source and local-calendar helpers.
//!
//! Instants are always `DateTime<Utc>`; the configured zone is only consulted when a local
//! calendar boundary or a display value is needed.

use std::sync::Arc;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// UTC bounds `[start, end)` of the local calendar day containing `now` in `zone`.
pub fn local_day_bounds(now: DateTime<Utc>, zone: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    local_date_bounds(now.with_timezone(&zone).date_naive(), zone)
}

/// UTC bounds `[start, end)` of the calendar `date` in `zone`.
pub fn local_date_bounds(date: NaiveDate, zone: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.succ_opt().unwrap_or(date);
    (local_midnight(date, zone), local_midnight(next, zone))
}

/// First instant of `date` in `zone`. A skipped midnight (DST gap) resolves to the first
/// valid local time after it; an ambiguous one resolves to the earliest.
fn local_midnight(date: NaiveDate, zone: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    let mut candidate = midnight;
    // Gaps are at most a few hours; scan forward minute by minute until a valid local time.
    for _ in 0..=(24 * 60) {
        match zone.from_local_datetime(&candidate) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => {
                return t.with_timezone(&Utc);
            }
            LocalResult::None => candidate += Duration::minutes(1),
        }
    }
    Utc.from_utc_datetime(&midnight)
}
