//! Wire timestamps and the time range a command covers.
//!
//! The agent exchanges instants as `YYYYMMDDTHHMMSSZ` (UTC, second precision).
//! Formatting drops any sub-second component; that loss is accepted.

use crate::error::{ConsoleError, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use std::fmt;

pub const WIRE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Hours shown by default, ending at the next full hour.
pub const DEFAULT_SPAN_HOURS: i64 = 21;

/// Format an instant the way the agent expects it
pub fn format_wire(ts: &DateTime<Utc>) -> String {
    ts.format(WIRE_FORMAT).to_string()
}

/// Parse an instant in the agent's format
pub fn parse_wire(input: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input.trim(), WIRE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ConsoleError::InvalidTimestamp {
            input: input.to_string(),
            source,
        })
}

/// Truncate to the hour, then move one hour forward. An instant already on
/// the hour still advances.
pub fn round_up_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = Duration::seconds(i64::from(ts.minute()) * 60 + i64::from(ts.second()))
        + Duration::nanoseconds(i64::from(ts.nanosecond()));
    ts - into_hour + Duration::hours(1)
}

/// Start and end of the window queried from the agent. Ordering is not
/// checked here; the bucket planner rejects empty or inverted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `--until` defaults to the next full hour, `--from` to 21 hours before it
    pub fn default_ending_after(now: DateTime<Utc>) -> Self {
        let end = round_up_to_hour(now);
        Self::new(end - Duration::hours(DEFAULT_SPAN_HOURS), end)
    }

    /// Fill whichever end the caller left open from the default window. An
    /// explicit end without a start still gets the 21 hour lookback.
    pub fn resolve(from: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let end = until.unwrap_or_else(|| round_up_to_hour(now));
        let start = from.unwrap_or(end - Duration::hours(DEFAULT_SPAN_HOURS));
        Self::new(start, end)
    }

    pub fn span_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn wire_start(&self) -> String {
        format_wire(&self.start)
    }

    pub fn wire_end(&self) -> String {
        format_wire(&self.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.wire_start(), self.wire_end())
    }
}
