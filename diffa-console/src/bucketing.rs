//! Bucket planning: how many data columns fit in a row, and how much wall
//! clock time each one covers.
//!
//! `bucket_seconds` is sent to the agent as the `bucketing` parameter, so the
//! integer truncation here must be the same rule the agent buckets with.

use crate::error::{ConsoleError, Result};
use crate::timefmt::TimeRange;
use chrono::{DateTime, Duration, Utc};

/// Characters reserved on the left of every row for the pairing label
pub const LABEL_WIDTH: usize = 10;

pub const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketPlan {
    pub columns: usize,
    pub bucket_seconds: u64,
}

impl BucketPlan {
    /// Start of the bucket drawn in data column `column`
    pub fn column_start(&self, start: DateTime<Utc>, column: usize) -> DateTime<Utc> {
        // column <= columns keeps the offset inside the planned span
        start + Duration::seconds((self.bucket_seconds * column as u64) as i64)
    }

    /// Number of whole tick labels the time axis can hold
    pub fn tick_count(&self) -> usize {
        self.columns / LABEL_WIDTH
    }
}

/// Plan buckets for a row `width` characters wide over `range`.
pub fn plan(width: usize, range: &TimeRange) -> Result<BucketPlan> {
    let columns = match width.checked_sub(LABEL_WIDTH) {
        Some(columns) if columns > 0 => columns,
        _ => {
            return Err(ConsoleError::InvalidWidth {
                width,
                label_width: LABEL_WIDTH,
            })
        }
    };

    let span = range.span_seconds();
    if span <= 0 {
        return Err(ConsoleError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }

    // truncates to 0 when the span has fewer seconds than there are columns
    let bucket_seconds = span as u64 / columns as u64;

    tracing::debug!(width, columns, bucket_seconds, "planned heatmap buckets");
    Ok(BucketPlan { columns, bucket_seconds })
}
