//! List mode: one line per raw diff, prefixed with its match state.
//!
//! Whether two versions actually differ is the agent's call; a record with
//! both versions present is a data diff regardless of their values.

use crate::models::DiffRecord;
use std::fmt;

const ABSENT: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// present upstream only
    MissingDownstream,
    /// present downstream only
    MissingUpstream,
    DataDiff,
}

impl MatchState {
    pub fn code(&self) -> &'static str {
        match self {
            MatchState::MissingDownstream => "md",
            MatchState::MissingUpstream => "mu",
            MatchState::DataDiff => "dd",
        }
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub fn classify(record: &DiffRecord) -> MatchState {
    if record.downstream_vsn.is_none() {
        MatchState::MissingDownstream
    } else if record.upstream_vsn.is_none() {
        MatchState::MissingUpstream
    } else {
        MatchState::DataDiff
    }
}

/// `state id upstream downstream detected`, with `-` for an absent version
pub fn format_record(record: &DiffRecord) -> String {
    format!(
        "{} {} {} {} {}",
        classify(record),
        record.obj_id.id,
        record.upstream_vsn.as_deref().unwrap_or(ABSENT),
        record.downstream_vsn.as_deref().unwrap_or(ABSENT),
        record.detected_at
    )
}

pub fn format_records(records: &[DiffRecord]) -> String {
    records.iter().map(|r| format_record(r) + "\n").collect()
}
