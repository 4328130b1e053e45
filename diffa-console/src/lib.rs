//! Diffa Console - terminal client for the Diffa reconciliation agent
//!
//! Two read-only views over an agent's diffs:
//! - `heatmap`: diff counts per pairing, bucketed across a time window and
//!   drawn as shaded swimlanes under a time axis
//! - `diffs`: the raw differences for one pairing, one classified line each

pub mod bucketing;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod listing;
pub mod models;
pub mod timefmt;

pub use bucketing::{plan, BucketPlan, DEFAULT_WIDTH, LABEL_WIDTH};
pub use client::{AgentResponse, DiffsClient};
pub use error::{ConsoleError, Result};
pub use heatmap::{HeatmapRenderer, ShadeThresholds};
pub use listing::{classify, MatchState};
pub use models::{DiffRecord, ObjectId, ZoomedCounts};
pub use timefmt::TimeRange;
