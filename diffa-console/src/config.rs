use crate::cli::{Cli, Commands};
use crate::timefmt::TimeRange;
use chrono::{DateTime, Utc};

/// Log directive used when RUST_LOG is unset and `-v` is given
pub const VERBOSE_LOG_DIRECTIVE: &str = "diffa_console=debug";
pub const QUIET_LOG_DIRECTIVE: &str = "warn";

/// Everything one invocation needs, with CLI defaults resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub agent_url: String,
    pub range: TimeRange,
    pub verbose: bool,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Heatmap { width: usize, sort: bool },
    Diffs { pair_key: String },
}

impl ConsoleConfig {
    /// `now` anchors the default window; pass `Utc::now()` outside tests
    pub fn from_cli(cli: Cli, now: DateTime<Utc>) -> Self {
        let common = cli.command.common();
        let range = TimeRange::resolve(common.from, common.until, now);
        let agent_url = common.agent_url.clone();
        let verbose = common.verbose;

        let mode = match cli.command {
            Commands::Heatmap { width, sort, .. } => Mode::Heatmap { width, sort },
            Commands::Diffs { pair_key, .. } => Mode::Diffs { pair_key },
        };

        Self {
            agent_url,
            range,
            verbose,
            mode,
        }
    }

    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_DIRECTIVE
        } else {
            QUIET_LOG_DIRECTIVE
        }
    }
}
