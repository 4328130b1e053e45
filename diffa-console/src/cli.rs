//! Command-line surface: `heatmap` and `diffs` subcommands.

use crate::bucketing::DEFAULT_WIDTH;
use crate::timefmt::parse_wire;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "diffa-console")]
#[command(about = "Console UI for Diffa", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show differences heatmap
    Heatmap {
        #[command(flatten)]
        common: CommonArgs,

        /// Width (in characters) of output
        #[arg(short = 'w', value_name = "WIDTH", env = "DIFFA_CONSOLE_WIDTH", default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Order swimlanes by pair key instead of agent order
        #[arg(long)]
        sort: bool,
    },

    /// List diffs
    Diffs {
        #[command(flatten)]
        common: CommonArgs,

        /// Pair key
        #[arg(value_name = "PAIR")]
        pair_key: String,
    },
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// The base URL of the agent
    #[arg(value_name = "AGENT")]
    pub agent_url: String,

    /// Show diffs from this UTC time, YYYYMMDDTHHMMSSZ (default: 21 hours before UNTIL)
    #[arg(long = "from", value_name = "FROM", value_parser = parse_wire)]
    pub from: Option<DateTime<Utc>>,

    /// Show diffs until this UTC time, YYYYMMDDTHHMMSSZ (default: next full hour)
    #[arg(long = "until", value_name = "UNTIL", value_parser = parse_wire)]
    pub until: Option<DateTime<Utc>>,

    /// Show HTTP activity on stderr
    #[arg(short = 'v')]
    pub verbose: bool,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Heatmap { common, .. } | Commands::Diffs { common, .. } => common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_heatmap() {
        let cli = Cli::try_parse_from([
            "diffa-console",
            "heatmap",
            "http://localhost:7654/",
            "--from",
            "20240101T000000Z",
            "-w",
            "120",
            "-v",
        ])
        .unwrap();
        match cli.command {
            Commands::Heatmap { common, width, sort } => {
                assert_eq!(common.agent_url, "http://localhost:7654/");
                assert_eq!(common.from.map(|t| t.timestamp()), Some(1_704_067_200));
                assert!(common.until.is_none());
                assert!(common.verbose);
                assert_eq!(width, 120);
                assert!(!sort);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_diffs_positional_order() {
        let cli = Cli::try_parse_from(["diffa-console", "diffs", "http://agent/", "orders"]).unwrap();
        assert_eq!(cli.command.common().agent_url, "http://agent/");
        match cli.command {
            Commands::Diffs { pair_key, .. } => assert_eq!(pair_key, "orders"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let err = Cli::try_parse_from(["diffa-console", "diffs", "http://agent/", "orders", "--until", "yesterday"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
