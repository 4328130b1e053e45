use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use diffa_console::cli::Cli;
use diffa_console::commands;
use diffa_console::config::ConsoleConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Both network calls are awaited one after the other; no worker threads needed
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = ConsoleConfig::from_cli(Cli::parse(), Utc::now());

    // Initialize logging (stderr only, stdout carries the rendered output)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("resolved config: {:?}", config);

    let output = commands::run(&config).await.map_err(|err| {
        let context = if err.is_remote() {
            format!("agent at {} did not answer as expected", config.agent_url)
        } else {
            "invalid invocation, nothing was sent to the agent".to_string()
        };
        anyhow::Error::new(err).context(context)
    })?;
    print!("{}", output);
    Ok(())
}
