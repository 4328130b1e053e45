//! The two console operations, end to end: fetch from the agent, render text.

use crate::client::DiffsClient;
use crate::config::{ConsoleConfig, Mode};
use crate::error::{ConsoleError, Result};
use crate::heatmap::HeatmapRenderer;
use crate::listing::format_records;
use crate::timefmt::TimeRange;
use tracing::info;

pub async fn show_heatmap(
    client: &DiffsClient,
    renderer: &HeatmapRenderer,
    range: &TimeRange,
    sort: bool,
) -> Result<String> {
    let plan = renderer.plan(range)?;
    let counts = client.get_diffs_zoomed(range, plan.bucket_seconds).await?;
    info!("{} pairings over {}", counts.len(), range);

    let counts = if sort { counts.sorted() } else { counts };
    Ok(renderer.render_planned(&plan, range.start, &counts))
}

pub async fn list_diffs(client: &DiffsClient, pair_key: &str, range: &TimeRange) -> Result<String> {
    let records = client.get_diffs(pair_key, range).await?;
    info!("{} diffs for {} over {}", records.len(), pair_key, range);
    Ok(format_records(&records))
}

/// Run the configured command. Local input is validated before any request
/// goes out, including a span too short to give every column a whole second.
pub async fn run(config: &ConsoleConfig) -> Result<String> {
    match &config.mode {
        Mode::Heatmap { width, sort } => {
            let renderer = HeatmapRenderer::new(*width);
            if renderer.plan(&config.range)?.bucket_seconds == 0 {
                // the agent cannot bucket at zero width
                return Err(ConsoleError::InvalidRange {
                    start: config.range.start,
                    end: config.range.end,
                });
            }
            let client = DiffsClient::connect(&config.agent_url).await?;
            show_heatmap(&client, &renderer, &config.range, *sort).await
        }
        Mode::Diffs { pair_key } => {
            let client = DiffsClient::connect(&config.agent_url).await?;
            list_diffs(&client, pair_key, &config.range).await
        }
    }
}
