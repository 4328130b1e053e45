/**
 * HEATMAP - Swimlane rendering of bucketed diff counts
 *
 * ROLE : turns the agent's zoomed counts into text: a time axis, then one
 * shaded row per pairing between `-` rule lines.
 *
 * LAYOUT :
 * - every row starts with a LABEL_WIDTH gutter (pair key, or blanks on the axis)
 * - one glyph per bucket follows, in chronological order
 * - axis ticks sit every LABEL_WIDTH columns, labelled with the start of the
 *   bucket under the tick
 *
 * Rows are not clipped or padded: a series whose length differs from the
 * planned column count is drawn as the agent sent it.
 */

pub mod shade;

use crate::bucketing::{plan, BucketPlan, LABEL_WIDTH};
use crate::error::Result;
use crate::models::ZoomedCounts;
use crate::timefmt::TimeRange;
use chrono::{DateTime, Utc};
pub use shade::ShadeThresholds;

#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    width: usize,
    shades: ShadeThresholds,
}

impl HeatmapRenderer {
    pub fn new(width: usize) -> Self {
        Self::with_shades(width, ShadeThresholds::default())
    }

    pub fn with_shades(width: usize, shades: ShadeThresholds) -> Self {
        Self { width, shades }
    }

    /// Plan the buckets this renderer expects the agent to fill
    pub fn plan(&self, range: &TimeRange) -> Result<BucketPlan> {
        plan(self.width, range)
    }

    /// Full heatmap text, newline terminated
    pub fn render(&self, range: &TimeRange, counts: &ZoomedCounts) -> Result<String> {
        let plan = self.plan(range)?;
        Ok(self.render_planned(&plan, range.start, counts))
    }

    pub fn render_planned(&self, plan: &BucketPlan, start: DateTime<Utc>, counts: &ZoomedCounts) -> String {
        let boundary = self.boundary();
        let mut lines = Vec::with_capacity(counts.len() * 2 + 2);
        lines.push(time_axis(plan, start));
        for (pair_key, buckets) in counts.iter() {
            lines.push(boundary.clone());
            lines.push(self.swimlane(pair_key, buckets));
        }
        lines.push(boundary);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn boundary(&self) -> String {
        "-".repeat(self.width)
    }

    fn swimlane(&self, pair_key: &str, buckets: &[u64]) -> String {
        let mut row = format_y_label(pair_key);
        row.extend(buckets.iter().map(|count| self.shades.shade(*count)));
        row
    }
}

/// Blank gutter, one `|HH:MM` tick per LABEL_WIDTH columns, then blanks for
/// the columns left over so the axis is as wide as the rule lines.
pub fn time_axis(plan: &BucketPlan, start: DateTime<Utc>) -> String {
    let mut line = " ".repeat(LABEL_WIDTH);
    for tick in 0..plan.tick_count() {
        line.push_str(&format_x_label(plan.column_start(start, tick * LABEL_WIDTH)));
    }
    line.push_str(&" ".repeat(plan.columns % LABEL_WIDTH));
    line
}

/// Pair key cut to leave at least one blank before the data
pub fn format_y_label(pair_key: &str) -> String {
    fit(&pair_key.chars().take(LABEL_WIDTH - 1).collect::<String>(), LABEL_WIDTH)
}

pub fn format_x_label(time: DateTime<Utc>) -> String {
    fit(&time.format("|%H:%M").to_string(), LABEL_WIDTH)
}

// truncate to `width` chars, pad on the right
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.push_str(&" ".repeat(width - len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use chrono::{Duration, TimeZone};

    fn day_range() -> TimeRange {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TimeRange::new(start, start + Duration::hours(21))
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_y_label("orders"), "orders    ");
        assert_eq!(format_y_label("a-very-long-pair-key"), "a-very-lo ");
        assert_eq!(format_y_label(""), " ".repeat(10));
        assert_eq!(format_y_label("événements"), "événement ");

        let t = Utc.with_ymd_and_hms(2024, 1, 1, 3, 36, 59).unwrap();
        assert_eq!(format_x_label(t), "|03:36    ");
    }

    #[test]
    fn test_end_to_end_default_width() {
        let range = day_range();
        let mut counts = ZoomedCounts::new();
        let series: Vec<u64> = (0..70).map(|i| i % 12).collect();
        counts.push("orders", series);

        let renderer = HeatmapRenderer::new(80);
        let plan = renderer.plan(&range).unwrap();
        assert_eq!(plan.bucket_seconds, 1080);

        let text = renderer.render(&range, &counts).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "          |00:00    |03:00    |06:00    |09:00    |12:00    |15:00    |18:00    "
        );
        assert_eq!(lines[1], "-".repeat(80));
        assert!(lines[2].starts_with("orders    "));
        assert_eq!(lines[2].chars().count(), 80);
        assert_eq!(lines[2].chars().skip(10).count(), 70);
        assert_eq!(&lines[2][..11], "orders     ");
        assert_eq!(lines[3], "-".repeat(80));
    }

    #[test]
    fn test_row_glyphs_follow_counts() {
        let range = day_range();
        let mut counts = ZoomedCounts::new();
        counts.push("p", vec![0, 1, 4, 9, 10, 3]);
        let text = HeatmapRenderer::new(80).render(&range, &counts).unwrap();
        let row = text.lines().nth(2).unwrap();
        assert_eq!(row, "p          ░▒▒▓░");
    }

    #[test]
    fn test_axis_spans_full_width_with_remainder() {
        let range = day_range();
        for width in [11, 19, 20, 21, 85, 97, 120] {
            let renderer = HeatmapRenderer::new(width);
            let plan = renderer.plan(&range).unwrap();
            let axis = time_axis(&plan, range.start);
            assert_eq!(axis.chars().count(), width, "axis width for {}", width);
        }
    }

    #[test]
    fn test_tick_positions_use_bucket_width() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        // 40 columns over 4h: 360s buckets, ticks every hour
        let range = TimeRange::new(start, start + Duration::hours(4));
        let plan = HeatmapRenderer::new(50).plan(&range).unwrap();
        assert_eq!(
            time_axis(&plan, range.start),
            "          |06:00    |07:00    |08:00    |09:00    "
        );
    }

    #[test]
    fn test_rows_keep_agent_order_and_length() {
        let range = day_range();
        let mut counts = ZoomedCounts::new();
        counts.push("zeta", vec![1; 3]);
        counts.push("alpha", vec![10; 75]);
        let text = HeatmapRenderer::new(80).render(&range, &counts).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("zeta"));
        assert_eq!(lines[2].chars().count(), 13);
        assert!(lines[4].starts_with("alpha"));
        assert_eq!(lines[4].chars().count(), 85);
        assert_eq!(lines[5], "-".repeat(80));
    }

    #[test]
    fn test_no_pairings() {
        let text = HeatmapRenderer::new(30).render(&day_range(), &ZoomedCounts::new()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "-".repeat(30));
    }

    #[test]
    fn test_invalid_inputs_fail_before_rendering() {
        let counts = ZoomedCounts::new();
        assert!(matches!(
            HeatmapRenderer::new(10).render(&day_range(), &counts),
            Err(ConsoleError::InvalidWidth { .. })
        ));
        let r = day_range();
        let inverted = TimeRange::new(r.end, r.start);
        assert!(matches!(
            HeatmapRenderer::new(80).render(&inverted, &counts),
            Err(ConsoleError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_custom_shades() {
        let mut counts = ZoomedCounts::new();
        counts.push("x", vec![0, 1, 2]);
        let renderer = HeatmapRenderer::with_shades(20, ShadeThresholds::new([(2, '#')]));
        let text = renderer.render(&day_range(), &counts).unwrap();
        assert_eq!(text.lines().nth(2), Some("x           #"));
    }
}
