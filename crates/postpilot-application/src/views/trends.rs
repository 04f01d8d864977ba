//! Trends view.

use super::format_count;
use crate::sample_data::sample_trends;
use postpilot_core::insights::Trend;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    /// 1-based position in the list.
    pub rank: usize,
    pub trend: Trend,
    pub volume_label: String,
}

/// Trending topics ranked in the order they are listed.
pub fn trends_view() -> Vec<TrendRow> {
    rank(sample_trends())
}

fn rank(trends: Vec<Trend>) -> Vec<TrendRow> {
    trends
        .into_iter()
        .enumerate()
        .map(|(i, trend)| TrendRow {
            rank: i + 1,
            volume_label: format!("{} mentions", format_count(trend.volume)),
            trend,
        })
        .collect()
}
