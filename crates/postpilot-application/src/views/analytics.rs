//! Analytics view: totals and per-post performance.

use crate::content_store::ContentSnapshot;
use postpilot_core::content::{Post, PostStatus};
use postpilot_core::insights::Analytics;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_reach: u64,
    /// Mean engagement rate in percent; zero when there are no records.
    pub avg_engagement: f64,
}

impl AnalyticsSummary {
    pub fn from_records(records: &[Analytics]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        Self {
            total_likes: records.iter().map(|a| a.likes).sum(),
            total_comments: records.iter().map(|a| a.comments).sum(),
            total_shares: records.iter().map(|a| a.shares).sum(),
            total_reach: records.iter().map(|a| a.reach).sum(),
            avg_engagement: records.iter().map(|a| a.engagement_rate).sum::<f64>()
                / records.len() as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostPerformance {
    pub post: Post,
    pub analytics: Analytics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsModel {
    pub summary: AnalyticsSummary,
    pub posts: Vec<PostPerformance>,
}

/// Totals cover every record in `records`; the per-post rows only list the
/// selected brand's posted posts that have a record.
pub fn analytics_view(snapshot: &ContentSnapshot, records: &[Analytics]) -> AnalyticsModel {
    let selected = snapshot.selected_brand_id.as_deref();
    let posts = snapshot
        .posts
        .iter()
        .filter(|post| Some(post.brand_id.as_str()) == selected && post.status == PostStatus::Posted)
        .filter_map(|post| {
            records
                .iter()
                .find(|a| a.post_id == post.id)
                .map(|analytics| PostPerformance {
                    post: post.clone(),
                    analytics: analytics.clone(),
                })
        })
        .collect();

    AnalyticsModel {
        summary: AnalyticsSummary::from_records(records),
        posts,
    }
}
