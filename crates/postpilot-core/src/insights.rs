//! Read-only display records for the Trends and Analytics views.

use serde::{Deserialize, Serialize};

/// A trending topic on some network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub id: String,
    pub topic: String,
    pub volume: u64,
    pub platform: String,
    pub description: String,
}

/// Engagement figures for a published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub post_id: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub reach: u64,
    pub engagement_rate: f64,
}
