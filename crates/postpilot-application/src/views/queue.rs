//! Content queue: brand-scoped posts with a status filter.

use crate::content_store::ContentSnapshot;
use postpilot_core::content::{Post, PostStatus};
use postpilot_core::{PostPilotError, Result};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueFilter {
    #[default]
    All,
    Status(PostStatus),
}

impl QueueFilter {
    /// Filter buttons in display order: `all` followed by every status.
    pub fn options() -> Vec<QueueFilter> {
        std::iter::once(QueueFilter::All)
            .chain(PostStatus::iter().map(QueueFilter::Status))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueueFilter::All => "All",
            QueueFilter::Status(status) => status.label(),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            QueueFilter::All => true,
            QueueFilter::Status(status) => post.status == *status,
        }
    }
}

impl fmt::Display for QueueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueFilter::All => f.write_str("all"),
            QueueFilter::Status(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for QueueFilter {
    type Err = PostPilotError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(QueueFilter::All);
        }
        s.parse::<PostStatus>()
            .map(QueueFilter::Status)
            .map_err(|_| PostPilotError::validation(format!("Unknown filter '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    pub post: Post,
    /// Approve and decline are only offered for drafts.
    pub can_review: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueueModel {
    pub filter: QueueFilter,
    pub items: Vec<QueueItem>,
    /// Size of the brand-scoped set before filtering.
    pub brand_total: usize,
}

pub fn queue_view(snapshot: &ContentSnapshot, filter: QueueFilter) -> QueueModel {
    let brand_posts: Vec<&Post> = snapshot.brand_posts().collect();
    let items = brand_posts
        .iter()
        .filter(|post| filter.matches(post))
        .map(|post| QueueItem {
            post: (*post).clone(),
            can_review: post.status == PostStatus::Draft,
        })
        .collect();

    QueueModel {
        filter,
        items,
        brand_total: brand_posts.len(),
    }
}
