//! Post domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use super::ids::string_or_number;

/// Social network surface a post is written for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Platform {
    Linkedin,
    InstagramFeed,
    InstagramStory,
    Tiktok,
    Facebook,
}

impl Platform {
    /// Human-readable name used in pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Linkedin => "LinkedIn",
            Platform::InstagramFeed => "Instagram Feed",
            Platform::InstagramStory => "Instagram Story",
            Platform::Tiktok => "TikTok",
            Platform::Facebook => "Facebook",
        }
    }
}

/// Informational pipeline tag of a post.
///
/// Transitions are not enforced: any status may be set from any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PostStatus {
    Draft,
    Approved,
    Scheduled,
    Posted,
    Declined,
}

impl PostStatus {
    /// Capitalized label, as on the queue filter buttons.
    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Approved => "Approved",
            PostStatus::Scheduled => "Scheduled",
            PostStatus::Posted => "Posted",
            PostStatus::Declined => "Declined",
        }
    }

    /// Whether posts with this status belong on the calendar.
    pub fn is_on_calendar(&self) -> bool {
        matches!(
            self,
            PostStatus::Approved | PostStatus::Scheduled | PostStatus::Posted
        )
    }
}

/// A single piece of social content tied to one brand and one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub brand_id: String,
    pub caption: String,
    pub platform: Platform,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a post; only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Post {
    /// A fresh `post_<uuid>` identifier.
    pub fn generate_id() -> String {
        format!("post_{}", Uuid::new_v4().simple())
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(caption) = patch.caption {
            self.caption = caption;
        }
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            self.scheduled_at = Some(scheduled_at);
        }
        if let Some(posted_at) = patch.posted_at {
            self.posted_at = Some(posted_at);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
    }

    /// The instant a calendar places this post at.
    pub fn calendar_start(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at.or(self.posted_at)
    }
}
