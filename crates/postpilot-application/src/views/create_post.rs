//! Create-post form.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use postpilot_core::content::{Platform, Post, PostStatus};
use postpilot_core::gateway::GeneratedContent;
use postpilot_core::user::User;
use postpilot_core::{PostPilotError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePostForm {
    pub caption: String,
    pub platform: Platform,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

impl CreatePostForm {
    pub fn new(caption: impl Into<String>, platform: Platform) -> Self {
        Self {
            caption: caption.into(),
            platform,
            scheduled_at: None,
            image_url: None,
        }
    }

    /// Pre-fills the form from a generation result.
    pub fn from_generated(generated: GeneratedContent, platform: Platform) -> Self {
        Self {
            caption: generated.caption.unwrap_or_default(),
            platform,
            scheduled_at: None,
            image_url: generated.image_url.filter(|url| !url.is_empty()),
        }
    }

    pub fn scheduled(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.scheduled_at = at;
        self
    }

    /// Builds the post to add.
    ///
    /// A scheduled post starts `approved`, anything else starts as a `draft`.
    pub fn into_post(
        self,
        user: Option<&User>,
        brand_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Post> {
        let user = user.ok_or_else(|| PostPilotError::validation("Log in to create posts."))?;
        let brand_id = brand_id.ok_or_else(|| PostPilotError::validation("Select a brand first."))?;
        if self.caption.trim().is_empty() {
            return Err(PostPilotError::validation("Caption is required."));
        }

        let status = if self.scheduled_at.is_some() {
            PostStatus::Approved
        } else {
            PostStatus::Draft
        };

        Ok(Post {
            id: Post::generate_id(),
            user_id: user.id.clone(),
            brand_id: brand_id.to_string(),
            caption: self.caption,
            platform: self.platform,
            status,
            scheduled_at: self.scheduled_at,
            posted_at: None,
            image_url: self.image_url,
            created_at: now,
        })
    }
}

/// Combines a `YYYY-MM-DD` date and `HH:MM` time entered in `tz`.
///
/// The schedule is only set when both parts are present; a blank part yields
/// `None`.
pub fn parse_schedule<Tz: TimeZone>(date: &str, time: &str, tz: &Tz) -> Result<Option<DateTime<Utc>>> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| PostPilotError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", date)))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| PostPilotError::validation(format!("Invalid time '{}', expected HH:MM", time)))?;

    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .ok_or_else(|| PostPilotError::validation("That local time does not exist."))
}
