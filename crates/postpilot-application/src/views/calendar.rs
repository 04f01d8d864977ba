//! Calendar events for the selected brand.

use crate::content_store::ContentSnapshot;
use chrono::{DateTime, Utc};
use postpilot_core::content::{Platform, PostStatus};

pub const POSTED_COLOR: &str = "#10b981";
pub const SCHEDULED_COLOR: &str = "#3b82f6";

const TITLE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub post_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub color: &'static str,
    pub platform: Platform,
    pub status: PostStatus,
}

/// Events for the selected brand's approved, scheduled and posted posts.
///
/// Posts without a scheduled or posted time are skipped. Events keep the
/// collection order.
pub fn calendar_events(snapshot: &ContentSnapshot) -> Vec<CalendarEvent> {
    let Some(brand_id) = snapshot.selected_brand_id.as_deref() else {
        return Vec::new();
    };

    snapshot
        .posts
        .iter()
        .filter(|post| post.brand_id == brand_id && post.status.is_on_calendar())
        .filter_map(|post| {
            let start = post.calendar_start()?;
            Some(CalendarEvent {
                post_id: post.id.clone(),
                title: event_title(&post.caption),
                start,
                color: if post.status == PostStatus::Posted {
                    POSTED_COLOR
                } else {
                    SCHEDULED_COLOR
                },
                platform: post.platform,
                status: post.status,
            })
        })
        .collect()
}

fn event_title(caption: &str) -> String {
    let mut title: String = caption.chars().take(TITLE_CHARS).collect();
    title.push_str("...");
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data::{sample_brands, sample_posts};
    use chrono::TimeZone;

    fn snapshot(selected: Option<&str>) -> ContentSnapshot {
        ContentSnapshot {
            brands: sample_brands(),
            posts: sample_posts(),
            selected_brand_id: selected.map(str::to_string),
        }
    }

    #[test]
    fn test_events_for_selected_brand() {
        let events = calendar_events(&snapshot(Some("brand_1")));

        let ids: Vec<_> = events.iter().map(|e| e.post_id.as_str()).collect();
        assert_eq!(ids, ["post_3", "post_6"]);
        assert_eq!(events[0].color, SCHEDULED_COLOR);
        assert_eq!(events[1].color, POSTED_COLOR);
        assert_eq!(
            events[0].start,
            Utc.with_ymd_and_hms(2025, 11, 6, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_title_truncates_to_fifty_chars() {
        let events = calendar_events(&snapshot(Some("brand_1")));
        let title = &events[0].title;

        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 53);
        assert!(title.starts_with("Quick tip: Did you know"));
    }

    #[test]
    fn test_undated_posts_are_skipped() {
        let mut snapshot = snapshot(Some("brand_1"));
        snapshot.posts[0].status = PostStatus::Approved;

        let events = calendar_events(&snapshot);
        assert!(events.iter().all(|e| e.post_id != "post_1"));
    }

    #[test]
    fn test_no_selection_has_no_events() {
        assert!(calendar_events(&snapshot(None)).is_empty());
    }
}
