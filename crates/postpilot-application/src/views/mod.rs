//! View models.
//!
//! Each view is a pure function of a [`ContentSnapshot`](crate::ContentSnapshot)
//! (plus the current user where needed). The shell renders the returned models.

pub mod analytics;
pub mod calendar;
pub mod create_post;
pub mod header;
pub mod navigation;
pub mod queue;
pub mod settings;
pub mod trends;

pub use analytics::{AnalyticsModel, AnalyticsSummary, PostPerformance, analytics_view};
pub use calendar::{CalendarEvent, calendar_events};
pub use create_post::{CreatePostForm, parse_schedule};
pub use header::{BrandOption, HeaderModel, header_view};
pub use navigation::{SidebarItem, View, sidebar};
pub use queue::{QueueFilter, QueueItem, QueueModel, queue_view};
pub use settings::{BrandForm, BrandRow, settings_view};
pub use trends::{TrendRow, trends_view};

/// Formats a count with thousands separators, e.g. `125000` as `125,000`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
