//! Bundled sample content.
//!
//! Seeds the content store on first run and backs the Trends and Analytics
//! views, which have no remote source.

use chrono::{DateTime, Utc};
use postpilot_core::content::{Brand, Platform, Post, PostStatus};
use postpilot_core::insights::{Analytics, Trend};
use postpilot_core::user::User;

const SAMPLE_USER_ID: &str = "user_1";

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// The account the sample content belongs to.
pub fn sample_user() -> User {
    User::new(SAMPLE_USER_ID, "Demo User", "demo@example.com")
}

pub fn sample_brands() -> Vec<Brand> {
    vec![
        Brand {
            id: "brand_1".to_string(),
            user_id: SAMPLE_USER_ID.to_string(),
            name: "TechCo".to_string(),
            product_description: "AI-powered productivity tools for modern teams".to_string(),
            brand_voice: "Professional yet approachable, focusing on innovation and efficiency"
                .to_string(),
            created_at: at("2025-01-15T10:00:00Z"),
        },
        Brand {
            id: "brand_2".to_string(),
            user_id: SAMPLE_USER_ID.to_string(),
            name: "FitLife".to_string(),
            product_description: "Wellness and fitness coaching platform".to_string(),
            brand_voice: "Energetic, motivational, and empowering".to_string(),
            created_at: at("2025-02-01T10:00:00Z"),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    brand_id: &str,
    caption: &str,
    platform: Platform,
    status: PostStatus,
    scheduled_at: Option<&str>,
    posted_at: Option<&str>,
    created_at: &str,
) -> Post {
    Post {
        id: id.to_string(),
        user_id: SAMPLE_USER_ID.to_string(),
        brand_id: brand_id.to_string(),
        caption: caption.to_string(),
        platform,
        status,
        scheduled_at: scheduled_at.map(at),
        posted_at: posted_at.map(at),
        image_url: None,
        created_at: at(created_at),
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        post(
            "post_1",
            "brand_1",
            "🚀 Excited to announce our new AI features that will revolutionize your workflow! Stay tuned for the big reveal next week. #Innovation #AI #Productivity",
            Platform::Linkedin,
            PostStatus::Draft,
            None,
            None,
            "2025-11-02T14:30:00Z",
        ),
        post(
            "post_2",
            "brand_1",
            "Behind the scenes at TechCo HQ 💻✨ Our team is hard at work building the future of productivity tools.",
            Platform::InstagramFeed,
            PostStatus::Draft,
            None,
            None,
            "2025-11-02T15:00:00Z",
        ),
        post(
            "post_3",
            "brand_1",
            "Quick tip: Did you know you can boost your productivity by 40% with our smart scheduling feature? Try it today! 🎯",
            Platform::Linkedin,
            PostStatus::Approved,
            Some("2025-11-06T09:00:00Z"),
            None,
            "2025-11-01T10:00:00Z",
        ),
        post(
            "post_4",
            "brand_2",
            "💪 Your Monday motivation: Every workout counts, no matter how small. Let's crush this week together! #FitnessMotivation #Wellness",
            Platform::InstagramFeed,
            PostStatus::Scheduled,
            Some("2025-11-04T07:00:00Z"),
            None,
            "2025-11-01T16:00:00Z",
        ),
        post(
            "post_5",
            "brand_2",
            "Check out Sarah's incredible transformation journey! 🌟 Read her full story on our blog.",
            Platform::Facebook,
            PostStatus::Posted,
            Some("2025-10-28T12:00:00Z"),
            Some("2025-10-28T12:01:00Z"),
            "2025-10-27T10:00:00Z",
        ),
        post(
            "post_6",
            "brand_1",
            "Join us for our live webinar: \"AI in the Modern Workplace\" 🎓 Register now, limited spots available!",
            Platform::Linkedin,
            PostStatus::Posted,
            Some("2025-10-30T14:00:00Z"),
            Some("2025-10-30T14:00:00Z"),
            "2025-10-28T11:00:00Z",
        ),
    ]
}

fn trend(id: &str, topic: &str, volume: u64, platform: &str, description: &str) -> Trend {
    Trend {
        id: id.to_string(),
        topic: topic.to_string(),
        volume,
        platform: platform.to_string(),
        description: description.to_string(),
    }
}

/// Trending topics in display order.
pub fn sample_trends() -> Vec<Trend> {
    vec![
        trend(
            "trend_1",
            "AI Productivity Tools",
            125_000,
            "Twitter",
            "Discussion around AI-powered workplace automation and efficiency tools",
        ),
        trend(
            "trend_2",
            "Remote Work Culture",
            98_000,
            "LinkedIn",
            "Companies sharing remote work best practices and culture building",
        ),
        trend(
            "trend_3",
            "Wellness Wednesday",
            87_000,
            "Instagram",
            "Weekly wellness tips and mental health awareness",
        ),
        trend(
            "trend_4",
            "Tech Layoffs 2025",
            156_000,
            "Twitter",
            "Discussion about tech industry workforce changes",
        ),
        trend(
            "trend_5",
            "Sustainable Business",
            72_000,
            "LinkedIn",
            "Companies showcasing environmental initiatives and sustainable practices",
        ),
    ]
}

/// Engagement figures keyed by post id (sorted by post id).
pub fn sample_analytics() -> Vec<Analytics> {
    vec![
        Analytics {
            post_id: "post_5".to_string(),
            likes: 342,
            comments: 28,
            shares: 45,
            reach: 8_920,
            engagement_rate: 4.65,
        },
        Analytics {
            post_id: "post_6".to_string(),
            likes: 891,
            comments: 67,
            shares: 124,
            reach: 15_400,
            engagement_rate: 7.03,
        },
    ]
}
