//! Terminal rendering of the view models.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use postpilot_application::ContentSnapshot;
use postpilot_application::sample_data::sample_analytics;
use postpilot_application::views::calendar::POSTED_COLOR;
use postpilot_application::views::{
    AnalyticsModel, HeaderModel, QueueFilter, QueueModel, SidebarItem, TrendRow, View,
    analytics_view, calendar_events, format_count, header_view, queue_view, settings_view,
    trends_view,
};
use postpilot_core::content::{Post, PostStatus};
use postpilot_core::user::User;

const CAPTION_PREVIEW_CHARS: usize = 72;

pub fn header(model: &HeaderModel) {
    let brands: Vec<String> = model
        .brands
        .iter()
        .map(|brand| {
            if brand.selected {
                format!("[{}]", brand.name).bright_cyan().bold().to_string()
            } else {
                format!("{} ({})", brand.name, brand.id).bright_black().to_string()
            }
        })
        .collect();
    let avatar = model
        .user_initial
        .map(|initial| format!("({})", initial).bright_magenta().bold().to_string())
        .unwrap_or_default();

    println!("{}  {}  {}", "PostPilot".bold(), brands.join("  "), avatar);
}

pub fn sidebar(items: &[SidebarItem]) {
    for item in items {
        let name = item.view.to_string();
        if item.active {
            println!("  {} {:<10} {}", "▸".bright_cyan(), name.bright_cyan(), item.label.bold());
        } else {
            println!("    {:<10} {}", name.bright_black(), item.label);
        }
    }
}

/// Renders `view` for the current state.
pub fn view(view: View, snapshot: &ContentSnapshot, user: Option<&User>, filter: QueueFilter) {
    header(&header_view(snapshot, user));
    println!("{}", format!("== {} ==", view.label()).bright_magenta().bold());

    match view {
        View::Calendar => calendar(snapshot),
        View::Create => create_help(),
        View::Queue => queue(&queue_view(snapshot, filter)),
        View::Trends => trends(&trends_view()),
        View::Analytics => analytics(&analytics_view(snapshot, &sample_analytics())),
        View::Settings => settings(snapshot),
    }
}

fn calendar(snapshot: &ContentSnapshot) {
    let mut events = calendar_events(snapshot);
    if events.is_empty() {
        println!("{}", "Nothing on the calendar.".bright_black());
        return;
    }
    events.sort_by_key(|event| event.start);

    for event in events {
        let marker = if event.color == POSTED_COLOR {
            "●".green()
        } else {
            "●".blue()
        };
        println!(
            "{} {}  {:<16} {}  {}",
            marker,
            local_time(event.start),
            event.platform.label(),
            event.title,
            event.post_id.bright_black()
        );
    }
}

fn create_help() {
    println!("  post <platform> <caption>                       save a draft");
    println!("  schedule <platform> <YYYY-MM-DD> <HH:MM> <caption>  save an approved, scheduled post");
    println!("  generate <platform> <prompt>                    draft a caption for the selected brand");
    println!("  plan <platform,...> <prompt>                    ask the planner for a batch of drafts");
    println!("  image <path> | image clear                      attach an image to generation requests");
    println!(
        "{}",
        "Platforms: linkedin, instagram_feed, instagram_story, tiktok, facebook".bright_black()
    );
}

pub fn queue(model: &QueueModel) {
    println!(
        "Filter: {}  ({} of {} posts)",
        model.filter.label().bold(),
        model.items.len(),
        model.brand_total
    );
    if model.items.is_empty() {
        println!("{}", "No posts match this filter.".bright_black());
        return;
    }
    for item in &model.items {
        post_line(&item.post);
        if item.can_review {
            println!(
                "    {}",
                format!("approve {0} | decline {0}", item.post.id).bright_black()
            );
        }
    }
}

pub fn post_line(post: &Post) {
    let when = post
        .scheduled_at
        .or(post.posted_at)
        .map(local_time)
        .unwrap_or_else(|| "unscheduled".to_string());
    println!(
        "  {} {:<10} {:<16} {:<16} {}",
        post.id.bright_black(),
        status(post.status),
        post.platform.label(),
        when,
        preview(&post.caption)
    );
}

fn status(status: PostStatus) -> colored::ColoredString {
    let label = format!("{:<10}", status.label());
    match status {
        PostStatus::Draft => label.yellow(),
        PostStatus::Approved => label.blue(),
        PostStatus::Scheduled => label.cyan(),
        PostStatus::Posted => label.green(),
        PostStatus::Declined => label.red(),
    }
}

fn trends(rows: &[TrendRow]) {
    for row in rows {
        println!(
            "  {}. {}  {}  {}",
            row.rank,
            row.trend.topic.bold(),
            row.volume_label.bright_cyan(),
            row.trend.platform.bright_black()
        );
        println!("     {}", row.trend.description);
    }
}

fn analytics(model: &AnalyticsModel) {
    let summary = &model.summary;
    println!(
        "  Likes {}  Comments {}  Shares {}  Reach {}  Avg. engagement {:.2}%",
        format_count(summary.total_likes).bold(),
        format_count(summary.total_comments).bold(),
        format_count(summary.total_shares).bold(),
        format_count(summary.total_reach).bold(),
        summary.avg_engagement
    );
    if model.posts.is_empty() {
        println!("{}", "No published posts with analytics for this brand.".bright_black());
        return;
    }
    for row in &model.posts {
        println!(
            "  {} {}  likes {} comments {} shares {} reach {} engagement {:.2}%",
            row.post.id.bright_black(),
            preview(&row.post.caption),
            row.analytics.likes,
            row.analytics.comments,
            row.analytics.shares,
            format_count(row.analytics.reach),
            row.analytics.engagement_rate
        );
    }
}

fn settings(snapshot: &ContentSnapshot) {
    for row in settings_view(snapshot) {
        let marker = if row.selected { "▸" } else { " " };
        println!(
            "{} {} {}",
            marker.bright_cyan(),
            row.brand.name.bold(),
            row.brand.id.bright_black()
        );
        println!("    {}", row.brand.product_description);
        println!("    {}", format!("Voice: {}", row.brand.brand_voice).italic());
    }
    println!(
        "{}",
        "brand-add to create a brand, brand-edit <id> to change one.".bright_black()
    );
}

pub fn help(authenticated: bool) {
    println!("{}", "Commands".bold());
    if !authenticated {
        println!("  login <email>            log in (password is prompted)");
        println!("  signup <email> <name>    create an account");
    } else {
        println!("  view <name> | views      switch view / list views");
        println!("  brand <id>               select a brand");
        println!("  filter <status|all>      filter the content queue");
        println!("  approve <id> [<time>]    approve a post (RFC 3339 time)");
        println!("  decline <id> | delete <id>");
        println!("  edit <id> <caption>      replace a caption");
        println!("  post | schedule | generate | plan | image  (see 'view create')");
        println!("  brand-add | brand-edit <id>");
        println!("  sync                     reload data from the server");
        println!("  logout");
    }
    println!("  help | quit");
}

pub fn success(message: &str) {
    println!("{}", message.bright_green());
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn preview(caption: &str) -> String {
    let line = caption.lines().next().unwrap_or_default();
    if line.chars().count() > CAPTION_PREVIEW_CHARS || caption.lines().count() > 1 {
        let head: String = line.chars().take(CAPTION_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
