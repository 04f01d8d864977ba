//! Shell command grammar.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use postpilot_application::views::{QueueFilter, View};
use postpilot_core::content::Platform;
use std::path::PathBuf;

/// Command names offered by completion.
pub const COMMAND_NAMES: &[&str] = &[
    "approve", "brand", "brand-add", "brand-edit", "decline", "delete", "edit", "filter",
    "generate", "help", "image", "login", "logout", "plan", "post", "quit", "schedule", "signup",
    "sync", "view", "views",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login { email: String },
    Signup { email: String, name: String },
    Logout,
    View(View),
    Views,
    Brand(String),
    BrandAdd,
    BrandEdit(String),
    Filter(QueueFilter),
    Approve { id: String, at: Option<DateTime<Utc>> },
    Decline(String),
    Delete(String),
    Edit { id: String, caption: String },
    Post { platform: Platform, caption: String },
    Schedule { platform: Platform, date: String, time: String, caption: String },
    Generate { platform: Platform, prompt: String },
    Plan { platforms: Vec<Platform>, prompt: String },
    /// Attach an image to the next generation request; `None` clears it.
    Image(Option<PathBuf>),
    Sync,
}

impl Command {
    /// Whether the command needs a live session.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Help | Command::Quit | Command::Login { .. } | Command::Signup { .. }
        )
    }

    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match name {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "login" => Command::Login {
                email: required(args.next(), "login <email>")?,
            },
            "signup" => {
                let email = required(args.next(), "signup <email> <name>")?;
                let name = remainder(rest, 1);
                if name.is_empty() {
                    bail!("Usage: signup <email> <name>");
                }
                Command::Signup { email, name }
            }
            "logout" => Command::Logout,
            "view" => Command::View(View::from_name(args.next().unwrap_or_default())),
            "views" => Command::Views,
            "brand" => Command::Brand(required(args.next(), "brand <id>")?),
            "brand-add" => Command::BrandAdd,
            "brand-edit" => Command::BrandEdit(required(args.next(), "brand-edit <id>")?),
            "filter" => Command::Filter(
                required(args.next(), "filter <all|draft|approved|scheduled|posted|declined>")?
                    .parse()?,
            ),
            "approve" => {
                let id = required(args.next(), "approve <post-id> [<RFC3339 time>]")?;
                let at = args
                    .next()
                    .map(|raw| {
                        DateTime::parse_from_rfc3339(raw)
                            .map(|at| at.with_timezone(&Utc))
                            .with_context(|| format!("Invalid time '{}', expected RFC 3339", raw))
                    })
                    .transpose()?;
                Command::Approve { id, at }
            }
            "decline" => Command::Decline(required(args.next(), "decline <post-id>")?),
            "delete" => Command::Delete(required(args.next(), "delete <post-id>")?),
            "edit" => {
                let id = required(args.next(), "edit <post-id> <caption>")?;
                Command::Edit {
                    id,
                    caption: non_empty(remainder(rest, 1), "edit <post-id> <caption>")?,
                }
            }
            "post" => Command::Post {
                platform: platform(args.next(), "post <platform> <caption>")?,
                caption: non_empty(remainder(rest, 1), "post <platform> <caption>")?,
            },
            "schedule" => {
                const USAGE: &str = "schedule <platform> <YYYY-MM-DD> <HH:MM> <caption>";
                Command::Schedule {
                    platform: platform(args.next(), USAGE)?,
                    date: required(args.next(), USAGE)?,
                    time: required(args.next(), USAGE)?,
                    caption: non_empty(remainder(rest, 3), USAGE)?,
                }
            }
            "generate" => Command::Generate {
                platform: platform(args.next(), "generate <platform> <prompt>")?,
                prompt: non_empty(remainder(rest, 1), "generate <platform> <prompt>")?,
            },
            "plan" => {
                const USAGE: &str = "plan <platform,platform,...> <prompt>";
                let platforms = required(args.next(), USAGE)?
                    .split(',')
                    .filter(|name| !name.is_empty())
                    .map(parse_platform)
                    .collect::<Result<Vec<_>>>()?;
                Command::Plan {
                    platforms,
                    prompt: non_empty(remainder(rest, 1), USAGE)?,
                }
            }
            "image" => match args.next() {
                None | Some("clear") => Command::Image(None),
                Some(_) => Command::Image(Some(PathBuf::from(rest))),
            },
            "sync" => Command::Sync,
            "" => bail!("Empty command"),
            other => bail!("Unknown command '{}'. Type 'help' for a list.", other),
        };

        Ok(command)
    }
}

fn required(arg: Option<&str>, usage: &str) -> Result<String> {
    arg.map(str::to_string)
        .ok_or_else(|| anyhow!("Usage: {}", usage))
}

fn non_empty(text: String, usage: &str) -> Result<String> {
    if text.is_empty() {
        bail!("Usage: {}", usage);
    }
    Ok(text)
}

fn platform(arg: Option<&str>, usage: &str) -> Result<Platform> {
    parse_platform(&required(arg, usage)?)
}

fn parse_platform(name: &str) -> Result<Platform> {
    name.parse().map_err(|_| {
        anyhow!(
            "Unknown platform '{}'. Use linkedin, instagram_feed, instagram_story, tiktok or facebook.",
            name
        )
    })
}

/// Free text after the first `skip` whitespace-separated words, original spacing kept.
fn remainder(rest: &str, skip: usize) -> String {
    let mut text = rest;
    for _ in 0..skip {
        text = text
            .trim_start()
            .split_once(char::is_whitespace)
            .map(|(_, tail)| tail)
            .unwrap_or("");
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use postpilot_core::content::PostStatus;

    #[test]
    fn test_free_text_keeps_spacing() {
        let command = Command::parse("post linkedin  Big  news: v2 is out!").unwrap();
        assert_eq!(
            command,
            Command::Post {
                platform: Platform::Linkedin,
                caption: "Big  news: v2 is out!".to_string(),
            }
        );
    }

    #[test]
    fn test_schedule() {
        let command = Command::parse("schedule instagram_feed 2025-11-10 09:30 Launch day").unwrap();
        assert_eq!(
            command,
            Command::Schedule {
                platform: Platform::InstagramFeed,
                date: "2025-11-10".to_string(),
                time: "09:30".to_string(),
                caption: "Launch day".to_string(),
            }
        );
        assert!(Command::parse("schedule tiktok 2025-11-10 09:30").is_err());
    }

    #[test]
    fn test_approve_with_optional_time() {
        assert_eq!(
            Command::parse("approve post_1").unwrap(),
            Command::Approve {
                id: "post_1".to_string(),
                at: None
            }
        );
        assert_eq!(
            Command::parse("approve post_1 2025-11-20T15:00:00+01:00").unwrap(),
            Command::Approve {
                id: "post_1".to_string(),
                at: Some(Utc.with_ymd_and_hms(2025, 11, 20, 14, 0, 0).unwrap()),
            }
        );
        assert!(Command::parse("approve post_1 tomorrow").is_err());
    }

    #[test]
    fn test_plan_platforms() {
        let command = Command::parse("plan linkedin,TikTok Launch week").unwrap();
        assert_eq!(
            command,
            Command::Plan {
                platforms: vec![Platform::Linkedin, Platform::Tiktok],
                prompt: "Launch week".to_string(),
            }
        );
        assert!(Command::parse("plan myspace Launch").is_err());
    }

    #[test]
    fn test_filter_and_view() {
        assert_eq!(
            Command::parse("filter draft").unwrap(),
            Command::Filter(QueueFilter::Status(PostStatus::Draft))
        );
        assert_eq!(Command::parse("view nowhere").unwrap(), Command::View(View::Calendar));
        assert!(Command::parse("filter pending").is_err());
    }

    #[test]
    fn test_signup_name_may_contain_spaces() {
        assert_eq!(
            Command::parse("signup ana@example.com Ana Maria").unwrap(),
            Command::Signup {
                email: "ana@example.com".to_string(),
                name: "Ana Maria".to_string(),
            }
        );
    }

    #[test]
    fn test_session_gate() {
        assert!(!Command::parse("login a@b.c").unwrap().requires_session());
        assert!(!Command::Help.requires_session());
        assert!(Command::parse("sync").unwrap().requires_session());
        assert!(Command::parse("nope").is_err());
    }

    #[test]
    fn test_image() {
        assert_eq!(
            Command::parse("image ./shots/launch day.png").unwrap(),
            Command::Image(Some(PathBuf::from("./shots/launch day.png")))
        );
        assert_eq!(Command::parse("image clear").unwrap(), Command::Image(None));
    }
}
