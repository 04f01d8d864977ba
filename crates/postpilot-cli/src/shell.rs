//! Interactive dashboard shell.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::{Result, anyhow};
use chrono::{Local, Utc};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;

use postpilot_application::views::{
    BrandForm, CreatePostForm, QueueFilter, View, parse_schedule, sidebar,
};
use postpilot_core::PostPilotError;
use postpilot_core::config::Endpoint;
use postpilot_core::content::{BrandPatch, Platform, PostPatch};
use postpilot_core::gateway::ImageAttachment;
use postpilot_core::user::User;
use postpilot_infrastructure::load_image_attachment;

use crate::bootstrap::App;
use crate::commands::{COMMAND_NAMES, Command};
use crate::render;

// ============================================================================
// Line editor helper
// ============================================================================

/// Completion and hints for command names and their first argument.
struct ShellHelper {
    commands: Vec<String>,
    views: Vec<String>,
    filters: Vec<String>,
    platforms: Vec<String>,
    /// Echo `*` instead of the typed characters (password prompts).
    masking: bool,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|name| name.to_string()).collect(),
            views: View::iter().map(|view| view.to_string()).collect(),
            filters: QueueFilter::options().iter().map(|f| f.to_string()).collect(),
            platforms: Platform::iter().map(|p| p.to_string()).collect(),
            masking: false,
        }
    }

    /// Candidates for the word being typed, with the byte offset it starts at.
    fn candidates<'a>(&'a self, line: &'a str) -> (usize, Vec<&'a String>) {
        let (start, word, pool) = match line.rsplit_once(' ') {
            None => (0, line, &self.commands),
            Some((head, word)) => {
                let pool = match head.trim() {
                    "view" => &self.views,
                    "filter" => &self.filters,
                    "post" | "schedule" | "generate" | "plan" => &self.platforms,
                    _ => return (0, Vec::new()),
                };
                (head.len() + 1, word, pool)
            }
        };
        let matches = pool.iter().filter(|name| name.starts_with(word)).collect();
        (start, matches)
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if self.masking {
            return Ok((0, Vec::new()));
        }
        let (start, matches) = self.candidates(&line[..pos]);
        Ok((
            start,
            matches
                .into_iter()
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: name.clone(),
                })
                .collect(),
        ))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            return Owned("*".repeat(line.chars().count()));
        }
        match line.split_once(' ') {
            Some((name, rest)) if self.commands.iter().any(|c| c == name) => {
                Owned(format!("{} {}", name.bright_cyan(), rest))
            }
            None if self.commands.iter().any(|c| c == line) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if self.masking || line.is_empty() || line.ends_with(' ') {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = line.len() - start;
        matches
            .first()
            .filter(|name| name.len() > typed)
            .map(|name| name[typed..].bright_black().to_string())
    }
}

impl Validator for ShellHelper {}

// ============================================================================
// Shell
// ============================================================================

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    app: App,
    editor: Editor<ShellHelper, DefaultHistory>,
    view: View,
    filter: QueueFilter,
    /// Attached to the next generate/plan request.
    image: Option<ImageAttachment>,
}

/// Runs the shell until `quit` or end of input.
pub async fn run(app: App) -> Result<()> {
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ShellHelper::new()));

    let mut shell = Shell {
        app,
        editor,
        view: View::default(),
        filter: QueueFilter::default(),
        image: None,
    };

    println!("{}", "=== PostPilot ===".bright_magenta().bold());
    if shell.app.config.webhooks.url(Endpoint::GenerateContent).is_none() {
        println!(
            "{}",
            "No generation webhook configured; captions use the local template.".bright_black()
        );
    }

    match shell.app.sessions.restore().await {
        Ok(Some(user)) => {
            render::success(&format!("Welcome back, {}.", display_name(&user)));
            shell.sync(&user).await;
            shell.show_view().await;
        }
        Ok(None) => println!("{}", "Type 'login <email>' or 'signup <email> <name>'.".bright_black()),
        Err(e) => {
            tracing::warn!("[Shell] Failed to restore session: {}", e);
            render::warning("Could not read the saved session. Please log in.");
        }
    }

    shell.repl().await;

    shell.app.content.flush_notifications().await;
    tracing::info!("[Shell] Exiting");
    Ok(())
}

impl Shell {
    async fn repl(&mut self) {
        loop {
            let prompt = match self.app.sessions.current_user().await {
                Some(user) => format!("postpilot [{}]> ", display_name(&user)),
                None => "postpilot> ".to_string(),
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(trimmed);

                    let command = match Command::parse(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            render::error(&e.to_string());
                            continue;
                        }
                    };

                    if command.requires_session() && !self.app.sessions.is_authenticated().await {
                        render::warning("Please log in first.");
                        continue;
                    }

                    match self.execute(command).await {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => {
                            render::success("Goodbye!");
                            break;
                        }
                        Err(e) => {
                            tracing::warn!("[Shell] Command failed: {:#}", e);
                            render::error(&describe(&e));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                }
                Err(ReadlineError::Eof) => {
                    render::success("Goodbye!");
                    break;
                }
                Err(err) => {
                    render::error(&format!("Error: {:?}", err));
                    break;
                }
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Help => render::help(self.app.sessions.is_authenticated().await),
            Command::Quit => return Ok(Flow::Quit),

            // ===== Session =====
            Command::Login { email } => {
                let password = self.prompt_secret("Password: ")?;
                let user = self.app.sessions.login(&email, &password).await?;
                render::success(&format!("Welcome, {}.", display_name(&user)));
                self.sync(&user).await;
                self.show_view().await;
            }
            Command::Signup { email, name } => {
                let password = self.prompt_secret("Choose a password: ")?;
                if self.app.sessions.signup(&email, &password, &name).await? {
                    render::success("Account created.");
                    if let Some(user) = self.app.sessions.current_user().await {
                        self.sync(&user).await;
                    }
                    self.show_view().await;
                } else {
                    render::warning("Signup was declined.");
                }
            }
            Command::Logout => {
                self.app.sessions.logout().await?;
                self.app.content.reset_to_sample().await;
                self.view = View::default();
                self.filter = QueueFilter::default();
                self.image = None;
                render::success("Logged out.");
            }
            Command::Sync => {
                let user = self.user().await?;
                self.app.content.load_user_data(&user.id).await?;
                render::success("Data reloaded.");
            }

            // ===== Navigation =====
            Command::View(view) => {
                self.view = view;
                self.show_view().await;
            }
            Command::Views => render::sidebar(&sidebar(self.view)),
            Command::Filter(filter) => {
                self.filter = filter;
                self.view = View::Queue;
                self.show_view().await;
            }
            Command::Brand(id) => {
                if !self.app.content.brands().await.iter().any(|brand| brand.id == id) {
                    return Err(PostPilotError::not_found("brand", id).into());
                }
                self.app.content.set_selected_brand_id(Some(id)).await;
                self.show_view().await;
            }

            // ===== Posts =====
            Command::Approve { id, at } => {
                let existing = self.app.content.snapshot().await.find_post(&id).cloned();
                let Some(existing) = existing else {
                    return Err(PostPilotError::not_found("post", id).into());
                };
                let at = at.or(existing.scheduled_at).unwrap_or_else(Utc::now);
                if self.app.content.approve_post(&id, at).await?.is_some() {
                    let local = at.with_timezone(&Local);
                    render::success(&format!("Approved {} for {}.", id, local.format("%Y-%m-%d %H:%M")));
                }
            }
            Command::Decline(id) => {
                found(self.app.content.decline_post(&id).await?, "post", &id)?;
                render::success(&format!("Declined {}.", id));
            }
            Command::Delete(id) => {
                found(self.app.content.delete_post(&id).await?, "post", &id)?;
                render::success(&format!("Deleted {}.", id));
            }
            Command::Edit { id, caption } => {
                let patch = PostPatch {
                    caption: Some(caption),
                    ..Default::default()
                };
                found(self.app.content.update_post(&id, patch).await?, "post", &id)?;
                render::success(&format!("Updated {}.", id));
            }
            Command::Post { platform, caption } => {
                self.save_post(CreatePostForm::new(caption, platform)).await?;
            }
            Command::Schedule {
                platform,
                date,
                time,
                caption,
            } => {
                let at = parse_schedule(&date, &time, &Local)?;
                self.save_post(CreatePostForm::new(caption, platform).scheduled(at))
                    .await?;
            }

            // ===== Generation =====
            Command::Image(None) => {
                self.image = None;
                render::success("Image cleared.");
            }
            Command::Image(Some(path)) => {
                let image = load_image_attachment(&path).await?;
                render::success(&format!("Attached {} ({}).", image.file_name, image.mime_type));
                self.image = Some(image);
            }
            Command::Generate { platform, prompt } => {
                let user = self.user().await?;
                let generated = self
                    .app
                    .content
                    .generate_content(&user, &prompt, platform, self.image.clone())
                    .await?;
                let form = CreatePostForm::from_generated(generated, platform);

                println!("{}", form.caption.bright_blue());
                if let Some(url) = &form.image_url {
                    println!("{}", format!("Image: {}", url).bright_black());
                }
                if self.confirm("Save as draft? [y/N] ")? {
                    self.save_post(form).await?;
                }
            }
            Command::Plan { platforms, prompt } => {
                let user = self.user().await?;
                let outcome = self
                    .app
                    .content
                    .generate_plan(&user, &prompt, platforms, self.image.clone())
                    .await?;
                if let Some(reply) = outcome.reply.filter(|reply| !reply.trim().is_empty()) {
                    for line in reply.lines() {
                        println!("{}", line.bright_blue());
                    }
                }
                render::success(&format!("Added {} posts.", outcome.posts.len()));
                for post in &outcome.posts {
                    render::post_line(post);
                }
            }

            // ===== Brands =====
            Command::BrandAdd => {
                let user = self.user().await?;
                let form = BrandForm {
                    name: self.prompt("Brand name: ", "")?,
                    product_description: self.prompt("Product description: ", "")?,
                    brand_voice: self.prompt("Brand voice: ", "")?,
                };
                let brand = self.app.content.add_brand(&user.id, form.validate()?).await?;
                render::success(&format!("Created brand {} ({}).", brand.name, brand.id));
            }
            Command::BrandEdit(id) => {
                let brands = self.app.content.brands().await;
                let Some(brand) = brands.iter().find(|brand| brand.id == id) else {
                    return Err(PostPilotError::not_found("brand", id).into());
                };
                let current = BrandForm::from_brand(brand);
                let form = BrandForm {
                    name: self.prompt("Brand name: ", &current.name)?,
                    product_description: self
                        .prompt("Product description: ", &current.product_description)?,
                    brand_voice: self.prompt("Brand voice: ", &current.brand_voice)?,
                };
                let draft = form.validate()?;
                let patch = BrandPatch {
                    name: Some(draft.name),
                    product_description: Some(draft.product_description),
                    brand_voice: Some(draft.brand_voice),
                };
                found(self.app.content.update_brand(&id, patch).await?, "brand", &id)?;
                render::success(&format!("Updated brand {}.", id));
            }
        }

        Ok(Flow::Continue)
    }

    async fn user(&self) -> Result<User> {
        self.app
            .sessions
            .current_user()
            .await
            .ok_or_else(|| anyhow!("Please log in first."))
    }

    /// Replaces local content with the server copy. A failure keeps the
    /// cached data and is only reported.
    async fn sync(&self, user: &User) {
        if let Err(e) = self.app.content.load_user_data(&user.id).await {
            tracing::warn!("[Shell] Using cached data: {}", e);
            render::warning("Could not load your data from the server; showing cached content.");
        }
    }

    async fn save_post(&self, form: CreatePostForm) -> Result<()> {
        let user = self.app.sessions.current_user().await;
        let brand_id = self.app.content.selected_brand_id().await;
        let post = form.into_post(user.as_ref(), brand_id.as_deref(), Utc::now())?;
        let (id, status) = (post.id.clone(), post.status);
        self.app.content.add_post(post).await?;
        render::success(&format!("Saved {} as {}.", id, status.label().to_lowercase()));
        Ok(())
    }

    async fn show_view(&self) {
        let snapshot = self.app.content.snapshot().await;
        let user = self.app.sessions.current_user().await;
        render::view(self.view, &snapshot, user.as_ref(), self.filter);
    }

    fn prompt(&mut self, label: &str, initial: &str) -> Result<String> {
        Ok(self.editor.readline_with_initial(label, (initial, ""))?)
    }

    fn prompt_secret(&mut self, label: &str) -> Result<String> {
        self.set_masking(true);
        let result = self.editor.readline(label);
        self.set_masking(false);
        Ok(secret_input(&result?))
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.editor.readline(label)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn set_masking(&mut self, masking: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking = masking;
        }
    }
}

fn found(updated: bool, entity_type: &'static str, id: &str) -> Result<()> {
    if updated {
        Ok(())
    } else {
        Err(PostPilotError::not_found(entity_type, id).into())
    }
}

/// Masked input is invisible, so stray surrounding whitespace is dropped.
fn secret_input(raw: &str) -> String {
    raw.trim().to_string()
}

fn display_name(user: &User) -> &str {
    if user.name.is_empty() { &user.email } else { &user.name }
}

/// User-facing text for a failed command.
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PostPilotError>() {
        Some(e) => e.user_message(),
        None => err.to_string(),
    }
}
