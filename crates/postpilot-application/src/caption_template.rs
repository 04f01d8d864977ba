//! Local caption template used when no generation webhook is available.

use minijinja::{Environment, context};
use postpilot_core::{PostPilotError, Result};

const LOCAL_CAPTION_TEMPLATE: &str = "🚀 {{ prompt }} - {{ brand }} is leading the way with innovative solutions. Join us on this exciting journey! #Innovation #{{ brand }}";

/// Renders the templated caption for `prompt` in the voice of `brand`.
pub fn render_local_caption(prompt: &str, brand: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("local_caption", LOCAL_CAPTION_TEMPLATE)
        .map_err(|e| PostPilotError::internal(format!("Invalid caption template: {}", e)))?;

    env.get_template("local_caption")
        .and_then(|template| template.render(context! { prompt => prompt, brand => brand }))
        .map_err(|e| PostPilotError::internal(format!("Failed to render caption: {}", e)))
}
