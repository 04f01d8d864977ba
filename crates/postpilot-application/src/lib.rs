//! Application layer for PostPilot.
//!
//! Stores that own the dashboard state and coordinate the local mirror with
//! the remote gateway, plus the view models the shell renders.

pub mod caption_template;
pub mod content_store;
pub mod notifier;
pub mod sample_data;
pub mod session_store;
pub mod views;

#[cfg(test)]
mod test_support;

pub use content_store::{ContentSnapshot, ContentStore, PlanOutcome};
pub use notifier::Notifier;
pub use session_store::{DEV_LOGIN_EMAIL, DEV_LOGIN_PASSWORD, SessionStore};
