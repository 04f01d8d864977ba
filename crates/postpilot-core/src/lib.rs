//! Domain types and ports for PostPilot.
//!
//! This crate holds no I/O. It defines the records the dashboard works with
//! (users, sessions, brands, posts, trends, analytics), the shared error type,
//! the configuration model, and the traits the outer layers implement:
//! [`storage::KeyValueStore`], [`gateway::RemoteGateway`] and [`clock::Clock`].

pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod gateway;
pub mod insights;
pub mod session;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::{PostPilotError, Result};
