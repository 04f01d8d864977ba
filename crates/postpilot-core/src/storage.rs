//! Local key-value storage port.
//!
//! Mirrors the browser's local storage: string values under fixed keys, each
//! holding one whole JSON document. Implementations live in the
//! infrastructure crate.

use crate::error::Result;
use async_trait::async_trait;

/// Fixed keys of the local mirror.
pub mod keys {
    /// The persisted [`Session`](crate::session::Session).
    pub const SESSION: &str = "user";
    /// Array of [`Post`](crate::content::Post).
    pub const POSTS: &str = "userPosts";
    /// Array of [`Brand`](crate::content::Brand).
    pub const BRANDS: &str = "userBrands";

    pub const ALL: [&str; 3] = [SESSION, POSTS, BRANDS];
}

/// Whole-value key-value storage.
///
/// Values are replaced wholesale; there is no partial or append update.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
