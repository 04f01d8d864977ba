//! Typed access to the local mirror.
//!
//! The mirror keeps three JSON documents: the session under `user`, the post
//! collection under `userPosts` and the brand collection under `userBrands`.
//! Collections are always written whole. A value that fails to parse is
//! reported as absent so that a corrupted entry never blocks startup.

use postpilot_core::Result;
use postpilot_core::content::{Brand, Post};
use postpilot_core::session::Session;
use postpilot_core::storage::{KeyValueStore, keys};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

#[derive(Clone)]
pub struct LocalMirror {
    store: Arc<dyn KeyValueStore>,
}

impl LocalMirror {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads and decodes `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Key present and valid JSON for `T`
    /// - `Ok(None)`: Key missing, or its value is malformed
    /// - `Err`: The underlying store failed
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("[LocalMirror] Ignoring malformed '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json).await
    }

    pub async fn load_session(&self) -> Result<Option<Session>> {
        self.load(keys::SESSION).await
    }

    pub async fn save_session(&self, session: &Session) -> Result<()> {
        self.save(keys::SESSION, session).await
    }

    pub async fn clear_session(&self) -> Result<()> {
        self.store.remove(keys::SESSION).await
    }

    pub async fn load_posts(&self) -> Result<Option<Vec<Post>>> {
        self.load(keys::POSTS).await
    }

    pub async fn save_posts(&self, posts: &[Post]) -> Result<()> {
        tracing::debug!("[LocalMirror] Persisting {} posts", posts.len());
        self.save(keys::POSTS, posts).await
    }

    pub async fn load_brands(&self) -> Result<Option<Vec<Brand>>> {
        self.load(keys::BRANDS).await
    }

    pub async fn save_brands(&self, brands: &[Brand]) -> Result<()> {
        tracing::debug!("[LocalMirror] Persisting {} brands", brands.len());
        self.save(keys::BRANDS, brands).await
    }

    /// Removes the session and both collections.
    pub async fn clear_all(&self) -> Result<()> {
        for key in keys::ALL {
            self.store.remove(key).await?;
        }
        Ok(())
    }

    /// Raw stored value, for callers that need byte-level comparisons.
    pub async fn raw(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key).await
    }
}
