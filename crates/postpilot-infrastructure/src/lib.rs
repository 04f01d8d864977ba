//! Filesystem-backed adapters for PostPilot.
//!
//! - [`paths::PostPilotPaths`]: where config, store and log files live
//! - [`storage`]: atomic file primitives (tmp file + rename, advisory lock)
//! - [`JsonFileStore`] / [`InMemoryKeyValueStore`]: `KeyValueStore` implementations
//! - [`LocalMirror`]: typed access to the `user`, `userPosts` and `userBrands` keys
//! - [`ConfigService`]: `config.toml` plus environment overrides
//! - [`attachment`]: image files encoded for webhook payloads

pub mod attachment;
pub mod config_service;
pub mod json_file_store;
pub mod local_mirror;
pub mod memory_store;
pub mod paths;
pub mod storage;

pub use crate::attachment::load_image_attachment;
pub use crate::config_service::ConfigService;
pub use crate::json_file_store::JsonFileStore;
pub use crate::local_mirror::LocalMirror;
pub use crate::memory_store::InMemoryKeyValueStore;
pub use crate::paths::PostPilotPaths;
