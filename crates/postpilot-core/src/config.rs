//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`, then
//! overridden by environment variables (see [`Endpoint::env_var`]).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumIter};

/// The webhook operations the gateway can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    Login,
    Signup,
    FetchUserData,
    CreateBrand,
    ApprovePost,
    GenerateContent,
    GeneratePlan,
}

impl Endpoint {
    /// Environment variable that overrides this endpoint's URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            Endpoint::Login => "POSTPILOT_LOGIN_URL",
            Endpoint::Signup => "POSTPILOT_SIGNUP_URL",
            Endpoint::FetchUserData => "POSTPILOT_FETCH_USER_DATA_URL",
            Endpoint::CreateBrand => "POSTPILOT_CREATE_BRAND_URL",
            Endpoint::ApprovePost => "POSTPILOT_APPROVE_POST_URL",
            Endpoint::GenerateContent => "POSTPILOT_GENERATE_CONTENT_URL",
            Endpoint::GeneratePlan => "POSTPILOT_GENERATE_PLAN_URL",
        }
    }
}

/// One URL per webhook. Unset URLs make the matching operation fail with a
/// configuration error (or, for generation, fall back to local templates).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_user_data_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_brand_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_post_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_plan_url: Option<String>,
}

impl WebhookConfig {
    fn slot(&self, endpoint: Endpoint) -> &Option<String> {
        match endpoint {
            Endpoint::Login => &self.login_url,
            Endpoint::Signup => &self.signup_url,
            Endpoint::FetchUserData => &self.fetch_user_data_url,
            Endpoint::CreateBrand => &self.create_brand_url,
            Endpoint::ApprovePost => &self.approve_post_url,
            Endpoint::GenerateContent => &self.generate_content_url,
            Endpoint::GeneratePlan => &self.generate_plan_url,
        }
    }

    fn slot_mut(&mut self, endpoint: Endpoint) -> &mut Option<String> {
        match endpoint {
            Endpoint::Login => &mut self.login_url,
            Endpoint::Signup => &mut self.signup_url,
            Endpoint::FetchUserData => &mut self.fetch_user_data_url,
            Endpoint::CreateBrand => &mut self.create_brand_url,
            Endpoint::ApprovePost => &mut self.approve_post_url,
            Endpoint::GenerateContent => &mut self.generate_content_url,
            Endpoint::GeneratePlan => &mut self.generate_plan_url,
        }
    }

    /// The configured URL, ignoring blank values.
    pub fn url(&self, endpoint: Endpoint) -> Option<&str> {
        self.slot(endpoint)
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn set_url(&mut self, endpoint: Endpoint, url: impl Into<String>) {
        *self.slot_mut(endpoint) = Some(url.into());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory for the local mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub webhooks: WebhookConfig,
    pub network: NetworkConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
