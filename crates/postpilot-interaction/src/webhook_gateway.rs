//! WebhookGateway - HTTP implementation of [`RemoteGateway`].
//!
//! Every operation is a single JSON `POST` with no authentication headers and
//! no retries. Failures map onto the shared error type:
//! - transport failure or non-2xx status: `Network`
//! - response body that does not decode: `Parse`
//! - missing URL for the operation: `Config`

use async_trait::async_trait;
use postpilot_core::config::{AppConfig, Endpoint, WebhookConfig};
use postpilot_core::content::{Brand, Post};
use postpilot_core::gateway::{
    AuthResponse, ContentRequest, GeneratedContent, GeneratedContentEnvelope, PlanRequest,
    PlanResponse, RegisterResponse, RemoteGateway, UserData,
};
use postpilot_core::{PostPilotError, Result};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct FetchUserDataRequest<'a> {
    user_id: &'a str,
}

/// Gateway that talks to the workflow engine's webhooks.
#[derive(Debug, Clone)]
pub struct WebhookGateway {
    client: Client,
    webhooks: WebhookConfig,
}

impl WebhookGateway {
    /// Creates a gateway from the webhook URLs and network settings in `config`.
    ///
    /// A request timeout is applied only when `network.request_timeout_secs`
    /// is set.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.network.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PostPilotError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            webhooks: config.webhooks.clone(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> Result<&str> {
        self.webhooks.url(endpoint).ok_or_else(|| {
            PostPilotError::config(format!(
                "{} webhook URL is not set (set {} or [webhooks] in config.toml)",
                endpoint,
                endpoint.env_var()
            ))
        })
    }

    /// Sends `body` and returns the raw response text of a 2xx reply.
    async fn post<B>(&self, endpoint: Endpoint, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        tracing::debug!("[WebhookGateway] POST {} ({})", endpoint, url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| PostPilotError::network(format!("{} request failed: {}", endpoint, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PostPilotError::network(format!("{} response unreadable: {}", endpoint, e)))?;

        if !status.is_success() {
            return Err(PostPilotError::network(format!(
                "{} webhook returned {}: {}",
                endpoint, status, text
            )));
        }

        Ok(text)
    }

    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let text = self.post(endpoint, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            PostPilotError::parse("webhook", format!("{} response: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl RemoteGateway for WebhookGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.post_json(Endpoint::Login, &LoginRequest { email, password })
            .await
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<RegisterResponse> {
        let body = SignupRequest {
            username: name,
            email,
            password,
        };
        self.post_json(Endpoint::Signup, &body).await
    }

    async fn fetch_user_data(&self, user_id: &str) -> Result<UserData> {
        self.post_json(Endpoint::FetchUserData, &FetchUserDataRequest { user_id })
            .await
    }

    async fn create_brand(&self, brand: &Brand) -> Result<()> {
        self.post(Endpoint::CreateBrand, brand).await.map(|_| ())
    }

    async fn approve_post(&self, post: &Post) -> Result<()> {
        self.post(Endpoint::ApprovePost, post).await.map(|_| ())
    }

    async fn generate_content(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        let envelope: GeneratedContentEnvelope =
            self.post_json(Endpoint::GenerateContent, request).await?;
        Ok(envelope.data)
    }

    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanResponse> {
        self.post_json(Endpoint::GeneratePlan, request).await
    }

    fn supports_generation(&self) -> bool {
        self.webhooks.url(Endpoint::GenerateContent).is_some()
    }
}
