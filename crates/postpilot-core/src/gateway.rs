//! Remote gateway port.
//!
//! Authentication, persistence and AI generation are delegated to an external
//! workflow engine reachable through one webhook per operation. This module
//! defines the request/response shapes and the [`RemoteGateway`] trait; the
//! HTTP implementation lives in `postpilot-interaction`.

use crate::content::ids::lenient_string;
use crate::content::{Brand, Platform, Post, PostStatus};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login webhook response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "userId", default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
}

impl AuthResponse {
    /// False when the workflow signalled invalid credentials.
    ///
    /// The sentinel is a missing/empty `username` or the literal `"0"`.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.username.as_deref(), Some(name) if !name.is_empty() && name != "0")
    }
}

/// Interpretation of the signup webhook's `success` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    Rejected,
    Unexpected,
}

/// Signup webhook response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: Option<serde_json::Value>,
    #[serde(rename = "userId", default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
}

impl RegisterResponse {
    pub fn outcome(&self) -> SignupOutcome {
        match self.success.as_ref().and_then(serde_json::Value::as_i64) {
            Some(1) => SignupOutcome::Created,
            Some(0) => SignupOutcome::Rejected,
            _ => SignupOutcome::Unexpected,
        }
    }
}

/// Everything the remote side stores for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub brands: Vec<Brand>,
}

/// An image sent along with a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    /// Standard base64 of the file contents.
    pub data_base64: String,
}

/// Brand fields the generator needs to write in the brand's voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandContext {
    pub id: String,
    pub name: String,
    pub product_description: String,
    pub brand_voice: String,
}

impl From<&Brand> for BrandContext {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id.clone(),
            name: brand.name.clone(),
            product_description: brand.product_description.clone(),
            brand_voice: brand.brand_voice.clone(),
        }
    }
}

/// Single-caption generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub prompt: String,
    pub brand: String,
    #[serde(rename = "brandId")]
    pub brand_id: String,
    pub brand_context: BrandContext,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
}

/// Generated caption and/or image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Envelope of the generation webhook: `{"data": {"caption": .., "image_url": ..}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedContentEnvelope {
    #[serde(default)]
    pub data: GeneratedContent,
}

/// Calendar post summary sent with a plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPostSummary {
    pub id: String,
    pub caption: String,
    pub platform: Platform,
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PlanPostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            caption: post.caption.clone(),
            platform: post.platform,
            status: post.status,
            scheduled_at: post.scheduled_at,
            posted_at: post.posted_at,
        }
    }
}

/// Bulk content-plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(rename = "brandId")]
    pub brand_id: String,
    pub brand: BrandContext,
    pub prompt: String,
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
    #[serde(rename = "totalPosts")]
    pub total_posts: usize,
    pub posts: Vec<PlanPostSummary>,
}

/// A post proposed by the plan generator. Everything but the caption may be
/// filled in locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    pub caption: String,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Plan webhook response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub posts: Vec<GeneratedPost>,
}

/// The external workflow engine, one method per webhook.
///
/// Every call is a one-shot request/response. Implementations never retry.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse>;

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<RegisterResponse>;

    async fn fetch_user_data(&self, user_id: &str) -> Result<UserData>;

    /// Acknowledgement-only; the response body is ignored.
    async fn create_brand(&self, brand: &Brand) -> Result<()>;

    /// Acknowledgement-only; the response body is ignored.
    async fn approve_post(&self, post: &Post) -> Result<()>;

    async fn generate_content(&self, request: &ContentRequest) -> Result<GeneratedContent>;

    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanResponse>;

    /// Whether caption generation is routed to a remote endpoint.
    ///
    /// When false, callers fall back to local templated captions.
    fn supports_generation(&self) -> bool {
        true
    }
}
