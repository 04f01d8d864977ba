//! Shared fixtures for unit tests.

use async_trait::async_trait;
use postpilot_core::content::{Brand, Post};
use postpilot_core::gateway::{
    AuthResponse, ContentRequest, GeneratedContent, PlanRequest, PlanResponse, RegisterResponse,
    RemoteGateway, UserData,
};
use postpilot_core::storage::KeyValueStore;
use postpilot_core::{PostPilotError, Result};
use serde_json::json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Scriptable in-memory [`RemoteGateway`] that records every call.
pub struct MockGateway {
    auth: Mutex<Result<AuthResponse>>,
    register: Mutex<Result<RegisterResponse>>,
    user_data: Mutex<Result<UserData>>,
    generated: Mutex<Result<GeneratedContent>>,
    plan: Mutex<Result<PlanResponse>>,
    notify: Mutex<Result<()>>,
    generation: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
    pub approved: Mutex<Vec<Post>>,
    pub created_brands: Mutex<Vec<Brand>>,
    pub content_requests: Mutex<Vec<ContentRequest>>,
    pub plan_requests: Mutex<Vec<PlanRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            auth: Mutex::new(Ok(AuthResponse::default())),
            register: Mutex::new(Ok(RegisterResponse {
                success: Some(json!(1)),
                user_id: None,
            })),
            user_data: Mutex::new(Ok(UserData::default())),
            generated: Mutex::new(Ok(GeneratedContent::default())),
            plan: Mutex::new(Ok(PlanResponse::default())),
            notify: Mutex::new(Ok(())),
            generation: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
            approved: Mutex::new(Vec::new()),
            created_brands: Mutex::new(Vec::new()),
            content_requests: Mutex::new(Vec::new()),
            plan_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_auth(&self, result: Result<AuthResponse>) {
        *self.auth.lock().unwrap() = result;
    }

    pub fn set_register(&self, result: Result<RegisterResponse>) {
        *self.register.lock().unwrap() = result;
    }

    pub fn set_user_data(&self, result: Result<UserData>) {
        *self.user_data.lock().unwrap() = result;
    }

    pub fn set_generated(&self, result: Result<GeneratedContent>) {
        *self.generated.lock().unwrap() = result;
    }

    pub fn set_plan(&self, result: Result<PlanResponse>) {
        *self.plan.lock().unwrap() = result;
    }

    pub fn fail_notifications(&self) {
        *self.notify.lock().unwrap() = Err(PostPilotError::network("webhook unreachable"));
    }

    pub fn set_supports_generation(&self, supported: bool) {
        self.generation.store(supported, Ordering::SeqCst);
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl RemoteGateway for MockGateway {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<AuthResponse> {
        self.record("authenticate");
        self.auth.lock().unwrap().clone()
    }

    async fn register(&self, _email: &str, _password: &str, _name: &str) -> Result<RegisterResponse> {
        self.record("register");
        self.register.lock().unwrap().clone()
    }

    async fn fetch_user_data(&self, _user_id: &str) -> Result<UserData> {
        self.record("fetch_user_data");
        self.user_data.lock().unwrap().clone()
    }

    async fn create_brand(&self, brand: &Brand) -> Result<()> {
        self.record("create_brand");
        self.created_brands.lock().unwrap().push(brand.clone());
        self.notify.lock().unwrap().clone()
    }

    async fn approve_post(&self, post: &Post) -> Result<()> {
        self.record("approve_post");
        self.approved.lock().unwrap().push(post.clone());
        self.notify.lock().unwrap().clone()
    }

    async fn generate_content(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        self.record("generate_content");
        self.content_requests.lock().unwrap().push(request.clone());
        self.generated.lock().unwrap().clone()
    }

    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanResponse> {
        self.record("generate_plan");
        self.plan_requests.lock().unwrap().push(request.clone());
        self.plan.lock().unwrap().clone()
    }

    fn supports_generation(&self) -> bool {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Key-value store whose reads see nothing and whose writes always fail.
pub struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(PostPilotError::io(format!("{key}: disk full")))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
