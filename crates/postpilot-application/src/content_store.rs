//! Content store: brands, posts and the brand selection.
//!
//! Every mutation is a whole-collection read-modify-write. The in-memory
//! state changes first, the affected collection is then written to the local
//! mirror, and remote notifications (brand creation, post approval) are
//! dispatched last through the [`Notifier`]. Remote failures are logged and
//! never roll local state back.

use crate::caption_template::render_local_caption;
use crate::notifier::Notifier;
use crate::sample_data::{sample_brands, sample_posts};
use chrono::{DateTime, Utc};
use postpilot_core::clock::Clock;
use postpilot_core::content::{Brand, BrandDraft, BrandPatch, Platform, Post, PostPatch, PostStatus};
use postpilot_core::gateway::{
    BrandContext, ContentRequest, GeneratedContent, GeneratedPost, ImageAttachment,
    PlanPostSummary, PlanRequest, RemoteGateway,
};
use postpilot_core::user::User;
use postpilot_core::{PostPilotError, Result};
use postpilot_infrastructure::LocalMirror;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A consistent copy of the store state, used to build view models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSnapshot {
    pub brands: Vec<Brand>,
    pub posts: Vec<Post>,
    pub selected_brand_id: Option<String>,
}

impl ContentSnapshot {
    pub fn selected_brand(&self) -> Option<&Brand> {
        let id = self.selected_brand_id.as_deref()?;
        self.brands.iter().find(|brand| brand.id == id)
    }

    pub fn find_post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Posts of the selected brand, or every post when nothing is selected.
    pub fn brand_posts(&self) -> impl Iterator<Item = &Post> {
        let selected = self.selected_brand_id.as_deref();
        self.posts
            .iter()
            .filter(move |post| selected.is_none_or(|id| post.brand_id == id))
    }
}

/// Result of a bulk plan generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Free-text message from the planner, if it sent one.
    pub reply: Option<String>,
    /// Posts appended to the collection.
    pub posts: Vec<Post>,
}

pub struct ContentStore {
    state: RwLock<ContentSnapshot>,
    mirror: LocalMirror,
    gateway: Arc<dyn RemoteGateway>,
    clock: Arc<dyn Clock>,
    notifier: Notifier,
}

impl ContentStore {
    /// Creates a store seeded from the local mirror.
    ///
    /// Collections missing from the mirror (or malformed there) fall back to
    /// the bundled sample content. The first brand is selected.
    pub async fn load(
        mirror: LocalMirror,
        gateway: Arc<dyn RemoteGateway>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let brands = match mirror.load_brands().await? {
            Some(brands) => brands,
            None => {
                tracing::debug!("[ContentStore] No mirrored brands, using sample data");
                sample_brands()
            }
        };
        let posts = match mirror.load_posts().await? {
            Some(posts) => posts,
            None => {
                tracing::debug!("[ContentStore] No mirrored posts, using sample data");
                sample_posts()
            }
        };
        let selected_brand_id = brands.first().map(|brand| brand.id.clone());

        tracing::info!(
            "[ContentStore] Loaded {} brands and {} posts",
            brands.len(),
            posts.len()
        );

        Ok(Self {
            state: RwLock::new(ContentSnapshot {
                brands,
                posts,
                selected_brand_id,
            }),
            mirror,
            gateway,
            clock,
            notifier: Notifier::new(),
        })
    }

    // ============================================================================
    // Read accessors
    // ============================================================================

    pub async fn snapshot(&self) -> ContentSnapshot {
        self.state.read().await.clone()
    }

    pub async fn brands(&self) -> Vec<Brand> {
        self.state.read().await.brands.clone()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn selected_brand_id(&self) -> Option<String> {
        self.state.read().await.selected_brand_id.clone()
    }

    pub async fn selected_brand(&self) -> Option<Brand> {
        self.state.read().await.selected_brand().cloned()
    }

    // ============================================================================
    // Remote sync
    // ============================================================================

    /// Replaces brands and posts with the user's remote data.
    ///
    /// The data is mirrored before it becomes visible. If the fetch or the
    /// mirror write fails, the in-memory state is left untouched and the
    /// error is returned for optional messaging.
    pub async fn load_user_data(&self, user_id: &str) -> Result<()> {
        let data = match self.gateway.fetch_user_data(user_id).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("[ContentStore] Failed to load data for {}: {}", user_id, e);
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        if let Err(e) = self.mirror_user_data(&data.brands, &data.posts).await {
            tracing::warn!("[ContentStore] Failed to mirror data for {}: {}", user_id, e);
            return Err(e);
        }

        state.selected_brand_id = data.brands.first().map(|brand| brand.id.clone());
        state.brands = data.brands;
        state.posts = data.posts;

        tracing::info!(
            "[ContentStore] Loaded {} brands and {} posts for {}",
            state.brands.len(),
            state.posts.len(),
            user_id
        );
        Ok(())
    }

    async fn mirror_user_data(&self, brands: &[Brand], posts: &[Post]) -> Result<()> {
        self.mirror.save_brands(brands).await?;
        self.mirror.save_posts(posts).await
    }

    // ============================================================================
    // Posts
    // ============================================================================

    pub async fn add_post(&self, post: Post) -> Result<()> {
        let mut state = self.state.write().await;
        tracing::debug!("[ContentStore] Adding post {}", post.id);
        state.posts.push(post);
        self.mirror.save_posts(&state.posts).await
    }

    /// Applies `patch` to post `id`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The post was updated and persisted
    /// - `Ok(false)`: No post with that id; nothing was written
    pub async fn update_post(&self, id: &str, patch: PostPatch) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(post) = state.posts.iter_mut().find(|post| post.id == id) else {
            return Ok(false);
        };
        post.apply(patch);
        self.mirror.save_posts(&state.posts).await?;
        Ok(true)
    }

    pub async fn delete_post(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        if state.posts.len() == before {
            return Ok(false);
        }
        self.mirror.save_posts(&state.posts).await?;
        Ok(true)
    }

    /// Approves post `id` for `scheduled_at` and notifies the approval webhook.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Post))`: The approved post
    /// - `Ok(None)`: Unknown id; no write and no notification
    pub async fn approve_post(&self, id: &str, scheduled_at: DateTime<Utc>) -> Result<Option<Post>> {
        let approved = {
            let mut state = self.state.write().await;
            let Some(post) = state.posts.iter_mut().find(|post| post.id == id) else {
                return Ok(None);
            };
            post.status = PostStatus::Approved;
            post.scheduled_at = Some(scheduled_at);
            let approved = post.clone();
            self.mirror.save_posts(&state.posts).await?;
            approved
        };

        tracing::info!("[ContentStore] Approved post {} for {}", id, scheduled_at);

        let gateway = self.gateway.clone();
        let payload = approved.clone();
        self.notifier
            .dispatch("approve_post", async move { gateway.approve_post(&payload).await })
            .await;

        Ok(Some(approved))
    }

    /// Marks post `id` declined. Local only.
    pub async fn decline_post(&self, id: &str) -> Result<bool> {
        self.update_post(
            id,
            PostPatch {
                status: Some(PostStatus::Declined),
                ..Default::default()
            },
        )
        .await
    }

    // ============================================================================
    // Brands
    // ============================================================================

    /// Creates a brand owned by `owner_id` and notifies the brand webhook.
    pub async fn add_brand(&self, owner_id: &str, draft: BrandDraft) -> Result<Brand> {
        let brand = Brand::from_draft(owner_id, draft, self.clock.now());
        {
            let mut state = self.state.write().await;
            state.brands.push(brand.clone());
            self.mirror.save_brands(&state.brands).await?;
        }

        tracing::info!("[ContentStore] Created brand {} ({})", brand.name, brand.id);

        let gateway = self.gateway.clone();
        let payload = brand.clone();
        self.notifier
            .dispatch("create_brand", async move { gateway.create_brand(&payload).await })
            .await;

        Ok(brand)
    }

    pub async fn update_brand(&self, id: &str, patch: BrandPatch) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(brand) = state.brands.iter_mut().find(|brand| brand.id == id) else {
            return Ok(false);
        };
        brand.apply(patch);
        self.mirror.save_brands(&state.brands).await?;
        Ok(true)
    }

    /// Sets the selection without checking that the brand exists.
    pub async fn set_selected_brand_id(&self, id: Option<String>) {
        self.state.write().await.selected_brand_id = id;
    }

    // ============================================================================
    // Generation
    // ============================================================================

    /// Produces a caption for the selected brand.
    ///
    /// Uses the generation webhook when one is configured and falls back to
    /// the local template otherwise, or when the webhook returns no caption.
    /// State is not modified.
    pub async fn generate_content(
        &self,
        user: &User,
        prompt: &str,
        platform: Platform,
        image: Option<ImageAttachment>,
    ) -> Result<GeneratedContent> {
        let prompt = require_prompt(prompt)?;
        let brand = self.require_selected_brand().await?;

        let mut generated = GeneratedContent::default();
        if self.gateway.supports_generation() {
            let request = ContentRequest {
                prompt: prompt.to_string(),
                brand: brand.name.clone(),
                brand_id: brand.id.clone(),
                brand_context: BrandContext::from(&brand),
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                user_email: user.email.clone(),
                platforms: vec![platform],
                image,
            };
            generated = self.gateway.generate_content(&request).await?;
        }

        let has_caption = generated
            .caption
            .as_deref()
            .is_some_and(|caption| !caption.trim().is_empty());
        if !has_caption {
            tracing::debug!("[ContentStore] Using local caption template");
            generated.caption = Some(render_local_caption(prompt, &brand.name)?);
        }

        Ok(generated)
    }

    /// Asks the planner for a batch of posts and appends them as drafts.
    ///
    /// Returned posts are normalised: owner and brand are forced to `user` and
    /// the selected brand, missing or colliding ids are regenerated, and a
    /// missing status becomes `draft`.
    pub async fn generate_plan(
        &self,
        user: &User,
        prompt: &str,
        platforms: Vec<Platform>,
        image: Option<ImageAttachment>,
    ) -> Result<PlanOutcome> {
        let prompt = require_prompt(prompt)?;
        let snapshot = self.snapshot().await;
        let brand = snapshot
            .selected_brand()
            .cloned()
            .ok_or_else(|| PostPilotError::validation("Select a brand first."))?;

        let calendar: Vec<PlanPostSummary> = snapshot
            .posts
            .iter()
            .filter(|post| post.brand_id == brand.id && post.status.is_on_calendar())
            .map(PlanPostSummary::from)
            .collect();

        let request = PlanRequest {
            brand_id: brand.id.clone(),
            brand: BrandContext::from(&brand),
            prompt: prompt.to_string(),
            platforms: platforms.clone(),
            image,
            total_posts: calendar.len(),
            posts: calendar,
        };
        let response = self.gateway.generate_plan(&request).await?;

        let now = self.clock.now();
        let default_platform = platforms.first().copied().unwrap_or(Platform::Linkedin);

        let mut state = self.state.write().await;
        let mut taken: HashSet<String> = state.posts.iter().map(|post| post.id.clone()).collect();
        let added: Vec<Post> = response
            .posts
            .into_iter()
            .map(|generated| {
                let post = normalize_generated(generated, user, &brand.id, default_platform, now, &taken);
                taken.insert(post.id.clone());
                post
            })
            .collect();

        state.posts.extend(added.iter().cloned());
        self.mirror.save_posts(&state.posts).await?;

        tracing::info!("[ContentStore] Plan added {} posts for {}", added.len(), brand.name);

        Ok(PlanOutcome {
            reply: response.reply,
            posts: added,
        })
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Waits for in-flight remote notifications.
    pub async fn flush_notifications(&self) {
        self.notifier.flush().await;
    }

    /// Restores the bundled sample content in memory without persisting it.
    pub async fn reset_to_sample(&self) {
        let brands = sample_brands();
        let selected_brand_id = brands.first().map(|brand| brand.id.clone());
        *self.state.write().await = ContentSnapshot {
            brands,
            posts: sample_posts(),
            selected_brand_id,
        };
    }

    async fn require_selected_brand(&self) -> Result<Brand> {
        self.selected_brand()
            .await
            .ok_or_else(|| PostPilotError::validation("Select a brand first."))
    }
}

fn require_prompt(prompt: &str) -> Result<&str> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(PostPilotError::validation("Describe what the post should be about."));
    }
    Ok(prompt)
}

fn normalize_generated(
    generated: GeneratedPost,
    user: &User,
    brand_id: &str,
    default_platform: Platform,
    now: DateTime<Utc>,
    taken: &HashSet<String>,
) -> Post {
    let id = generated
        .id
        .filter(|id| !id.is_empty() && !taken.contains(id))
        .unwrap_or_else(Post::generate_id);

    Post {
        id,
        user_id: user.id.clone(),
        brand_id: brand_id.to_string(),
        caption: generated.caption,
        platform: generated.platform.unwrap_or(default_platform),
        status: generated.status.unwrap_or(PostStatus::Draft),
        scheduled_at: generated.scheduled_at,
        posted_at: None,
        image_url: generated.image_url,
        created_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockGateway, ReadOnlyStore};
    use chrono::TimeZone;
    use postpilot_core::clock::ManualClock;
    use postpilot_core::gateway::{PlanResponse, UserData};
    use postpilot_core::storage::KeyValueStore;
    use postpilot_infrastructure::InMemoryKeyValueStore;

    struct Fixture {
        gateway: Arc<MockGateway>,
        kv: Arc<InMemoryKeyValueStore>,
        store: ContentStore,
    }

    async fn fixture() -> Fixture {
        let gateway = Arc::new(MockGateway::new());
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap(),
        ));
        let store = ContentStore::load(LocalMirror::new(kv.clone()), gateway.clone(), clock)
            .await
            .unwrap();
        Fixture { gateway, kv, store }
    }

    fn user() -> User {
        User::new("user_1", "Demo User", "demo@example.com")
    }

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 10, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_load_falls_back_to_sample_data() {
        let f = fixture().await;
        assert_eq!(f.store.brands().await.len(), 2);
        assert_eq!(f.store.posts().await.len(), 6);
        assert_eq!(f.store.selected_brand_id().await.as_deref(), Some("brand_1"));
        assert!(f.kv.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_prefers_mirror() {
        let kv = Arc::new(InMemoryKeyValueStore::with_entries([
            ("userBrands", "[]"),
            ("userPosts", "[]"),
        ]));
        let store = ContentStore::load(
            LocalMirror::new(kv),
            Arc::new(MockGateway::new()),
            Arc::new(ManualClock::new(Utc::now())),
        )
        .await
        .unwrap();

        assert!(store.brands().await.is_empty());
        assert!(store.selected_brand_id().await.is_none());
    }

    #[tokio::test]
    async fn test_added_post_appears_once() {
        let f = fixture().await;
        let mut post = f.store.snapshot().await.find_post("post_1").cloned().unwrap();
        post.id = Post::generate_id();
        post.caption = "Fresh".to_string();

        f.store.add_post(post.clone()).await.unwrap();

        let in_memory = f.store.posts().await;
        assert_eq!(in_memory.iter().filter(|p| p.id == post.id).count(), 1);

        let raw = f.kv.get("userPosts").await.unwrap().unwrap();
        let persisted: Vec<Post> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.iter().filter(|p| **p == post).count(), 1);
        assert_eq!(persisted.len(), 7);
        assert_eq!(f.gateway.call_count("approve_post"), 0);
    }

    #[tokio::test]
    async fn test_approve_persists_and_notifies() {
        let f = fixture().await;
        let approved = f.store.approve_post("post_1", when()).await.unwrap().unwrap();

        assert_eq!(approved.status, PostStatus::Approved);
        assert_eq!(approved.scheduled_at, Some(when()));

        let raw = f.kv.get("userPosts").await.unwrap().unwrap();
        let persisted: Vec<Post> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.iter().find(|p| p.id == "post_1"), Some(&approved));

        f.store.flush_notifications().await;
        assert_eq!(*f.gateway.approved.lock().unwrap(), vec![approved]);
    }

    #[tokio::test]
    async fn test_approve_unknown_id_is_silent() {
        let f = fixture().await;
        f.store.decline_post("post_2").await.unwrap();
        let before = f.kv.get("userPosts").await.unwrap();

        assert!(f.store.approve_post("nope", when()).await.unwrap().is_none());
        f.store.flush_notifications().await;

        assert_eq!(f.kv.get("userPosts").await.unwrap(), before);
        assert_eq!(f.gateway.call_count("approve_post"), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_local_state() {
        let f = fixture().await;
        f.gateway.fail_notifications();

        f.store.approve_post("post_2", when()).await.unwrap();
        f.store.flush_notifications().await;

        let snapshot = f.store.snapshot().await;
        assert_eq!(snapshot.find_post("post_2").unwrap().status, PostStatus::Approved);
    }

    #[tokio::test]
    async fn test_decline_is_idempotent_and_local() {
        let f = fixture().await;
        assert!(f.store.decline_post("post_1").await.unwrap());
        let first = f.kv.get("userPosts").await.unwrap();
        assert!(f.store.decline_post("post_1").await.unwrap());

        assert_eq!(f.kv.get("userPosts").await.unwrap(), first);
        f.store.flush_notifications().await;
        assert_eq!(f.gateway.call_count("approve_post"), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let f = fixture().await;
        let patch = PostPatch {
            caption: Some("Edited".to_string()),
            ..Default::default()
        };
        assert!(f.store.update_post("post_2", patch.clone()).await.unwrap());
        assert!(!f.store.update_post("missing", patch).await.unwrap());
        assert_eq!(
            f.store.snapshot().await.find_post("post_2").unwrap().caption,
            "Edited"
        );

        assert!(f.store.delete_post("post_2").await.unwrap());
        assert!(!f.store.delete_post("post_2").await.unwrap());
        assert_eq!(f.store.posts().await.len(), 5);
    }

    #[tokio::test]
    async fn test_add_brand_generates_unique_ids() {
        let f = fixture().await;
        let draft = BrandDraft {
            name: "Acme".to_string(),
            product_description: "Widgets".to_string(),
            brand_voice: "Bold".to_string(),
        };
        let a = f.store.add_brand("user_1", draft.clone()).await.unwrap();
        let b = f.store.add_brand("user_1", draft).await.unwrap();
        f.store.flush_notifications().await;

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap());
        assert_eq!(f.gateway.created_brands.lock().unwrap().len(), 2);

        let raw = f.kv.get("userBrands").await.unwrap().unwrap();
        let persisted: Vec<Brand> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.len(), 4);
    }

    #[tokio::test]
    async fn test_add_brand_survives_failed_notification() {
        let f = fixture().await;
        f.gateway.fail_notifications();

        let draft = BrandDraft {
            name: "Acme".to_string(),
            product_description: "Widgets".to_string(),
            brand_voice: "Bold".to_string(),
        };
        let brand = f.store.add_brand("user_1", draft).await.unwrap();
        f.store.flush_notifications().await;

        assert_eq!(f.gateway.call_count("create_brand"), 1);
        assert_eq!(brand.name, "Acme");
        assert_eq!(brand.product_description, "Widgets");
        assert_eq!(brand.brand_voice, "Bold");
        assert_eq!(brand.user_id, "user_1");
        assert_eq!(brand.created_at, Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap());

        let in_memory = f.store.brands().await;
        assert_eq!(in_memory.iter().filter(|b| **b == brand).count(), 1);

        let raw = f.kv.get("userBrands").await.unwrap().unwrap();
        let persisted: Vec<Brand> = serde_json::from_str(&raw).unwrap();
        assert!(persisted.contains(&brand));
    }

    #[tokio::test]
    async fn test_update_brand() {
        let f = fixture().await;
        let patch = BrandPatch {
            name: Some("TechCo Labs".to_string()),
            ..Default::default()
        };
        assert!(f.store.update_brand("brand_1", patch).await.unwrap());
        assert_eq!(f.store.selected_brand().await.unwrap().name, "TechCo Labs");
    }

    #[tokio::test]
    async fn test_load_user_data_replaces_and_selects_first() {
        let f = fixture().await;
        let mut brand = sample_brands().remove(1);
        brand.id = "remote_brand".to_string();
        f.gateway.set_user_data(Ok(UserData {
            posts: vec![],
            brands: vec![brand],
        }));

        f.store.load_user_data("user_1").await.unwrap();

        let snapshot = f.store.snapshot().await;
        assert!(snapshot.posts.is_empty());
        assert_eq!(snapshot.selected_brand_id.as_deref(), Some("remote_brand"));
        assert_eq!(f.kv.get("userPosts").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_load_user_data_empty_clears_selection() {
        let f = fixture().await;
        f.store.load_user_data("user_1").await.unwrap();
        assert!(f.store.selected_brand_id().await.is_none());
    }

    #[tokio::test]
    async fn test_load_user_data_failure_leaves_state() {
        let f = fixture().await;
        f.store.set_selected_brand_id(Some("brand_2".to_string())).await;
        let before = f.store.snapshot().await;
        f.gateway
            .set_user_data(Err(PostPilotError::network("offline")));

        assert!(f.store.load_user_data("user_1").await.is_err());
        assert_eq!(f.store.snapshot().await, before);
        assert!(f.kv.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_user_data_mirror_failure_leaves_state() {
        let gateway = Arc::new(MockGateway::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap(),
        ));
        let store = ContentStore::load(
            LocalMirror::new(Arc::new(ReadOnlyStore)),
            gateway.clone(),
            clock,
        )
        .await
        .unwrap();
        let before = store.snapshot().await;
        gateway.set_user_data(Ok(UserData {
            posts: vec![],
            brands: vec![],
        }));

        let err = store.load_user_data("user_1").await.unwrap_err();

        assert!(err.to_string().contains("disk full"));
        assert_eq!(store.snapshot().await, before);
        assert!(!before.brands.is_empty());
    }

    #[tokio::test]
    async fn test_generate_content_local_fallback() {
        let f = fixture().await;
        f.gateway.set_supports_generation(false);

        let generated = f
            .store
            .generate_content(&user(), "Launch week", Platform::Linkedin, None)
            .await
            .unwrap();

        assert_eq!(
            generated.caption.as_deref(),
            Some("🚀 Launch week - TechCo is leading the way with innovative solutions. Join us on this exciting journey! #Innovation #TechCo")
        );
        assert_eq!(f.gateway.call_count("generate_content"), 0);
    }

    #[tokio::test]
    async fn test_generate_content_uses_remote_caption() {
        let f = fixture().await;
        f.gateway.set_generated(Ok(GeneratedContent {
            caption: Some("Remote caption".to_string()),
            image_url: Some("https://img.example.com/a.png".to_string()),
        }));

        let generated = f
            .store
            .generate_content(&user(), "Launch week", Platform::Tiktok, None)
            .await
            .unwrap();
        assert_eq!(generated.caption.as_deref(), Some("Remote caption"));

        let requests = f.gateway.content_requests.lock().unwrap();
        assert_eq!(requests[0].brand_id, "brand_1");
        assert_eq!(requests[0].platforms, vec![Platform::Tiktok]);
        assert_eq!(requests[0].brand_context.brand_voice, sample_brands()[0].brand_voice);
    }

    #[tokio::test]
    async fn test_generate_content_empty_remote_caption_falls_back() {
        let f = fixture().await;
        f.gateway.set_generated(Ok(GeneratedContent {
            caption: Some("  ".to_string()),
            image_url: Some("https://img.example.com/a.png".to_string()),
        }));

        let generated = f
            .store
            .generate_content(&user(), "Launch", Platform::Facebook, None)
            .await
            .unwrap();
        assert!(generated.caption.unwrap().starts_with("🚀 Launch - TechCo"));
        assert_eq!(generated.image_url.as_deref(), Some("https://img.example.com/a.png"));
    }

    #[tokio::test]
    async fn test_generate_requires_brand_and_prompt() {
        let f = fixture().await;
        let err = f
            .store
            .generate_content(&user(), "   ", Platform::Linkedin, None)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        f.store.set_selected_brand_id(None).await;
        let err = f
            .store
            .generate_content(&user(), "Launch", Platform::Linkedin, None)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_generate_plan_normalizes_posts() {
        let f = fixture().await;
        f.gateway.set_plan(Ok(PlanResponse {
            reply: Some("Here is your week".to_string()),
            posts: vec![
                GeneratedPost {
                    id: Some("post_1".to_string()),
                    caption: "Collides with sample".to_string(),
                    platform: None,
                    status: None,
                    scheduled_at: None,
                    image_url: None,
                },
                GeneratedPost {
                    id: Some("plan_2".to_string()),
                    caption: "Fresh id".to_string(),
                    platform: Some(Platform::Tiktok),
                    status: Some(PostStatus::Approved),
                    scheduled_at: Some(when()),
                    image_url: None,
                },
            ],
        }));

        let outcome = f
            .store
            .generate_plan(&user(), "Plan launch week", vec![Platform::Facebook], None)
            .await
            .unwrap();

        assert_eq!(outcome.reply.as_deref(), Some("Here is your week"));
        assert_eq!(outcome.posts.len(), 2);
        assert_ne!(outcome.posts[0].id, "post_1");
        assert_eq!(outcome.posts[0].platform, Platform::Facebook);
        assert_eq!(outcome.posts[0].status, PostStatus::Draft);
        assert_eq!(outcome.posts[1].id, "plan_2");
        assert_eq!(outcome.posts[1].status, PostStatus::Approved);
        assert!(outcome.posts.iter().all(|p| p.brand_id == "brand_1" && p.user_id == "user_1"));
        assert_eq!(f.store.posts().await.len(), 8);

        let requests = f.gateway.plan_requests.lock().unwrap();
        // brand_1 calendar: post_3 (approved) and post_6 (posted)
        assert_eq!(requests[0].total_posts, 2);
        assert_eq!(requests[0].brand.name, "TechCo");
    }

    #[tokio::test]
    async fn test_reset_to_sample_does_not_persist() {
        let f = fixture().await;
        f.store.delete_post("post_1").await.unwrap();
        f.kv.remove("userPosts").await.unwrap();

        f.store.reset_to_sample().await;
        assert_eq!(f.store.posts().await.len(), 6);
        assert!(f.kv.get("userPosts").await.unwrap().is_none());
    }
}
