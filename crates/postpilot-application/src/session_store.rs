//! Session store.
//!
//! Owns the authenticated user for the lifetime of the shell. The session is
//! mirrored under the `user` key so a restart within its lifetime skips the
//! login gate.

use chrono::Duration;
use postpilot_core::clock::Clock;
use postpilot_core::gateway::{RemoteGateway, SignupOutcome};
use postpilot_core::session::Session;
use postpilot_core::user::User;
use postpilot_core::{PostPilotError, Result};
use postpilot_infrastructure::LocalMirror;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credentials that log in locally without contacting the login webhook.
pub const DEV_LOGIN_EMAIL: &str = "1@c.co";
pub const DEV_LOGIN_PASSWORD: &str = "1";

const DEV_USER_ID: &str = "dev_user_1";
const DEV_USER_NAME: &str = "Dev User";

pub struct SessionStore {
    gateway: Arc<dyn RemoteGateway>,
    mirror: LocalMirror,
    clock: Arc<dyn Clock>,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn RemoteGateway>, mirror: LocalMirror, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            mirror,
            clock,
            session: RwLock::new(None),
        }
    }

    /// Reinstates the persisted session if it has not expired.
    ///
    /// An expired, missing or malformed session leaves the store
    /// unauthenticated and removes the persisted value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))`: A valid session was restored
    /// - `Ok(None)`: No usable session
    /// - `Err`: The local store failed
    pub async fn restore(&self) -> Result<Option<User>> {
        let now = self.clock.now();

        match self.mirror.load_session().await? {
            Some(session) if session.is_valid_at(now) => {
                tracing::info!("[SessionStore] Restored session for {}", session.user.email);
                let user = session.user.clone();
                *self.session.write().await = Some(session);
                Ok(Some(user))
            }
            Some(session) => {
                tracing::info!("[SessionStore] Persisted session for {} has expired", session.user.email);
                self.mirror.clear_session().await?;
                Ok(None)
            }
            None => {
                self.mirror.clear_session().await?;
                Ok(None)
            }
        }
    }

    /// Authenticates and establishes a session.
    ///
    /// The development credentials produce a one-hour temporary session with
    /// no remote call. Everything else goes through the login webhook.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let now = self.clock.now();

        if email == DEV_LOGIN_EMAIL && password == DEV_LOGIN_PASSWORD {
            tracing::info!("[SessionStore] Development login");
            let user = User::new(DEV_USER_ID, DEV_USER_NAME, email);
            self.establish(Session::development(user.clone(), now)).await?;
            return Ok(user);
        }

        let response = self.gateway.authenticate(email, password).await?;
        if !response.is_authenticated() {
            return Err(PostPilotError::authentication(format!(
                "login rejected for {}",
                email
            )));
        }

        let user = User::new(
            response.user_id.unwrap_or_else(generated_user_id),
            response.username.unwrap_or_default(),
            email,
        );
        self.establish(Session::standard(user.clone(), now)).await?;
        tracing::info!("[SessionStore] Logged in as {}", user.id);
        Ok(user)
    }

    /// Registers a new account.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: Account created and session established
    /// - `Ok(false)`: The workflow declined the signup; any existing session is kept
    /// - `Err(Parse)`: The workflow answered with an unrecognised `success` value
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<bool> {
        let response = self.gateway.register(email, password, name).await?;

        match response.outcome() {
            SignupOutcome::Created => {
                let user = User::new(
                    response.user_id.unwrap_or_else(generated_user_id),
                    name,
                    email,
                );
                self.establish(Session::standard(user.clone(), self.clock.now()))
                    .await?;
                tracing::info!("[SessionStore] Signed up {}", user.id);
                Ok(true)
            }
            SignupOutcome::Rejected => {
                tracing::info!("[SessionStore] Signup declined for {}", email);
                Ok(false)
            }
            SignupOutcome::Unexpected => Err(PostPilotError::parse(
                "webhook",
                format!("unexpected signup response: {:?}", response.success),
            )),
        }
    }

    /// Drops the session and deletes all mirrored user data.
    pub async fn logout(&self) -> Result<()> {
        *self.session.write().await = None;
        self.mirror.clear_all().await?;
        tracing::info!("[SessionStore] Logged out");
        Ok(())
    }

    /// The live session, if any.
    ///
    /// A session found to be expired is dropped here and its persisted copy
    /// deleted.
    pub async fn current_session(&self) -> Option<Session> {
        let now = self.clock.now();
        {
            let guard = self.session.read().await;
            match guard.as_ref() {
                None => return None,
                Some(session) if session.is_valid_at(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }

        let mut guard = self.session.write().await;
        // Re-check under the write lock; a login may have replaced it.
        if let Some(session) = guard.as_ref()
            && session.is_valid_at(now)
        {
            return Some(session.clone());
        }
        if guard.take().is_some() {
            tracing::info!("[SessionStore] Session expired");
            if let Err(e) = self.mirror.clear_session().await {
                tracing::warn!("[SessionStore] Failed to remove expired session: {}", e);
            }
        }
        None
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current_session().await.map(|session| session.user)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current_session().await.is_some()
    }

    /// Time left before the current session expires.
    pub async fn remaining(&self) -> Option<Duration> {
        let session = self.current_session().await?;
        let expires_at = session.expires_at()?;
        Some(expires_at - self.clock.now())
    }

    async fn establish(&self, session: Session) -> Result<()> {
        self.mirror.save_session(&session).await?;
        *self.session.write().await = Some(session);
        Ok(())
    }
}

fn generated_user_id() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGateway;
    use chrono::{TimeZone, Utc};
    use postpilot_core::clock::ManualClock;
    use postpilot_core::gateway::{AuthResponse, RegisterResponse};
    use postpilot_core::storage::KeyValueStore;
    use postpilot_infrastructure::InMemoryKeyValueStore;
    use serde_json::json;

    struct Fixture {
        gateway: Arc<MockGateway>,
        kv: Arc<InMemoryKeyValueStore>,
        clock: Arc<ManualClock>,
        store: SessionStore,
    }

    fn fixture_with(kv: InMemoryKeyValueStore) -> Fixture {
        let gateway = Arc::new(MockGateway::new());
        let kv = Arc::new(kv);
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap(),
        ));
        let store = SessionStore::new(
            gateway.clone(),
            LocalMirror::new(kv.clone()),
            clock.clone(),
        );
        Fixture {
            gateway,
            kv,
            clock,
            store,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(InMemoryKeyValueStore::new())
    }

    #[tokio::test]
    async fn test_dev_login_skips_gateway() {
        let f = fixture();
        let user = f.store.login(DEV_LOGIN_EMAIL, DEV_LOGIN_PASSWORD).await.unwrap();

        assert_eq!(user.id, "dev_user_1");
        assert_eq!(user.name, "Dev User");
        assert_eq!(f.gateway.call_count("authenticate"), 0);

        let session = f.store.current_session().await.unwrap();
        assert!(session.is_temp);
        assert_eq!(f.store.remaining().await, Some(Duration::hours(1)));
    }

    #[tokio::test]
    async fn test_login_persists_eight_hour_session() {
        let f = fixture();
        f.gateway.set_auth(Ok(AuthResponse {
            user_id: Some("42".to_string()),
            username: Some("Ana".to_string()),
        }));

        let user = f.store.login("ana@example.com", "pw").await.unwrap();
        assert_eq!(user, User::new("42", "Ana", "ana@example.com"));

        let raw = f.kv.get("user").await.unwrap().unwrap();
        let persisted: Session = serde_json::from_str(&raw).unwrap();
        assert!(!persisted.is_temp);
        assert_eq!(
            persisted.expiry,
            (f.clock.now() + Duration::hours(8)).timestamp_millis()
        );
    }

    #[tokio::test]
    async fn test_login_sentinel_is_authentication_failure() {
        let f = fixture();
        f.gateway.set_auth(Ok(AuthResponse {
            user_id: None,
            username: Some("0".to_string()),
        }));

        let err = f.store.login("ana@example.com", "wrong").await.unwrap_err();
        assert!(err.is_authentication());
        assert!(!f.store.is_authenticated().await);
        assert!(f.kv.get("user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_network_failure_persists_nothing() {
        let f = fixture();
        f.gateway
            .set_auth(Err(PostPilotError::network("connection refused")));

        let err = f.store.login("ana@example.com", "pw").await.unwrap_err();
        assert!(err.is_network());
        assert!(f.kv.is_empty().await);
    }

    #[tokio::test]
    async fn test_restore_valid_and_expired() {
        let f = fixture();
        f.store.login(DEV_LOGIN_EMAIL, DEV_LOGIN_PASSWORD).await.unwrap();

        let restored = SessionStore::new(
            f.gateway.clone(),
            LocalMirror::new(f.kv.clone()),
            f.clock.clone(),
        );
        assert!(restored.restore().await.unwrap().is_some());

        f.clock.advance(Duration::hours(2));
        let late = SessionStore::new(
            f.gateway.clone(),
            LocalMirror::new(f.kv.clone()),
            f.clock.clone(),
        );
        assert!(late.restore().await.unwrap().is_none());
        assert!(f.kv.get("user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_malformed_session_removes_key() {
        let f = fixture_with(InMemoryKeyValueStore::with_entries([("user", "{\"user\":")]));

        assert!(f.store.restore().await.unwrap().is_none());
        assert!(!f.store.is_authenticated().await);
        assert!(f.kv.get("user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expiry_detected_lazily_on_read() {
        let f = fixture();
        f.store.login(DEV_LOGIN_EMAIL, DEV_LOGIN_PASSWORD).await.unwrap();
        assert!(f.store.current_user().await.is_some());

        f.clock.advance(Duration::minutes(61));
        assert!(f.store.current_user().await.is_none());
        assert!(f.kv.get("user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_outcomes() {
        let f = fixture();
        f.store.login(DEV_LOGIN_EMAIL, DEV_LOGIN_PASSWORD).await.unwrap();

        f.gateway.set_register(Ok(RegisterResponse {
            success: Some(json!(0)),
            user_id: None,
        }));
        assert!(!f.store.signup("ana@example.com", "pw", "Ana").await.unwrap());
        assert_eq!(f.store.current_user().await.unwrap().id, "dev_user_1");

        f.gateway.set_register(Ok(RegisterResponse {
            success: Some(json!("maybe")),
            user_id: None,
        }));
        let err = f.store.signup("ana@example.com", "pw", "Ana").await.unwrap_err();
        assert!(err.is_parse());

        f.gateway.set_register(Ok(RegisterResponse {
            success: Some(json!(1)),
            user_id: None,
        }));
        assert!(f.store.signup("ana@example.com", "pw", "Ana").await.unwrap());
        let user = f.store.current_user().await.unwrap();
        assert!(user.id.starts_with("user_"));
        assert_eq!(user.name, "Ana");
        assert!(!f.store.current_session().await.unwrap().is_temp);
    }

    #[tokio::test]
    async fn test_logout_clears_all_keys() {
        let f = fixture_with(InMemoryKeyValueStore::with_entries([
            ("userPosts", "[]"),
            ("userBrands", "[]"),
        ]));
        f.store.login(DEV_LOGIN_EMAIL, DEV_LOGIN_PASSWORD).await.unwrap();

        f.store.logout().await.unwrap();
        assert!(!f.store.is_authenticated().await);
        assert!(f.kv.is_empty().await);
    }
}
