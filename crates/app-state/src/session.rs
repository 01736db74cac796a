//! Session store
//!
//! The [`SessionStore`] is the single authority for who is signed in and
//! what tier they hold. It is an explicit context object: build one at
//! startup, clone the handle into every consumer, and observe changes
//! through [`SessionStore::subscribe`].
//!
//! # State machine
//!
//! ```text
//! LoggedOut --login/signup/federated_login--> LoggedIn{Basic}
//! LoggedIn{Basic} --upgrade--> LoggedIn{Premium}
//! LoggedIn{*} --logout--> LoggedOut
//! ```
//!
//! # Example
//!
//! ```rust
//! use app_core::config::SessionConfig;
//! use app_state::session::{SessionStatus, SessionStore};
//! use app_state::SubscriptionTier;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SessionStore::new(SessionConfig::default());
//!     assert_eq!(store.status(), SessionStatus::LoggedOut);
//!
//!     store.login("a@b.com", "abc123").await?;
//!     let session = store.upgrade().await?;
//!     assert_eq!(session.tier, SubscriptionTier::Premium);
//!
//!     store.logout().await;
//!     assert!(!store.is_authenticated());
//!     Ok(())
//! }
//! ```

use app_core::config::SessionConfig;
use app_core::SubscriptionTier;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use crate::auth::{AuthError, AuthProvider, Credentials, FixtureAuthProvider};

/// Operation refused because the session is in the wrong state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// No one is signed in
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Basic tier allowance for today is used up
    #[error("Daily analysis limit of {limit} reached")]
    DailyLimitReached {
        /// The allowance that was hit
        limit: u32,
    },
}

/// Session store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Operation not allowed in the current state
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Authentication provider rejected the request
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
}

/// Result type for session store operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Who is signed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Name shown in the app
    pub display_name: String,
}

impl Identity {
    /// Create an identity
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Letter shown in the avatar circle
    pub fn initial(&self) -> char {
        self.display_name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}

/// Analysis counters for the signed-in account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Analyses started today
    pub analyses_today: u32,
    /// Analyses started overall
    pub total_analyses: u32,
    /// Basic tier allowance per day, always > 0
    pub daily_limit: u32,
}

impl Usage {
    /// Zeroed counters with the given allowance
    pub fn new(daily_limit: u32) -> Self {
        Self {
            analyses_today: 0,
            total_analyses: 0,
            daily_limit: daily_limit.max(1),
        }
    }

    /// Analyses left today, or `None` when unlimited
    pub fn remaining_today(&self, tier: SubscriptionTier) -> Option<u32> {
        match tier {
            SubscriptionTier::Premium => None,
            SubscriptionTier::Basic => {
                Some(self.daily_limit.saturating_sub(self.analyses_today))
            }
        }
    }
}

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No identity
    LoggedOut,
    /// Signed in at a tier
    LoggedIn {
        /// Current tier
        tier: SubscriptionTier,
    },
}

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Present iff signed in
    pub identity: Option<Identity>,
    /// Subscription tier
    pub tier: SubscriptionTier,
    /// Analysis counters
    pub usage: Usage,
}

impl Session {
    /// The logged-out defaults
    pub fn logged_out(daily_limit: u32) -> Self {
        Self {
            identity: None,
            tier: SubscriptionTier::Basic,
            usage: Usage::new(daily_limit),
        }
    }

    fn signed_in(identity: Identity, daily_limit: u32) -> Self {
        Self {
            identity: Some(identity),
            tier: SubscriptionTier::Basic,
            usage: Usage::new(daily_limit),
        }
    }

    /// Whether someone is signed in
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether the tier is Premium
    pub fn is_premium(&self) -> bool {
        self.tier.is_premium()
    }

    /// Coarse state
    pub fn status(&self) -> SessionStatus {
        match self.identity {
            Some(_) => SessionStatus::LoggedIn { tier: self.tier },
            None => SessionStatus::LoggedOut,
        }
    }

    /// Whether a new analysis may start right now
    pub fn can_start_analysis(&self) -> bool {
        self.is_authenticated() && self.usage.remaining_today(self.tier) != Some(0)
    }
}

struct StoreInner {
    state: RwLock<Session>,
    changes: watch::Sender<Session>,
    provider: Arc<dyn AuthProvider>,
    config: SessionConfig,
}

/// Owner of the session
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.inner.state.read())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl SessionStore {
    /// Create a logged-out store backed by the fixture provider
    pub fn new(config: SessionConfig) -> Self {
        Self::with_provider(config, Arc::new(FixtureAuthProvider))
    }

    /// Create a logged-out store backed by the given provider
    pub fn with_provider(config: SessionConfig, provider: Arc<dyn AuthProvider>) -> Self {
        let initial = Session::logged_out(config.daily_limit);
        let (changes, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(initial),
                changes,
                provider,
                config,
            }),
        }
    }

    /// Store configuration
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.inner.state.read().clone()
    }

    /// Coarse state
    pub fn status(&self) -> SessionStatus {
        self.inner.state.read().status()
    }

    /// Whether someone is signed in
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().is_authenticated()
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.changes.subscribe()
    }

    /// Sign in with email and password
    ///
    /// Replaces any current session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.sign_in(Credentials::password(email, password)).await
    }

    /// Create an account and sign in
    ///
    /// Replaces any current session.
    pub async fn signup(&self, email: &str, password: &str, display_name: &str) -> Result<Session> {
        self.sign_in(Credentials::signup(email, password, display_name))
            .await
    }

    /// Sign in through the third-party provider
    ///
    /// Replaces any current session.
    pub async fn federated_login(&self) -> Result<Session> {
        self.sign_in(Credentials::Federated).await
    }

    /// Sign out and reset tier and usage
    ///
    /// Calling this while logged out changes nothing.
    pub async fn logout(&self) {
        self.simulate_latency().await;

        let fresh = Session::logged_out(self.inner.config.daily_limit);
        let mut state = self.inner.state.write();
        if *state == fresh {
            return;
        }
        if let Some(identity) = &state.identity {
            tracing::info!(user = %identity.id, "Logged out");
        }
        *state = fresh;
        self.publish(&state);
    }

    /// Move the signed-in account to Premium
    ///
    /// Idempotent once Premium. Usage counters are untouched.
    ///
    /// # Errors
    ///
    /// - `PreconditionError::NotAuthenticated` - no one is signed in; state is unchanged
    pub async fn upgrade(&self) -> Result<Session> {
        self.simulate_latency().await;

        let mut state = self.inner.state.write();
        let Some(identity) = &state.identity else {
            tracing::warn!("Upgrade rejected: not authenticated");
            return Err(PreconditionError::NotAuthenticated.into());
        };

        if state.tier != SubscriptionTier::Premium {
            tracing::info!(user = %identity.id, "Upgraded to Premium");
            state.tier = SubscriptionTier::Premium;
            self.publish(&state);
        }
        Ok(state.clone())
    }

    /// Count a started analysis against today's allowance
    ///
    /// # Errors
    ///
    /// - `PreconditionError::NotAuthenticated` - no one is signed in
    /// - `PreconditionError::DailyLimitReached` - Basic allowance used up
    pub async fn record_analysis(&self) -> Result<Session> {
        self.simulate_latency().await;

        let mut state = self.inner.state.write();
        if !state.can_start_analysis() {
            if !state.is_authenticated() {
                tracing::warn!("Analysis rejected: not authenticated");
                return Err(PreconditionError::NotAuthenticated.into());
            }
            let limit = state.usage.daily_limit;
            tracing::warn!(limit, "Analysis rejected: daily limit reached");
            return Err(PreconditionError::DailyLimitReached { limit }.into());
        }

        state.usage.analyses_today += 1;
        state.usage.total_analyses += 1;
        tracing::debug!(
            today = state.usage.analyses_today,
            total = state.usage.total_analyses,
            "Analysis recorded"
        );
        self.publish(&state);
        Ok(state.clone())
    }

    /// Return to the logged-out defaults immediately
    ///
    /// Intended for test setup; screens sign out through [`Self::logout`].
    pub fn reset(&self) {
        let mut state = self.inner.state.write();
        *state = Session::logged_out(self.inner.config.daily_limit);
        self.publish(&state);
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session> {
        self.simulate_latency().await;

        let identity = match self.inner.provider.authenticate(&credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(flow = credentials.flow(), "Sign-in failed: {}", e);
                return Err(e.into());
            }
        };

        tracing::info!(user = %identity.id, flow = credentials.flow(), "Signed in");
        let session = Session::signed_in(identity, self.inner.config.daily_limit);
        let mut state = self.inner.state.write();
        *state = session.clone();
        self.publish(&state);
        Ok(session)
    }

    async fn simulate_latency(&self) {
        let latency = self.inner.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn publish(&self, session: &Session) {
        self.inner.changes.send_replace(session.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthProvider;
    use std::time::Duration;

    fn store() -> SessionStore {
        SessionStore::new(SessionConfig::default())
    }

    #[tokio::test]
    async fn test_initial_state_logged_out() {
        let store = store();
        let session = store.snapshot();
        assert_eq!(session.status(), SessionStatus::LoggedOut);
        assert_eq!(session.tier, SubscriptionTier::Basic);
        assert_eq!(session.usage, Usage::new(1));
    }

    #[tokio::test]
    async fn test_login_builds_basic_session() {
        let store = store();
        let session = store.login("a@b.com", "abc123").await.unwrap();

        let identity = session.identity.as_ref().unwrap();
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.display_name, "Test User");
        assert_eq!(session.tier, SubscriptionTier::Basic);
        assert_eq!(session.usage.analyses_today, 0);
        assert_eq!(store.snapshot(), session);
    }

    #[tokio::test]
    async fn test_login_replaces_previous_session() {
        let store = store();
        store.federated_login().await.unwrap();
        store.upgrade().await.unwrap();

        let session = store.login("second@b.com", "abc123").await.unwrap();
        assert_eq!(session.identity.unwrap().email, "second@b.com");
        assert_eq!(session.tier, SubscriptionTier::Basic);
    }

    #[tokio::test]
    async fn test_signup_uses_display_name() {
        let store = store();
        let session = store.signup("ada@b.com", "abc123", "Ada").await.unwrap();
        assert_eq!(session.identity.unwrap().display_name, "Ada");
        assert_eq!(store.status(), SessionStatus::LoggedIn { tier: SubscriptionTier::Basic });
    }

    #[tokio::test]
    async fn test_logout_resets_everything() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();
        store.record_analysis().await.unwrap();
        store.upgrade().await.unwrap();

        store.logout().await;
        let session = store.snapshot();
        assert!(session.identity.is_none());
        assert_eq!(session.tier, SubscriptionTier::Basic);
        assert_eq!(session.usage, Usage { analyses_today: 0, total_analyses: 0, daily_limit: 1 });
    }

    #[tokio::test]
    async fn test_logout_idempotent() {
        let store = store();
        let mut rx = store.subscribe();
        store.logout().await;
        store.logout().await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.snapshot(), Session::logged_out(1));
    }

    #[tokio::test]
    async fn test_upgrade_after_logout_rejected() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();
        store.logout().await;
        let before = store.snapshot();

        let err = store.upgrade().await.unwrap_err();
        assert_eq!(err, SessionError::Precondition(PreconditionError::NotAuthenticated));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_upgrade_idempotent() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();

        let first = store.upgrade().await.unwrap();
        let second = store.upgrade().await.unwrap();
        assert_eq!(first.tier, SubscriptionTier::Premium);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_upgrade_keeps_usage() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();
        let before = store.record_analysis().await.unwrap().usage;
        let after = store.upgrade().await.unwrap().usage;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_record_analysis_enforces_basic_limit() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();

        let session = store.record_analysis().await.unwrap();
        assert_eq!(session.usage.analyses_today, 1);
        assert!(!session.can_start_analysis());

        let err = store.record_analysis().await.unwrap_err();
        assert_eq!(err, PreconditionError::DailyLimitReached { limit: 1 }.into());
        assert_eq!(store.snapshot().usage.total_analyses, 1);
    }

    #[tokio::test]
    async fn test_record_analysis_premium_unlimited() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();
        store.upgrade().await.unwrap();

        for _ in 0..5 {
            store.record_analysis().await.unwrap();
        }
        let session = store.snapshot();
        assert_eq!(session.usage.total_analyses, 5);
        assert_eq!(session.usage.remaining_today(session.tier), None);
    }

    #[tokio::test]
    async fn test_record_analysis_requires_identity() {
        let err = store().record_analysis().await.unwrap_err();
        assert_eq!(err, PreconditionError::NotAuthenticated.into());
    }

    #[tokio::test]
    async fn test_subscribe_sees_transitions() {
        let store = store();
        let mut rx = store.subscribe();

        store.login("a@b.com", "abc123").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());

        store.upgrade().await.unwrap();
        assert!(rx.borrow_and_update().is_premium());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = store();
        let handle = store.clone();
        handle.login("a@b.com", "abc123").await.unwrap();
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_reset() {
        let store = store();
        store.login("a@b.com", "abc123").await.unwrap();
        store.reset();
        assert_eq!(store.status(), SessionStatus::LoggedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let store = SessionStore::new(SessionConfig {
            latency_ms: 800,
            ..SessionConfig::default()
        });
        let start = tokio::time::Instant::now();
        store.login("a@b.com", "abc123").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_provider_rejection_leaves_state() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_authenticate()
            .withf(|c| matches!(c, Credentials::Password { .. }))
            .times(1)
            .returning(|_| Err(AuthError::InvalidCredentials));

        let store = SessionStore::with_provider(SessionConfig::default(), Arc::new(provider));
        let err = store.login("a@b.com", "wrong-password").await.unwrap_err();
        assert_eq!(err, SessionError::Auth(AuthError::InvalidCredentials));
        assert_eq!(store.status(), SessionStatus::LoggedOut);
    }

    #[tokio::test]
    async fn test_provider_receives_signup_details() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_authenticate()
            .withf(|c| {
                *c == Credentials::signup("ada@b.com", "abc123", "Ada")
            })
            .times(1)
            .returning(|_| Ok(Identity::new("42", "ada@b.com", "Ada")));

        let store = SessionStore::with_provider(SessionConfig::default(), Arc::new(provider));
        let session = store.signup("ada@b.com", "abc123", "Ada").await.unwrap();
        assert_eq!(session.identity.unwrap().id, "42");
    }

    #[test]
    fn test_identity_initial() {
        assert_eq!(Identity::new("1", "a@b.com", "ada").initial(), 'A');
        assert_eq!(Identity::new("1", "a@b.com", "").initial(), 'U');
    }
}
