//! Application state management for SafeVoice
//!
//! This crate owns the in-memory session store, the authentication seam it
//! calls through, and the cancellable timers screens use to fake progress.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod schedule;
pub mod session;

pub use app_core::SubscriptionTier;
pub use auth::{AuthError, AuthProvider, Credentials, FixtureAuthProvider};
pub use schedule::ScreenTimer;
pub use session::{
    Identity, PreconditionError, Session, SessionError, SessionStatus, SessionStore, Usage,
};
