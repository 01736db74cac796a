//! Authentication seam for the session store
//!
//! The session store never decides who a user is; it asks an
//! [`AuthProvider`]. The bundled [`FixtureAuthProvider`] accepts every
//! request and hands back placeholder identities. A provider backed by a
//! real service would reject bad credentials with
//! [`AuthError::InvalidCredentials`].

use async_trait::async_trait;
use thiserror::Error;

use crate::session::Identity;

/// Identifier given to password and signup identities
pub const FIXTURE_USER_ID: &str = "123";

/// Display name given to password logins
pub const FIXTURE_DISPLAY_NAME: &str = "Test User";

/// Identifier of the federated identity
pub const FEDERATED_USER_ID: &str = "124";

/// Email of the federated identity
pub const FEDERATED_EMAIL: &str = "google@example.com";

/// Display name of the federated identity
pub const FEDERATED_DISPLAY_NAME: &str = "Google User";

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair rejected
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Third-party sign-in did not complete
    #[error("Federated sign-in failed: {0}")]
    Federation(String),

    /// Provider-side failure
    #[error("Authentication provider error: {0}")]
    Provider(String),
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// What the user presented to sign in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Existing account, email and password
    Password {
        /// Email address
        email: String,
        /// Password
        password: String,
    },
    /// New account
    Signup {
        /// Email address
        email: String,
        /// Password
        password: String,
        /// Name to show in the app
        display_name: String,
    },
    /// Third-party sign-in
    Federated,
}

impl Credentials {
    /// Email/password credentials
    pub fn password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Password {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Signup credentials
    pub fn signup(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Credentials::Signup {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
        }
    }

    /// Short name of the flow, for logs
    pub fn flow(&self) -> &'static str {
        match self {
            Credentials::Password { .. } => "password",
            Credentials::Signup { .. } => "signup",
            Credentials::Federated => "federated",
        }
    }
}

/// Resolves credentials into an identity
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticate, returning the identity to sign in as
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity>;
}

/// Provider that accepts everything and returns placeholder identities
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAuthProvider;

#[async_trait]
impl AuthProvider for FixtureAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity> {
        let identity = match credentials {
            Credentials::Password { email, .. } => {
                Identity::new(FIXTURE_USER_ID, email.as_str(), FIXTURE_DISPLAY_NAME)
            }
            Credentials::Signup {
                email,
                display_name,
                ..
            } => Identity::new(FIXTURE_USER_ID, email.as_str(), display_name.as_str()),
            Credentials::Federated => {
                Identity::new(FEDERATED_USER_ID, FEDERATED_EMAIL, FEDERATED_DISPLAY_NAME)
            }
        };
        Ok(identity)
    }
}
