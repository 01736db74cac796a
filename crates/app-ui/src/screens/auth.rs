//! Signed-out screens: welcome, login, and signup

use crate::components::{Button, ButtonSize, ButtonVariant, Input};
use crate::context::AppContext;
use crate::navigation::Route;
use crate::screens::Alert;
use app_core::{FormField, LoginForm, SignupForm, ValidationError};
use app_state::{Session, SessionError};

/// Shown when the store rejects an email/password login
pub const LOGIN_FAILED: &str = "Invalid email or password. Please try again.";

/// Shown when federated sign-in fails
pub const FEDERATED_FAILED: &str = "Failed to login with Google. Please try again.";

/// Shown when the store rejects a signup
pub const SIGNUP_FAILED: &str = "Failed to create account. Please try again.";

/// Result of pressing a submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Button was inert; nothing happened
    Ignored,
    /// Form rules failed; the store was not called
    Invalid(ValidationError),
    /// The store rejected the request; the message is shown on the form
    Failed(String),
    /// Signed in; the navigation shell will swap graphs
    SignedIn(Session),
}

// =============================================================================
// Welcome
// =============================================================================

/// Feature highlight on the welcome screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    /// Icon name
    pub icon: &'static str,
    /// Title
    pub title: &'static str,
    /// One-sentence description
    pub description: &'static str,
}

/// Landing screen
#[derive(Debug, Clone, Default)]
pub struct WelcomeScreen;

impl WelcomeScreen {
    /// Line under the logo
    pub const TAGLINE: &'static str = "Voice analysis for the privacy-conscious";

    /// Headline
    pub const HEADLINE: &'static str = "Smart Voice Analysis";

    /// Paragraph under the headline
    pub const DESCRIPTION: &'static str =
        "Analyze voice messages for social appropriateness and emotional tone";

    /// Feature list
    pub const HIGHLIGHTS: [Highlight; 4] = [
        Highlight {
            icon: "shield-checkmark-outline",
            title: "Privacy-Focused",
            description: "Analyze voice messages privately for social appropriateness with confidence.",
        },
        Highlight {
            icon: "pulse-outline",
            title: "Emotion Detection",
            description: "Detect emotional tone, stress levels, and potential deception in voice recordings.",
        },
        Highlight {
            icon: "mic-outline",
            title: "Upload or Record",
            description: "Easily record a new voice message or upload an existing one for analysis.",
        },
        Highlight {
            icon: "document-text-outline",
            title: "Detailed Reports",
            description: "Get comprehensive breakdowns of voice analysis with premium features.",
        },
    ];

    /// "Get Started" and login buttons
    pub fn buttons(&self) -> [Button; 2] {
        [
            Button::new("Get Started")
                .with_size(ButtonSize::Large)
                .full_width(),
            Button::new("Already have an account? Login")
                .with_variant(ButtonVariant::Text)
                .full_width(),
        ]
    }

    /// Where "Get Started" leads
    pub fn get_started(&self) -> Route {
        Route::Signup
    }

    /// Where the login link leads
    pub fn login(&self) -> Route {
        Route::Login
    }
}

// =============================================================================
// Login
// =============================================================================

/// Email/password login form
#[derive(Debug, Clone)]
pub struct LoginScreen {
    ctx: AppContext,
    form: LoginForm,
    errors: ValidationError,
    login_error: Option<String>,
    submitting: bool,
    show_password: bool,
}

impl LoginScreen {
    /// Empty login form
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: LoginForm::default(),
            errors: ValidationError::new(),
            login_error: None,
            submitting: false,
            show_password: false,
        }
    }

    /// Update the email field
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    /// Update the password field
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    /// Show or mask the password
    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Current form contents
    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Inline field errors from the last submit
    pub fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Banner message from the last failed sign-in
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Whether a sign-in is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Email and password inputs
    pub fn inputs(&self) -> [Input; 2] {
        let mut password = Input::for_field(FormField::Password)
            .with_value(self.form.password.as_str())
            .with_errors(&self.errors);
        password.reveal = self.show_password;
        [
            Input::for_field(FormField::Email)
                .with_value(self.form.email.as_str())
                .with_errors(&self.errors),
            password,
        ]
    }

    /// Login and federated buttons
    pub fn buttons(&self) -> [Button; 2] {
        [
            Button::new("Login").loading(self.submitting),
            Button::new("Continue with Google")
                .with_variant(ButtonVariant::Secondary)
                .with_icon("logo-google")
                .disabled(self.submitting),
        ]
    }

    /// Validate and sign in with email and password
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Ignored;
        }
        self.login_error = None;
        if let Err(errors) = self.form.validate() {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationError::new();

        self.submitting = true;
        let email = self.form.normalized_email().to_string();
        let result = self.ctx.session().login(&email, &self.form.password).await;
        self.submitting = false;
        self.finish(result, LOGIN_FAILED)
    }

    /// Sign in through the third-party provider
    pub async fn continue_with_google(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Ignored;
        }
        self.login_error = None;
        self.submitting = true;
        let result = self.ctx.session().federated_login().await;
        self.submitting = false;
        self.finish(result, FEDERATED_FAILED)
    }

    fn finish(&mut self, result: Result<Session, SessionError>, message: &str) -> SubmitOutcome {
        match result {
            Ok(session) => SubmitOutcome::SignedIn(session),
            Err(e) => {
                tracing::debug!("Login failed: {}", e);
                self.login_error = Some(message.to_string());
                SubmitOutcome::Failed(message.to_string())
            }
        }
    }

    /// Forgot-password prompt
    pub fn forgot_password(&self) -> Alert {
        Alert::new("Forgot Password", "Enter your email to reset your password.")
    }

    /// Where the signup link leads
    pub fn sign_up(&self) -> Route {
        Route::Signup
    }
}

// =============================================================================
// Signup
// =============================================================================

/// Account creation form
#[derive(Debug, Clone)]
pub struct SignupScreen {
    ctx: AppContext,
    form: SignupForm,
    agree_terms: bool,
    errors: ValidationError,
    signup_error: Option<String>,
    submitting: bool,
}

impl SignupScreen {
    /// Empty signup form
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: SignupForm::default(),
            agree_terms: false,
            errors: ValidationError::new(),
            signup_error: None,
            submitting: false,
        }
    }

    /// Mutable access to the form fields
    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    /// Current form contents
    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    /// Tick or untick the terms checkbox
    pub fn set_agree_terms(&mut self, agree: bool) {
        self.agree_terms = agree;
    }

    /// Inline field errors from the last submit
    pub fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Banner message from the last failed signup
    pub fn signup_error(&self) -> Option<&str> {
        self.signup_error.as_deref()
    }

    /// The four form inputs
    pub fn inputs(&self) -> [Input; 4] {
        let values = [
            (FormField::DisplayName, &self.form.display_name),
            (FormField::Email, &self.form.email),
            (FormField::Password, &self.form.password),
            (FormField::ConfirmPassword, &self.form.confirm_password),
        ];
        values.map(|(field, value)| {
            Input::for_field(field)
                .with_value(value.as_str())
                .with_errors(&self.errors)
        })
    }

    /// "Create Account" button, disabled until the terms are accepted
    pub fn create_button(&self) -> Button {
        Button::new("Create Account")
            .loading(self.submitting)
            .disabled(!self.agree_terms)
    }

    /// Validate and create the account
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.create_button().is_inert() {
            return SubmitOutcome::Ignored;
        }
        self.signup_error = None;
        if let Err(errors) = self.form.validate() {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationError::new();

        self.submitting = true;
        let result = self
            .ctx
            .session()
            .signup(
                self.form.normalized_email(),
                &self.form.password,
                self.form.normalized_display_name(),
            )
            .await;
        self.submitting = false;

        match result {
            Ok(session) => SubmitOutcome::SignedIn(session),
            Err(e) => {
                tracing::debug!("Signup failed: {}", e);
                self.signup_error = Some(SIGNUP_FAILED.to_string());
                SubmitOutcome::Failed(SIGNUP_FAILED.to_string())
            }
        }
    }

    /// Sign up through the third-party provider
    pub async fn continue_with_google(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Ignored;
        }
        self.signup_error = None;
        self.submitting = true;
        let result = self.ctx.session().federated_login().await;
        self.submitting = false;
        match result {
            Ok(session) => SubmitOutcome::SignedIn(session),
            Err(_) => {
                self.signup_error = Some(FEDERATED_FAILED.to_string());
                SubmitOutcome::Failed(FEDERATED_FAILED.to_string())
            }
        }
    }

    /// Where the login link leads
    pub fn log_in(&self) -> Route {
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::{AppConfig, FieldError};
    use app_state::{
        AuthError, AuthProvider, Credentials, FixtureAuthProvider, Identity, SessionStore,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct RejectingProvider;

    #[async_trait]
    impl AuthProvider for RejectingProvider {
        async fn authenticate(&self, credentials: &Credentials) -> app_state::auth::Result<Identity> {
            match credentials {
                Credentials::Federated => Err(AuthError::Federation("cancelled".to_string())),
                _ => Err(AuthError::InvalidCredentials),
            }
        }
    }

    /// Refuses new email accounts but lets third-party sign-in through
    struct FederatedOnlyProvider;

    #[async_trait]
    impl AuthProvider for FederatedOnlyProvider {
        async fn authenticate(&self, credentials: &Credentials) -> app_state::auth::Result<Identity> {
            match credentials {
                Credentials::Federated => FixtureAuthProvider.authenticate(credentials).await,
                _ => Err(AuthError::InvalidCredentials),
            }
        }
    }

    fn ctx() -> AppContext {
        AppContext::new(AppConfig::default())
    }

    fn rejecting_ctx() -> AppContext {
        let config = AppConfig::default();
        let session = SessionStore::with_provider(config.session.clone(), Arc::new(RejectingProvider));
        AppContext::with_session(config, session)
    }

    #[tokio::test]
    async fn test_login_success() {
        let ctx = ctx();
        let mut screen = LoginScreen::new(ctx.clone());
        screen.set_email("a@b.com");
        screen.set_password("abc123");

        let SubmitOutcome::SignedIn(session) = screen.submit().await else {
            panic!("expected sign-in");
        };
        assert_eq!(session.identity.unwrap().email, "a@b.com");
        assert!(ctx.session().is_authenticated());
        assert!(!screen.is_submitting());
    }

    #[tokio::test]
    async fn test_login_validation_blocks_store() {
        let ctx = ctx();
        let mut screen = LoginScreen::new(ctx.clone());
        screen.set_email("abc");
        screen.set_password("abc12");

        let SubmitOutcome::Invalid(errors) = screen.submit().await else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get(FormField::Email), Some(&FieldError::EmailInvalid));
        assert_eq!(errors.get(FormField::Password), Some(&FieldError::PasswordTooShort));
        assert!(!ctx.session().is_authenticated());

        let [email, password] = screen.inputs();
        assert_eq!(email.error.as_deref(), Some("Email is invalid"));
        assert_eq!(
            password.error.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[tokio::test]
    async fn test_login_rejected_by_provider() {
        let mut screen = LoginScreen::new(rejecting_ctx());
        screen.set_email("a@b.com");
        screen.set_password("abc123");

        assert_eq!(screen.submit().await, SubmitOutcome::Failed(LOGIN_FAILED.to_string()));
        assert_eq!(screen.login_error(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn test_federated_failure_message() {
        let mut screen = LoginScreen::new(rejecting_ctx());
        assert_eq!(
            screen.continue_with_google().await,
            SubmitOutcome::Failed(FEDERATED_FAILED.to_string())
        );
    }

    #[tokio::test]
    async fn test_federated_login() {
        let mut screen = LoginScreen::new(ctx());
        let SubmitOutcome::SignedIn(session) = screen.continue_with_google().await else {
            panic!("expected sign-in");
        };
        assert_eq!(session.identity.unwrap().display_name, "Google User");
    }

    #[test]
    fn test_password_visibility() {
        let mut screen = LoginScreen::new(ctx());
        assert!(screen.inputs()[1].is_masked());
        screen.toggle_password_visibility();
        assert!(!screen.inputs()[1].is_masked());
    }

    #[tokio::test]
    async fn test_signup_requires_terms() {
        let ctx = ctx();
        let mut screen = SignupScreen::new(ctx.clone());
        *screen.form_mut() = SignupForm::new("Ada", "ada@b.com", "abc123", "abc123");

        assert!(screen.create_button().disabled);
        assert_eq!(screen.submit().await, SubmitOutcome::Ignored);
        assert!(!ctx.session().is_authenticated());

        screen.set_agree_terms(true);
        let SubmitOutcome::SignedIn(session) = screen.submit().await else {
            panic!("expected sign-in");
        };
        assert_eq!(session.identity.unwrap().display_name, "Ada");
    }

    #[tokio::test]
    async fn test_signup_mismatch_never_reaches_store() {
        let ctx = ctx();
        let mut screen = SignupScreen::new(ctx.clone());
        *screen.form_mut() = SignupForm::new("Ada", "ada@b.com", "abc123", "abc124");
        screen.set_agree_terms(true);

        let SubmitOutcome::Invalid(errors) = screen.submit().await else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.message(FormField::ConfirmPassword).as_deref(),
            Some("Passwords do not match")
        );
        assert_eq!(errors.len(), 1);
        assert!(!ctx.session().is_authenticated());
        assert_eq!(screen.inputs()[3].error.as_deref(), Some("Passwords do not match"));
    }

    #[tokio::test]
    async fn test_signup_federated_retry_clears_banner() {
        let config = AppConfig::default();
        let session =
            SessionStore::with_provider(config.session.clone(), Arc::new(FederatedOnlyProvider));
        let mut screen = SignupScreen::new(AppContext::with_session(config, session));
        *screen.form_mut() = SignupForm::new("Ada", "ada@b.com", "abc123", "abc123");
        screen.set_agree_terms(true);

        assert_eq!(screen.submit().await, SubmitOutcome::Failed(SIGNUP_FAILED.to_string()));
        assert_eq!(screen.signup_error(), Some(SIGNUP_FAILED));

        assert!(matches!(
            screen.continue_with_google().await,
            SubmitOutcome::SignedIn(_)
        ));
        assert_eq!(screen.signup_error(), None);
    }

    #[tokio::test]
    async fn test_signup_trims_name_and_email() {
        let mut screen = SignupScreen::new(ctx());
        *screen.form_mut() = SignupForm::new("  Ada ", " ada@b.com ", "abc123", "abc123");
        screen.set_agree_terms(true);

        let SubmitOutcome::SignedIn(session) = screen.submit().await else {
            panic!("expected sign-in");
        };
        let identity = session.identity.unwrap();
        assert_eq!(identity.display_name, "Ada");
        assert_eq!(identity.email, "ada@b.com");
    }

    #[test]
    fn test_welcome_routes() {
        let welcome = WelcomeScreen;
        assert_eq!(welcome.get_started(), Route::Signup);
        assert_eq!(welcome.login(), Route::Login);
        assert_eq!(WelcomeScreen::TAGLINE, "Voice analysis for the privacy-conscious");
        assert_eq!(welcome.buttons()[1].variant, ButtonVariant::Text);
    }
}
