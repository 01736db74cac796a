//! Account tab: profile, usage, theme switch, and logout

use crate::components::{Button, ButtonSize};
use crate::context::AppContext;
use crate::navigation::Route;
use crate::theme::ThemeName;
use app_state::Session;

/// Shown at the bottom of the page
pub const APP_VERSION_LABEL: &str = "SafeVoice v1.0.0";

/// Profile, settings, and usage
#[derive(Debug, Clone)]
pub struct AccountScreen {
    ctx: AppContext,
}

impl AccountScreen {
    /// Create the screen
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    fn session(&self) -> Session {
        self.ctx.session().snapshot()
    }

    /// Avatar letter
    pub fn initial(&self) -> char {
        self.session()
            .identity
            .map(|identity| identity.initial())
            .unwrap_or('U')
    }

    /// Name under the avatar
    pub fn display_name(&self) -> String {
        self.session()
            .identity
            .map(|identity| identity.display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "User".to_string())
    }

    /// Email under the name
    pub fn email(&self) -> String {
        self.session()
            .identity
            .map(|identity| identity.email)
            .unwrap_or_else(|| "user@example.com".to_string())
    }

    /// "Premium" or "Basic"
    pub fn plan_badge(&self) -> String {
        self.session().tier.to_string()
    }

    /// "Analyses Today" value: "Unlimited" or `today/limit`
    pub fn analyses_today(&self) -> String {
        let session = self.session();
        if session.is_premium() {
            "Unlimited".to_string()
        } else {
            format!(
                "{}/{}",
                session.usage.analyses_today, session.usage.daily_limit
            )
        }
    }

    /// "Total Analyses" value
    pub fn total_analyses(&self) -> u32 {
        self.session().usage.total_analyses
    }

    /// Upgrade card, for Basic users
    pub fn upgrade_card(&self) -> Option<Button> {
        (!self.session().is_premium())
            .then(|| Button::new("Upgrade").with_size(ButtonSize::Small))
    }

    /// Where the upgrade card leads
    pub fn upgrade(&self) -> Route {
        Route::Subscription
    }

    /// Label of the theme row
    pub fn theme_toggle_label(&self) -> &'static str {
        match self.ctx.theme_name() {
            ThemeName::Dark => "Switch to Light Mode",
            ThemeName::Light => "Switch to Dark Mode",
        }
    }

    /// Flip the theme
    pub fn toggle_theme(&self) -> ThemeName {
        self.ctx.toggle_theme()
    }

    /// Sign out; the navigation shell then swaps to the auth graph
    pub async fn logout(&self) {
        self.ctx.session().logout().await;
    }

    /// Footer line
    pub fn version(&self) -> &'static str {
        APP_VERSION_LABEL
    }
}
