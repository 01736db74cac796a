//! Shared handles passed to every screen

use crate::theme::{Theme, ThemeName, ThemeState};
use app_core::AppConfig;
use app_state::SessionStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// Everything a screen needs from the outside world
///
/// Cheap to clone; clones share the session and theme.
#[derive(Debug, Clone)]
pub struct AppContext {
    session: SessionStore,
    theme: Arc<RwLock<ThemeState>>,
    config: Arc<AppConfig>,
}

impl AppContext {
    /// Build a context with a fresh logged-out session
    pub fn new(config: AppConfig) -> Self {
        let session = SessionStore::new(config.session.clone());
        Self::with_session(config, session)
    }

    /// Build a context around an existing session store
    pub fn with_session(config: AppConfig, session: SessionStore) -> Self {
        let theme_name = config.theme.default.parse::<ThemeName>().unwrap_or_else(|e| {
            tracing::warn!("{}; falling back to {}", e, ThemeName::default());
            ThemeName::default()
        });
        Self {
            session,
            theme: Arc::new(RwLock::new(ThemeState::new(theme_name))),
            config: Arc::new(config),
        }
    }

    /// Session store handle
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Copy of the active theme
    pub fn theme(&self) -> Theme {
        self.theme.read().current_theme().clone()
    }

    /// Name of the active theme
    pub fn theme_name(&self) -> ThemeName {
        self.theme.read().theme_name
    }

    /// Switch between dark and light, returning the new theme
    pub fn toggle_theme(&self) -> ThemeName {
        self.theme.write().toggle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_dark() {
        let ctx = AppContext::new(AppConfig::default());
        assert_eq!(ctx.theme_name(), ThemeName::Dark);
        assert!(ctx.theme().is_dark());
    }

    #[test]
    fn test_configured_theme() {
        let mut config = AppConfig::default();
        config.theme.default = "light".to_string();
        assert_eq!(AppContext::new(config).theme_name(), ThemeName::Light);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = AppConfig::default();
        config.theme.default = "sepia".to_string();
        assert_eq!(AppContext::new(config).theme_name(), ThemeName::Dark);
    }

    #[test]
    fn test_clones_share_theme() {
        let ctx = AppContext::new(AppConfig::default());
        let other = ctx.clone();
        assert_eq!(other.toggle_theme(), ThemeName::Light);
        assert_eq!(ctx.theme_name(), ThemeName::Light);
    }
}
