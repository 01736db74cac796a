//! User interface layer for SafeVoice
//!
//! This crate models the client's screens without binding to a rendering
//! toolkit: themes and design tokens, typed component configuration
//! records, the two-graph navigation shell, and one state struct per
//! screen.
//!
//! # Design System
//!
//! The palette is built around a neon green primary (#00FF99) with a red
//! danger accent. Two themes are supported:
//! - [`theme::ThemeName::Dark`] - Default, near-black background
//! - [`theme::ThemeName::Light`] - White background
//!
//! # Modules
//!
//! - [`theme`] - Theme store and colour palettes
//! - [`tokens`] - Spacing, radii, font sizes, and durations
//! - [`components`] - Button, input, card, and badge records
//! - [`navigation`] - Routes, stacks, and the auth/main shell
//! - [`context`] - Shared handles passed to every screen
//! - [`screens`] - Screen models
//!
//! # Example
//!
//! ```rust
//! use app_core::AppConfig;
//! use app_ui::context::AppContext;
//! use app_ui::navigation::{Graph, NavigationShell, Route};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = AppContext::new(AppConfig::default());
//!     let mut shell = NavigationShell::for_session(&ctx.session().snapshot());
//!     assert_eq!(shell.graph(), Graph::Auth);
//!
//!     ctx.session().login("a@b.com", "abc123").await?;
//!     shell.sync_with_session(&ctx.session().snapshot());
//!     assert_eq!(shell.current_route(), &Route::Home);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod context;
pub mod navigation;
pub mod screens;
pub mod theme;
pub mod tokens;

// Re-export commonly used types
pub use theme::{
    dark_theme, get_theme, light_theme, with_alpha, Color, FontConfig, Theme, ThemeColors,
    ThemeName, ThemeState,
};

pub use components::{
    Button, ButtonSize, ButtonVariant, EmotionDetail, Input, InputType, ResultCard, SafetyBadge,
    TagChip,
};

pub use navigation::{
    Graph, NavigationError, NavigationShell, NavigationStack, NavigationTab, Route, StackEntry,
};

pub use context::AppContext;
pub use screens::Alert;
