//! Theme store and colour tokens for SafeVoice
//!
//! Two themes are supported, Dark (the default) and Light. They share the
//! neon-green brand colour and the status colours and differ only in
//! surfaces, text, and borders.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{ThemeName, ThemeState};
//!
//! let mut state = ThemeState::default();
//! assert_eq!(state.theme_name, ThemeName::Dark);
//!
//! state.toggle();
//! assert_eq!(state.colors().background, "#F5F5F5");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as an RGBA hex string (e.g., "#FFFFFF" or "#FFFFFF80")
pub type Color = String;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Apply an alpha channel to a `#RRGGBB` color
///
/// `alpha` is 0.0 to 1.0. Any existing alpha channel is replaced.
/// Returns the input unchanged when it is not a hex color.
pub fn with_alpha(color: &str, alpha: f32) -> Color {
    match parse_hex_color(color) {
        Some((r, g, b)) => {
            let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("{}{:02X}", rgb_to_hex(r, g, b), a)
        }
        None => color.to_string(),
    }
}

// =============================================================================
// Brand Colors
// =============================================================================

/// SafeVoice brand colors, shared by every theme
pub mod brand {
    /// Neon green used for primary actions and accents
    pub const PRIMARY: &str = "#00FF99";

    /// Near-black used for text on primary surfaces
    pub const ON_PRIMARY: &str = "#121212";

    /// Red for destructive actions and notifications
    pub const DANGER: &str = "#FF5252";

    /// Green for positive states
    pub const SUCCESS: &str = "#4CAF50";

    /// Amber for warnings
    pub const WARNING: &str = "#FFC107";

    /// Grey used for disabled controls
    pub const DISABLED: &str = "#666666";

    /// Light grey used for disabled labels
    pub const DISABLED_TEXT: &str = "#AAAAAA";
}

// =============================================================================
// Theme Definition
// =============================================================================

/// Theme name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    Light,
    /// Dark theme
    #[default]
    Dark,
}

impl ThemeName {
    /// Get the color scheme name
    pub fn color_scheme(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "Light"),
            ThemeName::Dark => write!(f, "Dark"),
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Semantic colors consumed by screens and components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Primary actions
    pub primary: Color,
    /// Screen background
    pub background: Color,
    /// Card and input surfaces
    pub card: Color,
    /// Body text
    pub text: Color,
    /// Dividers and outlines
    pub border: Color,
    /// Notification badges
    pub notification: Color,
    /// Accents and default tag chips
    pub accent: Color,
    /// Errors and destructive actions
    pub danger: Color,
    /// Positive states
    pub success: Color,
    /// Warnings
    pub warning: Color,
}

/// Font faces used by the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Body text
    pub regular: String,
    /// Labels and emphasis
    pub medium: String,
    /// Titles
    pub bold: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: "Poppins_400Regular".to_string(),
            medium: "Poppins_500Medium".to_string(),
            bold: "Poppins_700Bold".to_string(),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: ThemeName,
    /// Color scheme (light or dark)
    pub color_scheme: String,
    /// Semantic colors
    pub colors: ThemeColors,
    /// Font faces
    pub fonts: FontConfig,
}

impl Theme {
    /// Check if this is a dark theme
    pub fn is_dark(&self) -> bool {
        matches!(self.name, ThemeName::Dark)
    }
}

fn shared_colors(background: &str, card: &str, text: &str, border: &str) -> ThemeColors {
    ThemeColors {
        primary: brand::PRIMARY.to_string(),
        background: background.to_string(),
        card: card.to_string(),
        text: text.to_string(),
        border: border.to_string(),
        notification: brand::DANGER.to_string(),
        accent: brand::PRIMARY.to_string(),
        danger: brand::DANGER.to_string(),
        success: brand::SUCCESS.to_string(),
        warning: brand::WARNING.to_string(),
    }
}

/// Create the light theme
pub fn light_theme() -> Theme {
    Theme {
        name: ThemeName::Light,
        color_scheme: ThemeName::Light.color_scheme().to_string(),
        colors: shared_colors("#F5F5F5", "#FFFFFF", "#121212", "#EEEEEE"),
        fonts: FontConfig::default(),
    }
}

/// Create the dark theme
pub fn dark_theme() -> Theme {
    Theme {
        name: ThemeName::Dark,
        color_scheme: ThemeName::Dark.color_scheme().to_string(),
        colors: shared_colors("#121212", "#181818", "#FFFFFF", "#333333"),
        fonts: FontConfig::default(),
    }
}

/// Get a theme by name
pub fn get_theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Light => light_theme(),
        ThemeName::Dark => dark_theme(),
    }
}

// =============================================================================
// Theme State
// =============================================================================

/// Theme provider state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredThemeState")]
pub struct ThemeState {
    /// Current theme name
    pub theme_name: ThemeName,
    /// Current theme (regenerated on deserialization)
    #[serde(skip_serializing)]
    pub theme: Theme,
}

#[derive(Deserialize)]
struct StoredThemeState {
    theme_name: ThemeName,
}

impl From<StoredThemeState> for ThemeState {
    fn from(stored: StoredThemeState) -> Self {
        Self::new(stored.theme_name)
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ThemeName::default())
    }
}

impl ThemeState {
    /// Create a new theme state with the given theme
    pub fn new(theme_name: ThemeName) -> Self {
        Self {
            theme_name,
            theme: get_theme(theme_name),
        }
    }

    /// Set the current theme
    pub fn set_theme(&mut self, theme_name: ThemeName) {
        self.theme_name = theme_name;
        self.theme = get_theme(theme_name);
    }

    /// Switch between dark and light
    pub fn toggle(&mut self) -> ThemeName {
        self.set_theme(self.theme_name.toggled());
        tracing::debug!(theme = %self.theme_name, "Theme toggled");
        self.theme_name
    }

    /// Get the current theme
    pub fn current_theme(&self) -> &Theme {
        &self.theme
    }

    /// Active color palette
    pub fn colors(&self) -> &ThemeColors {
        &self.theme.colors
    }

    /// Active fonts
    pub fn fonts(&self) -> &FontConfig {
        &self.theme.fonts
    }
}
