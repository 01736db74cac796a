//! UI component library for SafeVoice
//!
//! Components are typed configuration records. A renderer reads the
//! serialized props plus the computed styles; nothing here merges free-form
//! style maps.
//!
//! # Available Components
//!
//! - [`Button`] - Pill button with four variants
//! - [`Input`] - Labelled form field that carries its validation message
//! - [`ResultCard`] - Summary card for one analysis result
//! - [`EmotionDetail`] - Popup with tone, stress, and deception breakdown
//! - [`MetricBar`] - Percentage bar coloured by severity

use crate::theme::{brand, with_alpha, Color, Theme, ThemeColors};
use crate::tokens::{font_size, radius, sizing};
use app_core::{AnalysisResult, FormField, ValidationError};
use serde::{Deserialize, Serialize};

/// Colour for a 0-100 severity score
///
/// Above 70 is danger, above 30 warning, anything else success.
pub fn level_color(score: u8, colors: &ThemeColors) -> Color {
    if score > 70 {
        colors.danger.clone()
    } else if score > 30 {
        colors.warning.clone()
    } else {
        colors.success.clone()
    }
}

/// Format elapsed seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// =============================================================================
// Button Component
// =============================================================================

/// Button style variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Solid brand-coloured button
    #[default]
    Primary,
    /// Card-coloured button
    Secondary,
    /// Transparent with a brand border
    Outline,
    /// Bare brand-coloured label
    Text,
}

/// Button sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// Compact
    Small,
    /// Default
    #[default]
    Medium,
    /// Call to action
    Large,
}

impl ButtonSize {
    /// Vertical and horizontal padding
    pub fn padding(&self) -> (f32, f32) {
        match self {
            ButtonSize::Small => (6.0, 12.0),
            ButtonSize::Medium => (10.0, 20.0),
            ButtonSize::Large => (14.0, 28.0),
        }
    }

    /// Label font size
    pub fn font_size(&self) -> f32 {
        match self {
            ButtonSize::Small => font_size::SM,
            ButtonSize::Medium => font_size::MD,
            ButtonSize::Large => font_size::LG,
        }
    }
}

/// Button component properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Label text
    pub title: String,
    /// Style variant
    #[serde(default)]
    pub variant: ButtonVariant,
    /// Size
    #[serde(default)]
    pub size: ButtonSize,
    /// Whether the button is disabled
    #[serde(default)]
    pub disabled: bool,
    /// Whether a spinner replaces the label
    #[serde(default)]
    pub loading: bool,
    /// Stretch to the container width
    #[serde(default)]
    pub full_width: bool,
    /// Icon name shown before the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Button {
    /// Create a new button with the given label
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            loading: false,
            full_width: false,
            icon: None,
        }
    }

    /// Set the button variant
    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the button size
    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set loading state
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Stretch to full width
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Set icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Whether presses are ignored
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }

    /// Get the computed styles for this button based on theme
    pub fn computed_styles(&self, theme: &Theme) -> ButtonStyles {
        let colors = &theme.colors;
        let (background, border_color, text_color) = if self.is_inert() {
            (
                brand::DISABLED.to_string(),
                brand::DISABLED.to_string(),
                brand::DISABLED_TEXT.to_string(),
            )
        } else {
            match self.variant {
                ButtonVariant::Primary => (
                    colors.primary.clone(),
                    "transparent".to_string(),
                    brand::ON_PRIMARY.to_string(),
                ),
                ButtonVariant::Secondary => (
                    colors.card.clone(),
                    "transparent".to_string(),
                    colors.text.clone(),
                ),
                ButtonVariant::Outline => (
                    "transparent".to_string(),
                    colors.primary.clone(),
                    colors.primary.clone(),
                ),
                ButtonVariant::Text => (
                    "transparent".to_string(),
                    "transparent".to_string(),
                    colors.primary.clone(),
                ),
            }
        };

        let (padding_vertical, padding_horizontal) = self.size.padding();
        let font_size = self.size.font_size();

        ButtonStyles {
            background,
            border_color,
            border_width: if self.variant == ButtonVariant::Outline {
                2.0
            } else {
                0.0
            },
            text_color,
            font_size,
            icon_size: font_size + 2.0,
            icon_gap: sizing::ICON_GAP,
            padding_vertical,
            padding_horizontal,
            border_radius: radius::PILL,
            opacity: if self.disabled { 0.6 } else { 1.0 },
        }
    }
}

/// Computed button styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyles {
    /// Background color
    pub background: Color,
    /// Border color
    pub border_color: Color,
    /// Border width
    pub border_width: f32,
    /// Label and icon color
    pub text_color: Color,
    /// Label font size
    pub font_size: f32,
    /// Icon size
    pub icon_size: f32,
    /// Gap between icon and label
    pub icon_gap: f32,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Border radius
    pub border_radius: f32,
    /// Opacity
    pub opacity: f32,
}

// =============================================================================
// Input Component
// =============================================================================

/// Input type variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Free text
    #[default]
    Text,
    /// Email keyboard, no auto-capitalisation
    Email,
    /// Masked entry
    Password,
}

/// Input component properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Field this input edits
    pub field: FormField,
    /// Input type
    #[serde(default)]
    pub input_type: InputType,
    /// Label above the field
    pub label: String,
    /// Placeholder text
    pub placeholder: String,
    /// Leading icon name
    pub icon: String,
    /// Current value
    #[serde(default)]
    pub value: String,
    /// Inline error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the masked value is temporarily shown
    #[serde(default)]
    pub reveal: bool,
}

impl Input {
    /// Standard input for a form field
    pub fn for_field(field: FormField) -> Self {
        let (input_type, label, placeholder, icon) = match field {
            FormField::DisplayName => (InputType::Text, "Name", "Enter your name", "person-outline"),
            FormField::Email => (InputType::Email, "Email", "Enter your email", "mail-outline"),
            FormField::Password => (
                InputType::Password,
                "Password",
                "Enter your password",
                "lock-closed-outline",
            ),
            FormField::ConfirmPassword => (
                InputType::Password,
                "Confirm Password",
                "Confirm your password",
                "lock-closed-outline",
            ),
        };
        Self {
            field,
            input_type,
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            icon: icon.to_string(),
            value: String::new(),
            error: None,
            reveal: false,
        }
    }

    /// Set the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Take this field's message from a form validation result
    pub fn with_errors(mut self, errors: &ValidationError) -> Self {
        self.error = errors.message(self.field);
        self
    }

    /// Whether the value is masked on screen
    pub fn is_masked(&self) -> bool {
        self.input_type == InputType::Password && !self.reveal
    }

    /// Border colour: danger when in error, otherwise the theme border
    pub fn border_color(&self, theme: &Theme) -> Color {
        match self.error {
            Some(_) => theme.colors.danger.clone(),
            None => theme.colors.border.clone(),
        }
    }
}

// =============================================================================
// Result Card Component
// =============================================================================

/// Tag chip on a result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagChip {
    /// Label
    pub label: String,
    /// Text and border colour
    pub color: Color,
    /// Tinted background
    pub background: Color,
}

/// Safe/unsafe badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyBadge {
    /// "Safe" or "Unsafe"
    pub label: String,
    /// Icon name
    pub icon: String,
    /// Text, icon, and border colour
    pub color: Color,
    /// Tinted background
    pub background: Color,
}

impl SafetyBadge {
    const SAFE: &'static str = "#4CAF50";
    const UNSAFE: &'static str = "#F44336";

    /// Badge for a result's safety flag
    pub fn new(is_safe: bool) -> Self {
        let (label, icon, color) = if is_safe {
            ("Safe", "shield-checkmark", Self::SAFE)
        } else {
            ("Unsafe", "warning", Self::UNSAFE)
        };
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            background: with_alpha(color, 0.2),
        }
    }
}

/// Summary card for one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCard {
    /// Result this card opens
    pub analysis_id: String,
    /// e.g. "Jun 3, 2025"
    pub date: String,
    /// e.g. "09:41 AM"
    pub time: String,
    /// Safety badge
    pub safety: SafetyBadge,
    /// Content flags
    pub tags: Vec<TagChip>,
    /// Transcript text
    pub transcript: String,
    /// Lines shown before truncation, `None` for all
    pub transcript_lines: Option<u32>,
    /// Tone label
    pub tone: String,
    /// Tone icon
    pub tone_icon: String,
    /// "Stress Level: N%"
    pub stress_text: String,
    /// Deception summary, only in full-detail mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deception_text: Option<String>,
}

impl ResultCard {
    /// Build a card from a result
    pub fn new(result: &AnalysisResult, theme: &Theme, show_full_details: bool) -> Self {
        let tags = result
            .tags
            .iter()
            .map(|tag| {
                let color = tag
                    .color()
                    .map(str::to_string)
                    .unwrap_or_else(|| theme.colors.accent.clone());
                TagChip {
                    label: tag.label().to_string(),
                    background: with_alpha(&color, 0.2),
                    color,
                }
            })
            .collect();

        Self {
            analysis_id: result.id.clone(),
            date: result.formatted_date(),
            time: result.formatted_time(),
            safety: SafetyBadge::new(result.is_safe),
            tags,
            transcript: result.transcript.clone(),
            transcript_lines: if show_full_details { None } else { Some(2) },
            tone: result.emotional_tone.label().to_string(),
            tone_icon: result.emotional_tone.icon().to_string(),
            stress_text: format!("Stress Level: {}%", result.stress_score),
            deception_text: show_full_details
                .then(|| result.deception_band().deception_summary().to_string()),
        }
    }
}

// =============================================================================
// Emotion Detail Component
// =============================================================================

/// Labelled percentage bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricBar {
    /// Metric name
    pub label: String,
    /// 0-100
    pub score: u8,
    /// Fill colour from [`level_color`]
    pub fill: Color,
    /// Narrative under the bar
    pub analysis: String,
}

/// Popup explaining one result in depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionDetail {
    /// Popup title
    pub title: String,
    /// Tone label
    pub tone: String,
    /// Tone icon
    pub icon: String,
    /// Tone colour
    pub color: Color,
    /// Tone explanation
    pub description: String,
    /// Stress breakdown
    pub stress: MetricBar,
    /// Deception breakdown
    pub deception: MetricBar,
}

impl EmotionDetail {
    /// Build the popup for a result
    pub fn new(result: &AnalysisResult, theme: &Theme) -> Self {
        let tone = &result.emotional_tone;
        Self {
            title: "Voice Analysis Details".to_string(),
            tone: tone.label().to_string(),
            icon: tone.icon().to_string(),
            color: tone
                .color()
                .map(str::to_string)
                .unwrap_or_else(|| theme.colors.primary.clone()),
            description: tone.description().to_string(),
            stress: MetricBar {
                label: "Stress Level".to_string(),
                score: result.stress_score,
                fill: level_color(result.stress_score, &theme.colors),
                analysis: result.stress_band().stress_analysis().to_string(),
            },
            deception: MetricBar {
                label: "Deception Probability".to_string(),
                score: result.deception_likelihood,
                fill: level_color(result.deception_likelihood, &theme.colors),
                analysis: result.deception_band().deception_analysis().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{dark_theme, light_theme};
    use app_core::{analysis, EmotionalTone, LoginForm};

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(15), "00:15");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn test_level_color_thresholds() {
        let colors = dark_theme().colors;
        assert_eq!(level_color(30, &colors), colors.success);
        assert_eq!(level_color(31, &colors), colors.warning);
        assert_eq!(level_color(70, &colors), colors.warning);
        assert_eq!(level_color(71, &colors), colors.danger);
    }

    #[test]
    fn test_primary_button_styles() {
        let styles = Button::new("Login")
            .with_size(ButtonSize::Large)
            .computed_styles(&dark_theme());
        assert_eq!(styles.background, "#00FF99");
        assert_eq!(styles.text_color, "#121212");
        assert_eq!(styles.border_width, 0.0);
        assert_eq!((styles.padding_vertical, styles.padding_horizontal), (14.0, 28.0));
        assert_eq!(styles.font_size, 18.0);
        assert_eq!(styles.border_radius, 30.0);
    }

    #[test]
    fn test_outline_button_styles() {
        let styles = Button::new("Cancel")
            .with_variant(ButtonVariant::Outline)
            .computed_styles(&light_theme());
        assert_eq!(styles.background, "transparent");
        assert_eq!(styles.border_color, "#00FF99");
        assert_eq!(styles.border_width, 2.0);
    }

    #[test]
    fn test_secondary_button_follows_theme() {
        let button = Button::new("Upload").with_variant(ButtonVariant::Secondary);
        assert_eq!(button.computed_styles(&dark_theme()).background, "#181818");
        assert_eq!(button.computed_styles(&light_theme()).text_color, "#121212");
    }

    #[test]
    fn test_disabled_and_loading_buttons() {
        let disabled = Button::new("Go").disabled(true).computed_styles(&dark_theme());
        assert_eq!(disabled.background, "#666666");
        assert_eq!(disabled.text_color, "#AAAAAA");
        assert_eq!(disabled.opacity, 0.6);

        let loading = Button::new("Go").loading(true);
        assert!(loading.is_inert());
        let styles = loading.computed_styles(&dark_theme());
        assert_eq!(styles.background, "#666666");
        assert_eq!(styles.opacity, 1.0);
    }

    #[test]
    fn test_input_takes_field_error() {
        let errors = LoginForm::new("abc", "abc123").validate().unwrap_err();
        let email = Input::for_field(FormField::Email)
            .with_value("abc")
            .with_errors(&errors);
        let password = Input::for_field(FormField::Password).with_errors(&errors);

        assert_eq!(email.error.as_deref(), Some("Email is invalid"));
        assert_eq!(email.border_color(&dark_theme()), "#FF5252");
        assert_eq!(password.error, None);
        assert!(password.is_masked());
    }

    #[test]
    fn test_result_card() {
        let result = analysis::latest_result();
        let theme = dark_theme();

        let card = ResultCard::new(&result, &theme, false);
        assert_eq!(card.analysis_id, "123");
        assert_eq!(card.transcript_lines, Some(2));
        assert!(card.deception_text.is_none());
        assert_eq!(card.stress_text, format!("Stress Level: {}%", result.stress_score));

        let full = ResultCard::new(&result, &theme, true);
        assert_eq!(full.transcript_lines, None);
        assert!(full.deception_text.is_some());
    }

    #[test]
    fn test_unsafe_badge() {
        let badge = SafetyBadge::new(false);
        assert_eq!(badge.label, "Unsafe");
        assert_eq!(badge.background, "#F4433633");
    }

    #[test]
    fn test_emotion_detail_falls_back_to_primary() {
        let mut result = analysis::latest_result();
        result.emotional_tone = EmotionalTone::from_label("Confused");
        result.stress_score = 80;

        let detail = EmotionDetail::new(&result, &dark_theme());
        assert_eq!(detail.tone, "Confused");
        assert_eq!(detail.color, "#00FF99");
        assert_eq!(detail.stress.fill, "#FF5252");
        assert_eq!(detail.description, "Voice analysis detected mixed emotional patterns.");
    }
}
