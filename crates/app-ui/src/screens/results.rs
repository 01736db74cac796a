//! Analysis results

use crate::components::{Button, ButtonSize, ButtonVariant, EmotionDetail, TagChip};
use crate::context::AppContext;
use crate::navigation::Route;
use crate::theme::with_alpha;
use app_core::{analysis, AnalysisResult};

/// Transcript lines shown while collapsed
pub const COLLAPSED_TRANSCRIPT_LINES: u32 = 3;

/// Premium upsell shown over the results of Basic users
#[derive(Debug, Clone, PartialEq)]
pub struct AdPopup {
    /// Heading
    pub title: &'static str,
    /// Body text
    pub message: &'static str,
    /// Upgrade button
    pub upgrade: Button,
    /// Dismiss link
    pub dismiss: &'static str,
}

/// Results of one analysis
#[derive(Debug, Clone)]
pub struct ResultsScreen {
    ctx: AppContext,
    result: AnalysisResult,
    show_full_transcript: bool,
    show_details: bool,
    show_ad: bool,
}

impl ResultsScreen {
    /// Open the results for an analysis
    pub fn new(ctx: AppContext, analysis_id: &str) -> Self {
        let show_ad = ctx.session().snapshot().tier.shows_ads();
        Self {
            result: analysis::result_by_id(analysis_id),
            ctx,
            show_full_transcript: false,
            show_details: false,
            show_ad,
        }
    }

    /// The result on screen
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    fn is_premium(&self) -> bool {
        self.ctx.session().snapshot().is_premium()
    }

    // === Transcript ===

    /// Lines to show, `None` for all
    pub fn transcript_lines(&self) -> Option<u32> {
        (!self.show_full_transcript).then_some(COLLAPSED_TRANSCRIPT_LINES)
    }

    /// "Show More" or "Show Less"
    pub fn transcript_toggle_label(&self) -> &'static str {
        if self.show_full_transcript {
            "Show Less"
        } else {
            "Show More"
        }
    }

    /// Expand or collapse the transcript
    pub fn toggle_transcript(&mut self) {
        self.show_full_transcript = !self.show_full_transcript;
    }

    // === Safety ===

    /// "Safe Content" or "Unsafe Content"
    pub fn safety_label(&self) -> &'static str {
        if self.result.is_safe {
            "Safe Content"
        } else {
            "Unsafe Content"
        }
    }

    /// Paragraph under the safety badge
    pub fn safety_summary(&self) -> String {
        if !self.result.is_safe {
            return "This content contains potentially sensitive topics that might not be appropriate in all contexts.".to_string();
        }
        let mut summary = "This content appears safe for most contexts. ".to_string();
        if !self.result.tags.is_empty() {
            summary.push_str("However, some potential sensitivities were detected as noted above.");
        }
        summary
    }

    /// Tag chips, tinted with the warning colour
    pub fn tags(&self) -> Vec<TagChip> {
        let colors = self.ctx.theme().colors;
        self.result
            .tags
            .iter()
            .map(|tag| TagChip {
                label: tag.label().to_string(),
                color: colors.warning.clone(),
                background: with_alpha(&colors.warning, 0.125),
            })
            .collect()
    }

    // === Emotional analysis ===

    /// Whether the emotional section carries the Premium lock badge
    pub fn is_locked(&self) -> bool {
        !self.is_premium()
    }

    /// Upsell line under the emotion card, for Basic users
    pub fn upgrade_prompt(&self) -> Option<&'static str> {
        self.is_locked()
            .then_some("Upgrade to Premium for full emotional breakdown")
    }

    /// "View Full Report" button
    pub fn report_button(&self) -> Button {
        Button::new("View Full Report").with_size(ButtonSize::Large)
    }

    /// Open the emotion detail popup
    pub fn show_details(&mut self) {
        self.show_details = true;
    }

    /// Close the emotion detail popup
    pub fn close_details(&mut self) {
        self.show_details = false;
    }

    /// Emotion detail popup, while open
    pub fn emotion_detail(&self) -> Option<EmotionDetail> {
        self.show_details
            .then(|| EmotionDetail::new(&self.result, &self.ctx.theme()))
    }

    // === Ads ===

    /// Ad banner at the bottom of the page, for Basic users
    pub fn ad_banner(&self) -> Option<(&'static str, Button)> {
        (!self.is_premium()).then(|| {
            (
                "Upgrade to Premium for Ad-Free Experience",
                Button::new("Upgrade")
                    .with_variant(ButtonVariant::Outline)
                    .with_size(ButtonSize::Small),
            )
        })
    }

    /// Upsell popup, until dismissed
    pub fn ad_popup(&self) -> Option<AdPopup> {
        (self.show_ad && !self.is_premium()).then(|| AdPopup {
            title: "Unlock Premium Features",
            message: "Get unlimited analyses, ad-free experience, and detailed emotional breakdown reports with Premium.",
            upgrade: Button::new("Upgrade Now"),
            dismiss: "Maybe Later",
        })
    }

    /// "Maybe Later"
    pub fn dismiss_ad(&mut self) {
        self.show_ad = false;
    }

    /// Any upgrade button; closes the popup
    pub fn upgrade(&mut self) -> Route {
        self.show_ad = false;
        Route::Subscription
    }

    /// Back button and "Back to Home"
    pub fn back(&self) -> Route {
        Route::Home
    }
}
