//! Voice analysis results and the fixture catalogue
//!
//! Nothing here performs inference. Results shown by the client are canned
//! records; this module gives them types and the presentation rules the
//! screens apply to them (score bands, tone colours, narratives).

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location reported for every simulated recording or upload
pub const MOCK_RECORDING_URI: &str = "file:///mock/path/recording.m4a";

/// Identifier of the result produced by a completed analysis run
pub const LATEST_ANALYSIS_ID: &str = "123";

// =============================================================================
// Emotional Tone
// =============================================================================

/// Dominant emotional tone detected in a clip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    /// Even, relaxed delivery
    Calm,
    /// Anger or frustration
    Angry,
    /// Anxiety or hesitation
    Nervous,
    /// Upbeat, energetic delivery
    Happy,
    /// Low energy, monotone delivery
    Sad,
    /// Any tone without dedicated presentation
    Other(String),
}

impl EmotionalTone {
    /// Parse a tone label, case-insensitively
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "calm" => EmotionalTone::Calm,
            "angry" => EmotionalTone::Angry,
            "nervous" => EmotionalTone::Nervous,
            "happy" => EmotionalTone::Happy,
            "sad" => EmotionalTone::Sad,
            _ => EmotionalTone::Other(label.to_string()),
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            EmotionalTone::Calm => "Calm",
            EmotionalTone::Angry => "Angry",
            EmotionalTone::Nervous => "Nervous",
            EmotionalTone::Happy => "Happy",
            EmotionalTone::Sad => "Sad",
            EmotionalTone::Other(label) => label,
        }
    }

    /// Accent colour for the tone, or `None` to fall back to the theme primary
    pub fn color(&self) -> Option<&'static str> {
        match self {
            EmotionalTone::Angry => Some("#F44336"),
            EmotionalTone::Calm => Some("#4CAF50"),
            EmotionalTone::Nervous => Some("#FF9800"),
            EmotionalTone::Happy => Some("#2196F3"),
            EmotionalTone::Sad => Some("#9C27B0"),
            EmotionalTone::Other(_) => None,
        }
    }

    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            EmotionalTone::Angry => "flame",
            EmotionalTone::Calm => "water",
            EmotionalTone::Nervous => "pulse",
            EmotionalTone::Happy => "happy",
            EmotionalTone::Sad => "sad",
            EmotionalTone::Other(_) => "analytics",
        }
    }

    /// Long-form explanation shown in the emotion detail popup
    pub fn description(&self) -> &'static str {
        match self {
            EmotionalTone::Angry => "Voice analysis detected high pitch variations and intensity consistent with anger or frustration.",
            EmotionalTone::Calm => "Voice analysis detected even tone, consistent pace, and relaxed vocalization patterns.",
            EmotionalTone::Nervous => "Voice analysis detected trembling, hesitation, and pitch inconsistencies associated with anxiety.",
            EmotionalTone::Happy => "Voice analysis detected upbeat intonation, variation, and energetic speech patterns.",
            EmotionalTone::Sad => "Voice analysis detected lower energy, monotone delivery, and slower speech rate.",
            EmotionalTone::Other(_) => "Voice analysis detected mixed emotional patterns.",
        }
    }
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Content Tags
// =============================================================================

/// Safety flag attached to a transcript
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTag {
    /// Mentions confidential or sensitive material
    SensitiveContent,
    /// Not suitable for children
    NotSuitableForChildren,
    /// Not appropriate in a workplace
    NotOfficeAppropriate,
    /// Any other flag
    Other(String),
}

impl ContentTag {
    /// Parse a tag label, case-insensitively
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "sensitive content" => ContentTag::SensitiveContent,
            "not suitable for children" => ContentTag::NotSuitableForChildren,
            "not office-appropriate" => ContentTag::NotOfficeAppropriate,
            _ => ContentTag::Other(label.to_string()),
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            ContentTag::SensitiveContent => "Sensitive content",
            ContentTag::NotSuitableForChildren => "Not suitable for children",
            ContentTag::NotOfficeAppropriate => "Not office-appropriate",
            ContentTag::Other(label) => label,
        }
    }

    /// Chip colour, or `None` to fall back to the theme accent
    pub fn color(&self) -> Option<&'static str> {
        match self {
            ContentTag::SensitiveContent => Some("#FF9800"),
            ContentTag::NotSuitableForChildren => Some("#F44336"),
            ContentTag::NotOfficeAppropriate => Some("#E91E63"),
            ContentTag::Other(_) => None,
        }
    }
}

// =============================================================================
// Score Bands
// =============================================================================

/// Coarse bucket for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// Below 30
    Low,
    /// 30 up to 69
    Moderate,
    /// 70 and above
    High,
}

impl ScoreBand {
    /// Bucket a score
    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            ScoreBand::Low
        } else if score < 70 {
            ScoreBand::Moderate
        } else {
            ScoreBand::High
        }
    }

    /// One-line deception summary shown on result cards
    pub fn deception_summary(&self) -> &'static str {
        match self {
            ScoreBand::Low => "Low probability of deception",
            ScoreBand::Moderate => "Moderate probability of deception",
            ScoreBand::High => "High probability of deception",
        }
    }

    /// Deception narrative shown in the detail popup
    pub fn deception_analysis(&self) -> &'static str {
        match self {
            ScoreBand::Low => "Low likelihood of deception detected. Speech patterns show consistency and natural flow.",
            ScoreBand::Moderate => "Moderate indicators of potential deception. Some hesitation and unusual speech patterns detected.",
            ScoreBand::High => "High probability of deception. Significant voice stress, unnatural pauses, and inconsistent patterns detected.",
        }
    }

    /// Stress narrative shown in the detail popup
    pub fn stress_analysis(&self) -> &'static str {
        match self {
            ScoreBand::Low => "Low stress levels detected in vocal patterns. Voice remains steady and controlled.",
            ScoreBand::Moderate => "Moderate stress detected. Some tension in vocal patterns and minor variations in pitch.",
            ScoreBand::High => "High stress levels detected. Significant tension in voice, irregular breathing, and pitch fluctuations.",
        }
    }
}

// =============================================================================
// Analysis Result
// =============================================================================

/// Outcome of analysing one voice clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Result identifier
    pub id: String,
    /// When the clip was recorded
    pub recorded_at: NaiveDateTime,
    /// Transcript of the clip
    pub transcript: String,
    /// Whether the content passed the safety check
    pub is_safe: bool,
    /// Safety flags
    pub tags: Vec<ContentTag>,
    /// Dominant tone
    pub emotional_tone: EmotionalTone,
    /// Stress score, 0-100
    pub stress_score: u8,
    /// Deception likelihood, 0-100
    pub deception_likelihood: u8,
}

impl AnalysisResult {
    /// Band of the stress score
    pub fn stress_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.stress_score)
    }

    /// Band of the deception likelihood
    pub fn deception_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.deception_likelihood)
    }

    /// Date line in the `May 25, 2023` form
    pub fn formatted_date(&self) -> String {
        self.recorded_at.format("%b %-d, %Y").to_string()
    }

    /// Time line in the `10:30 AM` form
    pub fn formatted_time(&self) -> String {
        self.recorded_at.format("%I:%M %p").to_string()
    }
}

// =============================================================================
// Analysis Steps
// =============================================================================

/// One stage of the simulated analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisStep {
    /// Step number, starting at 1
    pub id: u8,
    /// Label shown while the step is active
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
}

/// Stages shown by the analysis progress screen, in order
pub const ANALYSIS_STEPS: [AnalysisStep; 5] = [
    AnalysisStep { id: 1, label: "Transcribing audio...", icon: "text" },
    AnalysisStep { id: 2, label: "Detecting content safety...", icon: "shield-checkmark" },
    AnalysisStep { id: 3, label: "Analyzing emotional tone...", icon: "analytics" },
    AnalysisStep { id: 4, label: "Measuring stress indicators...", icon: "pulse" },
    AnalysisStep { id: 5, label: "Processing complete!", icon: "checkmark-circle" },
];

// =============================================================================
// Fixtures
// =============================================================================

/// Year, month, day, hour, minute
type Stamp = (i32, u32, u32, u32, u32);

fn at((year, month, day, hour, minute): Stamp) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// Canned result before it is stamped with a recording time
struct Fixture {
    id: &'static str,
    transcript: &'static str,
    is_safe: bool,
    tags: &'static [&'static str],
    tone: &'static str,
    stress_score: u8,
    deception_likelihood: u8,
}

impl Fixture {
    fn recorded_at(&self, recorded_at: NaiveDateTime) -> AnalysisResult {
        AnalysisResult {
            id: self.id.to_string(),
            recorded_at,
            transcript: self.transcript.to_string(),
            is_safe: self.is_safe,
            tags: self.tags.iter().map(|t| ContentTag::from_label(t)).collect(),
            emotional_tone: EmotionalTone::from_label(self.tone),
            stress_score: self.stress_score,
            deception_likelihood: self.deception_likelihood,
        }
    }
}

const HISTORY: [(Stamp, Fixture); 5] = [
    (
        (2023, 5, 25, 10, 30),
        Fixture {
            id: "1",
            transcript: "Hey, just checking in about the meeting tomorrow. I think we should reschedule since most of the team is unavailable.",
            is_safe: true,
            tags: &[],
            tone: "Calm",
            stress_score: 15,
            deception_likelihood: 5,
        },
    ),
    (
        (2023, 5, 23, 14, 15),
        Fixture {
            id: "2",
            transcript: "I can't believe they rejected our proposal again! This is the third time and we've addressed all their concerns!",
            is_safe: true,
            tags: &["Not office-appropriate"],
            tone: "Angry",
            stress_score: 75,
            deception_likelihood: 20,
        },
    ),
    (
        (2023, 5, 21, 9, 0),
        Fixture {
            id: "3",
            transcript: "The presentation contains some sensitive financial projections that aren't public yet. Let's make sure this stays confidential.",
            is_safe: false,
            tags: &["Sensitive content"],
            tone: "Nervous",
            stress_score: 65,
            deception_likelihood: 45,
        },
    ),
    (
        (2023, 5, 20, 16, 45),
        Fixture {
            id: "4",
            transcript: "I'm so excited about the new project! I think it's going to be a game-changer for our department.",
            is_safe: true,
            tags: &[],
            tone: "Happy",
            stress_score: 10,
            deception_likelihood: 5,
        },
    ),
    (
        (2023, 5, 18, 11, 20),
        Fixture {
            id: "5",
            transcript: "I don't think I'll be able to make it to the team outing this weekend. Something came up with my family.",
            is_safe: true,
            tags: &[],
            tone: "Sad",
            stress_score: 40,
            deception_likelihood: 70,
        },
    ),
];

const LATEST: Fixture = Fixture {
    id: LATEST_ANALYSIS_ID,
    transcript: "I don't think I can make the meeting tomorrow. My schedule is really packed with other deadlines that are more urgent right now. Maybe we can postpone it to next week when I'll have more bandwidth to focus on this project.",
    is_safe: true,
    tags: &["Not office-appropriate"],
    tone: "Nervous",
    stress_score: 68,
    deception_likelihood: 75,
};

/// History shown on the home dashboard, newest first
pub fn history() -> Vec<AnalysisResult> {
    HISTORY
        .iter()
        .map(|(stamp, fixture)| fixture.recorded_at(at(*stamp)))
        .collect()
}

/// Result produced by a completed analysis run, stamped with the current time
pub fn latest_result() -> AnalysisResult {
    LATEST.recorded_at(Local::now().naive_local())
}

/// Look up a result by id
///
/// History entries are returned as-is; any other id resolves to the latest
/// run, matching how the results screen is reached after an analysis.
pub fn result_by_id(id: &str) -> AnalysisResult {
    history()
        .into_iter()
        .find(|r| r.id == id)
        .unwrap_or_else(latest_result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(29), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(30), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(69), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(100), ScoreBand::High);
    }

    #[test]
    fn test_tone_from_label() {
        assert_eq!(EmotionalTone::from_label("NERVOUS"), EmotionalTone::Nervous);
        assert_eq!(
            EmotionalTone::from_label("Wistful"),
            EmotionalTone::Other("Wistful".to_string())
        );
        assert_eq!(EmotionalTone::from_label("Wistful").label(), "Wistful");
        assert_eq!(EmotionalTone::from_label("Wistful").icon(), "analytics");
        assert!(EmotionalTone::from_label("Wistful").color().is_none());
    }

    #[test]
    fn test_tag_from_label() {
        assert_eq!(
            ContentTag::from_label("Not office-appropriate"),
            ContentTag::NotOfficeAppropriate
        );
        assert_eq!(ContentTag::NotOfficeAppropriate.color(), Some("#E91E63"));
        assert_eq!(ContentTag::from_label("Spam").color(), None);
    }

    #[test]
    fn test_history_fixture() {
        let results = history();
        assert_eq!(results.len(), 5);
        assert!(results.windows(2).all(|w| w[0].recorded_at > w[1].recorded_at));
        let unsafe_count = results.iter().filter(|r| !r.is_safe).count();
        assert_eq!(unsafe_count, 1);
        assert_eq!(results[4].deception_band(), ScoreBand::High);
    }

    #[test]
    fn test_formatted_date_and_time() {
        let result = &history()[0];
        assert_eq!(result.formatted_date(), "May 25, 2023");
        assert_eq!(result.formatted_time(), "10:30 AM");
    }

    #[test]
    fn test_result_by_id() {
        assert_eq!(result_by_id("3").emotional_tone, EmotionalTone::Nervous);
        let latest = result_by_id(LATEST_ANALYSIS_ID);
        assert_eq!(latest.stress_score, 68);
        assert_eq!(latest.deception_band(), ScoreBand::High);
        assert_eq!(result_by_id("missing").id, LATEST_ANALYSIS_ID);
    }

    #[test]
    fn test_analysis_steps_order() {
        let ids: Vec<u8> = ANALYSIS_STEPS.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(ANALYSIS_STEPS[4].label, "Processing complete!");
    }
}
