//! Design tokens for SafeVoice
//!
//! Radii, sizes, font sizes, and interaction timings shared by the
//! component configuration records and the screens.

// =============================================================================
// Radius Tokens
// =============================================================================

/// Corner radii
pub mod radius {
    /// Pill buttons
    pub const PILL: f32 = 30.0;
}

// =============================================================================
// Sizing Tokens
// =============================================================================

/// Fixed component sizes
pub mod sizing {
    /// Gap between a button icon and its label
    pub const ICON_GAP: f32 = 8.0;
}

// =============================================================================
// Font Size Tokens
// =============================================================================

/// Font sizes in points
pub mod font_size {
    /// Small buttons, captions
    pub const SM: f32 = 14.0;
    /// Body text, medium buttons
    pub const MD: f32 = 16.0;
    /// Large buttons
    pub const LG: f32 = 18.0;
}

// =============================================================================
// Duration Tokens
// =============================================================================

/// Animation and interaction timings in milliseconds
pub mod duration {
    /// Press feedback before the recording stop button takes effect
    pub const PRESS_FEEDBACK: u64 = 200;
    /// Pull-to-refresh on the dashboard
    pub const REFRESH: u64 = 1000;
    /// Simulated file pick before an upload starts
    pub const UPLOAD_PICK: u64 = 500;
}
