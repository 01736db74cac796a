//! Screen models
//!
//! Each screen is a plain struct holding its local UI state plus an
//! [`AppContext`](crate::context::AppContext). User actions are methods;
//! they either mutate local state, call the session store, or hand back a
//! [`Route`](crate::navigation::Route) for the navigation shell to apply.
//!
//! Screens that fake progress own a [`ScreenTimer`](app_state::ScreenTimer)
//! and publish their state through a `watch` channel. Dropping the screen
//! cancels the timer.

pub mod account;
pub mod analysis;
pub mod auth;
pub mod home;
pub mod results;
pub mod subscription;

pub use account::AccountScreen;
pub use analysis::{
    AnalysisProgressScreen, NewAnalysisScreen, ProgressState, RecordingScreen, RecordingState,
};
pub use auth::{LoginScreen, SignupScreen, SubmitOutcome, WelcomeScreen};
pub use home::HomeScreen;
pub use results::ResultsScreen;
pub use subscription::{SubscriptionScreen, UpgradeOutcome};

use app_state::{PreconditionError, SessionError};
use serde::{Deserialize, Serialize};

/// Blocking alert shown over a screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert title
    pub title: String,
    /// Body text
    pub message: String,
}

impl Alert {
    /// Create an alert
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&SessionError> for Alert {
    fn from(error: &SessionError) -> Self {
        let title = match error {
            SessionError::Precondition(PreconditionError::NotAuthenticated) => "Not Signed In",
            SessionError::Precondition(PreconditionError::DailyLimitReached { .. }) => {
                "Daily Limit Reached"
            }
            SessionError::Auth(_) => "Sign-in Failed",
        };
        Alert::new(title, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_from_precondition() {
        let err = SessionError::from(PreconditionError::DailyLimitReached { limit: 1 });
        let alert = Alert::from(&err);
        assert_eq!(alert.title, "Daily Limit Reached");
        assert_eq!(alert.message, "Daily analysis limit of 1 reached");
    }
}
