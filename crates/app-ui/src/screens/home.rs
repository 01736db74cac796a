//! Dashboard tab

use crate::components::{Button, ButtonSize, ResultCard};
use crate::context::AppContext;
use crate::navigation::Route;
use crate::tokens::duration;
use app_core::{analysis, AnalysisResult};
use app_state::Session;
use std::time::Duration;

/// Counters shown in the stats card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeStats {
    /// Analyses run overall
    pub total_analyses: u32,
    /// "Unlimited" or `remaining/limit`
    pub remaining_today: String,
}

/// Placeholder shown when there is no history
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyState {
    /// Icon name
    pub icon: &'static str,
    /// Heading
    pub title: &'static str,
    /// Body text
    pub message: &'static str,
    /// Call to action
    pub action: Button,
}

/// First-run tutorial card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    /// Heading
    pub title: &'static str,
    /// Body text
    pub message: &'static str,
}

/// Dashboard with usage stats and recent analyses
#[derive(Debug, Clone)]
pub struct HomeScreen {
    ctx: AppContext,
    results: Vec<AnalysisResult>,
    refreshing: bool,
    show_tutorial: bool,
}

impl HomeScreen {
    /// Dashboard before its first focus
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            results: Vec::new(),
            refreshing: false,
            show_tutorial: true,
        }
    }

    /// Load the history; called whenever the tab gains focus
    pub fn focus(&mut self) {
        self.results = analysis::history();
    }

    /// Pull-to-refresh
    pub async fn refresh(&mut self) {
        self.refreshing = true;
        tokio::time::sleep(Duration::from_millis(duration::REFRESH)).await;
        self.results = analysis::history();
        self.refreshing = false;
    }

    /// Whether a refresh is in flight
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    fn session(&self) -> Session {
        self.ctx.session().snapshot()
    }

    /// "Premium Account" or "Basic Account"
    pub fn subtitle(&self) -> String {
        format!("{} Account", self.session().tier)
    }

    /// Usage counters
    pub fn stats(&self) -> HomeStats {
        let session = self.session();
        let remaining_today = match session.usage.remaining_today(session.tier) {
            None => "Unlimited".to_string(),
            Some(left) => format!("{}/{}", left, session.usage.daily_limit),
        };
        HomeStats {
            total_analyses: session.usage.total_analyses,
            remaining_today,
        }
    }

    /// Whether the upgrade link is shown in the stats card
    pub fn shows_upgrade(&self) -> bool {
        !self.session().is_premium()
    }

    /// Cards for the recent analyses list
    pub fn cards(&self) -> Vec<ResultCard> {
        let theme = self.ctx.theme();
        self.results
            .iter()
            .map(|r| ResultCard::new(r, &theme, false))
            .collect()
    }

    /// Placeholder, when the list is empty
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.results.is_empty().then(|| EmptyState {
            icon: "mic-outline",
            title: "No Analyses Yet",
            message: "Start by recording or uploading a voice message for analysis",
            action: Button::new("New Analysis").with_size(ButtonSize::Large),
        })
    }

    /// Tutorial card, until dismissed
    pub fn tutorial(&self) -> Option<Tutorial> {
        self.show_tutorial.then_some(Tutorial {
            title: "Welcome to SafeVoice",
            message: "To get started, tap the + button to record or upload a voice message for analysis.",
        })
    }

    /// Hide the tutorial
    pub fn dismiss_tutorial(&mut self) {
        self.show_tutorial = false;
    }

    /// Open one result
    pub fn open_result(&self, analysis_id: &str) -> Route {
        Route::Results {
            analysis_id: analysis_id.to_string(),
        }
    }

    /// Start a new analysis
    pub fn new_analysis(&self) -> Route {
        Route::NewAnalysis
    }

    /// Avatar button in the header
    pub fn open_account(&self) -> Route {
        Route::Account
    }

    /// Upgrade link
    pub fn upgrade(&self) -> Route {
        Route::Subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::AppConfig;

    async fn signed_in() -> AppContext {
        let ctx = AppContext::new(AppConfig::default());
        ctx.session().login("a@b.com", "abc123").await.unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_empty_until_focused() {
        let mut home = HomeScreen::new(signed_in().await);
        let empty = home.empty_state().unwrap();
        assert_eq!(empty.title, "No Analyses Yet");

        home.focus();
        assert!(home.empty_state().is_none());
        assert_eq!(home.cards().len(), 5);
    }

    #[tokio::test]
    async fn test_basic_stats() {
        let ctx = signed_in().await;
        let home = HomeScreen::new(ctx.clone());
        assert_eq!(home.subtitle(), "Basic Account");
        assert_eq!(home.stats().remaining_today, "1/1");
        assert!(home.shows_upgrade());

        ctx.session().record_analysis().await.unwrap();
        let stats = home.stats();
        assert_eq!(stats.total_analyses, 1);
        assert_eq!(stats.remaining_today, "0/1");
    }

    #[tokio::test]
    async fn test_premium_stats() {
        let ctx = signed_in().await;
        ctx.session().upgrade().await.unwrap();
        let home = HomeScreen::new(ctx);
        assert_eq!(home.subtitle(), "Premium Account");
        assert_eq!(home.stats().remaining_today, "Unlimited");
        assert!(!home.shows_upgrade());
    }

    #[tokio::test]
    async fn test_tutorial_dismiss() {
        let mut home = HomeScreen::new(signed_in().await);
        assert_eq!(home.tutorial().unwrap().title, "Welcome to SafeVoice");
        home.dismiss_tutorial();
        assert!(home.tutorial().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_takes_a_second() {
        let mut home = HomeScreen::new(signed_in().await);
        let start = tokio::time::Instant::now();
        home.refresh().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert!(!home.is_refreshing());
        assert_eq!(home.cards().len(), 5);
    }

    #[tokio::test]
    async fn test_routes() {
        let home = HomeScreen::new(signed_in().await);
        assert_eq!(
            home.open_result("3"),
            Route::Results {
                analysis_id: "3".to_string()
            }
        );
        assert_eq!(home.new_analysis(), Route::NewAnalysis);
    }
}
