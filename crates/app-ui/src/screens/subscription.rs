//! Plan comparison and upgrade

use crate::components::Button;
use crate::context::AppContext;
use crate::navigation::Route;
use crate::screens::Alert;
use app_core::subscription::{Plan, PlanFeature, FEATURES};
use app_core::SubscriptionTier;

/// Frequently asked questions, question then answer
pub const FAQ: [(&str, &str); 3] = [
    (
        "How is my payment information secured?",
        "All payment information is securely processed through our payment provider and we never store your credit card details on our servers.",
    ),
    (
        "Can I cancel my subscription anytime?",
        "Yes, you can cancel your Premium subscription at any time. You'll continue to have access to Premium features until the end of your billing period.",
    ),
    (
        "Is there a free trial available?",
        "New users can try Premium features with a 7-day free trial. You won't be charged until the trial period ends, and you can cancel anytime.",
    ),
];

/// Result of pressing "Subscribe Now"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Already Premium; nothing happened
    AlreadyPremium,
    /// Upgrade in flight; nothing happened
    Ignored,
    /// Upgraded; go to the returned route
    Upgraded(Route),
    /// The store refused; show the alert
    Rejected(Alert),
}

/// Subscription screen
#[derive(Debug, Clone)]
pub struct SubscriptionScreen {
    ctx: AppContext,
    processing: bool,
}

impl SubscriptionScreen {
    /// Create the screen
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            processing: false,
        }
    }

    /// Basic and Premium plan cards
    pub fn plans(&self) -> [Plan; 2] {
        [SubscriptionTier::Basic.plan(), SubscriptionTier::Premium.plan()]
    }

    /// Rows of the comparison table
    pub fn features(&self) -> &'static [PlanFeature] {
        &FEATURES
    }

    /// Whether an upgrade is in flight
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// "Subscribe Now" button
    pub fn subscribe_button(&self) -> Button {
        Button::new("Subscribe Now").loading(self.processing)
    }

    /// Upgrade the signed-in account
    ///
    /// A no-op when already Premium. On success the Account tab is next.
    pub async fn subscribe(&mut self) -> UpgradeOutcome {
        if self.ctx.session().snapshot().is_premium() {
            return UpgradeOutcome::AlreadyPremium;
        }
        if self.processing {
            return UpgradeOutcome::Ignored;
        }

        self.processing = true;
        let result = self.ctx.session().upgrade().await;
        self.processing = false;

        match result {
            Ok(_) => UpgradeOutcome::Upgraded(Route::Account),
            Err(e) => {
                tracing::warn!("Upgrade failed: {}", e);
                UpgradeOutcome::Rejected(Alert::from(&e))
            }
        }
    }
}
