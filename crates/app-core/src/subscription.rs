//! Subscription tiers and plan catalogue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily analysis allowance on the Basic tier
pub const BASIC_DAILY_LIMIT: u32 = 1;

/// Subscription level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free, ad-supported tier
    #[default]
    Basic,
    /// Paid tier
    Premium,
}

impl SubscriptionTier {
    /// Whether this is the paid tier
    pub fn is_premium(&self) -> bool {
        matches!(self, SubscriptionTier::Premium)
    }

    /// Whether ads are shown on this tier
    pub fn shows_ads(&self) -> bool {
        !self.is_premium()
    }

    /// Plan details for this tier
    pub fn plan(&self) -> Plan {
        match self {
            SubscriptionTier::Basic => Plan {
                tier: *self,
                badge: "BASIC",
                title: "Free",
                monthly_price_cents: 0,
                highlights: &[
                    "1 voice analysis per day",
                    "Basic content safety detection",
                    "Ad-supported experience",
                ],
            },
            SubscriptionTier::Premium => Plan {
                tier: *self,
                badge: "PREMIUM",
                title: "Premium",
                monthly_price_cents: 999,
                highlights: &[
                    "Unlimited voice analyses",
                    "Advanced emotional detection",
                    "Detailed stress scoring",
                    "No ads",
                ],
            },
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionTier::Basic => write!(f, "Basic"),
            SubscriptionTier::Premium => write!(f, "Premium"),
        }
    }
}

/// A purchasable plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Tier the plan grants
    pub tier: SubscriptionTier,
    /// Upper-case badge text
    pub badge: &'static str,
    /// Plan title
    pub title: &'static str,
    /// Monthly price in cents
    pub monthly_price_cents: u32,
    /// Bullet points on the plan card
    pub highlights: &'static [&'static str],
}

impl Plan {
    /// Price line in the `$9.99/month` form
    pub fn price_label(&self) -> String {
        let cents = self.monthly_price_cents;
        if cents % 100 == 0 {
            format!("${}/month", cents / 100)
        } else {
            format!("${}.{:02}/month", cents / 100, cents % 100)
        }
    }
}

/// Value of a feature in one column of the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Rendered as a check mark or a cross
    Included(bool),
    /// Rendered as text
    Text(&'static str),
}

/// Row of the plan comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanFeature {
    /// Feature name
    pub title: &'static str,
    /// Basic column
    pub basic: FeatureValue,
    /// Premium column
    pub premium: FeatureValue,
    /// Icon name
    pub icon: &'static str,
}

impl PlanFeature {
    /// Value of this feature on a tier
    pub fn value_for(&self, tier: SubscriptionTier) -> FeatureValue {
        match tier {
            SubscriptionTier::Basic => self.basic,
            SubscriptionTier::Premium => self.premium,
        }
    }
}

/// Comparison table shown on the subscription screen
pub const FEATURES: [PlanFeature; 6] = [
    PlanFeature {
        title: "Daily analyses",
        basic: FeatureValue::Text("1 / day"),
        premium: FeatureValue::Text("Unlimited"),
        icon: "analytics",
    },
    PlanFeature {
        title: "Ad-free experience",
        basic: FeatureValue::Included(false),
        premium: FeatureValue::Included(true),
        icon: "eye",
    },
    PlanFeature {
        title: "Emotional analysis",
        basic: FeatureValue::Text("Basic"),
        premium: FeatureValue::Text("Advanced"),
        icon: "heart",
    },
    PlanFeature {
        title: "Deception detection",
        basic: FeatureValue::Text("Limited"),
        premium: FeatureValue::Text("Full access"),
        icon: "shield-checkmark",
    },
    PlanFeature {
        title: "Downloadable reports",
        basic: FeatureValue::Included(false),
        premium: FeatureValue::Included(true),
        icon: "download",
    },
    PlanFeature {
        title: "Historical data",
        basic: FeatureValue::Text("7 days"),
        premium: FeatureValue::Text("90 days"),
        icon: "time",
    },
];
