//! Core application logic for SafeVoice
//!
//! This crate contains the pieces of the client that do not depend on
//! runtime state: form validation rules, the fixture analysis catalogue,
//! subscription plan data, and application configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod subscription;
pub mod validation;

pub use analysis::{AnalysisResult, AnalysisStep, ContentTag, EmotionalTone, ScoreBand};
pub use config::{AppConfig, ConfigError};
pub use subscription::SubscriptionTier;
pub use validation::{FieldError, FormField, LoginForm, SignupForm, ValidationError};
