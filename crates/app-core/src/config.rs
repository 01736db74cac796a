//! Application configuration
//!
//! Every value has a default matching the shipped behaviour, so a missing
//! config file is not an error. A file only needs the keys it overrides:
//!
//! ```json
//! { "session": { "latency_ms": 0 }, "analysis": { "step_interval_ms": 500 } }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::subscription::BASIC_DAILY_LIMIT;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SAFEVOICE_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid config JSON
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Session store behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated latency of every session operation
    pub latency_ms: u64,
    /// Daily analysis allowance on the Basic tier
    pub daily_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            daily_limit: BASIC_DAILY_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Simulated latency as a duration
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Recording screen timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Recording stops by itself after this many seconds
    pub auto_stop_secs: u64,
    /// Pause between stopping and leaving the screen
    pub stop_delay_ms: u64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            auto_stop_secs: 15,
            stop_delay_ms: 500,
        }
    }
}

impl RecordingConfig {
    /// Auto-stop limit as a duration
    pub fn auto_stop(&self) -> Duration {
        Duration::from_secs(self.auto_stop_secs)
    }

    /// Stop delay as a duration
    pub fn stop_delay(&self) -> Duration {
        Duration::from_millis(self.stop_delay_ms)
    }
}

/// Analysis progress screen timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Time spent on each analysis step
    pub step_interval_ms: u64,
    /// Progress bar tick period
    pub progress_tick_ms: u64,
    /// Fraction added to the progress bar per tick
    pub progress_increment: f32,
    /// Pause between completion and showing results
    pub results_delay_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 3000,
            progress_tick_ms: 100,
            progress_increment: 0.01,
            results_delay_ms: 1000,
        }
    }
}

impl AnalysisConfig {
    /// Step interval as a duration, never shorter than 1ms
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms.max(1))
    }

    /// Progress tick as a duration, never shorter than 1ms
    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.max(1))
    }

    /// Results delay as a duration
    pub fn results_delay(&self) -> Duration {
        Duration::from_millis(self.results_delay_ms)
    }
}

/// Theme selection at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `"dark"` or `"light"`
    pub default: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: "dark".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Session store
    pub session: SessionConfig,
    /// Recording screen
    pub recording: RecordingConfig,
    /// Analysis progress screen
    pub analysis: AnalysisConfig,
    /// Theme
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Parse configuration from JSON text
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents, path)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or use the defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the screens cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.session.daily_limit == 0 {
            return Err(ConfigError::Invalid("session.daily_limit must be > 0".to_string()));
        }
        if self.analysis.progress_tick_ms == 0 {
            return Err(ConfigError::Invalid("analysis.progress_tick_ms must be > 0".to_string()));
        }
        if self.analysis.step_interval_ms == 0 {
            return Err(ConfigError::Invalid("analysis.step_interval_ms must be > 0".to_string()));
        }
        if !(self.analysis.progress_increment > 0.0 && self.analysis.progress_increment <= 1.0) {
            return Err(ConfigError::Invalid(
                "analysis.progress_increment must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.session.daily_limit, 1);
        assert_eq!(config.session.latency(), Duration::ZERO);
        assert_eq!(config.recording.auto_stop(), Duration::from_secs(15));
        assert_eq!(config.analysis.step_interval(), Duration::from_secs(3));
        assert_eq!(config.analysis.progress_tick(), Duration::from_millis(100));
        assert_eq!(config.theme.default, "dark");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "session": { "latency_ms": 250 }, "theme": { "default": "light" } }"#;
        let config = AppConfig::from_json(json, Path::new("inline")).unwrap();
        assert_eq!(config.session.latency_ms, 250);
        assert_eq!(config.session.daily_limit, 1);
        assert_eq!(config.theme.default, "light");
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "recording": { "auto_stop_secs": 5 } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.recording.auto_stop_secs, 5);
        assert_eq!(config.recording.stop_delay_ms, 500);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_intervals_clamped() {
        let config = AnalysisConfig {
            step_interval_ms: 0,
            progress_tick_ms: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.step_interval(), Duration::from_millis(1));
        assert_eq!(config.progress_tick(), Duration::from_millis(1));
    }

    #[test]
    fn test_zero_daily_limit_rejected() {
        let json = r#"{ "session": { "daily_limit": 0 } }"#;
        let err = AppConfig::from_json(json, Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
