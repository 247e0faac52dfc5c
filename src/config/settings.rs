use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use reqwest::Url;
use std::path::Path;
use std::time::Duration;

use crate::api::RetryPolicy;
use crate::models::{is_valid_percentile, DEFAULT_PERCENTILES};

pub const DEFAULT_BASE_URL: &str = "https://trailblazer.mainnet.taiko.xyz/s2/v2/leaderboard/user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub leaderboard: LeaderboardSettings,
    pub retry: RetrySettings,
    pub percentiles: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub base_url: String,
    /// The upstream blocks default client agents.
    pub user_agent: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub backoff_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Leaderboard Cutoffs".to_string(),
                log_level: "info".to_string(),
            },
            leaderboard: LeaderboardSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                user_agent: "Mozilla/5.0".to_string(),
                timeout_seconds: 10,
            },
            retry: RetrySettings {
                max_attempts: 3,
                backoff_seconds: 1,
            },
            percentiles: DEFAULT_PERCENTILES.to_vec(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CUTOFFS").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    /// `from_file` when a path is given, otherwise the layered `new`. A
    /// malformed source is an error, never a silent fallback to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.leaderboard.timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            backoff_unit: Duration::from_secs(self.retry.backoff_seconds),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.percentiles.is_empty() {
            return Err("At least one percentile must be configured".to_string());
        }

        if let Some(p) = self.percentiles.iter().find(|p| !is_valid_percentile(**p)) {
            return Err(format!("Percentiles must be in (0, 1], got {}", p));
        }

        if self.retry.max_attempts == 0 {
            return Err("Retry max_attempts must be at least 1".to_string());
        }

        if self.leaderboard.timeout_seconds == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }

        Url::parse(&self.leaderboard.base_url)
            .map_err(|e| format!("Invalid base URL {}: {}", self.leaderboard.base_url, e))?;

        Ok(())
    }
}
