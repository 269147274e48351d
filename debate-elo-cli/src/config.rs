//! Optional TOML configuration.
//!
//! Every setting has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! [rating]
//! k_factor = 24.0
//!
//! [fetch]
//! retries = 5
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use debate_elo::RatingSystem;
use serde::Deserialize;
use thiserror::Error;

const MAX_TIMEOUT_SECS: u64 = 600;
const MAX_RETRIES: u32 = 10;
const MAX_RETRY_DELAY_MS: u64 = 60_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rating: RatingConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingConfig {
    pub default_rating: f64,
    pub k_factor: f64,
    pub scale: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        RatingConfig {
            default_rating: 1000.0,
            k_factor: 32.0,
            scale: 400.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Additional attempts after a failed request.
    pub retries: u32,
    /// Delay before the first retry. Grows linearly with each attempt.
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: "https://www.tabroom.com".to_owned(),
            user_agent: concat!("debate-elo/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout_secs: 30,
            retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Config::parse(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_owned(),
                source,
            },
            other => other,
        })
    }

    fn parse(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let rating = &self.rating;
        if !rating.default_rating.is_finite() {
            return Err(ConfigError::Invalid("rating.default_rating must be finite"));
        }
        if !(rating.k_factor >= 0.0 && rating.k_factor.is_finite()) {
            return Err(ConfigError::Invalid("rating.k_factor must be a non-negative number"));
        }
        if !(rating.scale > 0.0 && rating.scale.is_finite()) {
            return Err(ConfigError::Invalid("rating.scale must be a positive number"));
        }
        let fetch = &self.fetch;
        if fetch.base_url.is_empty() {
            return Err(ConfigError::Invalid("fetch.base_url must not be empty"));
        }
        if !(1..=MAX_TIMEOUT_SECS).contains(&fetch.timeout_secs) {
            return Err(ConfigError::Invalid("fetch.timeout_secs must be between 1 and 600"));
        }
        if fetch.retries > MAX_RETRIES {
            return Err(ConfigError::Invalid("fetch.retries must be at most 10"));
        }
        if fetch.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ConfigError::Invalid("fetch.retry_delay_ms must be at most 60000"));
        }
        Ok(())
    }

    pub fn rating_system(&self) -> RatingSystem {
        RatingSystem::builder()
            .default_rating(self.rating.default_rating)
            .k_factor(self.rating.k_factor)
            .scale(self.rating.scale)
            .build()
    }
}
