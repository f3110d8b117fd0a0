use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Result, TypeaheadError};
use crate::fetch::RetryConfig;
use crate::index::{MatchType, SearchOptions};

const CONFIG_FILE: &str = "typeahead.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadConfig {
    pub search: SearchSettings,
    pub cache: CacheSettings,
    pub retry: RetrySettings,
}

impl TypeaheadConfig {
    /// Load `typeahead.toml` from `dir`, falling back to defaults when the
    /// file does not exist. The result is always validated.
    pub async fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        let config_path = dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content).await?;
        Ok(())
    }

    /// Validate values for consistency, collecting every violation.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.search.max_results == 0 {
            errors.push("search.max_results must be greater than 0");
        }
        if !(0.0..=64.0).contains(&self.search.max_distance) {
            errors.push("search.max_distance must be between 0 and 64");
        }

        if self.cache.query_cache_capacity == 0 {
            errors.push("cache.query_cache_capacity must be greater than 0");
        }
        if self.cache.default_ttl_ms == 0 {
            errors.push("cache.default_ttl_ms must be greater than 0");
        }

        if self.retry.max_attempts == 0 {
            errors.push("retry.max_attempts must be greater than 0");
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            errors.push("retry.base_delay_ms must not exceed retry.max_delay_ms");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TypeaheadError::Config(errors.join("; ")))
        }
    }
}

/// Default search options applied when callers do not override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub max_distance: f64,
    pub max_results: usize,
    pub prefix_only: bool,
    pub match_type: MatchType,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_distance: 3.0,
            max_results: 10,
            prefix_only: false,
            match_type: MatchType::Partial,
        }
    }
}

impl SearchSettings {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions::new()
            .with_max_distance(self.max_distance)
            .with_max_results(self.max_results)
            .with_prefix_only(self.prefix_only)
            .with_match_type(self.match_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Bound on memoized query result sets (FIFO eviction).
    pub query_cache_capacity: usize,
    /// Default lifetime for fetch-layer TTL cache entries.
    pub default_ttl_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            query_cache_capacity: 1000,
            default_ttl_ms: 5 * 60 * 1000,
        }
    }
}

impl CacheSettings {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
            jitter: true,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            jitter: self.jitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = TypeaheadConfig::default();
        config.retry.max_attempts = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_validate_rejects_inverted_delays() {
        let mut config = TypeaheadConfig::default();
        config.retry.base_delay_ms = 20_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_collects_multiple_errors() {
        let mut config = TypeaheadConfig::default();
        config.search.max_results = 0;
        config.cache.query_cache_capacity = 0;
        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("max_results"));
        assert!(message.contains("query_cache_capacity"));
    }

    #[test]
    fn test_settings_convert_to_runtime_types() {
        let config = TypeaheadConfig::default();
        let options = config.search.to_options();
        assert_eq!(options.max_distance, 3.0);
        assert_eq!(options.max_results, 10);

        let retry = config.retry.to_retry_config();
        assert_eq!(retry.max_attempts, 5);
        assert_eq!(retry.base_delay, Duration::from_millis(1000));

        assert_eq!(config.cache.default_ttl(), Duration::from_secs(300));
    }
}
