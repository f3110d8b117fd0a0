use std::time::Duration;

use rand::Rng;

/// Backoff settings for one fetch call. Immutable once resolved from the
/// coordinator defaults plus per-call overrides.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            jitter: true,
        }
    }
}

/// Per-call partial overrides, merged over a coordinator's defaults.
#[derive(Debug, Clone, Default)]
pub struct RetryOverrides {
    max_attempts: Option<u32>,
    base_delay: Option<Duration>,
    max_delay: Option<Duration>,
    jitter: Option<bool>,
}

impl RetryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = Some(base_delay);
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = Some(jitter);
        self
    }

    pub fn merged(&self, defaults: &RetryConfig) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            base_delay: self.base_delay.unwrap_or(defaults.base_delay),
            max_delay: self.max_delay.unwrap_or(defaults.max_delay),
            jitter: self.jitter.unwrap_or(defaults.jitter),
        }
    }
}

/// Source of the random backoff scaling factor.
///
/// Injectable so backoff timing is deterministic under test.
pub trait JitterSource: Send {
    /// A factor in `[0.5, 1.0)`.
    fn factor(&mut self) -> f64;
}

/// Default jitter source backed by the thread RNG.
#[derive(Debug, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn factor(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.5..1.0)
    }
}

/// Backoff before retry number `attempt` (1-based): exponential growth
/// from `base_delay`, capped at `max_delay`, scaled by `jitter_factor`
/// when jitter is enabled.
pub fn calculate_delay(attempt: u32, config: &RetryConfig, jitter_factor: f64) -> Duration {
    let exponential = config.base_delay.as_millis() as f64 * 2f64.powi(attempt.min(63) as i32);
    let capped = exponential.min(config.max_delay.as_millis() as f64);
    if config.jitter {
        Duration::from_millis((capped * jitter_factor) as u64)
    } else {
        Duration::from_millis(capped as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryConfig {
        RetryConfig {
            jitter: false,
            ..RetryConfig::default()
        }
    }

    #[test]
    fn test_delay_is_non_decreasing_and_capped() {
        let config = no_jitter();
        let mut previous = Duration::ZERO;
        for attempt in 1..20 {
            let delay = calculate_delay(attempt, &config, 1.0);
            assert!(delay >= previous, "delay shrank at attempt {attempt}");
            assert!(delay <= config.max_delay);
            previous = delay;
        }
    }

    #[test]
    fn test_delay_doubles_until_cap() {
        let config = no_jitter();
        assert_eq!(calculate_delay(1, &config, 1.0), Duration::from_millis(2000));
        assert_eq!(calculate_delay(2, &config, 1.0), Duration::from_millis(4000));
        assert_eq!(calculate_delay(3, &config, 1.0), Duration::from_millis(8000));
        assert_eq!(calculate_delay(4, &config, 1.0), Duration::from_millis(10_000));
        assert_eq!(calculate_delay(9, &config, 1.0), Duration::from_millis(10_000));
    }

    #[test]
    fn test_jitter_scales_within_half_to_full() {
        let config = RetryConfig::default();
        let full = calculate_delay(2, &no_jitter(), 1.0);
        let low = calculate_delay(2, &config, 0.5);
        let high = calculate_delay(2, &config, 0.999);
        assert_eq!(low, full / 2);
        assert!(high < full);
        assert!(high >= low);
    }

    #[test]
    fn test_thread_rng_jitter_range() {
        let mut source = ThreadRngJitter;
        for _ in 0..100 {
            let factor = source.factor();
            assert!((0.5..1.0).contains(&factor));
        }
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let defaults = RetryConfig::default();
        let merged = RetryOverrides::new()
            .with_max_attempts(2)
            .with_jitter(false)
            .merged(&defaults);

        assert_eq!(merged.max_attempts, 2);
        assert!(!merged.jitter);
        assert_eq!(merged.base_delay, defaults.base_delay);
        assert_eq!(merged.max_delay, defaults.max_delay);
    }
}
