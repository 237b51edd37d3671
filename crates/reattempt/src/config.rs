//! Retry session configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Default number of attempts when none is configured.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Default pause between attempts when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

/// Configuration for a single retry session.
///
/// Holds the attempt budget and the fixed pause taken after each failed
/// attempt. Fields that are not supplied fall back to their defaults, both
/// through [`RetryConfigBuilder`] and when deserializing.
///
/// # Examples
///
/// ```rust
/// use reattempt::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::builder()
///     .attempts(5)
///     .delay(Duration::from_millis(100))
///     .build();
///
/// assert_eq!(config.attempts(), 5);
/// assert_eq!(config.delay(), Duration::from_millis(100));
/// ```
///
/// Partial documents are accepted. The delay is read from `delay_ms`, or
/// from its alias `timeout`; a document carrying both keys is rejected as a
/// duplicate field.
///
/// ```rust
/// use reattempt::RetryConfig;
///
/// let config: RetryConfig = serde_json::from_str(r#"{ "attempts": 5 }"#).unwrap();
/// assert_eq!(config.attempts(), 5);
/// assert_eq!(config.delay_ms(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    #[serde(deserialize_with = "at_least_one")]
    attempts: u32,
    #[serde(rename = "delay_ms", alias = "timeout", with = "millis")]
    delay: Duration,
}

impl RetryConfig {
    /// Create a new builder for configuring a retry session.
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    /// Default attempt budget with no pause between attempts.
    pub fn no_delay() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// The attempt budget, including the first attempt. Never less than one.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Pause taken after each failed attempt that is followed by another.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// [`delay`](Self::delay) in whole milliseconds.
    pub fn delay_ms(&self) -> u64 {
        u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for RetryConfig {
    /// Defaults:
    /// - `attempts`: 3
    /// - `delay`: 250ms
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

/// Builder for [`RetryConfig`].
///
/// # Examples
///
/// ```rust
/// use reattempt::RetryConfig;
///
/// let config = RetryConfig::builder().attempts(0).delay_ms(0).build();
///
/// // A zero budget still allows the first invocation.
/// assert_eq!(config.attempts(), 1);
/// assert!(config.delay().is_zero());
/// ```
#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    attempts: Option<u32>,
    delay: Option<Duration>,
}

impl RetryConfigBuilder {
    /// Set the maximum number of attempts, including the first one.
    ///
    /// Values below one are raised to one.
    ///
    /// Default: 3
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts.max(1));
        self
    }

    /// Set the pause between attempts.
    ///
    /// Default: 250ms
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the pause between attempts in milliseconds.
    pub fn delay_ms(self, millis: u64) -> Self {
        self.delay(Duration::from_millis(millis))
    }

    /// Disable the pause between attempts.
    pub fn no_delay(self) -> Self {
        self.delay(Duration::ZERO)
    }

    /// Build the [`RetryConfig`], using defaults for any unset field.
    pub fn build(self) -> RetryConfig {
        RetryConfig {
            attempts: self.attempts.unwrap_or(DEFAULT_ATTEMPTS),
            delay: self.delay.unwrap_or(DEFAULT_DELAY),
        }
    }
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    u32::deserialize(deserializer).map(|attempts| attempts.max(1))
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RetryConfig::builder().build();

        assert_eq!(config, RetryConfig::default());
        assert_eq!(config.attempts(), 3);
        assert_eq!(config.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = RetryConfig::builder().attempts(5).delay_ms(100).build();

        assert_eq!(config.attempts(), 5);
        assert_eq!(config.delay_ms(), 100);
    }

    #[test]
    fn test_builder_partial_keeps_defaults() {
        let config = RetryConfig::builder().no_delay().build();

        assert_eq!(config.attempts(), DEFAULT_ATTEMPTS);
        assert!(config.delay().is_zero());
        assert_eq!(config, RetryConfig::no_delay());
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryConfig::builder().attempts(0).build().attempts(), 1);

        let config: RetryConfig = serde_json::from_str(r#"{"attempts":0}"#).unwrap();
        assert_eq!(config.attempts(), 1);

        let config: RetryConfig = toml::from_str("attempts = 0").unwrap();
        assert_eq!(config.attempts(), 1);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: RetryConfig = serde_json::from_str(r#"{"delay_ms":0}"#).unwrap();
        assert_eq!(config.attempts(), 3);
        assert!(config.delay().is_zero());

        let config: RetryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RetryConfig::default());
    }

    #[test]
    fn test_deserialize_timeout_alias() {
        let config: RetryConfig = serde_json::from_str(r#"{"attempts":5,"timeout":100}"#).unwrap();

        assert_eq!(config.attempts(), 5);
        assert_eq!(config.delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_deserialize_rejects_delay_and_timeout_together() {
        let result = serde_json::from_str::<RetryConfig>(r#"{"delay_ms":10,"timeout":20}"#);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate field `delay_ms`"), "{err}");
    }

    #[test]
    fn test_deserialize_toml() {
        let config: RetryConfig = toml::from_str("attempts = 4\ndelay_ms = 10\n").unwrap();

        assert_eq!(config.attempts(), 4);
        assert_eq!(config.delay_ms(), 10);
    }

    #[test]
    fn test_serialize_uses_millis() {
        let json = serde_json::to_value(RetryConfig::default()).unwrap();

        assert_eq!(json, serde_json::json!({ "attempts": 3, "delay_ms": 250 }));
    }
}
