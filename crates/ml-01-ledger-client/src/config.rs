//! # Ledger Client Configuration
//!
//! Node address, per-stage timeouts, frame limit, and retry policy.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default ledger node address.
pub const DEFAULT_NODE_ADDRESS: &str = "127.0.0.1:4400";

/// Default upper bound on a single frame (16 MiB).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Configuration errors. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Node address is not `host:port`.
    #[error("Invalid ledger node address {0:?}: expected host:port")]
    InvalidNodeAddress(String),

    /// A timeout was configured as zero.
    #[error("Invalid timeout: {0} cannot be 0")]
    ZeroTimeout(&'static str),

    /// Retry policy would never attempt the call.
    #[error("Invalid retry policy: max_attempts must be at least 1")]
    NoAttempts,

    /// Frame limit too small to carry a transaction header.
    #[error("Invalid frame limit: {0} bytes")]
    FrameLimitTooSmall(usize),
}

/// Bounded exponential backoff for retryable failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff_ms: u64,
    /// Ceiling for any single delay.
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        let delay = self.initial_backoff_ms.saturating_mul(1u64 << shift);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }
}

/// Ledger client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerClientConfig {
    /// Ledger node `host:port`.
    pub node_address: String,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Send and receive timeout in milliseconds (each stage).
    pub io_timeout_ms: u64,
    /// Largest frame accepted from the node.
    pub max_frame_bytes: usize,
    /// Retry policy for connect failures and timeouts.
    pub retry: RetryPolicy,
}

impl Default for LedgerClientConfig {
    fn default() -> Self {
        Self {
            node_address: DEFAULT_NODE_ADDRESS.to_string(),
            connect_timeout_ms: 3_000,
            io_timeout_ms: 10_000,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            retry: RetryPolicy::default(),
        }
    }
}

impl LedgerClientConfig {
    /// Create a config for testing (short timeouts, no retries).
    pub fn for_testing(node_address: impl Into<String>) -> Self {
        Self {
            node_address: node_address.into(),
            connect_timeout_ms: 500,
            io_timeout_ms: 1_000,
            max_frame_bytes: 1024 * 1024,
            retry: RetryPolicy::no_retry(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_address = self.node_address.parse::<SocketAddr>().is_ok()
            || self
                .node_address
                .rsplit_once(':')
                .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
                .unwrap_or(false);
        if !valid_address {
            return Err(ConfigError::InvalidNodeAddress(self.node_address.clone()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_ms"));
        }
        if self.io_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("io_timeout_ms"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        // op + two hashes + two empty length prefixes
        if self.max_frame_bytes < 1 + 64 + 16 {
            return Err(ConfigError::FrameLimitTooSmall(self.max_frame_bytes));
        }
        Ok(())
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Per-stage I/O timeout as a `Duration`.
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerClientConfig::default();
        assert_eq!(config.node_address, "127.0.0.1:4400");
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = LedgerClientConfig::for_testing("127.0.0.1:9");
        assert_eq!(config.retry, RetryPolicy::no_retry());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hostname_address_accepted() {
        let config = LedgerClientConfig::for_testing("ledger.local:4400");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_address_rejected() {
        for bad in ["", "ledger", ":4400", "ledger:port", "ledger:70000"] {
            let config = LedgerClientConfig::for_testing(bad);
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidNodeAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = LedgerClientConfig::default();
        config.io_timeout_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout("io_timeout_ms")));

        let mut config = LedgerClientConfig::default();
        config.retry.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoAttempts));

        let mut config = LedgerClientConfig::default();
        config.max_frame_bytes = 10;
        assert_eq!(config.validate(), Err(ConfigError::FrameLimitTooSmall(10)));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 350,
        };
        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(350));
        assert_eq!(policy.backoff_for(40), Duration::from_millis(350));
    }
}
