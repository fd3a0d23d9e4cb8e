//! Commissioner configuration.

use std::time::Duration;

/// Configuration for the commissioner's worker pool and RPC policy.
#[derive(Debug, Clone)]
pub struct CommissionerConfig {
    /// Maximum tasks executing concurrently.
    ///
    /// Tasks for the same universe are serialized by the entity lock, not
    /// by this bound; this only caps overall parallelism.
    pub max_concurrent_tasks: usize,
    /// Deadline for one administrative RPC call. An elapsed deadline is a
    /// transport-level failure.
    pub rpc_timeout: Duration,
    /// Maximum attempts per RPC call for transport-level failures.
    /// Server rejections are never retried.
    pub rpc_attempts: u32,
}

impl Default for CommissionerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 16,
            rpc_timeout: Duration::from_secs(30),
            rpc_attempts: 3,
        }
    }
}

impl CommissionerConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `FLOTILLA_MAX_CONCURRENT_TASKS`: Maximum concurrent tasks
    /// - `FLOTILLA_RPC_TIMEOUT_MS`: RPC deadline in milliseconds
    /// - `FLOTILLA_RPC_ATTEMPTS`: Attempts per RPC call
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_concurrent_tasks = std::env::var("FLOTILLA_MAX_CONCURRENT_TASKS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_concurrent_tasks);

        let rpc_timeout = std::env::var("FLOTILLA_RPC_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.rpc_timeout);

        let rpc_attempts = std::env::var("FLOTILLA_RPC_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.rpc_attempts);

        Self {
            max_concurrent_tasks,
            rpc_timeout,
            rpc_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bounded() {
        let config = CommissionerConfig::default();
        assert!(config.max_concurrent_tasks > 0);
        assert!(config.rpc_attempts > 0);
        assert!(config.rpc_timeout > Duration::ZERO);
    }
}
