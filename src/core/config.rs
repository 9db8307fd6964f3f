//! # Runtime configuration.
//!
//! Provides [`Config`] centralized settings for a [`Promotions`](crate::Promotions) instance.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1
//! - `grace = 0s` → shutdown does not wait for transition actors

use std::time::Duration;

use crate::policies::{DisplayPolicy, DEFAULT_QA_CLIENTS};

/// Configuration for the promotion runtime.
///
/// ## Field semantics
/// - `grace`: Maximum wait for transition actors to stop on shutdown
/// - `bus_capacity`: Event bus ring buffer size (min 1)
/// - `qa_clients`: Client identifiers that may preview banners before they go live
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for transition actors after shutdown is requested.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,

    /// QA/test client identifiers.
    ///
    /// These clients see banners that are `Inactive` as well as `Active`.
    pub qa_clients: Vec<String>,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Builds the display policy from `qa_clients`.
    pub fn display_policy(&self) -> DisplayPolicy {
        DisplayPolicy::new(self.qa_clients.iter().cloned())
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 60s`
    /// - `bus_capacity = 1024`
    /// - `qa_clients = ["10.0.0.1", "10.0.0.2"]`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(60),
            bus_capacity: 1024,
            qa_clients: DEFAULT_QA_CLIENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.grace, Duration::from_secs(60));
        assert_eq!(cfg.bus_capacity_clamped(), 1024);
        assert!(cfg.display_policy().is_qa("10.0.0.1"));
        assert!(cfg.display_policy().is_qa("10.0.0.2"));
    }

    #[test]
    fn test_zero_bus_capacity_is_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
