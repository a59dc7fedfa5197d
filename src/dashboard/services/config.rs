//! Runtime configuration for the dashboard service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`TaskDashboardService`](super::TaskDashboardService).
///
/// # Examples
///
/// ```
/// use bountydesk::dashboard::services::DashboardConfig;
/// use std::time::Duration;
///
/// let config = DashboardConfig::default();
/// assert_eq!(config.confirmation_timeout, Duration::from_secs(120));
///
/// let local = DashboardConfig::local();
/// assert!(local.confirmation_timeout < config.confirmation_timeout);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Longest wait for a submitted transaction to be confirmed.
    pub confirmation_timeout: Duration,
    /// Number of notices buffered for slow subscribers.
    pub notice_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: Duration::from_secs(120),
            notice_capacity: 64,
        }
    }
}

impl DashboardConfig {
    /// Configuration for local or in-memory ledgers that confirm quickly.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            confirmation_timeout: Duration::from_secs(5),
            notice_capacity: 16,
        }
    }

    /// Sets the confirmation timeout.
    #[must_use]
    pub const fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Sets the notice buffer capacity. Zero is raised to one.
    #[must_use]
    pub fn with_notice_capacity(mut self, capacity: usize) -> Self {
        self.notice_capacity = capacity.max(1);
        self
    }
}
