//! Timeout configuration for fetch operations.

use std::time::Duration;

use crate::DependencyTag;

/// Timeout configuration for catalog requests.
#[derive(Debug, Clone, Default)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Option<Duration>,
    /// Total request timeout; `None` falls back to the dependency default.
    pub total: Option<Duration>,
}

impl TimeoutConfig {
    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: Some(total / 4),
            total: Some(total),
        }
    }

    /// Total timeout for a request to `tag`.
    pub fn total_for(&self, tag: DependencyTag) -> Duration {
        self.total.unwrap_or_else(|| tag.default_timeout())
    }
}
