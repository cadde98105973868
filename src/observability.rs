//! Presentation metrics

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for dispatch outcomes
#[derive(Debug, Default)]
pub struct Metrics {
    presented: AtomicU64,
    not_found: AtomicU64,
    failed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) {
        self.presented.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "presented", "Metric incremented");
    }

    /// No acceptable representation for the client
    pub fn not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "not_found", "Metric incremented");
    }

    pub fn failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            presented: self.presented.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub presented: u64,
    pub not_found: u64,
    pub failed: u64,
}
