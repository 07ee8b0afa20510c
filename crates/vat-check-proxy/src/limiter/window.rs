//! Per-client request timestamps.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Timestamps of admitted requests for one client, oldest first.
#[derive(Debug, Default)]
pub(super) struct RequestWindow {
    timestamps: VecDeque<Instant>,
}

impl RequestWindow {
    /// Drop every timestamp that has aged out of the window.
    pub(super) fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) < window {
                break;
            }
            self.timestamps.pop_front();
        }
    }

    pub(super) fn record(&mut self, now: Instant) {
        self.timestamps.push_back(now);
    }

    pub(super) fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
