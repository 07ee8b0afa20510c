//! Per-client sliding-window rate limiting.
//!
//! State lives in process memory only. Each instance of the service enforces
//! its own limit, so N replicas admit up to N times the configured rate.

mod window;

use crate::config::RateLimitConfig;
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use window::RequestWindow;

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request was recorded. `remaining` more fit in the current window.
    Allowed { remaining: u32 },
    /// The request was not recorded.
    Rejected { retry_after_secs: u64 },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed { .. })
    }
}

/// Sliding-window limiter keyed by client identity.
pub struct RateLimiter {
    windows: RwLock<HashMap<String, RequestWindow>>,
    max_requests: u32,
    window: Duration,
    sweep_probability: f64,
}

impl RateLimiter {
    /// Create a limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        let sweep_probability = if config.sweep_probability.is_nan() {
            0.0
        } else {
            config.sweep_probability.clamp(0.0, 1.0)
        };

        Self {
            windows: RwLock::new(HashMap::new()),
            max_requests: config.max_requests.max(1),
            window: config.window,
            sweep_probability,
        }
    }

    /// Create a permissive limiter for testing.
    pub fn permissive() -> Self {
        Self::new(&RateLimitConfig {
            max_requests: 1_000_000,
            ..RateLimitConfig::default()
        })
    }

    /// Decide whether `identity` may make a request at `now`.
    ///
    /// The whole read-prune-append sequence runs under one write lock.
    /// With probability `sweep_probability` every other client's record is
    /// pruned as well, after the decision for this one has been made.
    pub async fn admit(&self, identity: &str, now: Instant) -> Admission {
        let mut windows = self.windows.write().await;

        let admission = {
            let requests = windows.entry(identity.to_string()).or_default();
            requests.prune(now, self.window);

            if requests.len() >= self.max_requests as usize {
                Admission::Rejected {
                    retry_after_secs: self.window.as_secs(),
                }
            } else {
                requests.record(now);
                Admission::Allowed {
                    remaining: self.max_requests - requests.len() as u32,
                }
            }
        };

        if self.sweep_probability > 0.0 && rand::thread_rng().gen_bool(self.sweep_probability) {
            self.sweep_locked(&mut windows, now);
        }

        admission
    }

    /// Prune every client and forget those with no requests left in the window.
    ///
    /// Returns the number of clients removed.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut windows = self.windows.write().await;
        self.sweep_locked(&mut windows, now)
    }

    fn sweep_locked(&self, windows: &mut HashMap<String, RequestWindow>, now: Instant) -> usize {
        let before = windows.len();

        windows.retain(|_, requests| {
            requests.prune(now, self.window);
            !requests.is_empty()
        });

        let removed = before - windows.len();
        if removed > 0 {
            debug!(removed, remaining = windows.len(), "Swept idle rate limit records");
        }
        removed
    }

    /// Number of clients currently tracked.
    pub async fn tracked_identities(&self) -> usize {
        self.windows.read().await.len()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
