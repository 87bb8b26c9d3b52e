use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use metrics::counter;
use serde::Serialize;

/// Sliding-window request counter, process-local and best-effort.
///
/// Each client key owns a vector of admission timestamps; every check prunes
/// entries older than the window before counting, which keeps memory bounded
/// without a background sweep. Per-key entry locking serializes check and
/// append, so the record set is never observed mid-mutation.
#[derive(Debug, Clone)]
pub struct GatewayRateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateLimiterStats {
    pub requests_in_window: usize,
    pub distinct_clients: usize,
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl GatewayRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: Arc::new(DashMap::new()),
        }
    }

    /// Admit or deny a request for `key`. Denied requests append no record.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let window = self.window;

        let mut entry = self.buckets.entry(key.to_string()).or_default();
        entry.retain(|instant| now.duration_since(*instant) < window);

        if entry.len() as u32 >= self.max_requests {
            counter!("bottega_rate_limit_denied_total").increment(1);
            return false;
        }

        entry.push(now);
        true
    }

    pub fn retry_after_secs(&self) -> u64 {
        self.window.as_secs().max(1)
    }

    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Window-scoped statistics without mutating any bucket.
    pub fn stats(&self) -> RateLimiterStats {
        let now = Instant::now();
        let mut requests_in_window = 0;
        let mut distinct_clients = 0;
        for entry in self.buckets.iter() {
            let live = entry
                .value()
                .iter()
                .filter(|instant| now.duration_since(**instant) < self.window)
                .count();
            if live > 0 {
                distinct_clients += 1;
                requests_in_window += live;
            }
        }
        RateLimiterStats {
            requests_in_window,
            distinct_clients,
            max_requests: self.max_requests,
            window_seconds: self.window.as_secs(),
        }
    }
}
