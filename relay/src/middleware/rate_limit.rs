use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// Per-IP sliding-window request limiter.
///
/// Over-quota requests are rejected before any upstream call is made, so a
/// noisy client never consumes completion quota.
#[derive(Clone)]
pub struct RateLimiter {
    /// IP address -> request timestamps inside the current window
    requests: Arc<DashMap<String, Vec<DateTime<Utc>>>>,
    pub max_requests_per_minute: u32,
}

impl RateLimiter {
    pub fn new(max_requests_per_minute: u32) -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            max_requests_per_minute,
        }
    }

    /// Check if an IP address is within its 60-second sliding window.
    /// Returns Ok(current_count) or Err(message) if over limit.
    pub fn check_ip_limit(&self, ip: &str) -> Result<u32, String> {
        self.check_ip_limit_at(ip, Utc::now())
    }

    fn check_ip_limit_at(&self, ip: &str, now: DateTime<Utc>) -> Result<u32, String> {
        let mut entry = self.requests.entry(ip.to_string()).or_default();

        // Drop timestamps that slid out of the window
        entry.retain(|t| now - *t < Duration::seconds(60));

        if entry.len() as u32 >= self.max_requests_per_minute {
            return Err(format!(
                "IP has exceeded rate limit of {} requests/minute",
                self.max_requests_per_minute
            ));
        }

        entry.push(now);
        Ok(entry.len() as u32)
    }

    /// Periodically clean up stale entries to prevent memory growth.
    /// Call this from a background task.
    pub fn cleanup_stale_entries(&self) {
        let now = Utc::now();
        self.requests.retain(|_, stamps| {
            stamps.retain(|t| now - *t < Duration::seconds(120));
            !stamps.is_empty()
        });
    }
}
