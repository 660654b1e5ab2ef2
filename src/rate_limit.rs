//! Per-client fixed-window rate limiting.
//!
//! Each client identifier gets a counter that resets a fixed time after its
//! first request in a window. State lives in this process only: replicas do
//! not share it, so the effective limit across N replicas is N times the
//! configured one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Requests allowed per client per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 120;

/// Length of a rate-limit window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

/// Shared bucket for requests without a usable client identifier.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Counter state for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateRecord {
    count: u32,
    reset_at: Instant,
}

/// In-memory fixed-window rate limiter.
///
/// A client may burst up to twice the limit across a window boundary (the
/// end of one window followed by the start of the next). That is inherent
/// to fixed windows and accepted here.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    records: Mutex<HashMap<String, RateRecord>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a request from `client_id` and report whether it is limited.
    ///
    /// Returns `true` when the request exceeds the limit for the current
    /// window and must be rejected.
    pub fn check_and_record(&self, client_id: &str) -> bool {
        self.check_and_record_at(client_id, Instant::now())
    }

    /// [`check_and_record`](Self::check_and_record) with an explicit clock.
    ///
    /// A request arriving exactly at a record's reset time opens a new
    /// window.
    pub fn check_and_record_at(&self, client_id: &str, now: Instant) -> bool {
        let mut records = self.lock_records();

        match records.get_mut(client_id) {
            Some(record) if now < record.reset_at => {
                record.count = record.count.saturating_add(1);
                let limited = record.count > self.max_requests;
                if limited {
                    debug!(
                        "Client {} over limit ({}/{})",
                        client_id, record.count, self.max_requests
                    );
                }
                limited
            }
            _ => {
                records.insert(
                    client_id.to_string(),
                    RateRecord {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                false
            }
        }
    }

    /// Drop every record whose window has ended.
    ///
    /// Dropping an expired record is equivalent to keeping it: the next
    /// request from that client starts a fresh window either way.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let mut records = self.lock_records();
        let before = records.len();
        records.retain(|_, record| now < record.reset_at);
        before - records.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock_records().len()
    }

    /// Periodically evict expired records on the tokio runtime.
    pub fn spawn_sweeper(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        info!("Rate limit sweeper running every {:?}", interval);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = self.evict_expired();
                if evicted > 0 {
                    debug!(
                        "Evicted {} expired rate limit records ({} remain)",
                        evicted,
                        self.tracked_clients()
                    );
                }
            }
        })
    }

    /// Short form used in the 429 body, e.g. `120 reqs/min/IP`.
    pub fn short_description(&self) -> String {
        format!("{} reqs/{}/IP", self.max_requests, self.window_unit(true))
    }

    /// Long form used in service metadata, e.g. `120 requests/minute/IP`.
    pub fn long_description(&self) -> String {
        format!(
            "{} requests/{}/IP",
            self.max_requests,
            self.window_unit(false)
        )
    }

    fn window_unit(&self, short: bool) -> String {
        match (self.window == Duration::from_secs(60), short) {
            (true, true) => "min".to_string(),
            (true, false) => "minute".to_string(),
            (false, _) => format!("{}ms", self.window.as_millis()),
        }
    }

    // The map stays consistent even if a holder panicked: every update is a
    // single insert or field write.
    fn lock_records(&self) -> MutexGuard<'_, HashMap<String, RateRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(60_000);

    // ==================== Window Behaviour ====================

    #[test]
    fn test_first_request_is_allowed() {
        let limiter = RateLimiter::default();
        assert!(!limiter.check_and_record("1.2.3.4"));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_threshold_requests_allowed_then_limited() {
        let limiter = RateLimiter::new(120, WINDOW);
        let start = Instant::now();

        for i in 0..120 {
            let now = start + Duration::from_millis(i);
            assert!(!limiter.check_and_record_at("client", now), "request {}", i + 1);
        }
        assert!(limiter.check_and_record_at("client", start + Duration::from_millis(200)));
        assert!(limiter.check_and_record_at("client", start + Duration::from_millis(300)));
    }

    #[test]
    fn test_new_window_resets_count() {
        let limiter = RateLimiter::new(120, WINDOW);
        let start = Instant::now();

        for _ in 0..121 {
            limiter.check_and_record_at("client", start);
        }
        assert!(limiter.check_and_record_at("client", start + Duration::from_secs(30)));

        let later = start + WINDOW + Duration::from_millis(1);
        assert!(!limiter.check_and_record_at("client", later));

        // Count restarted at 1: 119 more fit before the limit
        for _ in 0..119 {
            assert!(!limiter.check_and_record_at("client", later));
        }
        assert!(limiter.check_and_record_at("client", later));
    }

    #[test]
    fn test_request_exactly_at_reset_time_starts_new_window() {
        let limiter = RateLimiter::new(2, WINDOW);
        let start = Instant::now();

        assert!(!limiter.check_and_record_at("client", start));
        assert!(!limiter.check_and_record_at("client", start));
        assert!(limiter.check_and_record_at("client", start));

        assert!(!limiter.check_and_record_at("client", start + WINDOW));
    }

    #[test]
    fn test_just_before_reset_is_still_limited() {
        let limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();

        assert!(!limiter.check_and_record_at("client", start));
        let almost = start + WINDOW - Duration::from_millis(1);
        assert!(limiter.check_and_record_at("client", almost));
    }

    #[test]
    fn test_window_boundary_allows_double_burst() {
        // Fixed windows admit up to 2x the limit around a boundary
        let limiter = RateLimiter::new(120, WINDOW);
        let start = Instant::now();

        assert!(!limiter.check_and_record_at("client", start));
        let end_of_window = start + WINDOW - Duration::from_millis(1);
        for _ in 0..119 {
            assert!(!limiter.check_and_record_at("client", end_of_window));
        }
        let next_window = start + WINDOW;
        for _ in 0..120 {
            assert!(!limiter.check_and_record_at("client", next_window));
        }
        assert!(limiter.check_and_record_at("client", next_window));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(!limiter.check_and_record_at("a", now));
        assert!(limiter.check_and_record_at("a", now));
        assert!(!limiter.check_and_record_at("b", now));
        assert!(!limiter.check_and_record_at(UNKNOWN_CLIENT, now));
    }

    #[test]
    fn test_window_does_not_slide_with_traffic() {
        let limiter = RateLimiter::new(5, WINDOW);
        let start = Instant::now();

        assert!(!limiter.check_and_record_at("client", start));
        // Requests late in the window do not push the reset time back
        let late = start + Duration::from_secs(59);
        for _ in 0..4 {
            assert!(!limiter.check_and_record_at("client", late));
        }
        assert!(!limiter.check_and_record_at("client", start + WINDOW));
    }

    // ==================== Eviction ====================

    #[test]
    fn test_evict_removes_only_expired_records() {
        let limiter = RateLimiter::new(10, WINDOW);
        let start = Instant::now();

        limiter.check_and_record_at("old", start);
        limiter.check_and_record_at("fresh", start + Duration::from_secs(30));
        assert_eq!(limiter.tracked_clients(), 2);

        let evicted = limiter.evict_expired_at(start + WINDOW);
        assert_eq!(evicted, 1);
        assert_eq!(limiter.tracked_clients(), 1);

        // "fresh" keeps its count
        for _ in 0..9 {
            assert!(!limiter.check_and_record_at("fresh", start + Duration::from_secs(31)));
        }
        assert!(limiter.check_and_record_at("fresh", start + Duration::from_secs(31)));
    }

    #[test]
    fn test_evict_on_empty_limiter() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.evict_expired(), 0);
    }

    #[tokio::test]
    async fn test_sweeper_evicts_in_background() {
        let limiter = Arc::new(RateLimiter::new(10, Duration::from_millis(10)));
        limiter.check_and_record("client");

        let handle = Arc::clone(&limiter).spawn_sweeper(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        assert_eq!(limiter.tracked_clients(), 0);
    }

    // ==================== Concurrency ====================

    #[test]
    fn test_concurrent_requests_are_all_counted() {
        let limiter = Arc::new(RateLimiter::new(100, WINDOW));
        let start = Instant::now();

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    (0..25)
                        .filter(|_| limiter.check_and_record_at("shared", start))
                        .count()
                })
            })
            .collect();

        let limited: usize = threads.into_iter().map(|t| t.join().unwrap()).sum();
        assert_eq!(limited, 100);
    }

    // ==================== Descriptions ====================

    #[test]
    fn test_descriptions_for_default_window() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.short_description(), "120 reqs/min/IP");
        assert_eq!(limiter.long_description(), "120 requests/minute/IP");
    }

    #[test]
    fn test_descriptions_for_custom_window() {
        let limiter = RateLimiter::new(5, Duration::from_millis(1500));
        assert_eq!(limiter.short_description(), "5 reqs/1500ms/IP");
    }
}
