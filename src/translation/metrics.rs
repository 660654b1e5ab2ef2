//! Translation run metrics.
//!
//! Counters for one translation run: API traffic, rate limiting and how
//! many entries were translated or skipped. The job reads them for its
//! batching and its summary, so a `Translator` serves a single run.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of HTTP calls made to the translation API
    api_calls: AtomicUsize,

    /// Number of calls that failed for reasons other than rate limiting
    api_failures: AtomicUsize,

    /// Number of calls answered with HTTP 429
    rate_limited: AtomicUsize,

    /// Entries replaced with a translation
    translated: AtomicUsize,

    /// Entries skipped because they were already translated
    skipped: AtomicUsize,
}

impl TranslationMetrics {
    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translated(&self) {
        self.translated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn api_failures(&self) -> usize {
        self.api_failures.load(Ordering::Relaxed)
    }

    pub fn rate_limited(&self) -> usize {
        self.rate_limited.load(Ordering::Relaxed)
    }

    pub fn translated(&self) -> usize {
        self.translated.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let calls = self.api_calls();
        let failures = self.api_failures();
        let rate_limited = self.rate_limited();
        let successes = calls.saturating_sub(failures + rate_limited);
        let api_success_rate = if calls > 0 {
            (successes as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            api_calls: calls,
            api_failures: failures,
            rate_limited,
            api_success_rate,
            translated: self.translated(),
            skipped: self.skipped(),
        }
    }
}

/// Snapshot of a run's metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub api_calls: usize,
    pub api_failures: usize,
    pub rate_limited: usize,

    /// Share of API calls that returned a translation, as a percentage (0-100)
    pub api_success_rate: f64,

    pub translated: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = TranslationMetrics::default();
        assert_eq!(metrics.api_calls(), 0);
        assert_eq!(metrics.api_failures(), 0);
        assert_eq!(metrics.rate_limited(), 0);
        assert_eq!(metrics.translated(), 0);
        assert_eq!(metrics.skipped(), 0);
    }

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::default().report();
        assert_eq!(report.api_calls, 0);
        assert_eq!(report.api_success_rate, 0.0);
    }

    #[test]
    fn test_report_success_rate() {
        let metrics = TranslationMetrics::default();

        // 4 calls: 1 rate limited, 1 failed = 50% success
        for _ in 0..4 {
            metrics.record_api_call();
        }
        metrics.record_rate_limited();
        metrics.record_api_failure();
        metrics.record_translated();
        metrics.record_translated();
        metrics.record_skipped();

        let report = metrics.report();
        assert_eq!(report.api_calls, 4);
        assert_eq!(report.rate_limited, 1);
        assert_eq!(report.api_failures, 1);
        assert_eq!(report.api_success_rate, 50.0);
        assert_eq!(report.translated, 2);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_report_all_successful() {
        let metrics = TranslationMetrics::default();
        metrics.record_api_call();
        metrics.record_api_call();
        assert_eq!(metrics.report().api_success_rate, 100.0);
    }
}
