//! HTTP client for the machine translation API.
//!
//! Talks to Google's public `translate_a/single` endpoint, which answers a
//! GET with nested JSON arrays: `[[["Hola","Hello",...], ...], ...]`.

use crate::retry::{with_retry_if, RetryConfig};
use crate::translation::metrics::TranslationMetrics;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Default base URL of the translation API.
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation API rate limited the request (429)")]
    RateLimited,

    #[error("Translation API error ({status}): {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to reach translation API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected translation response: {0}")]
    UnexpectedResponse(String),
}

impl TranslateError {
    /// Only rate limiting is worth waiting out; everything else is fatal.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TranslateError::RateLimited)
    }
}

/// Translation API client with backoff on rate limiting.
pub struct Translator {
    client: reqwest::Client,
    base_url: String,
    source_lang: String,
    retry: RetryConfig,
    metrics: Arc<TranslationMetrics>,
}

impl Translator {
    /// Create a client translating from `source_lang`.
    pub fn new(base_url: impl Into<String>, source_lang: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            source_lang: source_lang.into(),
            retry: RetryConfig::translation(),
            metrics: Arc::new(TranslationMetrics::default()),
        }
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Translate `text` into `target_lang`, retrying while rate limited.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        with_retry_if(
            &self.retry,
            &format!("Translation to {}", target_lang),
            || self.translate_once(text, target_lang),
            TranslateError::is_retryable,
        )
        .await
    }

    async fn translate_once(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        self.metrics.record_api_call();
        let url = format!("{}/translate_a/single", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .inspect_err(|_| self.metrics.record_api_failure())?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            self.metrics.record_rate_limited();
            return Err(TranslateError::RateLimited);
        }
        if !status.is_success() {
            self.metrics.record_api_failure();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Http { status, body });
        }

        let value: Value = response
            .json()
            .await
            .inspect_err(|_| self.metrics.record_api_failure())?;
        extract_translation(&value).inspect_err(|_| self.metrics.record_api_failure())
    }
}

/// Join the translated sentence fragments of an API response.
fn extract_translation(value: &Value) -> Result<String, TranslateError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::UnexpectedResponse("missing sentence list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslateError::UnexpectedResponse(
            "empty translation".to_string(),
        ));
    }
    Ok(translated)
}
