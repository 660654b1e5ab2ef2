//! HTTP request handlers and the rate-limit middleware.

use axum::extract::{Query, Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use super::client::client_identifier;
use super::error::ApiError;
use super::AppState;
use crate::i18n::{negotiate_locale, Locale, LocaleRegistry};

const SERVICE_NAME: &str = "No-as-a-Service";
const REASON_ENDPOINT: &str = "/no";

/// Query parameter naming an explicit locale.
const LANG_PARAM: &str = "lang";

/// Body of a successful `/no` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonResponse {
    pub reason: String,
    pub lang: Locale,
    pub available_langs: Vec<&'static str>,
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub service: &'static str,
    pub endpoint: &'static str,
    pub description: &'static str,
    pub rate_limit: String,
    pub default_lang: Locale,
    pub supported_langs: Vec<&'static str>,
    pub rtl_langs: Vec<&'static str>,
    pub usage: UsageHints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageHints {
    pub random: &'static str,
    pub explicit_lang: &'static str,
    pub accept_language: &'static str,
}

/// Reject the request with 429 once its client is over the limit.
///
/// Runs before routing, so `/` and unknown paths count too.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_identifier(request.headers());
    if state.limiter.check_and_record(&client) {
        debug!("Rate limit exceeded for client {}", client);
        return ApiError::RateLimited {
            limit: state.limiter.short_description(),
        }
        .into_response();
    }
    next.run(request).await
}

/// `GET /no`: one random reason in the negotiated locale.
pub async fn random_reason(
    State(state): State<AppState>,
    params: Option<Query<Vec<(String, String)>>>,
    headers: HeaderMap,
) -> Result<Json<ReasonResponse>, ApiError> {
    // The first `lang` wins when the parameter is repeated
    let explicit = params.as_ref().and_then(|Query(pairs)| {
        pairs
            .iter()
            .find(|(key, _)| key == LANG_PARAM)
            .map(|(_, value)| value.as_str())
    });
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let locale = negotiate_locale(explicit, accept_language);

    let Some(reason) = state.reasons.random_reason(locale) else {
        error!("No reasons loaded for locale {}", locale);
        return Err(ApiError::Internal);
    };
    debug!("Serving reason in {}", locale);

    Ok(Json(ReasonResponse {
        reason: reason.to_string(),
        lang: locale,
        available_langs: LocaleRegistry::get().supported_codes(),
    }))
}

/// `GET /`: static service metadata.
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let registry = LocaleRegistry::get();

    Json(ServiceInfo {
        service: SERVICE_NAME,
        endpoint: REASON_ENDPOINT,
        description: "Returns a random rejection reason",
        rate_limit: state.limiter.long_description(),
        default_lang: registry.default_locale(),
        supported_langs: registry.supported_codes(),
        rtl_langs: registry.rtl_codes(),
        usage: UsageHints {
            random: "GET /no",
            explicit_lang: "GET /no?lang=es",
            accept_language: "GET /no with header 'Accept-Language: fr-FR,fr;q=0.9'",
        },
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
