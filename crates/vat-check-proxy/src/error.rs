//! Error types for the VAT check proxy.
//!
//! Every variant ends the request with a well-formed JSON body. Upstream
//! failures are not errors here; they become indeterminate results.

use crate::format::FormatError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Hint returned when the request carries no VAT identifier.
pub const USAGE: &str =
    r#"GET /check?vatId=DE123456789 or POST /check with body {"vatId": "DE123456789"}"#;

/// Request-terminating errors.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("Rate limit exceeded, try again later")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("Missing vatId parameter")]
    MissingVatId,

    #[error("{source}")]
    InvalidVatId { vat_id: String, source: FormatError },
}

/// Plain error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 429 response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitResponse {
    pub error: String,
    pub format_valid: bool,
    pub retry_after: u64,
}

/// Body of a 400 response for a request without a VAT identifier.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub error: String,
    pub usage: String,
    pub format_valid: bool,
}

/// Body of a 400 response for an identifier that failed format validation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRejectionResponse {
    pub vat_id: String,
    pub valid: bool,
    pub error: String,
    pub format_valid: bool,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let error = self.to_string();

        match self {
            ProxyError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, POST, OPTIONS")],
                Json(ErrorResponse { error }),
            )
                .into_response(),
            ProxyError::RateLimitExceeded { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(RateLimitResponse {
                    error,
                    format_valid: false,
                    retry_after: retry_after_secs,
                }),
            )
                .into_response(),
            ProxyError::MissingVatId => (
                StatusCode::BAD_REQUEST,
                Json(UsageResponse {
                    error,
                    usage: USAGE.to_string(),
                    format_valid: false,
                }),
            )
                .into_response(),
            ProxyError::InvalidVatId { vat_id, .. } => (
                StatusCode::BAD_REQUEST,
                Json(FormatRejectionResponse {
                    vat_id,
                    valid: false,
                    error,
                    format_valid: false,
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn into_parts(error: ProxyError) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (status, headers, json) = into_parts(ProxyError::MethodNotAllowed("PUT".into())).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers[header::ALLOW], "GET, POST, OPTIONS");
        assert_eq!(json, serde_json::json!({ "error": "Method PUT not allowed" }));
    }

    #[tokio::test]
    async fn test_rate_limit_exceeded() {
        let (status, headers, json) = into_parts(ProxyError::RateLimitExceeded {
            retry_after_secs: 3600,
        })
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(headers[header::RETRY_AFTER], "3600");
        assert_eq!(json["formatValid"], false);
        assert_eq!(json["retryAfter"], 3600);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_vat_id() {
        let (status, _, json) = into_parts(ProxyError::MissingVatId).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["usage"], USAGE);
        assert_eq!(json["formatValid"], false);
    }

    #[tokio::test]
    async fn test_invalid_vat_id() {
        let (status, _, json) = into_parts(ProxyError::InvalidVatId {
            vat_id: "DE12".into(),
            source: FormatError::InvalidFormat("DE".into()),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            serde_json::json!({
                "vatId": "DE12",
                "valid": false,
                "error": "invalid VAT number format for country DE",
                "formatValid": false
            })
        );
    }
}
