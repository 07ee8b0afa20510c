//! HTTP request handlers.

use super::identity::ClientIdentity;
use super::types::{CheckQuery, CheckRequest, CheckResponse, HealthResponse};
use super::AppState;
use crate::error::ProxyError;
use crate::format::VatIdentifier;
use crate::limiter::Admission;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        tracked_clients: state.limiter.tracked_identities().await,
    })
}

/// Validate a VAT identifier and confirm it with VIES.
///
/// Stages run in a fixed order and the first failing one ends the request:
/// preflight, method, rate limit, input, format, live lookup. Once the
/// format is good the response is 200 whether or not VIES answered.
pub async fn check_vat(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    query: Option<Query<CheckQuery>>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let client = ClientIdentity::from_request(&headers, connect_info.map(|ConnectInfo(addr)| addr));

    if method != Method::GET && method != Method::POST {
        warn!(client = %client, %method, "Unsupported method");
        return Err(ProxyError::MethodNotAllowed(method.to_string()));
    }

    if let Admission::Rejected { retry_after_secs } =
        state.limiter.admit(client.as_str(), Instant::now()).await
    {
        warn!(client = %client, "Rate limit exceeded");
        return Err(ProxyError::RateLimitExceeded { retry_after_secs });
    }

    let raw = if method == Method::GET {
        query.and_then(|Query(q)| q.vat_id)
    } else {
        serde_json::from_slice::<CheckRequest>(&body)
            .ok()
            .and_then(|r| r.vat_id)
    };

    let vat_id = raw
        .map(|raw| VatIdentifier::parse(&raw))
        .filter(|vat_id| !vat_id.is_empty())
        .ok_or_else(|| {
            warn!(client = %client, %method, "Request without vatId");
            ProxyError::MissingVatId
        })?;

    let country = vat_id.validate().map_err(|source| {
        warn!(client = %client, vat_id = %vat_id, reason = %source, "Format validation failed");
        ProxyError::InvalidVatId {
            vat_id: vat_id.to_string(),
            source,
        }
    })?;

    let result = state.verifier.verify(country, vat_id.local_number()).await;
    info!(client = %client, vat_id = %vat_id, ?result, "VAT check completed");

    Ok(Json(CheckResponse::new(&vat_id, result)).into_response())
}
