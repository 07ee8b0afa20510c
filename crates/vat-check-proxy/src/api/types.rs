//! API request and response types.

use crate::format::VatIdentifier;
use crate::verify::{to_timestamp, VerificationResult};
use serde::{Deserialize, Serialize};

/// Name of the registry reported in confirmed results.
pub const VIES_SOURCE: &str = "EU VIES";

/// Explanation attached to indeterminate results.
pub const INDETERMINATE_MESSAGE: &str = "The VAT number format is valid, but the number could not be confirmed with EU VIES right now. Try again later.";

/// Query string of `GET /check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckQuery {
    #[serde(rename = "vatId")]
    pub vat_id: Option<String>,
}

/// JSON body of `POST /check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(rename = "vatId")]
    pub vat_id: Option<String>,
}

/// The registry answered.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedResponse {
    pub vat_id: String,
    pub valid: bool,
    pub name: String,
    pub address: String,
    pub country_code: String,
    pub request_date: String,
    pub format_valid: bool,
    pub source: String,
    pub timestamp: String,
}

/// Format is fine, registry status unknown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndeterminateResponse {
    pub vat_id: String,
    /// Always `null` on the wire.
    pub valid: Option<bool>,
    pub error: String,
    pub format_valid: bool,
    pub country_code: String,
    pub timestamp: String,
    pub message: String,
}

/// Body of a 200 response from `/check`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckResponse {
    Verified(VerifiedResponse),
    Indeterminate(IndeterminateResponse),
}

impl CheckResponse {
    pub fn new(vat_id: &VatIdentifier, result: VerificationResult) -> Self {
        match result {
            VerificationResult::Confirmed {
                valid,
                name,
                address,
                request_date,
                checked_at,
            } => CheckResponse::Verified(VerifiedResponse {
                vat_id: vat_id.to_string(),
                valid,
                name,
                address,
                country_code: vat_id.country_code().to_string(),
                request_date,
                format_valid: true,
                source: VIES_SOURCE.to_string(),
                timestamp: to_timestamp(checked_at),
            }),
            VerificationResult::Indeterminate { error, checked_at } => {
                CheckResponse::Indeterminate(IndeterminateResponse {
                    vat_id: vat_id.to_string(),
                    valid: None,
                    error,
                    format_valid: true,
                    country_code: vat_id.country_code().to_string(),
                    timestamp: to_timestamp(checked_at),
                    message: INDETERMINATE_MESSAGE.to_string(),
                })
            }
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub tracked_clients: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_verified_shape() {
        let vat_id = VatIdentifier::parse("DE123456789");
        let checked_at = Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap();
        let response = CheckResponse::new(
            &vat_id,
            VerificationResult::Confirmed {
                valid: true,
                name: "ACME GmbH".into(),
                address: "".into(),
                request_date: "2024-06-15".into(),
                checked_at,
            },
        );

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "vatId": "DE123456789",
                "valid": true,
                "name": "ACME GmbH",
                "address": "",
                "countryCode": "DE",
                "requestDate": "2024-06-15",
                "formatValid": true,
                "source": "EU VIES",
                "timestamp": "2024-06-15T08:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_indeterminate_serializes_null_valid() {
        let vat_id = VatIdentifier::parse("EL123456789");
        let response = CheckResponse::new(
            &vat_id,
            VerificationResult::Indeterminate {
                error: "VIES service unavailable".into(),
                checked_at: Utc::now(),
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["valid"].is_null());
        assert!(json.as_object().unwrap().contains_key("valid"));
        assert_eq!(json["formatValid"], true);
        assert_eq!(json["countryCode"], "EL");
        assert_eq!(json["message"], INDETERMINATE_MESSAGE);
    }

    #[test]
    fn test_check_request_reads_vat_id() {
        let request: CheckRequest = serde_json::from_str(r#"{"vatId":"de123"}"#).unwrap();
        assert_eq!(request.vat_id.as_deref(), Some("de123"));

        let request: CheckRequest = serde_json::from_str("{}").unwrap();
        assert!(request.vat_id.is_none());
    }
}
