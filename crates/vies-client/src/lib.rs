//! Client for the EU VIES VAT number lookup service.
//!
//! VIES forwards each lookup to the member state's own registry, so answers
//! for a country can be slow or unavailable while others work fine.

mod client;
mod error;
mod types;

pub use client::ViesClient;
pub use error::ViesError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer, timeout: Duration) -> ViesClient {
        ViesClient::new(mock_server.uri(), timeout, "vies-client-test/1.0").unwrap()
    }

    #[tokio::test]
    async fn test_check_vat_valid() {
        let mock_server = MockServer::start().await;

        let response_body = serde_json::json!({
            "valid": true,
            "name": "ACME GmbH",
            "address": "Musterstr. 1, 10115 Berlin",
            "requestDate": "2024-06-15T08:30:00.000Z"
        });

        Mock::given(method("GET"))
            .and(path("/ms/DE/vat/123456789"))
            .and(header("User-Agent", "vies-client-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, Duration::from_secs(5));
        let result = client.check_vat("DE", "123456789").await.unwrap();

        assert!(result.valid);
        assert_eq!(result.name.as_deref(), Some("ACME GmbH"));
        assert_eq!(result.address.as_deref(), Some("Musterstr. 1, 10115 Berlin"));
        assert_eq!(
            result.request_date.as_deref(),
            Some("2024-06-15T08:30:00.000Z")
        );
    }

    #[tokio::test]
    async fn test_check_vat_invalid_number() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ms/FR/vat/12345678901"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "isValid": false
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, Duration::from_secs(5));
        let result = client.check_vat("FR", "12345678901").await.unwrap();

        assert!(!result.valid);
        assert!(result.name.is_none());
    }

    #[tokio::test]
    async fn test_check_vat_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ms/DE/vat/123456789"))
            .respond_with(ResponseTemplate::new(503).set_body_string("MS_UNAVAILABLE"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, Duration::from_secs(5));
        let result = client.check_vat("DE", "123456789").await;

        match result {
            Err(ViesError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "MS_UNAVAILABLE");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_vat_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, Duration::from_secs(5));
        let result = client.check_vat("DE", "123456789").await;

        assert!(matches!(result, Err(ViesError::Json(_))));
    }

    #[tokio::test]
    async fn test_check_vat_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "valid": true }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, Duration::from_millis(50));
        let result = client.check_vat("DE", "123456789").await;

        match result {
            Err(ViesError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_vat_encodes_path_segments() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ms/IE/vat/1A23456B%2A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "valid": false
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, Duration::from_secs(5));
        let result = client.check_vat("IE", "1A23456B*").await;

        assert!(result.is_ok());
    }
}
