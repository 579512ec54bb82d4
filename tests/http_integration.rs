// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the device HTTP client using wiremock.

use std::time::Duration;

use bitaxe_notifier::error::{Error, ParseError, ProtocolError};
use bitaxe_notifier::protocol::{DeviceClient, StatusSource};
use bitaxe_notifier::response::StatusSnapshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn address(server: &MockServer) -> String {
    server.uri().replace("http://", "")
}

fn system_info(overheat: serde_json::Value, best: &str, session: &str) -> serde_json::Value {
    serde_json::json!({
        "power": 14.8,
        "voltage": 5120.0,
        "temp": 58.2,
        "hashRate": 512.4,
        "bestDiff": best,
        "bestSessionDiff": session,
        "overheat_mode": overheat,
        "hostname": "bitaxe",
        "ASICModel": "BM1366"
    })
}

// ============================================================================
// Successful polls
// ============================================================================

mod success {
    use super::*;

    #[tokio::test]
    async fn fetches_system_info() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(system_info(serde_json::json!(false), "4.29G", "1.02M")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        let status = client.fetch_status(&address(&mock_server)).await;

        assert_eq!(status, Some(StatusSnapshot::new(false, "4.29G", "1.02M")));
    }

    #[tokio::test]
    async fn accepts_numeric_overheat_flag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(system_info(serde_json::json!(1), "4.29G", "0")),
            )
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        let status = client
            .try_fetch_status(&address(&mock_server))
            .await
            .unwrap();

        assert!(status.overheat_mode);
        assert_eq!(status.best_session_diff, "0");
    }

    #[tokio::test]
    async fn accepts_address_with_scheme() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(system_info(serde_json::json!(false), "1", "1")),
            )
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        assert!(client.fetch_status(&mock_server.uri()).await.is_some());
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn handles_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        let host = address(&mock_server);

        let err = client.try_fetch_status(&host).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::Status { code: 500, .. })
        ));
        assert!(client.fetch_status(&host).await.is_none());
    }

    #[tokio::test]
    async fn handles_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        let err = client
            .try_fetch_status(&address(&mock_server))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "protocol error: HTTP 404 - Not Found");
    }

    #[tokio::test]
    async fn handles_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        let host = address(&mock_server);

        let err = client.try_fetch_status(&host).await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
        assert!(client.fetch_status(&host).await.is_none());
    }

    #[tokio::test]
    async fn handles_missing_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"hostname": "bitaxe"})),
            )
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new().unwrap();
        let err = client
            .try_fetch_status(&address(&mock_server))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
    }

    #[tokio::test]
    async fn handles_connection_refused() {
        // Use a port that's definitely not listening
        let client = DeviceClient::new().unwrap();

        let err = client.try_fetch_status("127.0.0.1:59999").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::ConnectionRefused(ref addr)) if addr == "127.0.0.1:59999"
        ));
        assert!(client.fetch_status("127.0.0.1:59999").await.is_none());
    }

    #[tokio::test]
    async fn handles_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(system_info(serde_json::json!(false), "1", "1"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = DeviceClient::with_timeout(Duration::from_millis(100)).unwrap();
        let err = client
            .try_fetch_status(&address(&mock_server))
            .await
            .unwrap_err();

        match err {
            Error::Protocol(ProtocolError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
