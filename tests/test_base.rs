//! # Request Dispatcher Test Suite
//!
//! Covers endpoint root selection, request signing, the status table and
//! runtime configuration changes, against both a recording stub transport and
//! a wiremock server.

mod common;

use common::{RecordingTransport, mock_config, query_map, test_logger, url_without_query};
use hotelscombined::configs::ClientConfig;
use hotelscombined::search::base::{BaseApi, EndpointKind};
use hotelscombined::{HcError, params};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stub_api(config: ClientConfig, status: u16, body: &str) -> (BaseApi<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new(status, body);
    let api = BaseApi::with_transport(config, test_logger(), EndpointKind::Versioned, transport.clone());
    (api, transport)
}

#[tokio::test]
async fn test_config_accessors() {
    let (api, _) = stub_api(ClientConfig::new("123456").with_version("2.0"), 200, "{}");
    assert_eq!(api.token(), "123456");
    assert_eq!(api.version(), "2.0");
    assert!(!api.debug());
}

#[tokio::test]
async fn test_api_endpoint() {
    let (live, _) = stub_api(ClientConfig::new("123456").with_version("2.0"), 200, "{}");
    assert_eq!(live.api_endpoint().unwrap(), "https://hotelscombined.com/api/2.0");

    let (sandbox, _) = stub_api(ClientConfig::new("123456").with_version("2.0").with_debug(true), 200, "{}");
    assert_eq!(sandbox.api_endpoint().unwrap(), "http://sandbox.hotelscombined.com/api/2.0");
}

#[tokio::test]
async fn test_api_endpoint_keeps_root_segment_without_slash() {
    let mut config = ClientConfig::new("123456");
    config.endpoints.live = "https://staging.example.com/api".into();
    let (api, _) = stub_api(config, 200, "{}");
    assert_eq!(api.api_endpoint().unwrap(), "https://staging.example.com/api/1.0");
}

#[tokio::test]
async fn test_invalid_root_is_config_error() {
    let mut config = ClientConfig::new("123456");
    config.endpoints.live = "not a url".into();
    let (api, transport) = stub_api(config, 200, "{}");

    assert!(matches!(api.api_endpoint(), Err(HcError::ConfigError(_))));
    let result = api.perform_request("hotels", params! {}).await;
    assert!(matches!(result, Err(HcError::ConfigError(_))));
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_perform_request_signs_and_decodes() {
    let (api, transport) = stub_api(ClientConfig::new("123456").with_version("2.0").with_debug(true), 200, r#"{"test":"ok"}"#);

    let result = api.perform_request("test/200", params! {}).await.unwrap();
    assert_eq!(result, json!({"test": "ok"}));

    let req = transport.last();
    assert_eq!(req.method, Method::GET);
    assert_eq!(url_without_query(&req), "http://sandbox.hotelscombined.com/api/2.0/test/200");
    let query = query_map(&req);
    assert_eq!(query.len(), 1);
    assert_eq!(query["apiKey"], "123456");
    assert_eq!(req.headers["content-type"], "application/json");
    assert_eq!(req.headers["accept"], "application/json");
}

#[tokio::test]
async fn test_caller_params_override_api_key() {
    let (api, transport) = stub_api(ClientConfig::new("123456"), 200, "[]");
    api.perform_request("hotels", params! { "apiKey" => "other", "limit" => 5 })
        .await
        .unwrap();

    let query = query_map(&transport.last());
    assert_eq!(query["apiKey"], "other");
    assert_eq!(query["limit"], "5");
}

#[tokio::test]
async fn test_empty_token_fails_before_any_request() {
    let (api, transport) = stub_api(ClientConfig::new("123456"), 200, "{}");
    api.set_token("");

    let result = api.perform_request("test/500", params! {}).await;
    match result {
        Err(HcError::AuthError { status, errors, .. }) => {
            assert_eq!(status, None);
            assert_eq!(errors, None);
        }
        other => panic!("Expected AuthError, got {:?}", other),
    }
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_bad_request_is_query_error() {
    let (api, _) = stub_api(ClientConfig::new("123456"), 400, r#"{"test":"fail"}"#);

    match api.perform_request("test/400", params! {}).await {
        Err(HcError::QueryError { status, errors, message }) => {
            assert_eq!(status, Some(400));
            assert_eq!(errors.as_deref(), Some(r#"{"test":"fail"}"#));
            assert!(message.contains("not valid"));
        }
        other => panic!("Expected QueryError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let (api, _) = stub_api(ClientConfig::new("wrong"), 401, "denied");
    let err = api.perform_request("hotels", params! {}).await.unwrap_err();
    assert!(matches!(err, HcError::AuthError { .. }));
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.errors(), Some("denied"));
}

#[tokio::test]
async fn test_listed_server_error_fails() {
    let (api, _) = stub_api(ClientConfig::new("123456"), 500, "{}");
    let err = api.perform_request("hotels", params! {}).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_unlisted_status_is_treated_as_success() {
    let (api, _) = stub_api(ClientConfig::new("123456"), 502, r#"{"partial":true}"#);
    let result = api.perform_request("hotels", params! {}).await.unwrap();
    assert_eq!(result, json!({"partial": true}));
}

#[tokio::test]
async fn test_non_json_body_is_query_error() {
    let (api, _) = stub_api(ClientConfig::new("123456"), 200, "<html>maintenance</html>");
    match api.perform_request("hotels", params! {}).await {
        Err(HcError::QueryError { status, errors, .. }) => {
            assert_eq!(status, Some(200));
            assert!(errors.unwrap().contains("maintenance"));
        }
        other => panic!("Expected QueryError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_set_debug_switches_root() {
    let (api, transport) = stub_api(ClientConfig::new("123456"), 200, "{}");
    api.perform_request("hotels", params! {}).await.unwrap();
    assert!(url_without_query(&transport.last()).starts_with("https://hotelscombined.com/api/1.0/"));

    api.set_debug(true);
    api.perform_request("hotels", params! {}).await.unwrap();
    assert!(url_without_query(&transport.last()).starts_with("http://sandbox.hotelscombined.com/api/1.0/"));
    assert_eq!(api.token(), "123456");
}

#[tokio::test]
async fn test_explicit_method_is_forwarded() {
    let (api, transport) = stub_api(ClientConfig::new("123456"), 200, "{}");
    api.request(Method::HEAD, "hotels", params! {}).await.unwrap();
    assert_eq!(transport.last().method, Method::HEAD);
}

#[tokio::test]
async fn test_perform_request_over_http() {
    let server = MockServer::start().await;
    let api = BaseApi::new(mock_config(&server.uri(), "123456"), test_logger(), EndpointKind::Versioned);

    Mock::given(method("GET"))
        .and(path("/api/1.0/test/200"))
        .and(query_param("apiKey", "123456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test": "ok"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/1.0/test/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown place"))
        .mount(&server)
        .await;

    let ok = api.perform_request("test/200", params! {}).await.unwrap();
    assert_eq!(ok, json!({"test": "ok"}));

    let err = api.perform_request("test/404", params! {}).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.errors(), Some("unknown place"));
}

#[tokio::test]
async fn test_empty_token_sends_nothing_over_http() {
    let server = MockServer::start().await;
    let api = BaseApi::new(mock_config(&server.uri(), ""), test_logger(), EndpointKind::Versioned);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = api.perform_request("hotels", params! {}).await;
    assert!(matches!(result, Err(HcError::AuthError { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // nothing listens on port 1
    let api = BaseApi::new(mock_config("http://127.0.0.1:1", "123456"), test_logger(), EndpointKind::Versioned);
    let result = api.perform_request("hotels", params! {}).await;
    assert!(matches!(result, Err(HcError::HttpError(_))));
}

#[tokio::test]
async fn test_default_user_agent_is_sent() {
    let server = MockServer::start().await;
    let api = BaseApi::new(mock_config(&server.uri(), "123456"), test_logger(), EndpointKind::Versioned);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    api.perform_request("hotels", params! {}).await.unwrap();
    let received = server.received_requests().await.unwrap();
    let ua = received[0].headers.get("user-agent").unwrap().to_str().unwrap().to_string();
    assert!(ua.starts_with("hotelscombined/"));
}
