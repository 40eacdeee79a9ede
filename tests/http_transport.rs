//! End-to-end client tests against a local mock HTTP server

use mockito::Matcher;
use serde_json::json;
use yaviq::{ErrorKind, YaviqClient};

fn client(endpoint: &str) -> YaviqClient {
    YaviqClient::new(Some("test-key".to_string()), Some(endpoint.to_string())).unwrap()
}

#[tokio::test]
async fn optimize_sends_bearer_and_unwraps_envelope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/optimize")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "input": "please optimize this text",
            "mode": "safe",
            "format": "text"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":{"optimized":"optimize text","tokensSaved":3,"compression":40}}"#)
        .create_async()
        .await;

    // Trailing slash on the endpoint must not double up in the URL
    let yaviq = client(&format!("{}/", server.url()));
    let result = yaviq
        .optimize("please optimize this text", "low", "text", None)
        .await
        .unwrap();

    assert_eq!(result.optimized, "optimize text");
    assert_eq!(result.tokens_saved, 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn encode_response_passes_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/convert-to-toon")
        .with_status(200)
        .with_body(r#"{"toon":"rows[2]{a}:\n  1\n  2","format":"json"}"#)
        .create_async()
        .await;

    let encoded = client(&server.url())
        .convert(r#"[{"a":1},{"a":2}]"#, None)
        .await
        .unwrap();

    assert_eq!(encoded.toon, "rows[2]{a}:\n  1\n  2");
    assert_eq!(encoded.format, "json");
    mock.assert_async().await;
}

#[tokio::test]
async fn client_error_status_is_validation() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/convert-from-toon")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let err = client(&server.url())
        .decode_structured("rows[1]: 1")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.message().contains("not found"));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn server_error_status_is_engine_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/optimize")
        .with_status(502)
        .with_body(r#"{"message":"upstream model unavailable"}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .optimize("hello", "balanced", "auto", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EngineFailure);
    assert_eq!(err.message(), "Server error (502): upstream model unavailable");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn wrapped_failure_is_engine_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/optimize")
        .with_status(200)
        .with_body(r#"{"success":false,"error":"bad input","status":422}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .optimize("hello", "balanced", "auto", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EngineFailure);
    assert_eq!(err.message(), "bad input");
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn failed_call_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/optimize-run")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let err = client(&server.url())
        .optimize_rag(&["chunk"], "balanced", Some(3), false)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EngineFailure);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let err = client("http://127.0.0.1:1")
        .optimize("hello", "balanced", "auto", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status(), None);
}
