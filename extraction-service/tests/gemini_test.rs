//! Gemini client tests against a local wiremock server.

mod common;

use common::TestApp;
use extraction_service::services::providers::gemini::{GeminiConfig, GeminiExtractor};
use extraction_service::services::providers::{DocumentExtractor, ProviderError};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn extractor(server: &MockServer) -> GeminiExtractor {
    GeminiExtractor::new(GeminiConfig {
        api_key: SecretString::new("test-api-key".to_string()),
        model: "gemini-test".to_string(),
        api_base: format!("{}/v1beta", server.uri()),
        timeout: Duration::from_secs(5),
    })
    .expect("Failed to build Gemini extractor")
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 1200, "candidatesTokenCount": 85 }
    }))
}

#[tokio::test]
async fn sends_document_with_prompts_and_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .respond_with(reply("\n Queixa principal: febre \n"))
        .expect(1)
        .mount(&server)
        .await;

    let text = extractor(&server)
        .extract(b"GIF89a", "image/gif")
        .await
        .expect("extraction should succeed");
    assert_eq!(text, "Queixa principal: febre");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("NOT_CLINICAL"));
    assert_eq!(
        body["contents"][0]["parts"][0]["inlineData"]["mimeType"],
        "image/gif"
    );
    assert_eq!(
        body["contents"][0]["parts"][0]["inlineData"]["data"],
        "R0lGODlh"
    );
    assert!(body["contents"][0]["parts"][1]["text"]
        .as_str()
        .unwrap()
        .contains("Hipótese diagnóstica"));
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
    // Key travels in the header only.
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(b"%PDF", "application/pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::RateLimited));
}

#[tokio::test]
async fn rejected_key_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(b"%PDF", "application/pdf")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "unauthorized");
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(b"%PDF", "application/pdf")
        .await
        .unwrap_err();
    match err {
        ProviderError::ApiError(detail) => assert!(detail.contains("backend unavailable")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = extractor(&server)
        .extract(b"%PDF", "application/pdf")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_response");
}

#[tokio::test]
async fn slow_upstream_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("tarde demais").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let extractor = GeminiExtractor::new(GeminiConfig {
        api_key: SecretString::new("test-api-key".to_string()),
        model: "gemini-test".to_string(),
        api_base: format!("{}/v1beta", server.uri()),
        timeout: Duration::from_millis(200),
    })
    .unwrap();

    let err = extractor
        .extract(b"%PDF", "application/pdf")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn service_end_to_end_with_gemini_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("NOT_CLINICAL: administrative document"))
        .mount(&server)
        .await;

    let gemini: Arc<dyn DocumentExtractor> = Arc::new(extractor(&server));
    let app = TestApp::spawn(Some(gemini)).await;

    let response = app.post_file("boleto.pdf", b"%PDF-1.4".to_vec()).await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "NOT_CLINICAL");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("administrative document"));
}
