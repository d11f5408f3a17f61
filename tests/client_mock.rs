//! GenAiClient against a mockito server.

use genai_probe::{
    Backend, Credential, Error, GenAiClient, GenAiClientBuilder, ModelService, ProbeErrorKind,
};
use mockito::{Matcher, Server};

const KEY: &str = "test-key";

fn client_for(server: &Server, backend: Backend) -> GenAiClient {
    GenAiClientBuilder::new()
        .backend(backend)
        .api_key(Credential::new(KEY))
        .base_url_override(server.url())
        .build()
        .expect("client should build against mock server")
}

#[tokio::test]
async fn list_models_drains_every_page() {
    let mut server = Server::new_async().await;
    // Created first so the paged request prefers it over the catch-all first page.
    let page2 = server
        .mock("GET", "/v1beta1/publishers/google/models")
        .match_query(Matcher::UrlEncoded("pageToken".into(), "p2".into()))
        .match_header("x-goog-api-key", KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"publisherModels":[{"name":"publishers/google/models/imagen-3.0-generate-002"}]}"#)
        .expect(1)
        .create_async()
        .await;
    let page1 = server
        .mock("GET", "/v1beta1/publishers/google/models")
        .match_header("x-goog-api-key", KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"publisherModels":[
                {"name":"publishers/google/models/gemini-2.5-flash-001"},
                {"name":"publishers/google/models/gemini-3-pro-image-preview"}
            ],"nextPageToken":"p2"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Backend::VertexAi);
    let models = client.list_models().await.expect("listing succeeds");
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "publishers/google/models/gemini-2.5-flash-001",
            "publishers/google/models/gemini-3-pro-image-preview",
            "publishers/google/models/imagen-3.0-generate-002",
        ]
    );

    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn gemini_api_listing_reads_models_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1beta/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"models":[{"name":"models/gemini-2.0-flash-exp","displayName":"Gemini 2.0 Flash Experimental","supportedGenerationMethods":["generateContent"]}]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, Backend::GeminiApi);
    let models = client.list_models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(
        models[0].display_name.as_deref(),
        Some("Gemini 2.0 Flash Experimental")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn generate_content_sends_prompt_and_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            "/v1/publishers/google/models/gemini-2.5-flash:generateContent",
        )
        .match_header("x-goog-api-key", KEY)
        .match_header(
            "x-genai-probe-request-id",
            Matcher::Regex("^[0-9a-f-]{36}$".into()),
        )
        .match_body(Matcher::PartialJson(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "Say 'OK'"}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"OK"}]},"finishReason":"STOP"}],
                "usageMetadata":{"promptTokenCount":4,"candidatesTokenCount":1,"totalTokenCount":5},
                "modelVersion":"gemini-2.5-flash"}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, Backend::VertexAi);
    let resp = client
        .generate_content("gemini-2.5-flash", "Say 'OK'")
        .await
        .unwrap();
    assert_eq!(resp.text.as_deref(), Some("OK"));
    assert_eq!(resp.usage.unwrap().total_tokens, 5);
    mock.assert_async().await;
}

#[tokio::test]
async fn error_statuses_map_to_probe_kinds() {
    let mut server = Server::new_async().await;
    let cases = [
        ("missing", 404, "NOT_FOUND", ProbeErrorKind::NotFound),
        ("denied", 403, "PERMISSION_DENIED", ProbeErrorKind::PermissionDenied),
        ("badkey", 401, "UNAUTHENTICATED", ProbeErrorKind::Authentication),
        ("busy", 429, "RESOURCE_EXHAUSTED", ProbeErrorKind::CallFailed),
    ];
    let mut mocks = Vec::new();
    for (model, status, rpc, _) in &cases {
        let path = format!("/v1/publishers/google/models/{}:generateContent", model);
        let mock = server
            .mock("POST", path.as_str())
            .with_status(*status)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"error":{{"code":{},"message":"{} says no","status":"{}"}}}}"#,
                status, model, rpc
            ))
            .create_async()
            .await;
        mocks.push(mock);
    }

    let client = client_for(&server, Backend::VertexAi);
    for (model, status, rpc, expected) in &cases {
        let err = client.generate_content(model, "hi").await.unwrap_err();
        match &err {
            Error::Remote {
                status: s,
                class,
                message,
            } => {
                assert_eq!(*s, *status as u16);
                assert_eq!(class, rpc);
                assert_eq!(message, &format!("{} says no", model));
            }
            other => panic!("expected remote error, got {:?}", other),
        }
        assert_eq!(ProbeErrorKind::classify(&err), *expected, "{}", model);
    }
    for mock in &mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on the discard port locally.
    let client = GenAiClientBuilder::new()
        .api_key(Credential::new(KEY))
        .base_url_override("http://127.0.0.1:9")
        .build()
        .unwrap();
    let err = client
        .generate_content("gemini-2.5-flash", "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(ProbeErrorKind::classify(&err), ProbeErrorKind::CallFailed);
}
