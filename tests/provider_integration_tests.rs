use quill::inference::{
    ChatMessage, CompletionProvider, CompletionRequest, LmStudioProvider, OpenAiProvider,
    ProviderError,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn test_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are a writer."),
        ChatMessage::user("Write about rain"),
    ]
}

fn completion_body(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn complete(
    provider: &dyn CompletionProvider,
    messages: &[ChatMessage],
) -> Result<Option<String>, ProviderError> {
    provider
        .complete(CompletionRequest {
            messages,
            model: "test-model",
            max_output_tokens: 500,
        })
        .await
}

// ============================================================================
// OpenAI Provider Tests
// ============================================================================

#[tokio::test]
async fn test_openai_returns_first_choice_content() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body(json!("Rain fell.\n\nIt kept falling."))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let content = complete(&provider, &test_messages()).await.unwrap();

    assert_eq!(content.as_deref(), Some("Rain fell.\n\nIt kept falling."));
}

#[tokio::test]
async fn test_openai_sends_bearer_token_and_token_limit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 500,
            "messages": [
                { "role": "system", "content": "You are a writer." },
                { "role": "user", "content": "Write about rain" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("ok"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let content = complete(&provider, &test_messages()).await.unwrap();

    assert_eq!(content.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_openai_http_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("bad-key".to_string(), Some(mock_server.uri()));
    let result = complete(&provider, &test_messages()).await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid api key"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_null_content_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(null))))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let content = complete(&provider, &test_messages()).await.unwrap();

    assert_eq!(content, None);
}

#[tokio::test]
async fn test_openai_empty_choices_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let content = complete(&provider, &test_messages()).await.unwrap();

    assert_eq!(content, None);
}

#[tokio::test]
async fn test_openai_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let result = complete(&provider, &test_messages()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_openai_unreachable_server_is_network_error() {
    // Port 9 (discard) is closed on test machines
    let provider = OpenAiProvider::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:9".to_string()),
    );
    let result = complete(&provider, &test_messages()).await;

    assert!(matches!(result, Err(ProviderError::Network(_))));
}

// ============================================================================
// LM Studio Provider Tests
// ============================================================================

#[tokio::test]
async fn test_lmstudio_sends_no_auth_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("local"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = LmStudioProvider::new(Some(mock_server.uri()));
    let content = complete(&provider, &test_messages()).await.unwrap();
    assert_eq!(content.as_deref(), Some("local"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_lmstudio_trailing_slash_in_base_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("ok"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = LmStudioProvider::new(Some(format!("{}/", mock_server.uri())));
    let content = complete(&provider, &test_messages()).await.unwrap();

    assert_eq!(content.as_deref(), Some("ok"));
}
