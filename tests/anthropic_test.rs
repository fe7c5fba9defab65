//! Integration tests for the Anthropic client
//!
//! Tests HTTP client behavior using wiremock for request/response mocking.

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use cellyeah_tutor::anthropic::{
    AnthropicClient, CompletionBackend, CompletionRequest, Message, MessagesRequest,
};
use cellyeah_tutor::config::{AnthropicConfig, RequestConfig};
use cellyeah_tutor::error::CompletionError;

/// Create a test client pointing to mock server
fn create_test_client(base_url: &str) -> AnthropicClient {
    let config = AnthropicConfig::with_api_key("test-api-key").with_base_url(base_url);
    AnthropicClient::new(&config, RequestConfig::default()).expect("Failed to create client")
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-sonnet-20240229",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 20, "output_tokens": 10}
    }))
}

fn create_test_request(content: &str) -> CompletionRequest {
    CompletionRequest::new("You are a tutor.", vec![Message::user(content)])
}

#[cfg(test)]
mod completion_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_completion() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(header("content-type", "application/json"))
            .respond_with(text_response("Mitosis is how cells divide."))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client.complete(create_test_request("What is mitosis?")).await;

        assert!(result.is_ok(), "Completion should succeed: {:?}", result.err());
        assert_eq!(result.unwrap(), "Mitosis is how cells divide.");
    }

    #[tokio::test]
    async fn test_request_body_format() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(body_partial_json(json!({
                "model": "claude-3-sonnet-20240229",
                "max_tokens": 2048,
                "system": "You are a tutor.",
                "messages": [
                    {"role": "user", "content": "What is DNA?"},
                    {"role": "assistant", "content": "A molecule."},
                    {"role": "user", "content": "Tell me more."}
                ]
            })))
            .respond_with(text_response("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let request = CompletionRequest::new(
            "You are a tutor.",
            vec![
                Message::user("What is DNA?"),
                Message::assistant("A molecule."),
                Message::user("Tell me more."),
            ],
        );

        assert_eq!(client.complete(request).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_first_block_wins() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"type": "text", "text": "first"},
                    {"type": "text", "text": "second"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert_eq!(
            client.complete(create_test_request("q")).await.unwrap(),
            "first"
        );
    }

    #[tokio::test]
    async fn test_custom_model_and_version() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("anthropic-version", "2024-01-01"))
            .and(body_partial_json(json!({"model": "claude-test", "max_tokens": 64})))
            .respond_with(text_response("custom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = AnthropicConfig::with_api_key("k").with_base_url(mock_server.uri());
        config.model = "claude-test".to_string();
        config.api_version = "2024-01-01".to_string();
        config.max_tokens = 64;
        let client = AnthropicClient::new(&config, RequestConfig::default()).unwrap();

        assert_eq!(
            client.complete(create_test_request("q")).await.unwrap(),
            "custom"
        );
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_error_keeps_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        match &err {
            CompletionError::Api { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "server error");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert_eq!(err.to_diagnostic(), "Error: 500 - server error");
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "content": [{"type": "text", "text": "created body"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Api { status: 201, .. }));
        assert!(err.to_diagnostic().starts_with("Error: 201 - "));
        assert!(err.to_diagnostic().contains("created body"));
    }

    #[tokio::test]
    async fn test_no_content_status_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert_eq!(err.to_diagnostic(), "Error: 204 - ");
    }

    #[tokio::test]
    async fn test_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Api { status: 401, .. }));
        assert!(err.to_diagnostic().contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_string("rate limited")
                    .insert_header("retry-after", "60"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client.complete(create_test_request("q")).await;

        assert!(matches!(
            result,
            Err(CompletionError::Api { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::InvalidResponse { .. }));
        assert!(err.to_diagnostic().starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn test_empty_content_is_invalid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(text_response("late").set_delay(std::time::Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let config = AnthropicConfig::with_api_key("k").with_base_url(mock_server.uri());
        let request_config = RequestConfig {
            timeout_ms: Some(50),
        };
        let client = AnthropicClient::new(&config, request_config).unwrap();
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Timeout { timeout_ms: 50 }));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on port 1.
        let client = create_test_client("http://127.0.0.1:1");
        let err = client
            .complete(create_test_request("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Http(_)));
        assert!(err.to_diagnostic().starts_with("An error occurred: "));
    }
}

#[cfg(test)]
mod raw_request_tests {
    use super::*;

    #[tokio::test]
    async fn test_send_messages_returns_usage() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(text_response("hello"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let request = MessagesRequest {
            model: "claude-3-sonnet-20240229".to_string(),
            max_tokens: 16,
            system: "s".to_string(),
            messages: vec![Message::user("hi")],
        };
        let response = client.send_messages(&request).await.unwrap();

        assert_eq!(response.first_text(), Some("hello"));
        assert_eq!(response.usage.and_then(|u| u.input_tokens), Some(20));
    }
}
