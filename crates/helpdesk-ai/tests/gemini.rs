mod support;

use std::time::Duration;

use futures::TryStreamExt;
use helpdesk_ai::chat::{ChatMessage, ChatProvider, ChatReply, ChatRequest, ChatRole};
use helpdesk_ai::error::AiError;
use helpdesk_ai::gemini::GeminiClient;
use helpdesk_ai::retry::RetryPolicy;
use mockito::Matcher;
use serde_json::json;
use tokio::io::AsyncWriteExt;

fn request() -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage {
                role: ChatRole::User,
                content: "Outlook keeps asking for my password".to_string(),
            },
            ChatMessage {
                role: ChatRole::Assistant,
                content: "Since when?".to_string(),
            },
        ],
        ..ChatRequest::default()
    }
}

fn client(url: String) -> GeminiClient {
    GeminiClient::new(reqwest::Client::new(), Some("g-key".to_string())).with_base_url(url)
}

#[tokio::test]
async fn complete_joins_candidate_parts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/models/gemini-2.5-pro:generateContent")
        .match_header("x-goog-api-key", "g-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Outlook keeps asking for my password"}]},
                {"role": "model", "parts": [{"text": "Since when?"}]},
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Have you "},{"text":"changed it recently?"}]}}]}"#)
        .create_async()
        .await;

    let reply = client(server.url()).complete(&request()).await.unwrap();

    assert_eq!(reply, "Have you changed it recently?");
    mock.assert_async().await;
}

#[tokio::test]
async fn system_prompt_and_sampling_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/models/gemini-2.5-pro:generateContent")
        .match_body(Matcher::PartialJson(json!({
            "systemInstruction": {"parts": [{"text": "Triage only."}]},
            "generationConfig": {"maxOutputTokens": 400},
        })))
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let reply = client(server.url())
        .complete(&request().with_system("Triage only.").with_max_tokens(400))
        .await
        .unwrap();

    assert_eq!(reply, "");
    mock.assert_async().await;
}

#[tokio::test]
async fn stream_relays_upstream_bytes_and_content_type() {
    let upstream = r#"[{"candidates":[{"content":{"parts":[{"text":"Hi"}]}}]}]"#;
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/models/gemini-2.5-pro:streamGenerateContent")
        .with_status(200)
        .with_header("content-type", "application/json; charset=UTF-8")
        .with_body(upstream)
        .create_async()
        .await;

    let reply = client(server.url()).stream(&request()).await.unwrap();
    let ChatReply::Stream { content_type, body } = reply else {
        panic!("expected a streamed reply");
    };
    let chunks: Vec<bytes::Bytes> = body.try_collect().await.unwrap();
    let relayed: Vec<u8> = chunks.concat();

    assert_eq!(content_type, "application/json; charset=UTF-8");
    assert_eq!(relayed, upstream.as_bytes());
}

#[tokio::test]
async fn invalid_key_is_recognised_from_bad_request_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/models/gemini-2.5-pro:streamGenerateContent")
        .with_status(400)
        .with_body(r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#)
        .create_async()
        .await;

    let err = match client(server.url()).stream(&request()).await {
        Err(e) => e,
        Ok(_) => panic!("expected an error"),
    };
    assert!(matches!(err, AiError::InvalidKey { provider: "gemini", .. }));
}

#[tokio::test]
async fn other_bad_requests_pass_the_status_through() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/models/gemini-2.5-pro:generateContent")
        .with_status(400)
        .with_body(r#"{"error":{"message":"contents is empty"}}"#)
        .create_async()
        .await;

    let err = client(server.url()).complete(&request()).await.unwrap_err();
    assert!(matches!(err, AiError::Upstream { status: 400, .. }));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let unreachable = GeminiClient::new(reqwest::Client::new(), Some("k".to_string()))
        .with_base_url("http://127.0.0.1:9");

    let err = unreachable.complete(&request()).await.unwrap_err();
    assert!(matches!(err, AiError::Transport { .. } | AiError::Timeout { .. }));
}

#[tokio::test]
async fn stalled_error_body_is_bounded_by_the_policy_timeout() {
    let (url, _) = support::serve(|_, mut socket| async move {
        support::read_request(&mut socket).await;
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\npartial")
            .await
            .unwrap();
        support::hold(socket, Duration::from_secs(10)).await;
    })
    .await;

    let stalled = client(url).with_retry_policy(RetryPolicy {
        timeout: Duration::from_millis(300),
        retries: 0,
    });
    let outcome = tokio::time::timeout(Duration::from_secs(3), stalled.stream(&request()))
        .await
        .expect("stream() must give up within the policy timeout");

    let err = match outcome {
        Err(e) => e,
        Ok(_) => panic!("expected an error"),
    };
    assert!(matches!(err, AiError::Timeout { provider: "gemini", .. }));
}

#[tokio::test]
async fn truncated_error_body_is_a_transport_error() {
    let (url, _) = support::serve(|_, mut socket| async move {
        support::read_request(&mut socket).await;
        socket
            .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 1000\r\n\r\npartial")
            .await
            .unwrap();
        drop(socket);
    })
    .await;

    let err = match client(url).stream(&request()).await {
        Err(e) => e,
        Ok(_) => panic!("expected an error"),
    };
    assert!(matches!(err, AiError::Transport { provider: "gemini", .. }));
}
