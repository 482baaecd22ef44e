mod support;

use std::time::Duration;

use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use helpdesk_ai::error::AiError;
use helpdesk_core::fallback::{GENERIC_ANSWER, keyword_answer};
use serde_json::{Value, json};
use support::{Harness, Outbox, ScriptedProvider};

fn relay_body(last_user_message: &str) -> Value {
    json!({
        "userInfo": {"name": "Lin", "email": "lin@example.com", "phone": "1", "category": "Network", "message": "help"},
        "messages": [
            {"role": "user", "content": "hello"},
            {"role": "ai", "content": "How can I help?"},
            {"role": "user", "content": last_user_message},
        ],
        "stream": false,
    })
}

#[tokio::test]
async fn openai_relay_returns_the_reply() {
    let h = Harness::new(
        ScriptedProvider::replying(vec![Ok("Try restarting the router.".to_string())]),
        Outbox::default(),
    );
    let (status, body) = h.post("/api/openai-chat", relay_body("wifi is down")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "ai": "Try restarting the router."}));

    let requests = h.provider.requests.lock().unwrap();
    assert_eq!(requests[0].temperature, Some(0.7));
    assert_eq!(requests[0].max_tokens, Some(512));
    assert_eq!(requests[0].messages.len(), 3);
}

#[tokio::test]
async fn timeout_falls_back_to_the_keyword_answer() {
    let h = Harness::new(
        ScriptedProvider::failing(AiError::Timeout {
            provider: "openai",
            timeout: Duration::from_secs(30),
        }),
        Outbox::default(),
    );
    let (status, body) = h
        .post("/api/openai-chat", relay_body("My WiFi keeps dropping"))
        .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["success"], false);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["answer"], keyword_answer("wifi").unwrap());
    assert!(body["answer"].as_str().unwrap().contains("router"));
}

#[tokio::test]
async fn unmatched_message_gets_the_generic_answer() {
    let h = Harness::new(
        ScriptedProvider::failing(AiError::Upstream {
            provider: "gemini",
            status: 503,
            body: "overloaded".to_string(),
        }),
        Outbox::default(),
    );
    let (status, body) = h
        .post("/api/gemini-chat", relay_body("something odd happened"))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["answer"], GENERIC_ANSWER);
    assert_eq!(body["details"], "overloaded");
}

#[tokio::test]
async fn rejected_key_is_a_bad_gateway_with_fallback() {
    let h = Harness::new(
        ScriptedProvider::failing(AiError::InvalidKey {
            provider: "openai",
            body: String::new(),
        }),
        Outbox::default(),
    );
    let (status, body) = h.post("/api/openai-chat", relay_body("refund please")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["answer"], keyword_answer("refund").unwrap());
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn gemini_streams_the_upstream_body() {
    let h = Harness::new(
        ScriptedProvider::streaming(vec!["[{\"candidates\":", "[]}]"]),
        Outbox::default(),
    );
    let mut body = relay_body("hi");
    body.as_object_mut().unwrap().remove("stream");

    let response = h.send("POST", "/api/gemini-chat", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "application/json; charset=UTF-8"
    );
    assert_eq!(response.headers()[CACHE_CONTROL], "no-cache");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"[{\"candidates\":[]}]");
}

#[tokio::test]
async fn gemini_without_streaming_returns_json() {
    let h = Harness::new(
        ScriptedProvider::replying(vec![Ok("Hello Lin".to_string())]),
        Outbox::default(),
    );
    let (status, body) = h.post("/api/gemini-chat", relay_body("hi")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai"], "Hello Lin");
}

#[tokio::test]
async fn relay_requires_user_info_and_messages() {
    let h = Harness::quiet();
    let (status, body) = h
        .post("/api/openai-chat", json!({"messages": []}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing userInfo or messages.");
    assert!(h.provider.requests.lock().unwrap().is_empty());
}
