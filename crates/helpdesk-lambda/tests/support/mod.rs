//! Test doubles and request helpers shared by the API tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use helpdesk_ai::chat::{ChatProvider, ChatReply, ChatRequest};
use helpdesk_ai::error::AiError;
use helpdesk_lambda::state::AppState;
use helpdesk_notify::error::NotifyError;
use helpdesk_notify::mailer::{Email, Mailer};
use helpdesk_notify::notifier::Notifier;
use helpdesk_storage::store::MemoryDocumentStore;
use serde_json::Value;
use tower::ServiceExt;

/// Answers from a queue; an empty queue answers "ok".
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    chunks: Option<Vec<&'static str>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn replying(replies: Vec<Result<String, AiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn streaming(chunks: Vec<&'static str>) -> Self {
        Self {
            chunks: Some(chunks),
            ..Self::default()
        }
    }

    pub fn failing(err: AiError) -> Self {
        Self::replying(vec![Err(err)])
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }

    async fn stream(&self, request: &ChatRequest) -> Result<ChatReply, AiError> {
        match &self.chunks {
            Some(chunks) => {
                self.requests.lock().unwrap().push(request.clone());
                let items: Vec<Result<Bytes, AiError>> =
                    chunks.iter().copied().map(|c| Ok(Bytes::from_static(c.as_bytes()))).collect();
                Ok(ChatReply::Stream {
                    content_type: "application/json; charset=UTF-8".to_string(),
                    body: Box::pin(futures::stream::iter(items)),
                })
            }
            None => self.complete(request).await.map(ChatReply::Full),
        }
    }
}

/// Records every email; optionally fails every send.
#[derive(Default)]
pub struct Outbox {
    pub sent: Mutex<Vec<Email>>,
    pub attempts: Mutex<usize>,
    fail: Option<fn() -> NotifyError>,
}

impl Outbox {
    pub fn failing(fail: fn() -> NotifyError) -> Self {
        Self {
            fail: Some(fail),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Mailer for Outbox {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(fail) = self.fail {
            return Err(fail());
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub struct Harness {
    pub app: Router,
    pub store: Arc<MemoryDocumentStore>,
    pub provider: Arc<ScriptedProvider>,
    pub outbox: Arc<Outbox>,
}

impl Harness {
    pub fn new(provider: ScriptedProvider, outbox: Outbox) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let provider = Arc::new(provider);
        let outbox = Arc::new(outbox);
        let state = AppState {
            store: store.clone(),
            gemini: provider.clone(),
            openai: provider.clone(),
            triage: provider.clone(),
            notifier: Notifier::new(
                outbox.clone(),
                "helpdesk@example.com",
                Some("staff@example.com".to_string()),
            ),
        };
        Self {
            app: helpdesk_lambda::router(state),
            store,
            provider,
            outbox,
        }
    }

    pub fn quiet() -> Self {
        Self::new(ScriptedProvider::default(), Outbox::default())
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.raw("POST", uri, body.to_string()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.raw("GET", uri, String::new()).await
    }

    pub async fn raw(&self, method: &str, uri: &str, body: String) -> (StatusCode, Value) {
        let response = self.send(method, uri, body).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn send(&self, method: &str, uri: &str, body: String) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }
}
