//! Google Gemini `generateContent` / `streamGenerateContent`.
//!
//! The streaming endpoint (without `alt=sse`) answers with a JSON array of
//! `GenerateContentResponse` chunks delivered incrementally. The relay hands
//! those bytes to the browser untouched, so nothing here parses the stream.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chat::{ChatProvider, ChatReply, ChatRequest, ChatRole};
use crate::error::{self, AiError};
use crate::retry::RetryPolicy;

pub const PROVIDER: &str = "gemini";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    policy: RetryPolicy,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1/models/{}:{method}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.api_key
            .as_deref()
            .ok_or(AiError::NotConfigured { provider: PROVIDER })
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    fn from_chat(request: &'a ChatRequest) -> Self {
        let contents = request
            .messages
            .iter()
            .map(|m| Content {
                role: Some(match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                }),
                parts: [Part { text: &m.content }],
            })
            .collect();

        let system_instruction = request.system.as_deref().map(|text| Content {
            role: None,
            parts: [Part { text }],
        });

        let generation_config = (request.temperature.is_some() || request.max_tokens.is_some())
            .then_some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            });

        Self {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

/// Concatenated text of the first candidate.
fn reply_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default()
}

// ── Provider ─────────────────────────────────────────────────────────────────

#[async_trait]
impl ChatProvider for GeminiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, AiError> {
        let key = self.api_key()?;
        let url = self.endpoint("generateContent");
        let body = GenerateRequest::from_chat(request);

        debug!(model = %self.model, turns = request.messages.len(), "sending generateContent");

        let (status, text) = self
            .policy
            .send(PROVIDER, || {
                let req = self.http.post(&url).header("x-goog-api-key", key).json(&body);
                async move {
                    let resp = req.send().await?;
                    let status = resp.status();
                    let text = resp.text().await?;
                    Ok::<_, reqwest::Error>((status, text))
                }
            })
            .await?;

        if !status.is_success() {
            return Err(error::from_status(PROVIDER, status.as_u16(), text));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| AiError::ResponseParse {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        Ok(reply_text(parsed))
    }

    async fn stream(&self, request: &ChatRequest) -> Result<ChatReply, AiError> {
        let key = self.api_key()?;
        let url = self.endpoint("streamGenerateContent");
        let body = GenerateRequest::from_chat(request);

        let resp = self
            .policy
            .send(PROVIDER, || {
                self.http
                    .post(&url)
                    .header("x-goog-api-key", key)
                    .json(&body)
                    .send()
            })
            .await?;

        let status = resp.status();
        info!(status = status.as_u16(), model = %self.model, "gemini stream opened");

        if !status.is_success() {
            let text = self.policy.read_text(PROVIDER, resp).await?;
            return Err(error::from_status(PROVIDER, status.as_u16(), text));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        let body = resp
            .bytes_stream()
            .map_err(|e| AiError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })
            .boxed();

        Ok(ChatReply::Stream { content_type, body })
    }
}
