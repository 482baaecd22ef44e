//! Provider-neutral chat types and the `ChatProvider` seam.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use helpdesk_core::models::conversation::{ChatTurn, TurnRole};

use crate::error::AiError;

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl From<&ChatTurn> for ChatMessage {
    fn from(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => ChatRole::User,
            TurnRole::Ai => ChatRole::Assistant,
        };
        ChatMessage {
            role,
            content: turn.content.clone(),
        }
    }
}

/// One model call: optional system instructions, the ordered history, and
/// sampling parameters (provider defaults when unset).
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn from_turns(turns: &[ChatTurn]) -> Self {
        Self {
            messages: turns.iter().map(ChatMessage::from).collect(),
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A reply that is either complete or still arriving.
pub enum ChatReply {
    Full(String),
    Stream {
        /// Upstream content type, relayed unchanged.
        content_type: String,
        body: BoxStream<'static, Result<Bytes, AiError>>,
    },
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Ask for the full reply text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, AiError>;

    /// Ask for an incrementally delivered reply. Providers without a
    /// streaming endpoint answer in full.
    async fn stream(&self, request: &ChatRequest) -> Result<ChatReply, AiError> {
        self.complete(request).await.map(ChatReply::Full)
    }
}
