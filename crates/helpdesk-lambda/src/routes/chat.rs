//! Chat relays: forward the browser's conversation to a model and hand the
//! reply back, falling back to a canned answer when the model is down.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use helpdesk_ai::chat::{ChatProvider, ChatReply, ChatRequest};
use helpdesk_core::models::contact::UserInfo;
use helpdesk_core::models::conversation::{ChatTurn, last_user_turn};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

const RELAY_TEMPERATURE: f32 = 0.7;
const RELAY_MAX_TOKENS: u32 = 512;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    user_info: Option<UserInfo>,
    messages: Option<Vec<ChatTurn>>,
    /// Gemini only; defaults to streaming.
    stream: Option<bool>,
}

#[derive(Serialize)]
pub struct RelayResponse {
    success: bool,
    ai: String,
}

impl RelayRequest {
    fn into_parts(self) -> Result<(UserInfo, Vec<ChatTurn>, bool), ApiError> {
        match (self.user_info, self.messages) {
            (Some(user), Some(turns)) => Ok((user, turns, self.stream.unwrap_or(true))),
            _ => Err(ApiError::BadRequest(
                "Missing userInfo or messages.".to_string(),
            )),
        }
    }
}

fn last_user_text(turns: &[ChatTurn]) -> Option<&str> {
    last_user_turn(turns).map(|t| t.content.as_str())
}

pub async fn gemini_chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RelayRequest>,
) -> Result<Response, ApiError> {
    let (user, turns, stream) = body.into_parts()?;
    let provider = state.gemini.as_ref();
    debug!(provider = provider.name(), category = %user.category, turns = turns.len(), stream, "relaying chat");

    let request = ChatRequest::from_turns(&turns);
    if !stream {
        return full_reply(provider, &request, &turns).await;
    }

    match provider.stream(&request).await {
        Ok(ChatReply::Stream { content_type, body }) => Ok((
            [
                (CONTENT_TYPE, content_type),
                (CACHE_CONTROL, "no-cache".to_string()),
            ],
            Body::from_stream(body),
        )
            .into_response()),
        Ok(ChatReply::Full(ai)) => Ok(Json(RelayResponse { success: true, ai }).into_response()),
        Err(e) => Err(ApiError::relay(e, last_user_text(&turns))),
    }
}

pub async fn openai_chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RelayRequest>,
) -> Result<Response, ApiError> {
    let (user, turns, _) = body.into_parts()?;
    let provider = state.openai.as_ref();
    debug!(provider = provider.name(), category = %user.category, turns = turns.len(), "relaying chat");

    let request = ChatRequest::from_turns(&turns)
        .with_temperature(RELAY_TEMPERATURE)
        .with_max_tokens(RELAY_MAX_TOKENS);
    full_reply(provider, &request, &turns).await
}

async fn full_reply(
    provider: &dyn ChatProvider,
    request: &ChatRequest,
    turns: &[ChatTurn],
) -> Result<Response, ApiError> {
    match provider.complete(request).await {
        Ok(ai) => Ok(Json(RelayResponse { success: true, ai }).into_response()),
        Err(e) => Err(ApiError::relay(e, last_user_text(turns))),
    }
}
