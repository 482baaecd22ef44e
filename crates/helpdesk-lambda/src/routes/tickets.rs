use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use helpdesk_ai::chat::ChatRequest;
use helpdesk_core::ids;
use helpdesk_core::models::conversation::{ChatTurn, TurnRole};
use helpdesk_core::models::message::{MessageRole, TicketMessage};
use helpdesk_core::models::ticket::NewTicket;
use helpdesk_core::triage::{self, SYSTEM_PROMPT};
use helpdesk_core::validation::{ContactForm, validate_contact_form};
use helpdesk_storage::error::StorageError;
use helpdesk_storage::tickets;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Identifier draws before giving up on a collision streak.
const MAX_ID_ATTEMPTS: usize = 3;

const TRIAGE_TEMPERATURE: f32 = 0.2;
const TRIAGE_MAX_TOKENS: u32 = 400;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateResponse {
    success: bool,
    ticket_id: String,
    data: NewTicket,
    ai: TriageSeed,
}

#[derive(Serialize)]
pub struct TriageSeed {
    category: String,
    questions: Vec<String>,
}

pub async fn initiate(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Result<Json<InitiateResponse>, ApiError> {
    let new_ticket = validate_contact_form(&form).map_err(ApiError::Validation)?;

    for attempt in 1..=MAX_ID_ATTEMPTS {
        let ticket = new_ticket
            .clone()
            .into_ticket(ids::ticket_id(), jiff::Timestamp::now());
        match tickets::insert_ticket(state.store.as_ref(), &ticket).await {
            Ok(()) => {
                info!(ticket_id = %ticket.ticket_id, category = %ticket.category, "ticket created");
                return Ok(Json(InitiateResponse {
                    success: true,
                    ticket_id: ticket.ticket_id,
                    ai: TriageSeed {
                        category: new_ticket.category.clone(),
                        questions: Vec::new(),
                    },
                    data: new_ticket,
                }));
            }
            Err(StorageError::AlreadyExists { .. }) => {
                warn!(attempt, "ticket id collision, drawing another");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::Internal(format!(
        "no free ticket id after {MAX_ID_ATTEMPTS} attempts"
    )))
}

/// Loosely typed so a wrong-typed field gets its own message.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    #[serde(default)]
    ticket_id: Value,
    #[serde(default)]
    response: Value,
}

#[derive(Serialize)]
pub struct RespondResponse {
    success: bool,
    next: NextTurn,
    messages: Vec<ChatTurn>,
}

#[derive(Serialize)]
pub struct NextTurn {
    role: MessageRole,
    message: String,
    done: bool,
}

pub async fn respond(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RespondRequest>,
) -> Result<Json<RespondResponse>, ApiError> {
    let raw_id = body
        .ticket_id
        .as_str()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("ticketId is required.".to_string()))?;
    let ticket_id = ids::parse_ticket_id(raw_id)?;
    if !body.response.is_array() {
        return Err(ApiError::BadRequest("Messages array required.".to_string()));
    }
    let turns: Vec<ChatTurn> = serde_json::from_value(body.response)
        .map_err(|e| ApiError::BadRequest(format!("Invalid message in array: {e}")))?;

    let store = state.store.as_ref();
    if let Some(last) = turns.last().filter(|t| t.role == TurnRole::User) {
        let message = TicketMessage::now(ticket_id, MessageRole::User, &last.content);
        tickets::append_message(store, &message).await?;
    }

    let request = ChatRequest::from_turns(&turns)
        .with_system(SYSTEM_PROMPT)
        .with_temperature(TRIAGE_TEMPERATURE)
        .with_max_tokens(TRIAGE_MAX_TOKENS);
    let reply = state.triage.complete(&request).await?;

    let message = TicketMessage::now(ticket_id, MessageRole::Assistant, &reply);
    tickets::append_message(store, &message).await?;

    let done = triage::is_conversation_complete(&reply);
    if done {
        info!(ticket_id = %ticket_id, "triage complete, notifying staff");
        if let Err(e) = notify_completed(&state, ticket_id).await {
            warn!(ticket_id = %ticket_id, error = %e, "ticket notification failed");
        }
    }

    Ok(Json(RespondResponse {
        success: true,
        next: NextTurn {
            role: MessageRole::Assistant,
            message: reply,
            done,
        },
        messages: turns,
    }))
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn notify_completed(state: &AppState, ticket_id: &str) -> Result<(), BoxError> {
    let store = state.store.as_ref();
    let ticket = tickets::find_ticket(store, ticket_id).await?;
    let transcript = tickets::list_messages(store, ticket_id).await?;
    state
        .notifier
        .ticket_completed(ticket_id, ticket.as_ref(), &transcript)
        .await?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    success: bool,
    ticket_id: String,
    messages: Vec<TicketMessage>,
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let ticket_id = ids::parse_ticket_id(&id)?;
    let store = state.store.as_ref();
    if tickets::find_ticket(store, ticket_id).await?.is_none() {
        return Err(ApiError::NotFound("Ticket not found.".to_string()));
    }
    let messages = tickets::list_messages(store, ticket_id).await?;
    Ok(Json(TranscriptResponse {
        success: true,
        ticket_id: ticket_id.to_string(),
        messages,
    }))
}
