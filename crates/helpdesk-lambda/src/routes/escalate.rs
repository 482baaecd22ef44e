use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use helpdesk_core::models::contact::UserInfo;
use helpdesk_core::models::conversation::ChatTurn;
use helpdesk_core::models::review::Urgency;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateRequest {
    user_info: Option<UserInfo>,
    transcript: Option<Vec<ChatTurn>>,
    urgency: Option<String>,
}

/// Hand the conversation to staff. One email attempt, no retry.
pub async fn escalate(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EscalateRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(user), Some(transcript)) = (body.user_info, body.transcript) else {
        return Err(ApiError::BadRequest(
            "Missing userInfo or transcript.".to_string(),
        ));
    };
    let urgency = body.urgency.as_deref().and_then(Urgency::from_label);

    state.notifier.escalation(&user, &transcript, urgency).await?;

    let urgent = urgency == Some(Urgency::Urgent);
    info!(category = %user.category, urgent, "conversation escalated");
    Ok(Json(json!({ "success": true })))
}
