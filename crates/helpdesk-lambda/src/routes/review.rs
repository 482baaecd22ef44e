use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use helpdesk_core::models::contact::UserInfo;
use helpdesk_core::models::review::{MAX_RATING, Review};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    user_info: Option<UserInfo>,
    review: Option<Review>,
}

pub async fn submit_review(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(user), Some(review)) = (body.user_info, body.review) else {
        return Err(ApiError::BadRequest(
            "Missing userInfo or review.".to_string(),
        ));
    };
    if !review.is_valid() {
        return Err(ApiError::BadRequest(format!(
            "Rating must be between 0 and {MAX_RATING}."
        )));
    }

    state.notifier.review(&user, &review).await?;
    tracing::info!(rating = review.rating, "review submitted");
    Ok(Json(json!({ "success": true })))
}
