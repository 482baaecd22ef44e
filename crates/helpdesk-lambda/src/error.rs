use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use helpdesk_ai::error::AiError;
use helpdesk_core::error::CoreError;
use helpdesk_core::fallback::Fallback;
use helpdesk_core::validation::FieldErrors;
use helpdesk_notify::error::NotifyError;
use helpdesk_storage::error::StorageError;

pub const SENDGRID_UNAUTHORIZED: &str =
    "Unauthorized: Check SENDGRID_API_KEY is valid and has Mail send permission.";

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Per-field form errors.
    Validation(FieldErrors),
    BadRequest(String),
    NotFound(String),
    /// An upstream service failed; its status and body are surfaced.
    Service {
        status: StatusCode,
        message: String,
        details: Option<String>,
    },
    /// A chat relay failed; the caller still gets a canned answer.
    Relay {
        status: StatusCode,
        message: String,
        details: Option<String>,
        answer: &'static str,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<&'static str>,
}

impl ErrorBody {
    fn bare() -> Self {
        Self {
            success: false,
            error: None,
            errors: None,
            details: None,
            fallback: None,
            answer: None,
        }
    }

    fn message(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::bare()
        }
    }
}

impl ApiError {
    /// Turn a failed relay call into an error that carries the canned
    /// answer for the user's last message.
    pub fn relay(err: AiError, last_user_message: Option<&str>) -> Self {
        let status = ai_status(&err);
        tracing::warn!(error = %err, status = status.as_u16(), "chat relay failed, answering from fallback");
        ApiError::Relay {
            status,
            details: err.details().map(str::to_string),
            message: err.to_string(),
            answer: Fallback::for_message(last_user_message).answer(),
        }
    }
}

fn ai_status(e: &AiError) -> StatusCode {
    match e {
        AiError::NotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AiError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        AiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        AiError::Upstream { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        AiError::InvalidKey { .. } | AiError::Transport { .. } | AiError::ResponseParse { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    errors: Some(errors),
                    ..ErrorBody::bare()
                },
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::Service {
                status,
                message,
                details,
            } => (
                status,
                ErrorBody {
                    details,
                    ..ErrorBody::message(message)
                },
            ),
            ApiError::Relay {
                status,
                message,
                details,
                answer,
            } => (
                status,
                ErrorBody {
                    details,
                    fallback: Some(true),
                    answer: Some(answer),
                    ..ErrorBody::message(message)
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Server error.".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("not found: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(e: AiError) -> Self {
        let status = ai_status(&e);
        tracing::warn!(error = %e, status = status.as_u16(), "ai provider call failed");
        ApiError::Service {
            status,
            details: e.details().map(str::to_string),
            message: e.to_string(),
        }
    }
}

impl From<NotifyError> for ApiError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::NotConfigured(_) => ApiError::Service {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: e.to_string(),
                details: None,
            },
            NotifyError::Unauthorized { body } => ApiError::Service {
                status: StatusCode::UNAUTHORIZED,
                message: SENDGRID_UNAUTHORIZED.to_string(),
                details: Some(body).filter(|b| !b.is_empty()),
            },
            NotifyError::Provider { status, body } => ApiError::Service {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: format!("SendGrid error: status {status}"),
                details: Some(body).filter(|b| !b.is_empty()),
            },
            NotifyError::Transport(msg) => ApiError::Service {
                status: StatusCode::BAD_GATEWAY,
                message: "SendGrid request failed".to_string(),
                details: Some(msg),
            },
            NotifyError::TemplateRender(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidTicketId(_) => ApiError::BadRequest("ticketId is invalid.".to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
