use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{provider} API key is not set")]
    NotConfigured { provider: &'static str },

    #[error("{provider} rejected the API key")]
    InvalidKey { provider: &'static str, body: String },

    #[error("{provider} rate limit exceeded")]
    RateLimited { provider: &'static str, body: String },

    #[error("{provider} did not respond within {}s", .timeout.as_secs())]
    Timeout {
        provider: &'static str,
        timeout: Duration,
    },

    #[error("{provider} API error: status {status}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} response parsing failed: {message}")]
    ResponseParse {
        provider: &'static str,
        message: String,
    },
}

impl AiError {
    /// Provider response body, when the provider sent one.
    pub fn details(&self) -> Option<&str> {
        match self {
            AiError::InvalidKey { body, .. }
            | AiError::RateLimited { body, .. }
            | AiError::Upstream { body, .. } => Some(body.as_str()).filter(|b| !b.is_empty()),
            _ => None,
        }
    }
}

/// Classify a non-2xx provider response.
pub fn from_status(provider: &'static str, status: u16, body: String) -> AiError {
    let lower = body.to_ascii_lowercase();
    let mentions_key = ["api key not valid", "api_key_invalid", "invalid api key"]
        .iter()
        .any(|needle| lower.contains(needle));
    match status {
        401 | 403 => AiError::InvalidKey { provider, body },
        400 if mentions_key => AiError::InvalidKey { provider, body },
        429 => AiError::RateLimited { provider, body },
        _ => AiError::Upstream {
            provider,
            status,
            body,
        },
    }
}
