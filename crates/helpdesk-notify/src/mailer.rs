//! Transactional email delivery.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::error::NotifyError;

pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

/// A single outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
    pub text: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// SendGrid v3 `mail/send`.
#[derive(Clone)]
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl SendGridMailer {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: DEFAULT_SENDGRID_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// SendGrid wants `text/plain` ahead of `text/html` when both are present.
fn payload(email: &Email) -> serde_json::Value {
    let mut content = Vec::new();
    if let Some(text) = &email.text {
        content.push(json!({ "type": "text/plain", "value": text }));
    }
    content.push(json!({ "type": "text/html", "value": email.html }));

    json!({
        "personalizations": [{ "to": [{ "email": email.to }] }],
        "from": { "email": email.from },
        "subject": email.subject,
        "content": content,
    })
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(NotifyError::NotConfigured("SENDGRID_API_KEY"))?;

        let url = format!("{}/v3/mail/send", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .post(&url)
            .bearer_auth(key)
            .json(&payload(email))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        debug!(status = status.as_u16(), "sendgrid responded");
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        if status.as_u16() == 401 {
            Err(NotifyError::Unauthorized { body })
        } else {
            Err(NotifyError::Provider {
                status: status.as_u16(),
                body,
            })
        }
    }
}
