//! Process configuration, read once at startup.
//!
//! Provider keys are optional: a missing key only disables the routes that
//! need it, which then answer with a "not configured" error.

use std::net::SocketAddr;
use std::time::Duration;

use helpdesk_ai::retry::RetryPolicy;
use helpdesk_ai::{gemini, openai};
use helpdesk_notify::mailer::DEFAULT_SENDGRID_BASE_URL;
use thiserror::Error;

pub const DEFAULT_BUCKET: &str = "helpdesk";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_EMAIL_FROM: &str = "no-reply@yourdomain.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Backing document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    S3,
    Memory,
}

/// Model that drives `/api/ticket/respond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageProvider {
    Gemini,
    OpenAi,
}

// No Debug: holds API keys.
#[derive(Clone)]
pub struct Config {
    pub store: StoreKind,
    pub bucket: String,
    pub bind_addr: SocketAddr,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub triage_provider: TriageProvider,
    pub retry: RetryPolicy,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_base_url: String,
    pub email_from: String,
    pub staff_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let store = match get("HELPDESK_STORE").as_deref() {
            None | Some("s3") => StoreKind::S3,
            Some("memory") => StoreKind::Memory,
            Some(other) => return Err(invalid("HELPDESK_STORE", other)),
        };

        let bind = or("HELPDESK_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind
            .parse()
            .map_err(|_| invalid("HELPDESK_BIND_ADDR", &bind))?;

        let triage_provider = match get("TRIAGE_PROVIDER").as_deref() {
            None | Some("openai") => TriageProvider::OpenAi,
            Some("gemini") => TriageProvider::Gemini,
            Some(other) => return Err(invalid("TRIAGE_PROVIDER", other)),
        };

        let mut retry = RetryPolicy::default();
        if let Some(raw) = get("AI_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| invalid("AI_TIMEOUT_SECS", &raw))?;
            if secs == 0 {
                return Err(invalid("AI_TIMEOUT_SECS", &raw));
            }
            retry.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get("AI_RETRIES") {
            retry.retries = raw.parse().map_err(|_| invalid("AI_RETRIES", &raw))?;
        }

        Ok(Self {
            store,
            bucket: or("HELPDESK_BUCKET", DEFAULT_BUCKET),
            bind_addr,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: or("GEMINI_MODEL", gemini::DEFAULT_MODEL),
            gemini_base_url: or("GEMINI_BASE_URL", gemini::DEFAULT_BASE_URL),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: or("OPENAI_MODEL", openai::DEFAULT_MODEL),
            openai_base_url: or("OPENAI_BASE_URL", openai::DEFAULT_BASE_URL),
            triage_provider,
            retry,
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            sendgrid_base_url: or("SENDGRID_BASE_URL", DEFAULT_SENDGRID_BASE_URL),
            email_from: or("EMAIL_FROM", DEFAULT_EMAIL_FROM),
            staff_email: get("STAFF_EMAIL"),
        })
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
    }
}
