use std::sync::Arc;

use helpdesk_ai::chat::ChatProvider;
use helpdesk_ai::gemini::GeminiClient;
use helpdesk_ai::openai::OpenAiClient;
use helpdesk_notify::mailer::SendGridMailer;
use helpdesk_notify::notifier::Notifier;
use helpdesk_storage::store::{DocumentStore, MemoryDocumentStore, S3DocumentStore};

use crate::config::{Config, StoreKind, TriageProvider};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Relay target of `/api/gemini-chat`.
    pub gemini: Arc<dyn ChatProvider>,
    /// Relay target of `/api/openai-chat`.
    pub openai: Arc<dyn ChatProvider>,
    /// Model behind `/api/ticket/respond`.
    pub triage: Arc<dyn ChatProvider>,
    pub notifier: Notifier,
}

impl AppState {
    /// Wire real providers from configuration. The S3 client itself is
    /// only built on the first store call.
    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::new();

        let store: Arc<dyn DocumentStore> = match config.store {
            StoreKind::S3 => Arc::new(S3DocumentStore::new(config.bucket.clone())),
            StoreKind::Memory => Arc::new(MemoryDocumentStore::new()),
        };

        let gemini: Arc<dyn ChatProvider> = Arc::new(
            GeminiClient::new(http.clone(), config.gemini_api_key.clone())
                .with_base_url(config.gemini_base_url.clone())
                .with_model(config.gemini_model.clone())
                .with_retry_policy(config.retry),
        );
        let openai: Arc<dyn ChatProvider> = Arc::new(
            OpenAiClient::new(http.clone(), config.openai_api_key.clone())
                .with_base_url(config.openai_base_url.clone())
                .with_model(config.openai_model.clone())
                .with_retry_policy(config.retry),
        );
        let triage = match config.triage_provider {
            TriageProvider::OpenAi => openai.clone(),
            TriageProvider::Gemini => gemini.clone(),
        };

        let mailer = SendGridMailer::new(http, config.sendgrid_api_key.clone())
            .with_base_url(config.sendgrid_base_url.clone());
        let notifier = Notifier::new(
            Arc::new(mailer),
            config.email_from.clone(),
            config.staff_email.clone(),
        );

        Self {
            store,
            gemini,
            openai,
            triage,
            notifier,
        }
    }
}
