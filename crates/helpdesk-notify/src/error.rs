use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0} is not set")]
    NotConfigured(&'static str),

    #[error("email provider rejected the API key")]
    Unauthorized { body: String },

    #[error("email provider error: status {status}")]
    Provider { status: u16, body: String },

    #[error("email request failed: {0}")]
    Transport(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),
}

impl From<tera::Error> for NotifyError {
    fn from(e: tera::Error) -> Self {
        NotifyError::TemplateRender(e.to_string())
    }
}
