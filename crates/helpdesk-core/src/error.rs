use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid ticket id: {0}")]
    InvalidTicketId(String),
}
