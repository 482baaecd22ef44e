use serde::{Deserialize, Serialize};

/// A persisted turn of a ticket's triage conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    pub ticket_id: String,
    pub role: MessageRole,
    pub message: String,
    pub timestamp: jiff::Timestamp,
}

impl TicketMessage {
    /// A message stamped with the current time.
    pub fn now(ticket_id: &str, role: MessageRole, message: &str) -> Self {
        Self {
            ticket_id: ticket_id.to_string(),
            role,
            message: message.to_string(),
            timestamp: jiff::Timestamp::now(),
        }
    }
}

/// Role of a persisted ticket message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}
