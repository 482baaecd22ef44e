use serde::{Deserialize, Serialize};

/// A support request, created once per submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub ticket_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub status: TicketStatus,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
        }
    }
}

/// Validated contact fields for a ticket that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
}

impl NewTicket {
    pub fn into_ticket(self, ticket_id: String, created_at: jiff::Timestamp) -> Ticket {
        Ticket {
            ticket_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            category: self.category,
            status: TicketStatus::Open,
            created_at,
        }
    }
}
