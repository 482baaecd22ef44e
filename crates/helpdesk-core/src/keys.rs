//! Document key conventions.
//!
//! Pure string functions with no storage dependency. These define the canonical
//! layout of the `tickets` and `ticket_messages` collections.

use uuid::Uuid;

pub const TICKETS_PREFIX: &str = "tickets/";

pub const TICKET_MESSAGES_PREFIX: &str = "ticket_messages/";

pub fn ticket(ticket_id: &str) -> String {
    format!("{TICKETS_PREFIX}{ticket_id}.json")
}

pub fn ticket_messages_prefix(ticket_id: &str) -> String {
    format!("{TICKET_MESSAGES_PREFIX}{ticket_id}/")
}

/// Key for a single message. The zero-padded timestamp keeps lexicographic
/// key order equal to arrival order.
pub fn ticket_message(ticket_id: &str, timestamp: jiff::Timestamp, message_id: Uuid) -> String {
    format!(
        "{TICKET_MESSAGES_PREFIX}{ticket_id}/{:020}-{}.json",
        timestamp.as_nanosecond(),
        message_id.simple()
    )
}
