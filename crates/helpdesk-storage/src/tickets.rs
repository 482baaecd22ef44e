//! Typed access to the `tickets` and `ticket_messages` collections.

use helpdesk_core::keys;
use helpdesk_core::models::message::TicketMessage;
use helpdesk_core::models::ticket::Ticket;
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::DocumentStore;

pub async fn insert_ticket(store: &dyn DocumentStore, ticket: &Ticket) -> Result<(), StorageError> {
    let body = serde_json::to_vec(ticket)?;
    store.insert_one(&keys::ticket(&ticket.ticket_id), body).await
}

pub async fn find_ticket(
    store: &dyn DocumentStore,
    ticket_id: &str,
) -> Result<Option<Ticket>, StorageError> {
    match store.find_one(&keys::ticket(ticket_id)).await? {
        Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
        None => Ok(None),
    }
}

/// Append a message to a ticket's conversation. The v7 suffix is monotonic
/// within the process, so messages sharing a timestamp keep arrival order.
pub async fn append_message(
    store: &dyn DocumentStore,
    message: &TicketMessage,
) -> Result<(), StorageError> {
    let key = keys::ticket_message(&message.ticket_id, message.timestamp, Uuid::now_v7());
    let body = serde_json::to_vec(message)?;
    store.insert_one(&key, body).await
}

/// A ticket's messages ordered by timestamp; equal timestamps keep key order.
pub async fn list_messages(
    store: &dyn DocumentStore,
    ticket_id: &str,
) -> Result<Vec<TicketMessage>, StorageError> {
    let mut messages = store
        .find(&keys::ticket_messages_prefix(ticket_id))
        .await?
        .iter()
        .map(|body| serde_json::from_slice::<TicketMessage>(body))
        .collect::<Result<Vec<_>, _>>()?;
    messages.sort_by_key(|m| m.timestamp);
    Ok(messages)
}
