//! Ticket identifier generation.
//!
//! Identifiers are short random strings over the URL-safe alphabet so they
//! can travel in paths and email subjects unescaped. Uniqueness is enforced
//! by the store's create-only insert, not here.

use rand::Rng;

use crate::error::CoreError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a generated ticket identifier.
pub const TICKET_ID_LEN: usize = 10;

/// Draw a fresh ticket identifier.
pub fn ticket_id() -> String {
    let mut rng = rand::thread_rng();
    (0..TICKET_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Check that a client-supplied identifier is safe to use as a key segment.
///
/// Accepts any non-empty string over the generator alphabet, up to 64
/// characters, so identifiers minted by older deployments keep working.
pub fn parse_ticket_id(raw: &str) -> Result<&str, CoreError> {
    let valid = !raw.is_empty()
        && raw.len() <= 64
        && raw.bytes().all(|b| ALPHABET.contains(&b));
    if valid {
        Ok(raw)
    } else {
        Err(CoreError::InvalidTicketId(raw.to_string()))
    }
}
