//! Triage conversation rules: the assistant's instructions and the
//! heuristic that decides when the conversation is over.

use std::sync::LazyLock;

use regex::Regex;

/// Instructions given to the triage assistant ahead of the conversation.
pub const SYSTEM_PROMPT: &str = "You are a professional, friendly Support-Triage Assistant for a technology company. When given a user's initial support request and their selected category, your job is to:
- Politely and concisely ask up to 3 clarifying questions, only if absolutely necessary, to diagnose the issue.
- Never ask for information the user has already provided.
- End the conversation with a friendly closing when you have all the information you need (e.g., \"Thank you, that's all I need for now. Our team will follow up soon.\").
- If the user says \"no\" or \"that's all\", end the chat politely.
- Keep your responses short and clear.
- Do not answer questions unrelated to support triage.
- Always reply as the assistant in a helpful, concise, and professional way.";

/// Phrases that mark an assistant reply as a closing.
pub const CLOSING_PHRASES: &[&str] = &[
    "no further questions",
    "that is all",
    "thank you",
    "i have all the information",
    "our team will follow up soon",
    "that's all",
];

static CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = CLOSING_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternatives}")).expect("closing phrases form a valid pattern")
});

/// Whether the assistant's latest reply closes the triage conversation.
pub fn is_conversation_complete(reply: &str) -> bool {
    CLOSING.is_match(reply)
}
