//! helpdesk-ai
//!
//! Chat model invocation for the triage assistant and the chat relay.
//! Two interchangeable HTTP backends (Gemini, OpenAI) behind one trait, with
//! a bounded wait and a single retry on connection reset.

pub mod chat;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod retry;
