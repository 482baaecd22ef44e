//! helpdesk-core
//!
//! Pure domain types, form validation, triage heuristics and document key
//! conventions. No network dependency; this is the shared vocabulary of
//! the helpdesk system.

pub mod error;
pub mod fallback;
pub mod ids;
pub mod keys;
pub mod models;
pub mod triage;
pub mod validation;
