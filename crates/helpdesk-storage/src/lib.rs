//! helpdesk-storage
//!
//! Document persistence for tickets and their messages. A small
//! insert/find/find-one surface over S3, plus an in-memory store for local
//! runs and tests.

pub mod client;
pub mod error;
pub mod objects;
pub mod store;
pub mod tickets;
