pub mod chat;
pub mod escalate;
pub mod health;
pub mod review;
pub mod tickets;
