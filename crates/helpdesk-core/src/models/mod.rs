pub mod contact;
pub mod conversation;
pub mod message;
pub mod review;
pub mod ticket;
