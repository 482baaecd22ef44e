//! helpdesk-notify
//!
//! Staff notifications: HTML bodies rendered with Tera and delivered
//! through a transactional email provider (SendGrid).

pub mod error;
pub mod mailer;
pub mod notifier;
pub mod templates;
