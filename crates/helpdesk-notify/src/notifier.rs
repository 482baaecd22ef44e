use std::sync::Arc;

use tracing::info;

use helpdesk_core::models::contact::UserInfo;
use helpdesk_core::models::conversation::ChatTurn;
use helpdesk_core::models::message::TicketMessage;
use helpdesk_core::models::review::{Review, Urgency};
use helpdesk_core::models::ticket::Ticket;

use crate::error::NotifyError;
use crate::mailer::{Email, Mailer};
use crate::templates::{self, Rendered};

/// Sends staff-facing notifications from a fixed sender address.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from: String,
    staff: Option<String>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, from: impl Into<String>, staff: Option<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
            staff,
        }
    }

    pub async fn escalation(
        &self,
        user: &UserInfo,
        transcript: &[ChatTurn],
        urgency: Option<Urgency>,
    ) -> Result<(), NotifyError> {
        self.deliver("escalation", templates::escalation(user, transcript, urgency)?)
            .await
    }

    pub async fn review(&self, user: &UserInfo, review: &Review) -> Result<(), NotifyError> {
        self.deliver("review", templates::review(user, review)?).await
    }

    pub async fn ticket_completed(
        &self,
        ticket_id: &str,
        ticket: Option<&Ticket>,
        messages: &[TicketMessage],
    ) -> Result<(), NotifyError> {
        let rendered = templates::ticket_transcript(ticket_id, ticket, messages)?;
        self.deliver("ticket_completed", rendered).await
    }

    async fn deliver(&self, kind: &'static str, rendered: Rendered) -> Result<(), NotifyError> {
        let to = self
            .staff
            .as_deref()
            .ok_or(NotifyError::NotConfigured("STAFF_EMAIL"))?;

        let email = Email {
            to: to.to_string(),
            from: self.from.clone(),
            subject: rendered.subject,
            html: rendered.html,
            text: None,
        };
        self.mailer.send(&email).await?;

        info!(kind, subject = %email.subject, "staff notification sent");
        Ok(())
    }
}
