//! Notification bodies.
//!
//! Templates are registered under `.html` names so Tera autoescapes every
//! interpolated value; user-typed text never reaches the inbox as markup.

use serde::Serialize;
use tera::{Context, Tera};

use helpdesk_core::models::contact::UserInfo;
use helpdesk_core::models::conversation::{ChatTurn, TurnRole};
use helpdesk_core::models::message::{MessageRole, TicketMessage};
use helpdesk_core::models::review::{MAX_RATING, Review, Urgency};
use helpdesk_core::models::ticket::Ticket;

use crate::error::NotifyError;

const ESCALATION: &str = r#"
<h2>Escalated Support Ticket</h2>
{% if urgent %}<p style="color:#ff2222;font-weight:bold;font-size:18px;">URGENT</p>{% endif %}
<p><b>Name:</b> {{ user.name }}</p>
<p><b>Email:</b> {{ user.email }}</p>
<p><b>Phone:</b> {{ user.phone }}</p>
<p><b>Category:</b> {{ user.category }}</p>
<p><b>Original Message:</b> {{ user.message }}</p>
<h3>Chat Transcript</h3>
<div style="background:#f5f6fa;padding:12px;border-radius:8px;">
{% for line in transcript %}<div><b>{{ line.speaker }}:</b> {{ line.content }}</div>
{% endfor %}</div>
"#;

const REVIEW: &str = r#"
<h2>New Support Review</h2>
<p><b>Name:</b> {{ user.name }}</p>
<p><b>Email:</b> {{ user.email }}</p>
<p><b>Phone:</b> {{ user.phone }}</p>
<p><b>Category:</b> {{ user.category }}</p>
<p><b>Original Message:</b> {{ user.message }}</p>
<h3>Review</h3>
<p><b>Rating:</b> {{ rating }} / {{ max_rating }}</p>
<p><b>Comment:</b> {{ comment }}</p>
"#;

const TICKET: &str = r#"
<h2>New Support Ticket</h2>
<p><b>Ticket ID:</b> {{ ticket_id }}</p>
<p><b>Name:</b> {{ name }}</p>
<p><b>Email:</b> {{ email }}</p>
<p><b>Phone:</b> {{ phone }}</p>
<p><b>Category:</b> {{ category }}</p>
<p><b>Status:</b> {{ status }}</p>
<p><b>Created At:</b> {{ created_at }}</p>
<h3>Conversation Transcript</h3>
<div style="background:#f5f6fa;padding:12px;border-radius:8px;">
{% for line in transcript %}<div><b>{{ line.speaker }}:</b> {{ line.content }}</div>
{% endfor %}</div>
"#;

/// Subject line and HTML body of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub subject: String,
    pub html: String,
}

#[derive(Serialize)]
struct TranscriptLine<'a> {
    speaker: &'static str,
    content: &'a str,
}

fn render(name: &str, content: &str, context: &Context) -> Result<String, NotifyError> {
    let mut tera = Tera::default();
    tera.add_raw_template(name, content)?;
    Ok(tera.render(name, context)?)
}

/// Hand-off of a conversation to a human agent.
pub fn escalation(
    user: &UserInfo,
    transcript: &[ChatTurn],
    urgency: Option<Urgency>,
) -> Result<Rendered, NotifyError> {
    let lines: Vec<TranscriptLine> = transcript
        .iter()
        .map(|turn| TranscriptLine {
            speaker: match turn.role {
                TurnRole::User => "Client",
                TurnRole::Ai => "AI",
            },
            content: &turn.content,
        })
        .collect();

    let mut context = Context::new();
    context.insert("user", user);
    context.insert("urgent", &(urgency == Some(Urgency::Urgent)));
    context.insert("transcript", &lines);

    Ok(Rendered {
        subject: format!("Escalated Support Ticket from {}", user.name),
        html: render("escalation.html", ESCALATION, &context)?,
    })
}

pub fn review(user: &UserInfo, review: &Review) -> Result<Rendered, NotifyError> {
    let mut context = Context::new();
    context.insert("user", user);
    context.insert("rating", &review.rating);
    context.insert("max_rating", &MAX_RATING);
    context.insert("comment", &review.comment);

    Ok(Rendered {
        subject: format!("New Support Review from {}", user.name),
        html: render("review.html", REVIEW, &context)?,
    })
}

/// Summary of a finished triage conversation. The ticket record may be
/// missing (e.g. written by another deployment); its fields render blank.
pub fn ticket_transcript(
    ticket_id: &str,
    ticket: Option<&Ticket>,
    messages: &[TicketMessage],
) -> Result<Rendered, NotifyError> {
    let lines: Vec<TranscriptLine> = messages
        .iter()
        .map(|m| TranscriptLine {
            speaker: match m.role {
                MessageRole::User => "Client",
                MessageRole::Assistant => "Assistant",
            },
            content: &m.message,
        })
        .collect();

    let mut context = Context::new();
    context.insert("ticket_id", ticket_id);
    let category = match ticket {
        Some(t) => {
            context.insert("name", &t.name);
            context.insert("email", &t.email);
            context.insert("phone", &t.phone);
            context.insert("category", &t.category);
            context.insert("status", t.status.as_str());
            context.insert(
                "created_at",
                &t.created_at.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
            );
            t.category.as_str()
        }
        None => {
            for key in ["name", "email", "phone", "category", "status", "created_at"] {
                context.insert(key, "");
            }
            ""
        }
    };
    context.insert("transcript", &lines);

    Ok(Rendered {
        subject: format!("New Support Ticket [{ticket_id}] - {category}"),
        html: render("ticket.html", TICKET, &context)?,
    })
}
