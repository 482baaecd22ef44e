//! Canned answers served when the AI provider is unreachable, so the chat
//! never dead-ends on a provider outage.

/// Answer used when no keyword matches the user's message.
pub const GENERIC_ANSWER: &str = "Sorry, our AI assistant is temporarily unavailable. \
Your details have been saved. Please try again in a few minutes, or escalate this \
conversation to a human agent and our team will contact you.";

/// One row of the keyword table.
pub struct FallbackEntry {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

/// Checked in order; the first row with a matching keyword wins.
pub const FALLBACK_TABLE: &[FallbackEntry] = &[
    FallbackEntry {
        keywords: &["password", "login", "log in", "sign in", "locked out"],
        answer: "For login or password problems, use the \"Forgot password\" link on the sign-in page to reset your password. If your account is locked, wait 15 minutes before trying again, or escalate to a human agent.",
    },
    FallbackEntry {
        keywords: &["billing", "invoice", "payment", "charge"],
        answer: "For billing questions, please have your invoice number ready. Our accounts team can review charges and payment issues once you escalate this conversation.",
    },
    FallbackEntry {
        keywords: &["refund"],
        answer: "Refund requests are handled by our accounts team. Please escalate this conversation and include your order or invoice number.",
    },
    FallbackEntry {
        keywords: &["internet", "wifi", "wi-fi", "network", "connection"],
        answer: "For connectivity issues, try restarting your router and device, and check whether other devices can connect. If the problem persists, escalate and let us know when it started.",
    },
    FallbackEntry {
        keywords: &["email", "outlook", "inbox"],
        answer: "For email problems, check that your mailbox is not full and that your device's date and time are correct, then restart your mail client. If messages still fail, escalate with any error text you see.",
    },
    FallbackEntry {
        keywords: &["printer", "printing", "print"],
        answer: "For printer issues, check that the printer is powered on and connected, clear any paper jams, and restart both the printer and your computer.",
    },
    FallbackEntry {
        keywords: &["slow", "performance", "freezing", "frozen"],
        answer: "If your device is running slowly, close unused applications, restart it, and make sure updates are installed. Escalate if it stays slow after a restart.",
    },
    FallbackEntry {
        keywords: &["screen", "laptop", "hardware", "keyboard", "mouse"],
        answer: "For hardware faults, note the device model and any error lights or messages, then escalate this conversation so a technician can follow up.",
    },
];

/// The canned answer chosen for a failed AI call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Keyword(&'static str),
    Generic,
}

impl Fallback {
    /// Pick the fallback for the user's last message.
    pub fn for_message(message: Option<&str>) -> Self {
        message
            .and_then(keyword_answer)
            .map(Fallback::Keyword)
            .unwrap_or(Fallback::Generic)
    }

    pub fn answer(&self) -> &'static str {
        match self {
            Fallback::Keyword(answer) => *answer,
            Fallback::Generic => GENERIC_ANSWER,
        }
    }
}

/// Case-insensitive substring match against the keyword table.
pub fn keyword_answer(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    FALLBACK_TABLE
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| text.contains(k)))
        .map(|entry| entry.answer)
}
