use serde::{Deserialize, Serialize};

/// Highest star rating the review form offers.
pub const MAX_RATING: u8 = 5;

/// Feedback left after the conversation is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl Review {
    pub fn is_valid(&self) -> bool {
        self.rating <= MAX_RATING
    }
}

/// Urgency selected when escalating to a human agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    NotUrgent,
}

impl Urgency {
    /// Lenient parse of the browser's urgency label; unknown labels mean
    /// the urgency was not specified.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(Urgency::Urgent),
            "not_urgent" | "not-urgent" | "not urgent" => Some(Urgency::NotUrgent),
            _ => None,
        }
    }
}
