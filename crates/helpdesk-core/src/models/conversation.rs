use serde::{Deserialize, Serialize};

/// A conversation turn as the browser sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

/// Speaker of a browser-side turn. The browser labels the assistant `ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai", alias = "assistant")]
    Ai,
}

/// The most recent turn spoken by the user, if any.
pub fn last_user_turn(turns: &[ChatTurn]) -> Option<&ChatTurn> {
    turns.iter().rev().find(|t| t.role == TurnRole::User)
}
