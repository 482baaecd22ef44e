use serde::{Deserialize, Serialize};

/// The submitted support form, resent by the browser with every AI,
/// escalation and review request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub message: String,
}
