//! Support form validation.
//!
//! The form arrives as loosely-typed JSON: a field that is absent, `null`,
//! or of the wrong type is reported exactly like a blank one. Every field is
//! checked so the caller gets the complete error map in one round trip.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::models::ticket::NewTicket;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Field name → human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

/// Raw ticket form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: Value,
    pub email: Value,
    pub phone: Value,
    pub category: Value,
}

pub fn validate_contact_form(form: &ContactForm) -> Result<NewTicket, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = non_blank(&form.name);
    if name.is_none() {
        errors.insert("name".into(), "Full name is required.".into());
    }
    let email = form.email.as_str().filter(|e| EMAIL.is_match(e));
    if email.is_none() {
        errors.insert("email".into(), "Valid email is required.".into());
    }
    let phone = non_blank(&form.phone);
    if phone.is_none() {
        errors.insert("phone".into(), "Phone number is required.".into());
    }
    let category = non_blank(&form.category);
    if category.is_none() {
        errors.insert("category".into(), "Category is required.".into());
    }

    match (name, email, phone, category) {
        (Some(name), Some(email), Some(phone), Some(category)) => Ok(NewTicket {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            category: category.to_string(),
        }),
        _ => Err(errors),
    }
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}
