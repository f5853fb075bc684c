// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of heterogeneous webhook payloads to a canonical inbound message.
//!
//! Each logical field has a fixed, ordered list of aliases. The first alias
//! holding a non-empty value wins.

use std::collections::HashMap;

use replybot_core::ReplyBotError;
use serde_json::{Map, Value};

/// Aliases for the sender phone number, highest priority first.
pub const PHONE_FIELDS: &[&str] = &["From", "phone", "phoneNumber"];

/// Aliases for the message text, highest priority first.
pub const TEXT_FIELDS: &[&str] = &["Body", "message", "text"];

/// Aliases for the first media attachment.
pub const MEDIA_FIELDS: &[&str] = &["MediaUrl0"];

/// Transport prefixes stripped from the phone number.
pub const TRANSPORT_PREFIXES: &[&str] = &["whatsapp:"];

/// A raw webhook body, either JSON or form-encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundPayload {
    fields: Map<String, Value>,
}

impl InboundPayload {
    /// Wrap a JSON body. Non-object bodies yield an empty payload.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Wrap a form-encoded body.
    pub fn from_form(form: HashMap<String, String>) -> Self {
        Self {
            fields: form
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        }
    }

    /// First non-empty value among `aliases`, rendered as a string.
    pub fn first_present(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| match self.fields.get(*alias)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

/// The canonical `(phone, text, media)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    pub phone_number: String,
    pub message_text: String,
    pub media_url: Option<String>,
}

/// Remove a known transport prefix from a phone number.
pub fn strip_transport_prefix(phone: &str) -> &str {
    TRANSPORT_PREFIXES
        .iter()
        .find_map(|prefix| phone.strip_prefix(prefix))
        .unwrap_or(phone)
}

/// Normalize a raw payload, failing when phone or text end up empty.
pub fn normalize(payload: &InboundPayload) -> Result<NormalizedMessage, ReplyBotError> {
    let phone_number = payload
        .first_present(PHONE_FIELDS)
        .map(|phone| strip_transport_prefix(&phone).to_string())
        .unwrap_or_default();
    let message_text = payload.first_present(TEXT_FIELDS).unwrap_or_default();

    if phone_number.is_empty() || message_text.is_empty() {
        return Err(ReplyBotError::validation(
            "phone number and message are required",
        ));
    }

    Ok(NormalizedMessage {
        phone_number,
        message_text,
        media_url: payload.first_present(MEDIA_FIELDS),
    })
}
