// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the stores, the intake pipeline and the gateway.
//!
//! Field names serialize in camelCase because the dashboard consumes these
//! shapes directly.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// Greeting sent back when auto-reply is enabled and nothing else was configured.
pub const DEFAULT_AUTO_REPLY_MESSAGE: &str = "Olá! 👋 Obrigado pela sua mensagem. Estou em atendimento automático no momento. Em breve responderei sua mensagem com mais detalhes. Tenha um ótimo dia! 😊";

/// Owner phone used when neither configuration nor environment provide one.
pub const DEFAULT_OWNER_PHONE: &str = "5511913274243";

/// Identifier of an inbound message. Unique and never reused within the message log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

/// Identifier of an outbound reply. Unique and never reused within the reply log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inbound chat message recorded by the intake pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Sender identifier (phone number, transport prefix already stripped).
    pub from: String,
    /// Text body.
    pub message: String,
    /// Human-readable ingestion time, assigned once.
    pub timestamp: String,
    /// Optional media URL attached by the transport.
    pub media: Option<String>,
    /// Set once when an auto-reply was generated for this message.
    pub replied: bool,
}

/// Delivery status of a reply. Only acceptance is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReplyStatus {
    Sent,
}

/// An outbound reply, automatic or manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    /// Recipient identifier.
    pub to: String,
    /// Text body.
    pub message: String,
    /// Human-readable send time.
    pub timestamp: String,
    pub status: ReplyStatus,
}

/// Process-wide auto-reply policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub auto_reply_enabled: bool,
    /// Reply template. Never empty.
    pub auto_reply_message: String,
    /// Only consumed by the dashboard.
    pub sound_notification_enabled: bool,
    pub owner_phone: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            auto_reply_enabled: true,
            auto_reply_message: DEFAULT_AUTO_REPLY_MESSAGE.to_string(),
            sound_notification_enabled: true,
            owner_phone: DEFAULT_OWNER_PHONE.to_string(),
        }
    }
}

impl BotConfig {
    /// Merge a partial update into this config.
    ///
    /// Fields absent from the patch keep their value. Empty strings are
    /// treated as absent so the reply template can never become empty.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(enabled) = patch.auto_reply_enabled {
            self.auto_reply_enabled = enabled;
        }
        if let Some(message) = patch.auto_reply_message.as_deref().filter(|m| !m.is_empty()) {
            self.auto_reply_message = message.to_string();
        }
        if let Some(phone) = patch.owner_phone.as_deref().filter(|p| !p.is_empty()) {
            self.owner_phone = phone.to_string();
        }
    }
}

/// A partial update of [`BotConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub auto_reply_enabled: Option<bool>,
    pub auto_reply_message: Option<String>,
    pub owner_phone: Option<String>,
}

impl ConfigPatch {
    /// Build a patch from an arbitrary JSON body.
    ///
    /// `autoReplyEnabled` is applied only when it is a JSON boolean, so an
    /// explicit `false` is honoured. String fields are applied only when they
    /// are non-empty strings. Anything else is ignored.
    pub fn from_json(body: &Value) -> Self {
        let non_empty = |key: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            auto_reply_enabled: body.get("autoReplyEnabled").and_then(Value::as_bool),
            auto_reply_message: non_empty("autoReplyMessage"),
            owner_phone: non_empty("ownerPhone"),
        }
    }

    /// True when applying this patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        self.auto_reply_enabled.is_none()
            && self.auto_reply_message.is_none()
            && self.owner_phone.is_none()
    }
}

/// Point-in-time counts derived from the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: String,
    /// RFC 3339 time the snapshot was taken.
    pub timestamp: String,
    pub messages_count: usize,
    pub replies_count: usize,
    pub bot_enabled: bool,
}

/// Format a local time the way message and reply timestamps are displayed.
pub fn display_timestamp(at: DateTime<Local>) -> String {
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Current local time formatted for message and reply records.
pub fn now_display() -> String {
    display_timestamp(Local::now())
}

/// Current UTC time in RFC 3339, used by status snapshots.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn message_serializes_with_dashboard_field_names() {
        let msg = Message {
            id: MessageId(42),
            from: "5511000".into(),
            message: "hello".into(),
            timestamp: "01/01/2026, 10:00:00".into(),
            media: None,
            replied: false,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["id"], 42);
        assert_eq!(value["from"], "5511000");
        assert_eq!(value["media"], Value::Null);
        assert_eq!(value["replied"], false);
    }

    #[test]
    fn reply_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ReplyStatus::Sent).unwrap(), "sent");
        assert_eq!(ReplyStatus::Sent.to_string(), "sent");
    }

    #[test]
    fn bot_config_serializes_camel_case() {
        let value = serde_json::to_value(BotConfig::default()).unwrap();
        assert_eq!(value["autoReplyEnabled"], true);
        assert_eq!(value["soundNotificationEnabled"], true);
        assert_eq!(value["ownerPhone"], DEFAULT_OWNER_PHONE);
        assert_eq!(value["autoReplyMessage"], DEFAULT_AUTO_REPLY_MESSAGE);
    }

    #[test]
    fn patch_honours_explicit_false() {
        let patch = ConfigPatch::from_json(&json!({ "autoReplyEnabled": false }));
        assert_eq!(patch.auto_reply_enabled, Some(false));

        let mut config = BotConfig::default();
        config.apply(&patch);
        assert!(!config.auto_reply_enabled);
    }

    #[test]
    fn patch_ignores_non_boolean_enabled_flag() {
        let patch = ConfigPatch::from_json(&json!({ "autoReplyEnabled": "false" }));
        assert!(patch.auto_reply_enabled.is_none());
        assert!(patch.is_empty());
    }

    #[test]
    fn empty_reply_message_is_treated_as_absent() {
        let patch = ConfigPatch::from_json(&json!({ "autoReplyMessage": "" }));
        assert!(patch.is_empty());

        let mut config = BotConfig::default();
        config.apply(&ConfigPatch {
            auto_reply_message: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(config.auto_reply_message, DEFAULT_AUTO_REPLY_MESSAGE);
    }

    #[test]
    fn apply_keeps_unspecified_fields() {
        let mut config = BotConfig::default();
        config.apply(&ConfigPatch::from_json(&json!({ "ownerPhone": "123" })));
        assert_eq!(config.owner_phone, "123");
        assert!(config.auto_reply_enabled);
        assert_eq!(config.auto_reply_message, DEFAULT_AUTO_REPLY_MESSAGE);
    }

    #[test]
    fn empty_patch_is_idempotent() {
        let mut once = BotConfig::default();
        once.apply(&ConfigPatch::from_json(&json!({ "ownerPhone": "123" })));
        let mut twice = once.clone();
        twice.apply(&ConfigPatch::from_json(&json!({})));
        assert_eq!(once, twice);
    }

    #[test]
    fn display_timestamp_is_day_first() {
        let at = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(display_timestamp(at), "07/03/2026, 09:05:01");
    }

    proptest::proptest! {
        #[test]
        fn any_non_empty_message_patch_is_applied(text in ".+") {
            let mut config = BotConfig::default();
            config.apply(&ConfigPatch::from_json(&json!({ "autoReplyMessage": text.clone() })));
            proptest::prop_assert_eq!(config.auto_reply_message, text);
        }
    }
}
