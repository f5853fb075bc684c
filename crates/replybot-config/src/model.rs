// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Replybot service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use replybot_core::types::{DEFAULT_AUTO_REPLY_MESSAGE, DEFAULT_OWNER_PHONE};
use replybot_core::BotConfig;
use serde::{Deserialize, Serialize};

/// Top-level Replybot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReplyBotConfig {
    /// HTTP listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Initial auto-reply policy, applied once at process start.
    #[serde(default)]
    pub bot: BotSection,
}

impl ReplyBotConfig {
    /// The policy the config store is seeded with.
    pub fn initial_bot_config(&self) -> BotConfig {
        BotConfig {
            auto_reply_enabled: self.bot.auto_reply_enabled,
            auto_reply_message: self.bot.auto_reply_message.clone(),
            sound_notification_enabled: self.bot.sound_notification_enabled,
            owner_phone: self.bot.owner_phone.clone(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Startup values of the auto-reply policy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotSection {
    #[serde(default = "default_true")]
    pub auto_reply_enabled: bool,

    /// Reply template sent to every inbound sender.
    #[serde(default = "default_auto_reply_message")]
    pub auto_reply_message: String,

    #[serde(default = "default_true")]
    pub sound_notification_enabled: bool,

    /// Phone number of the bot owner. Also settable through `OWNER_PHONE`.
    #[serde(default = "default_owner_phone")]
    pub owner_phone: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            auto_reply_enabled: true,
            auto_reply_message: default_auto_reply_message(),
            sound_notification_enabled: true,
            owner_phone: default_owner_phone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_auto_reply_message() -> String {
    DEFAULT_AUTO_REPLY_MESSAGE.to_string()
}

fn default_owner_phone() -> String {
    DEFAULT_OWNER_PHONE.to_string()
}
