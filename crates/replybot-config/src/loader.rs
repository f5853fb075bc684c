// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./replybot.toml` > `~/.config/replybot/replybot.toml` > `/etc/replybot/replybot.toml`
//! with environment variable overrides via `REPLYBOT_` prefix and the plain
//! `OWNER_PHONE` / `PORT` variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::Value,
    Figment,
};

use crate::model::ReplyBotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/replybot/replybot.toml` (system-wide)
/// 3. `~/.config/replybot/replybot.toml` (user XDG config)
/// 4. `./replybot.toml` (local directory)
/// 5. `OWNER_PHONE` and `PORT`
/// 6. `REPLYBOT_*` environment variables
pub fn load_config() -> Result<ReplyBotConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ReplyBotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReplyBotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ReplyBotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReplyBotConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ReplyBotConfig::default()))
        .merge(Toml::file("/etc/replybot/replybot.toml"))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file("replybot.toml"))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("replybot/replybot.toml"))
}

/// Create the `REPLYBOT_` provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `REPLYBOT_BOT_OWNER_PHONE` must map to `bot.owner_phone`.
fn env_provider() -> Env {
    Env::prefixed("REPLYBOT_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("server_", "server.", 1)
            .replacen("bot_", "bot.", 1);
        mapped.into()
    })
}

/// Unprefixed variables understood for compatibility with existing deployments.
///
/// Unset and empty variables are skipped so the value below them applies.
fn legacy_env_provider() -> Figment {
    let mut figment = Figment::new();
    if let Some(phone) = non_empty_var("OWNER_PHONE") {
        figment = figment.merge(Serialized::default("bot.owner_phone", phone));
    }
    if let Some(port) = non_empty_var("PORT") {
        let Ok(port) = port.parse::<Value>();
        figment = figment.merge(Serialized::default("server.port", port));
    }
    figment
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
