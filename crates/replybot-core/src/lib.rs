// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Replybot auto-reply service.
//!
//! Provides the error type and the domain types (messages, replies, bot
//! policy, status snapshots) used throughout the workspace.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ReplyBotError;
pub use types::{
    BotConfig, ConfigPatch, Message, MessageId, Reply, ReplyId, ReplyStatus, StatusSnapshot,
};
