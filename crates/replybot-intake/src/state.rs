// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owned state context shared by the pipeline, the reply service and the reporter.

use std::sync::Arc;

use replybot_core::BotConfig;
use replybot_store::{ConfigStore, MessageLog, ReplyLog};

/// The three stores of a running bot.
///
/// Cloning is cheap and every clone refers to the same stores. Operations
/// that lock more than one log lock `messages` before `replies`.
#[derive(Debug, Clone)]
pub struct BotState {
    pub messages: Arc<MessageLog>,
    pub replies: Arc<ReplyLog>,
    pub config: Arc<ConfigStore>,
}

impl BotState {
    /// Fresh, empty stores with the given initial policy.
    pub fn new(initial: BotConfig) -> Self {
        Self {
            messages: Arc::new(MessageLog::new("message log")),
            replies: Arc::new(ReplyLog::new("reply log")),
            config: Arc::new(ConfigStore::new(initial)),
        }
    }
}

impl Default for BotState {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}
