// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Point-in-time status derived from the stores.

use replybot_core::types::now_rfc3339;
use replybot_core::{ReplyBotError, StatusSnapshot};

use crate::state::BotState;

#[derive(Debug, Clone)]
pub struct StatusReporter {
    state: BotState,
}

impl StatusReporter {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    /// Counts and policy flag, read under shared locks.
    pub fn status(&self) -> Result<StatusSnapshot, ReplyBotError> {
        let bot_enabled = self.state.config.get()?.auto_reply_enabled;
        let messages = self.state.messages.read()?;
        let replies = self.state.replies.read()?;

        Ok(StatusSnapshot {
            status: "online".to_string(),
            timestamp: now_rfc3339(),
            messages_count: messages.len(),
            replies_count: replies.len(),
            bot_enabled,
        })
    }
}
