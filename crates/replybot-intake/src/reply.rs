// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator-initiated replies.

use replybot_core::types::now_display;
use replybot_core::{Reply, ReplyBotError, ReplyId, ReplyStatus};

use crate::state::BotState;

/// Appends manual replies to the reply log.
///
/// Manual replies are independent of inbound messages: no message is looked
/// up or marked as replied.
#[derive(Debug, Clone)]
pub struct ReplyService {
    state: BotState,
}

impl ReplyService {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    pub fn send_manual_reply(
        &self,
        phone_number: &str,
        message_text: &str,
    ) -> Result<Reply, ReplyBotError> {
        if phone_number.is_empty() || message_text.is_empty() {
            return Err(ReplyBotError::validation(
                "phone number and message are required",
            ));
        }

        let reply = self.state.replies.append_with(|id| Reply {
            id: ReplyId(id),
            to: phone_number.to_string(),
            message: message_text.to_string(),
            timestamp: now_display(),
            status: ReplyStatus::Sent,
        })?;
        tracing::info!(reply_id = %reply.id, to = phone_number, "manual reply sent");
        Ok(reply)
    }
}
