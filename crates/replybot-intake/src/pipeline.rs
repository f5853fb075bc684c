// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion of inbound messages and the auto-reply decision.
//!
//! `ingest` reads the policy once, then holds both log write locks while it
//! appends the message, appends the auto-reply and flips `replied`. Readers
//! never see a replied message without its reply.

use replybot_core::types::now_display;
use replybot_core::{Message, MessageId, Reply, ReplyBotError, ReplyId, ReplyStatus};

use crate::normalize::NormalizedMessage;
use crate::state::BotState;

/// Phone number used by simulated messages when none is given.
pub const TEST_DEFAULT_PHONE: &str = "5511987654321";

/// Text used by simulated messages when none is given.
pub const TEST_DEFAULT_MESSAGE: &str = "Olá! Essa é uma mensagem de teste! 🤖";

/// Records inbound messages and generates auto-replies per the current policy.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    state: BotState,
}

impl IngestionPipeline {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    /// Record one inbound message and auto-reply to it if enabled.
    ///
    /// Returns the stored message in its final state. Fails without touching
    /// any store when `phone_number` or `message_text` is empty.
    pub fn ingest(
        &self,
        phone_number: &str,
        message_text: &str,
        media_url: Option<&str>,
    ) -> Result<Message, ReplyBotError> {
        if phone_number.is_empty() || message_text.is_empty() {
            return Err(ReplyBotError::validation(
                "phone number and message are required",
            ));
        }

        let policy = self.state.config.get()?;

        let mut messages = self.state.messages.write()?;
        let mut replies = self.state.replies.write()?;

        let mut message = messages.append_with(|id| Message {
            id: MessageId(id),
            from: phone_number.to_string(),
            message: message_text.to_string(),
            timestamp: now_display(),
            media: media_url.map(str::to_string),
            replied: false,
        });
        tracing::info!(id = %message.id, from = phone_number, "message received");

        if policy.auto_reply_enabled {
            let reply = replies.append_with(|id| Reply {
                id: ReplyId(id),
                to: phone_number.to_string(),
                message: policy.auto_reply_message.clone(),
                timestamp: now_display(),
                status: ReplyStatus::Sent,
            });
            message = messages
                .update(message.id.0, |m| m.replied = true)
                .ok_or_else(|| {
                    ReplyBotError::Internal(format!("message {} vanished mid-ingest", message.id))
                })?;
            tracing::info!(reply_id = %reply.id, to = phone_number, "auto-reply sent");
        }

        Ok(message)
    }

    /// Ingest an already-normalized webhook message.
    pub fn ingest_normalized(&self, inbound: &NormalizedMessage) -> Result<Message, ReplyBotError> {
        self.ingest(
            &inbound.phone_number,
            &inbound.message_text,
            inbound.media_url.as_deref(),
        )
    }

    /// Ingest a simulated message, filling absent or empty fields with defaults.
    pub fn ingest_test_message(
        &self,
        phone_number: Option<&str>,
        message_text: Option<&str>,
    ) -> Result<Message, ReplyBotError> {
        let phone = phone_number
            .filter(|p| !p.is_empty())
            .unwrap_or(TEST_DEFAULT_PHONE);
        let text = message_text
            .filter(|t| !t.is_empty())
            .unwrap_or(TEST_DEFAULT_MESSAGE);
        tracing::debug!(from = phone, "simulating inbound message");
        self.ingest(phone, text, None)
    }
}
