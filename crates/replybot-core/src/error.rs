// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Replybot service.

use thiserror::Error;

/// The primary error type used across the stores, the intake pipeline and the gateway.
#[derive(Debug, Error)]
pub enum ReplyBotError {
    /// A required field was missing or empty. No state was mutated.
    #[error("validation error: {0}")]
    Validation(String),

    /// A single entry lookup did not match any stored entry.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Configuration errors (invalid TOML, bad values) detected at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP server errors (bind failure, serve loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors while mutating state.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ReplyBotError {
    /// Shorthand for a [`ReplyBotError::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Error raised when a store lock was poisoned by a panicking writer.
    pub fn poisoned(store: &str) -> Self {
        Self::Internal(format!("{store} lock poisoned"))
    }
}
