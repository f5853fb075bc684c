// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation of core errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use replybot_core::ReplyBotError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A [`ReplyBotError`] surfaced by a request handler.
#[derive(Debug)]
pub struct ApiError(pub ReplyBotError);

impl From<ReplyBotError> for ApiError {
    fn from(err: ReplyBotError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ReplyBotError::Validation(_) => StatusCode::BAD_REQUEST,
            ReplyBotError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReplyBotError::Config(_)
            | ReplyBotError::Server { .. }
            | ReplyBotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
