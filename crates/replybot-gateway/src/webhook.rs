// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider webhook intake.
//!
//! Providers post form-encoded bodies; simulators usually post JSON. Both are
//! accepted and handed to the normalizer.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    Form, Json,
};

use replybot_core::ReplyBotError;
use replybot_intake::{normalize, InboundPayload};

use crate::error::ApiError;
use crate::handlers::{parse_body, SuccessResponse};
use crate::server::GatewayState;

/// Header whose presence marks a request as coming from the messaging provider.
pub const PROVIDER_SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Empty acknowledgement document expected by the provider.
pub const PROVIDER_ACK: &str = "<Response></Response>";

/// Webhook body decoded according to its content type.
#[derive(Debug)]
pub struct WebhookPayload(pub InboundPayload);

impl<S: Send + Sync> FromRequest<S> for WebhookPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ReplyBotError::validation(e.body_text()))?;
            return Ok(Self(InboundPayload::from_form(fields)));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ReplyBotError::validation(e.body_text()))?;
        Ok(Self(InboundPayload::from_json(parse_body(&body)?)))
    }
}

/// POST /webhook/messages
pub async fn post_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    WebhookPayload(payload): WebhookPayload,
) -> Result<Response, ApiError> {
    let inbound = normalize(&payload).inspect_err(|e| {
        tracing::warn!("rejected webhook payload: {e}");
    })?;
    state.pipeline.ingest_normalized(&inbound)?;

    if headers.contains_key(PROVIDER_SIGNATURE_HEADER) {
        return Ok(([(CONTENT_TYPE, "text/xml")], PROVIDER_ACK).into_response());
    }
    Ok(Json(SuccessResponse::with_message("Message received")).into_response())
}
