// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the dashboard REST API.
//!
//! Request bodies are parsed leniently: an empty body counts as `{}` so that
//! missing fields surface as validation errors rather than extractor rejections.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use replybot_core::{BotConfig, ConfigPatch, Message, Reply, ReplyBotError, StatusSnapshot};
use replybot_intake::InboundPayload;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Value of the `mode` tag reported by the status endpoint.
pub const MODE: &str = "local";

/// Body field carrying the phone number on dashboard requests.
pub const PHONE_FIELD: &[&str] = &["phoneNumber"];

/// Body field carrying the message text on dashboard requests.
pub const MESSAGE_FIELD: &[&str] = &["message"];

/// Generic acknowledgement body.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Response body for DELETE /api/messages.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
    pub cleared: usize,
}

/// Response body for POST /api/config.
#[derive(Debug, Serialize)]
pub struct ConfigUpdateResponse {
    pub success: bool,
    pub config: BotConfig,
}

/// Response body for POST /api/test-message.
#[derive(Debug, Serialize)]
pub struct TestMessageResponse {
    pub success: bool,
    pub message: String,
    pub data: Message,
}

/// Response body for GET /api/status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub snapshot: StatusSnapshot,
    pub mode: &'static str,
}

/// Response body for GET /api/info.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
    pub status: &'static str,
    pub features: Vec<&'static str>,
}

/// Parse a JSON body, treating an empty body as the default value.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ReplyBotError::validation(format!("invalid JSON body: {e}")).into())
}

/// GET /api/messages
pub async fn get_messages(State(state): State<GatewayState>) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.bot.messages.list_all()?))
}

/// GET /api/messages/{id}
pub async fn get_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let not_found = || ReplyBotError::NotFound {
        kind: "message",
        id: id.clone(),
    };
    let numeric = id.parse::<u64>().map_err(|_| not_found())?;
    let message = state.bot.messages.get(numeric)?.ok_or_else(not_found)?;
    Ok(Json(message))
}

/// DELETE /api/messages
pub async fn delete_messages(State(state): State<GatewayState>) -> Result<Json<ClearResponse>, ApiError> {
    let cleared = state.bot.messages.delete_all()?;
    tracing::info!(cleared, "messages cleared");
    Ok(Json(ClearResponse {
        success: true,
        message: "Messages cleared".to_string(),
        cleared,
    }))
}

/// DELETE /api/messages/{id}
///
/// Reports success whether or not the id existed; a non-numeric id matches nothing.
pub async fn delete_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if let Ok(numeric) = id.parse::<u64>() {
        state.bot.messages.delete_by_id(numeric)?;
    }
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/config
pub async fn get_config(State(state): State<GatewayState>) -> Result<Json<BotConfig>, ApiError> {
    Ok(Json(state.bot.config.get()?))
}

/// POST /api/config
pub async fn post_config(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<ConfigUpdateResponse>, ApiError> {
    let body: Value = parse_body(&body)?;
    let patch = ConfigPatch::from_json(&body);
    let config = state.bot.config.update(&patch)?;
    tracing::info!(
        auto_reply_enabled = config.auto_reply_enabled,
        owner_phone = %config.owner_phone,
        "config updated"
    );
    Ok(Json(ConfigUpdateResponse {
        success: true,
        config,
    }))
}

/// POST /api/send-reply
pub async fn post_send_reply(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let request = InboundPayload::from_json(parse_body(&body)?);
    state.replies.send_manual_reply(
        &request.first_present(PHONE_FIELD).unwrap_or_default(),
        &request.first_present(MESSAGE_FIELD).unwrap_or_default(),
    )?;
    Ok(Json(SuccessResponse::with_message("Reply sent")))
}

/// GET /api/sent-messages
pub async fn get_sent_messages(State(state): State<GatewayState>) -> Result<Json<Vec<Reply>>, ApiError> {
    Ok(Json(state.bot.replies.list_all()?))
}

/// POST /api/test-message
pub async fn post_test_message(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<TestMessageResponse>, ApiError> {
    let request = InboundPayload::from_json(parse_body(&body)?);
    let phone = request.first_present(PHONE_FIELD);
    let text = request.first_present(MESSAGE_FIELD);
    let data = state
        .pipeline
        .ingest_test_message(phone.as_deref(), text.as_deref())?;
    Ok(Json(TestMessageResponse {
        success: true,
        message: "Test message received".to_string(),
        data,
    }))
}

/// GET /api/status
pub async fn get_status(State(state): State<GatewayState>) -> Result<Json<StatusResponse>, ApiError> {
    Ok(Json(StatusResponse {
        snapshot: state.reporter.status()?,
        mode: MODE,
    }))
}

/// GET /api/info
pub async fn get_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Replybot",
        version: env!("CARGO_PKG_VERSION"),
        mode: MODE,
        status: "ready",
        features: vec![
            "automatic replies to inbound messages",
            "manual replies",
            "simulated test messages",
            "provider webhook intake",
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_as_default() {
        let body: Value = parse_body(&Bytes::from_static(b"  ")).unwrap();
        let req = InboundPayload::from_json(body);
        assert!(req.first_present(PHONE_FIELD).is_none());
        assert!(req.first_present(MESSAGE_FIELD).is_none());
    }

    #[test]
    fn dashboard_fields_accept_strings_and_numbers() {
        let body: Value =
            parse_body(&Bytes::from_static(br#"{"phoneNumber":5511,"message":"hi"}"#)).unwrap();
        let req = InboundPayload::from_json(body);
        assert_eq!(req.first_present(PHONE_FIELD).as_deref(), Some("5511"));
        assert_eq!(req.first_present(MESSAGE_FIELD).as_deref(), Some("hi"));
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_body::<Value>(&Bytes::from_static(b"{nope")).unwrap_err();
        assert!(matches!(err.0, ReplyBotError::Validation(_)));
    }

    #[test]
    fn status_response_flattens_snapshot() {
        let resp = StatusResponse {
            snapshot: StatusSnapshot {
                status: "online".into(),
                timestamp: "2026-01-01T00:00:00+00:00".into(),
                messages_count: 2,
                replies_count: 1,
                bot_enabled: true,
            },
            mode: MODE,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["messagesCount"], 2);
        assert_eq!(value["repliesCount"], 1);
        assert_eq!(value["botEnabled"], true);
        assert_eq!(value["mode"], "local");
    }

    #[test]
    fn success_without_message_omits_field() {
        let json = serde_json::to_string(&SuccessResponse::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
