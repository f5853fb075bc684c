// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP-level tests for the REST API and the webhook, driving the router in-process.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use replybot_core::types::DEFAULT_AUTO_REPLY_MESSAGE;
use replybot_gateway::{router, GatewayState};
use replybot_intake::BotState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Router, BotState) {
    let bot = BotState::default();
    (router(GatewayState::new(bot.clone())), bot)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    let (status, text) = send(app, request).await;
    let value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn test_message_runs_pipeline_and_auto_replies() {
    let (app, _) = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/test-message",
        Some(json!({ "phoneNumber": "5511000", "message": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["from"], "5511000");
    assert_eq!(body["data"]["replied"], true);

    let (_, sent) = call(&app, Method::GET, "/api/sent-messages", None).await;
    assert_eq!(sent.as_array().unwrap().len(), 1);
    assert_eq!(sent[0]["to"], "5511000");
    assert_eq!(sent[0]["message"], DEFAULT_AUTO_REPLY_MESSAGE);
    assert_eq!(sent[0]["status"], "sent");

    let (_, status) = call(&app, Method::GET, "/api/status", None).await;
    assert_eq!(status["messagesCount"], 1);
    assert_eq!(status["repliesCount"], 1);
    assert_eq!(status["botEnabled"], true);
    assert_eq!(status["mode"], "local");
}

#[tokio::test]
async fn test_message_without_body_uses_defaults() {
    let (app, _) = app();
    let (status, body) = call(&app, Method::POST, "/api/test-message", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["from"], "5511987654321");
}

#[tokio::test]
async fn send_reply_logs_without_touching_messages() {
    let (app, bot) = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/send-reply",
        Some(json!({ "phoneNumber": "5511999", "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let replies = bot.replies.list_all().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].to, "5511999");
    assert_eq!(replies[0].message, "hi");
    assert!(bot.messages.is_empty().unwrap());
}

#[tokio::test]
async fn numeric_phone_is_accepted_by_dashboard_endpoints() {
    let (app, bot) = app();

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/send-reply",
        Some(json!({ "phoneNumber": 5511999, "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot.replies.list_all().unwrap()[0].to, "5511999");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/test-message",
        Some(json!({ "phoneNumber": 5511888, "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["from"], "5511888");
}

#[tokio::test]
async fn send_reply_with_missing_fields_is_rejected() {
    let (app, bot) = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/send-reply",
        Some(json!({ "phoneNumber": "5511999" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
    assert!(bot.replies.is_empty().unwrap());
}

#[tokio::test]
async fn config_update_merges_with_type_rules() {
    let (app, _) = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/config",
        Some(json!({ "autoReplyEnabled": false, "autoReplyMessage": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["config"]["autoReplyEnabled"], false);
    assert_eq!(body["config"]["autoReplyMessage"], DEFAULT_AUTO_REPLY_MESSAGE);

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/config",
        Some(json!({ "ownerPhone": "123" })),
    )
    .await;
    assert_eq!(body["config"]["ownerPhone"], "123");
    assert_eq!(body["config"]["autoReplyEnabled"], false);

    let (_, config) = call(&app, Method::GET, "/api/config", None).await;
    assert_eq!(config, body["config"]);
}

#[tokio::test]
async fn disabled_auto_reply_leaves_message_unreplied() {
    let (app, _) = app();
    call(
        &app,
        Method::POST,
        "/api/config",
        Some(json!({ "autoReplyEnabled": false })),
    )
    .await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/test-message",
        Some(json!({ "phoneNumber": "1", "message": "x" })),
    )
    .await;
    assert_eq!(body["data"]["replied"], false);

    let (_, sent) = call(&app, Method::GET, "/api/sent-messages", None).await;
    assert_eq!(sent, json!([]));
}

#[tokio::test]
async fn messages_can_be_fetched_and_deleted() {
    let (app, _) = app();
    for text in ["one", "two", "three"] {
        call(
            &app,
            Method::POST,
            "/api/test-message",
            Some(json!({ "message": text })),
        )
        .await;
    }

    let (_, messages) = call(&app, Method::GET, "/api/messages", None).await;
    let texts: Vec<&str> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["message"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);

    let first_id = messages[0]["id"].as_u64().unwrap();
    let (status, one) = call(&app, Method::GET, &format!("/api/messages/{first_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["message"], "one");

    let (status, body) = call(&app, Method::DELETE, &format!("/api/messages/{first_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = call(&app, Method::GET, &format!("/api/messages/{first_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown and non-numeric ids still report success.
    let (status, _) = call(&app, Method::DELETE, "/api/messages/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::DELETE, "/api/messages/abc", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, messages) = call(&app, Method::GET, "/api/messages", None).await;
    assert_eq!(messages.as_array().unwrap().len(), 2);

    let (_, body) = call(&app, Method::DELETE, "/api/messages", None).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["cleared"], 2);

    let (_, messages) = call(&app, Method::GET, "/api/messages", None).await;
    assert_eq!(messages, json!([]));
    let (_, status) = call(&app, Method::GET, "/api/status", None).await;
    assert_eq!(status["messagesCount"], 0);
}

#[tokio::test]
async fn webhook_accepts_json_aliases() {
    let (app, bot) = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/webhook/messages",
        Some(json!({ "phone": "whatsapp:5511222", "text": "oi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let messages = bot.messages.list_all().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].from, "5511222");
    assert_eq!(messages[0].message, "oi");
}

#[tokio::test]
async fn webhook_acknowledges_signed_provider_form() {
    let (app, bot) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/webhook/messages")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("x-twilio-signature", "sig")
        .body(Body::from(
            "From=whatsapp%3A%2B5511333&Body=ola&MediaUrl0=https%3A%2F%2Fmedia.example%2F1",
        ))
        .unwrap();

    let (status, text) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "<Response></Response>");

    let messages = bot.messages.list_all().unwrap();
    assert_eq!(messages[0].from, "+5511333");
    assert_eq!(messages[0].message, "ola");
    assert_eq!(messages[0].media.as_deref(), Some("https://media.example/1"));
    assert!(messages[0].replied);
}

#[tokio::test]
async fn webhook_rejects_missing_fields_without_mutation() {
    let (app, bot) = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/webhook/messages",
        Some(json!({ "From": "5511" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(bot.messages.is_empty().unwrap());
    assert!(bot.replies.is_empty().unwrap());
}

#[tokio::test]
async fn info_describes_service() {
    let (app, _) = app();
    let (status, body) = call(&app, Method::GET, "/api/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Replybot");
    assert!(body["features"].as_array().is_some_and(|f| !f.is_empty()));
}
