// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use replybot_core::ReplyBotError;
use replybot_intake::{BotState, IngestionPipeline, ReplyService, StatusReporter};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::webhook;

/// Shared state for axum request handlers.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// The stores, for plain reads and deletes.
    pub bot: BotState,
    pub pipeline: IngestionPipeline,
    pub replies: ReplyService,
    pub reporter: StatusReporter,
}

impl GatewayState {
    pub fn new(bot: BotState) -> Self {
        Self {
            pipeline: IngestionPipeline::new(bot.clone()),
            replies: ReplyService::new(bot.clone()),
            reporter: StatusReporter::new(bot.clone()),
            bot,
        }
    }
}

/// Gateway server configuration (mirrors `ServerConfig` from replybot-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the application router.
///
/// - `/api/*`: dashboard REST API
/// - `POST /webhook/messages`: provider and simulator intake
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/api/messages",
            get(handlers::get_messages).delete(handlers::delete_messages),
        )
        .route(
            "/api/messages/{id}",
            get(handlers::get_message).delete(handlers::delete_message),
        )
        .route(
            "/api/config",
            get(handlers::get_config).post(handlers::post_config),
        )
        .route("/api/send-reply", post(handlers::post_send_reply))
        .route("/api/sent-messages", get(handlers::get_sent_messages))
        .route("/api/test-message", post(handlers::post_test_message))
        .route("/api/status", get(handlers::get_status))
        .route("/api/info", get(handlers::get_info))
        .route("/webhook/messages", post(webhook::post_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to the configured host:port and serve until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ReplyBotError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ReplyBotError::Server {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on http://{addr}");
    serve_listener(listener, state, shutdown).await
}

/// Serve the router on an already-bound listener until `shutdown` resolves.
pub async fn serve_listener(
    listener: tokio::net::TcpListener,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ReplyBotError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ReplyBotError::Server {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
