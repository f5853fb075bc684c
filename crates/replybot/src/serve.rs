// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `replybot serve` command implementation.
//!
//! Seeds the stores from configuration and runs the gateway until Ctrl+C.

use replybot_config::ReplyBotConfig;
use replybot_core::ReplyBotError;
use replybot_gateway::{start_server, GatewayState, ServerConfig};
use replybot_intake::BotState;

/// Run the service until a shutdown signal arrives.
pub async fn run_serve(config: ReplyBotConfig) -> Result<(), ReplyBotError> {
    init_tracing(&config.server.log_level);

    let initial = config.initial_bot_config();
    tracing::info!(
        auto_reply_enabled = initial.auto_reply_enabled,
        owner_phone = %initial.owner_phone,
        "starting replybot"
    );

    let state = GatewayState::new(BotState::new(initial));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    tracing::info!(
        "simulate an inbound message with: curl -X POST http://{}:{}/api/test-message -H 'Content-Type: application/json' -d '{{\"phoneNumber\":\"5511913274243\",\"message\":\"Olá!\"}}'",
        server_config.host,
        server_config.port
    );

    start_server(&server_config, state, shutdown_signal()).await?;
    tracing::info!("replybot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("replybot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
