// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Replybot service.
//!
//! Exposes the message log, reply log, configuration and status to the
//! dashboard, and accepts inbound messages on the provider webhook.

pub mod error;
pub mod handlers;
pub mod server;
pub mod webhook;

pub use error::ApiError;
pub use server::{router, serve_listener, start_server, GatewayState, ServerConfig};
