// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message intake for the Replybot service.
//!
//! Inbound payloads are normalized to a `(phone, text, media)` triple, then
//! the [`IngestionPipeline`] records them and decides on an auto-reply. The
//! [`ReplyService`] handles operator replies and the [`StatusReporter`]
//! summarizes the stores.

pub mod normalize;
pub mod pipeline;
pub mod reply;
pub mod state;
pub mod status;

pub use normalize::{normalize, InboundPayload, NormalizedMessage};
pub use pipeline::IngestionPipeline;
pub use reply::ReplyService;
pub use state::BotState;
pub use status::StatusReporter;
