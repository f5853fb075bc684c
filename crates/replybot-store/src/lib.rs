// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory state stores for the Replybot service.
//!
//! Nothing here survives a restart. Every store guards its own state with a
//! lock; compound operations across stores live in `replybot-intake`.

pub mod config_store;
pub mod log;

pub use config_store::ConfigStore;
pub use log::{IdAllocator, LogEntry, LogReader, LogWriter, MessageLog, OrderedLog, ReplyLog};
