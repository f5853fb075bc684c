// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Holder of the live auto-reply policy.

use std::sync::RwLock;

use replybot_core::{BotConfig, ConfigPatch, ReplyBotError};

/// Process-wide [`BotConfig`], mutated only through [`ConfigStore::update`].
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<BotConfig>,
}

impl ConfigStore {
    pub fn new(initial: BotConfig) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Snapshot of the current config.
    pub fn get(&self) -> Result<BotConfig, ReplyBotError> {
        self.current
            .read()
            .map(|config| config.clone())
            .map_err(|_| ReplyBotError::poisoned("config store"))
    }

    /// Merge `patch` into the current config and return the merged result.
    pub fn update(&self, patch: &ConfigPatch) -> Result<BotConfig, ReplyBotError> {
        let mut config = self
            .current
            .write()
            .map_err(|_| ReplyBotError::poisoned("config store"))?;
        config.apply(patch);
        Ok(config.clone())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}
