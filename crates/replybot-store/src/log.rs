// SPDX-FileCopyrightText: 2026 Replybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered, id-allocating in-memory logs.
//!
//! Each log owns its entries and its id allocator behind one `RwLock`, so an
//! id is always allocated inside the same critical section as the append it
//! labels. Readers take the read lock and never observe a half-written entry.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use replybot_core::{Message, ReplyBotError, Reply};

/// An entry that can be stored in an [`OrderedLog`].
pub trait LogEntry: Clone {
    /// Numeric id assigned by the log at append time.
    fn log_id(&self) -> u64;
}

impl LogEntry for Message {
    fn log_id(&self) -> u64 {
        self.id.0
    }
}

impl LogEntry for Reply {
    fn log_id(&self) -> u64 {
        self.id.0
    }
}

/// Strictly increasing id source seeded from wall-clock milliseconds.
///
/// `next = max(now_millis, last + 1)`: ids read like timestamps but never
/// repeat, even for appends within the same millisecond or after a clock
/// step backwards.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Allocate the next id given the current time in milliseconds.
    pub fn allocate_at(&mut self, now_millis: u64) -> u64 {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Allocate the next id using the system clock.
    pub fn allocate(&mut self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        self.allocate_at(now)
    }
}

#[derive(Debug)]
struct LogInner<T> {
    entries: Vec<T>,
    ids: IdAllocator,
}

/// Append-only ordered collection with delete-by-id and delete-all.
#[derive(Debug)]
pub struct OrderedLog<T> {
    name: &'static str,
    inner: RwLock<LogInner<T>>,
}

/// Log of inbound messages.
pub type MessageLog = OrderedLog<Message>;

/// Log of outbound replies.
pub type ReplyLog = OrderedLog<Reply>;

impl<T: LogEntry> OrderedLog<T> {
    /// Create an empty log. `name` is used in logs and error messages.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(LogInner {
                entries: Vec::new(),
                ids: IdAllocator::default(),
            }),
        }
    }

    /// Acquire exclusive access for a multi-step mutation.
    ///
    /// Callers holding more than one log must lock the message log first.
    pub fn write(&self) -> Result<LogWriter<'_, T>, ReplyBotError> {
        self.inner
            .write()
            .map(|guard| LogWriter { guard })
            .map_err(|_| ReplyBotError::poisoned(self.name))
    }

    /// Acquire a consistent read view.
    pub fn read(&self) -> Result<LogReader<'_, T>, ReplyBotError> {
        self.inner
            .read()
            .map(|guard| LogReader { guard })
            .map_err(|_| ReplyBotError::poisoned(self.name))
    }

    /// Allocate an id and append the entry built from it.
    pub fn append_with(&self, build: impl FnOnce(u64) -> T) -> Result<T, ReplyBotError> {
        Ok(self.write()?.append_with(build))
    }

    /// All entries in insertion order, oldest first.
    pub fn list_all(&self) -> Result<Vec<T>, ReplyBotError> {
        Ok(self.read()?.entries().to_vec())
    }

    /// Look up a single entry.
    pub fn get(&self, id: u64) -> Result<Option<T>, ReplyBotError> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Remove the entry with `id`. Returns `false` when no entry matched.
    pub fn delete_by_id(&self, id: u64) -> Result<bool, ReplyBotError> {
        let mut writer = self.write()?;
        let before = writer.guard.entries.len();
        writer.guard.entries.retain(|entry| entry.log_id() != id);
        let removed = writer.guard.entries.len() != before;
        tracing::debug!(log = self.name, id, removed, "delete by id");
        Ok(removed)
    }

    /// Remove every entry, returning how many were cleared.
    ///
    /// The id allocator is kept, so cleared ids are never handed out again.
    pub fn delete_all(&self) -> Result<usize, ReplyBotError> {
        let mut writer = self.write()?;
        let cleared = writer.guard.entries.len();
        writer.guard.entries.clear();
        tracing::debug!(log = self.name, cleared, "delete all");
        Ok(cleared)
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> Result<usize, ReplyBotError> {
        Ok(self.read()?.len())
    }

    /// True when the log holds no entries.
    pub fn is_empty(&self) -> Result<bool, ReplyBotError> {
        Ok(self.len()? == 0)
    }
}

/// Exclusive handle on a log, held for the duration of a compound mutation.
pub struct LogWriter<'a, T> {
    guard: RwLockWriteGuard<'a, LogInner<T>>,
}

impl<T: LogEntry> LogWriter<'_, T> {
    /// Allocate an id and append the entry built from it.
    pub fn append_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.guard.ids.allocate();
        let entry = build(id);
        self.guard.entries.push(entry.clone());
        entry
    }

    /// Mutate the entry with `id` in place, returning its new state.
    pub fn update(&mut self, id: u64, change: impl FnOnce(&mut T)) -> Option<T> {
        let entry = self
            .guard
            .entries
            .iter_mut()
            .find(|entry| entry.log_id() == id)?;
        change(entry);
        Some(entry.clone())
    }
}

/// Shared read handle on a log.
pub struct LogReader<'a, T> {
    guard: RwLockReadGuard<'a, LogInner<T>>,
}

impl<T: LogEntry> LogReader<'_, T> {
    pub fn entries(&self) -> &[T] {
        &self.guard.entries
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.guard.entries.iter().find(|entry| entry.log_id() == id)
    }

    pub fn len(&self) -> usize {
        self.guard.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.entries.is_empty()
    }
}
