//! Trailing-edge debounce timers.
//!
//! High-frequency host events (map data loads, pointer movement) are
//! coalesced so that a burst collapses into a single resolution pass.
//! Each debouncer owns one pending deadline: triggering while a fire is
//! pending replaces the deadline rather than queuing a second fire.
//!
//! Time is always passed in by the caller, never sampled internally, so
//! the host drives the clock from its event loop and tests drive it
//! deterministically.

use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::DebounceError;

new_key_type! {
    /// A unique identifier for a registered debouncer.
    pub struct DebounceId;
}

#[derive(Debug)]
struct DebounceData {
    /// Quiet period required before firing.
    delay: Duration,
    /// Pending fire time, if the debouncer has been triggered.
    deadline: Option<Instant>,
}

/// Manages a set of trailing-edge debouncers.
#[derive(Debug, Default)]
pub struct DebounceManager {
    entries: SlotMap<DebounceId, DebounceData>,
}

impl DebounceManager {
    /// Create a new manager with no debouncers.
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    /// Register a debouncer with the given quiet period.
    pub fn register(&mut self, delay: Duration) -> DebounceId {
        self.entries.insert(DebounceData {
            delay,
            deadline: None,
        })
    }

    /// Remove a debouncer, dropping any pending fire.
    pub fn remove(&mut self, id: DebounceId) -> Result<(), DebounceError> {
        self.entries
            .remove(id)
            .map(|_| ())
            .ok_or(DebounceError::InvalidId)
    }

    /// Record an occurrence of the debounced event.
    ///
    /// Any pending deadline is replaced: the debouncer fires `delay` after
    /// the *last* trigger of a burst.
    pub fn trigger(&mut self, id: DebounceId, now: Instant) -> Result<(), DebounceError> {
        let entry = self.entries.get_mut(id).ok_or(DebounceError::InvalidId)?;
        entry.deadline = Some(now + entry.delay);
        Ok(())
    }

    /// Whether the debouncer has a pending fire.
    pub fn is_pending(&self, id: DebounceId) -> bool {
        self.entries.get(id).is_some_and(|e| e.deadline.is_some())
    }

    /// The duration until the earliest pending fire, if any.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.entries
            .values()
            .filter_map(|e| e.deadline)
            .min()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire every debouncer whose deadline has passed.
    ///
    /// Returns the IDs that fired; their deadlines are cleared.
    pub fn process_expired(&mut self, now: Instant) -> Vec<DebounceId> {
        let mut fired = Vec::new();
        for (id, entry) in &mut self.entries {
            if entry.deadline.is_some_and(|deadline| deadline <= now) {
                entry.deadline = None;
                tracing::trace!(target: "cartomark_core::debounce", ?id, "debouncer fired");
                fired.push(id);
            }
        }
        fired
    }
}
