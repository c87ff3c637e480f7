//! The change tracking adapter.
//!
//! Hosts offer two registration mechanisms: a generic per-entity-kind
//! change tracking (preferred), and low-level per-kind repository hooks.
//! The adapter probes the generic path first; when the host rejects the
//! kind as unsupported it attaches to the repository and re-emits raw
//! notifications as the logical model events. The chosen path is cached
//! per kind, which also guards against double registration.

use std::collections::HashMap;

use cartomark_core::{EntityKind, HostEvents, TrackError};

use crate::error::{Error, Result};

/// Which registration mechanism serves an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingPath {
    /// The host's generic change tracking accepted the kind.
    Native,
    /// Raw repository hooks are re-emitted as logical events.
    Legacy,
}

/// Caches the tracking path chosen for each entity kind.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    paths: HashMap<EntityKind, TrackingPath>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path previously installed for a kind, if any.
    pub fn path(&self, kind: EntityKind) -> Option<TrackingPath> {
        self.paths.get(&kind).copied()
    }

    /// Ensure model events flow for an entity kind.
    ///
    /// Idempotent: a kind that is already tracked keeps its existing
    /// registration. Fails only when the host knows neither mechanism for
    /// the kind.
    pub fn install(
        &mut self,
        host: &mut dyn HostEvents,
        kind: EntityKind,
    ) -> Result<TrackingPath> {
        if let Some(path) = self.path(kind) {
            return Ok(path);
        }

        let path = match host.track(kind) {
            Ok(()) => TrackingPath::Native,
            Err(TrackError::UnsupportedKind(_)) => {
                tracing::warn!(
                    target: "cartomark::tracking",
                    %kind,
                    "generic change tracking unsupported, attaching repository hooks"
                );
                let sink = host.model_events();
                let repository = host
                    .repository(kind)
                    .ok_or(Error::UnknownEntityKind(kind))?;
                repository.subscribe(Box::new(move |raw| {
                    for event in raw.into_logical(kind) {
                        sink.emit(&event);
                    }
                }));
                TrackingPath::Legacy
            }
        };

        self.paths.insert(kind, path);
        Ok(path)
    }
}
