//! Error types for the core interfaces.

use std::fmt;

use crate::display::LayerKind;
use crate::events::EntityKind;

/// Errors from the host's generic change-tracking registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// The host's generic tracking does not know this entity kind.
    ///
    /// Recoverable: callers fall back to the kind's low-level repository
    /// hooks.
    UnsupportedKind(EntityKind),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedKind(kind) => {
                write!(f, "generic change tracking does not support '{kind}'")
            }
        }
    }
}

impl std::error::Error for TrackError {}

/// Errors from display-layer management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// The layer already exists. A benign duplicate-init condition.
    AlreadyExists(LayerKind),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists(kind) => {
                write!(f, "display layer '{}' already exists", kind.name())
            }
        }
    }
}

impl std::error::Error for LayerError {}

/// Errors from the debounce manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceError {
    /// The debouncer ID is invalid or has been removed.
    InvalidId,
}

impl fmt::Display for DebounceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "invalid or removed debouncer ID"),
        }
    }
}

impl std::error::Error for DebounceError {}
