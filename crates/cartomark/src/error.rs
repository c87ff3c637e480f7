//! Error types for the highlight layer.

use cartomark_core::EntityKind;

/// Result type alias for highlight-layer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while wiring Cartomark into a host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither generic change tracking nor a low-level repository exists
    /// for the entity kind. Unrecoverable: the host does not know the
    /// kind at all.
    #[error("no data model repository found for entity kind '{0}'")]
    UnknownEntityKind(EntityKind),
}
