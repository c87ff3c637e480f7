//! Event types and the host notification interface.
//!
//! The host's heterogeneous notification mechanisms are normalized into a
//! closed set of logical event kinds. The preferred path is the host's
//! generic per-entity-kind change tracking; hosts that reject a kind as
//! unsupported expose their low-level repository hooks instead, and the
//! tracking adapter re-emits those as the same logical events.

use std::fmt;

use crate::entity::FeatureId;
use crate::error::TrackError;
use crate::signal::Signal;

/// The entity kinds the host can report changes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Segments,
    Streets,
    Cities,
    Venues,
    PermanentHazards,
}

impl EntityKind {
    /// Stable name, used by hosts that key data models by string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Segments => "segments",
            Self::Streets => "streets",
            Self::Cities => "cities",
            Self::Venues => "venues",
            Self::PermanentHazards => "permanentHazards",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A logical change to a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    /// The entity entered the loaded data set.
    Added(FeatureId),
    /// The entity's attributes changed.
    Changed(FeatureId),
    /// The entity left the loaded data set (e.g., scrolled out of view).
    Removed(FeatureId),
    /// The entity was deleted from the map.
    Deleted(FeatureId),
    /// The entity's pending edits were saved.
    Saved(FeatureId),
}

/// A logical model event, tagged with the entity kind it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEvent {
    pub kind: EntityKind,
    pub change: ModelChange,
}

/// Raw notifications from a low-level entity repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRepositoryEvent {
    ObjectsAdded(Vec<FeatureId>),
    ObjectsChanged(Vec<FeatureId>),
    /// An entity was re-identified, typically after its first save.
    ObjectIdChanged { old: FeatureId, new: FeatureId },
    ObjectsRemoved(Vec<FeatureId>),
    ObjectsStateDeleted(Vec<FeatureId>),
    ObjectsSynced(Vec<FeatureId>),
}

impl RawRepositoryEvent {
    /// Translate a raw notification into logical model events.
    ///
    /// An id change is reported as a removal of the old identity followed
    /// by an addition of the new one.
    pub fn into_logical(self, kind: EntityKind) -> Vec<ModelEvent> {
        let event = |change| ModelEvent { kind, change };
        match self {
            Self::ObjectsAdded(ids) => {
                ids.into_iter().map(|id| event(ModelChange::Added(id))).collect()
            }
            Self::ObjectsChanged(ids) => {
                ids.into_iter().map(|id| event(ModelChange::Changed(id))).collect()
            }
            Self::ObjectIdChanged { old, new } => vec![
                event(ModelChange::Removed(old)),
                event(ModelChange::Added(new)),
            ],
            Self::ObjectsRemoved(ids) => {
                ids.into_iter().map(|id| event(ModelChange::Removed(id))).collect()
            }
            Self::ObjectsStateDeleted(ids) => {
                ids.into_iter().map(|id| event(ModelChange::Deleted(id))).collect()
            }
            Self::ObjectsSynced(ids) => {
                ids.into_iter().map(|id| event(ModelChange::Saved(id))).collect()
            }
        }
    }
}

/// Viewport-level host events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// A chunk of map data finished loading.
    DataLoaded,
    /// The pointer moved over the map.
    PointerMoved,
}

/// A low-level entity repository exposing raw change notifications.
pub trait ChangeRepository {
    /// Subscribe to every raw notification this repository emits.
    fn subscribe(&mut self, handler: Box<dyn Fn(RawRepositoryEvent) + Send + Sync>);
}

/// The host's notification surface.
pub trait HostEvents {
    /// Viewport event signal (data-loaded, pointer-moved).
    fn map_events(&self) -> Signal<MapEvent>;

    /// Logical model-change signal. Events flow here once a kind is
    /// tracked, whether natively or via the legacy hook path.
    fn model_events(&self) -> Signal<ModelEvent>;

    /// Ask the host to natively track an entity kind.
    fn track(&mut self, kind: EntityKind) -> Result<(), TrackError>;

    /// Low-level repository access for the legacy hook path.
    ///
    /// Returns `None` when the host has no repository for the kind.
    fn repository(&mut self, kind: EntityKind) -> Option<&mut dyn ChangeRepository>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_change_splits_into_remove_and_add() {
        let events = RawRepositoryEvent::ObjectIdChanged {
            old: FeatureId(1),
            new: FeatureId(2),
        }
        .into_logical(EntityKind::Segments);
        assert_eq!(
            events,
            vec![
                ModelEvent { kind: EntityKind::Segments, change: ModelChange::Removed(FeatureId(1)) },
                ModelEvent { kind: EntityKind::Segments, change: ModelChange::Added(FeatureId(2)) },
            ]
        );
    }

    #[test]
    fn synced_maps_to_saved() {
        let events = RawRepositoryEvent::ObjectsSynced(vec![FeatureId(7)])
            .into_logical(EntityKind::Venues);
        assert_eq!(
            events,
            vec![ModelEvent { kind: EntityKind::Venues, change: ModelChange::Saved(FeatureId(7)) }]
        );
    }
}
