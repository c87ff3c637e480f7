//! Read-only snapshots of the host data model's entities.
//!
//! Cartomark never mutates these: the host owns the data, and the engine
//! only derives display styles from it.

mod hazard;
mod place;
mod segment;
mod street;

pub use hazard::Hazard;
pub use place::{Address, Category, GeometryKind, ParkingLotType, Venue};
pub use segment::{Direction, RoadType, RoutingPreference, Segment, SegmentFlags, SpeedLimit};
pub use street::{City, Street};

use std::fmt;

use chrono::{DateTime, Utc};

macro_rules! entity_id {
    ($(#[$doc:meta] $name:ident),+ $(,)?) => {
        $(
            #[$doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u64);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<$name> for FeatureId {
                fn from(id: $name) -> Self {
                    Self(id.0)
                }
            }
        )+
    };
}

/// The key under which a displayed feature is looked up on a map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

entity_id! {
    /// Identity of a road segment.
    SegmentId,
    /// Identity of a street record.
    StreetId,
    /// Identity of a city record.
    CityId,
    /// Identity of a place (venue).
    VenueId,
    /// Identity of a permanent hazard.
    HazardId,
    /// Identity of a road-graph node.
    NodeId,
    /// Identity of a junction (roundabout marker).
    JunctionId,
    /// Identity of a state record.
    StateId,
    /// Identity of a country record.
    CountryId,
}

/// Who touched an entity, and when.
///
/// Timestamps are optional because freshly synced entities may carry only a
/// creation record, and some hosts omit editor identities entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modification {
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Modification {
    /// The most recent touch: updated-on, falling back to created-on.
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_on.or(self.created_on)
    }

    /// Age of the last touch in fractional days, if any timestamp is known.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_touched()
            .map(|t| (now - t).num_milliseconds() as f64 / 86_400_000.0)
    }
}
