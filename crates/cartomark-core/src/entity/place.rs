//! Place (venue) snapshot and its attribute types.

use super::{Modification, StreetId, VenueId};

/// Whether a place is drawn as a point marker or a filled area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Area,
}

/// A venue category.
///
/// Only the categories that styling rules inspect are named; everything
/// else round-trips through [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    GasStation,
    ParkingLot,
    RiverStream,
    Canal,
    SeaLakePool,
    Park,
    SwampMarsh,
    ForestGrove,
    GolfCourse,
    JunctionInterchange,
    CrisisLocations,
    Other(String),
}

impl Category {
    /// Decode a host category code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "GAS_STATION" => Self::GasStation,
            "PARKING_LOT" => Self::ParkingLot,
            "RIVER_STREAM" => Self::RiverStream,
            "CANAL" => Self::Canal,
            "SEA_LAKE_POOL" => Self::SeaLakePool,
            "PARK" => Self::Park,
            "SWAMP_MARSH" => Self::SwampMarsh,
            "FOREST_GROVE" => Self::ForestGrove,
            "GOLF_COURSE" => Self::GolfCourse,
            "JUNCTION_INTERCHANGE" => Self::JunctionInterchange,
            "CRISIS_LOCATIONS" => Self::CrisisLocations,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The host category code.
    pub fn code(&self) -> &str {
        match self {
            Self::GasStation => "GAS_STATION",
            Self::ParkingLot => "PARKING_LOT",
            Self::RiverStream => "RIVER_STREAM",
            Self::Canal => "CANAL",
            Self::SeaLakePool => "SEA_LAKE_POOL",
            Self::Park => "PARK",
            Self::SwampMarsh => "SWAMP_MARSH",
            Self::ForestGrove => "FOREST_GROVE",
            Self::GolfCourse => "GOLF_COURSE",
            Self::JunctionInterchange => "JUNCTION_INTERCHANGE",
            Self::CrisisLocations => "CRISIS_LOCATIONS",
            Self::Other(code) => code,
        }
    }
}

/// Access restriction of a parking lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParkingLotType {
    Public,
    Restricted,
    Private,
}

/// A venue's resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: Option<StreetId>,
    pub house_number: Option<String>,
}

/// A read-only snapshot of a place.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: VenueId,
    pub geometry: GeometryKind,
    /// Display name; empty when the place has not been named.
    pub name: String,
    pub residential: bool,
    /// Edit restriction rank; 0 means unlocked.
    pub lock_rank: u8,
    pub categories: Vec<Category>,
    /// External data-provider links.
    pub external_providers: Vec<String>,
    /// Host edit state: the place has pending, unsaved changes.
    pub being_edited: bool,
    /// Host selection state.
    pub selected: bool,
    pub modification: Modification,
}

impl Venue {
    #[inline]
    pub fn has_category(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }
}
