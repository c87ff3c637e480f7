//! Street and city snapshots.

use super::{CityId, CountryId, StateId, StreetId};

/// A named street record referenced by segments and venue addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Street {
    pub id: StreetId,
    /// Display name; an empty name marks an unnamed road.
    pub name: String,
    pub city: Option<CityId>,
}

impl Street {
    #[inline]
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

/// A city record referenced by streets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    /// Display name; an empty name marks a "no city" placeholder record.
    pub name: String,
    pub state: Option<StateId>,
    pub country: Option<CountryId>,
}

impl City {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}
