//! The per-invocation rule context.
//!
//! Built fresh at the start of every resolution pass and discarded after.
//! It snapshots the lookup tables the resolvers need and resolves the
//! selection-dependent filters: a checked filter whose selection is missing
//! is simply disabled for the pass rather than an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use cartomark_core::MapDataModel;
use cartomark_core::entity::{Category, City, CityId, Street, StreetId};

use crate::settings::{EditorSelector, HighlightSettings, RoadTypeSelector};

/// The resolved city-filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityFilter {
    pub city: CityId,
    /// Match every city *except* the selected one.
    pub invert: bool,
}

/// Everything a resolution pass needs besides the entity itself.
#[derive(Debug, Clone)]
pub struct RuleContext {
    pub now: DateTime<Utc>,
    /// Viewport zoom at the start of the pass.
    pub zoom: u8,
    pub current_user: Option<String>,
    /// Streets currently loaded, keyed by id.
    pub streets: HashMap<StreetId, Street>,
    /// Cities currently loaded, keyed by id.
    pub cities: HashMap<CityId, City>,
    /// Category groups that should not be used as a venue's category.
    pub main_categories: Vec<Category>,
    /// Editor filter, if enabled and an editor is selected.
    pub editor: Option<EditorSelector>,
    /// City filter, if enabled and a city is selected.
    pub city: Option<CityFilter>,
    /// Road-type rule, if enabled and a selection exists.
    pub road_type: Option<RoadTypeSelector>,
    /// Recent-edits window in days, if the rule is enabled.
    pub recent_days: Option<u32>,
}

impl RuleContext {
    /// Snapshot the model state and resolve the filter selections.
    pub fn build(
        settings: &HighlightSettings,
        model: &dyn MapDataModel,
        zoom: u8,
        now: DateTime<Utc>,
    ) -> Self {
        let streets = model.streets().into_iter().map(|s| (s.id, s)).collect();
        let cities = model.cities().into_iter().map(|c| (c.id, c)).collect();

        // Parking lots and crisis locations are leaf-usable groups, so they
        // never count as an ambiguous category choice.
        let main_categories = model
            .venue_main_categories()
            .into_iter()
            .filter(|c| !matches!(c, Category::ParkingLot | Category::CrisisLocations))
            .collect();

        let editor = if settings.editor_filter {
            settings.selected_editor.clone()
        } else {
            None
        };
        let city = if settings.city_filter {
            settings.selected_city.map(|city| CityFilter {
                city,
                invert: settings.city_invert,
            })
        } else {
            None
        };
        let road_type = if settings.road_type_filter {
            settings.selected_road_type
        } else {
            None
        };

        Self {
            now,
            zoom,
            current_user: model.current_user(),
            streets,
            cities,
            main_categories,
            editor,
            city,
            road_type,
            recent_days: settings.recent.then_some(settings.recent_days),
        }
    }

    /// Look up a street; absence degrades the dependent rule.
    pub fn street(&self, id: StreetId) -> Option<&Street> {
        self.streets.get(&id)
    }

    /// Look up the city a street belongs to.
    pub fn city_of(&self, street: &Street) -> Option<&City> {
        street.city.and_then(|id| self.cities.get(&id))
    }
}
