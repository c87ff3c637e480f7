//! The highlight settings snapshot.
//!
//! The host UI owns checkboxes and selects; the engine never reads them
//! directly. Instead each resolution pass receives an immutable
//! [`HighlightSettings`] snapshot taken at entry, so concurrent UI
//! interaction between passes is harmless.

use cartomark_core::entity::{CityId, RoadType};

/// The editor selection of the editor-filter rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSelector {
    /// A specific editor, by user name.
    Named(String),
    /// Everyone except the logged-in user.
    AnyoneElse,
}

impl EditorSelector {
    /// Whether an entity last updated by `updated_by` matches the selection.
    pub fn matches(&self, updated_by: Option<&str>, current_user: Option<&str>) -> bool {
        match self {
            Self::Named(name) => updated_by == Some(name.as_str()),
            Self::AnyoneElse => updated_by != current_user,
        }
    }
}

/// The road-type selection of the road-type rule.
///
/// Besides exact road types, the selection can target one of the special
/// per-segment flags or a whole class of types. Wire codes (used by the
/// persisted settings record) are 64–70 for the flag selectors and 98/99
/// for the class selectors; anything below 64 is an exact road-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadTypeSelector {
    Exact(RoadType),
    AnyFlag,
    Tunnel,
    TunnelWithElevation,
    Unpaved,
    Headlights,
    Beacons,
    NearbyHov,
    NonRoutable,
    NonDrivable,
}

impl RoadTypeSelector {
    /// The wire code for the persisted settings record.
    pub const fn code(self) -> u8 {
        match self {
            Self::Exact(road_type) => road_type.code(),
            Self::AnyFlag => 64,
            Self::Tunnel => 65,
            Self::TunnelWithElevation => 66,
            Self::Unpaved => 67,
            Self::Headlights => 68,
            Self::Beacons => 69,
            Self::NearbyHov => 70,
            Self::NonRoutable => 98,
            Self::NonDrivable => 99,
        }
    }

    /// Decode a wire code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            64 => Some(Self::AnyFlag),
            65 => Some(Self::Tunnel),
            66 => Some(Self::TunnelWithElevation),
            67 => Some(Self::Unpaved),
            68 => Some(Self::Headlights),
            69 => Some(Self::Beacons),
            70 => Some(Self::NearbyHov),
            98 => Some(Self::NonRoutable),
            99 => Some(Self::NonDrivable),
            c if c < 64 => Some(Self::Exact(RoadType(c))),
            _ => None,
        }
    }

    /// Whether this selector targets one of the special segment flags.
    pub const fn is_flag_selector(self) -> bool {
        matches!(
            self,
            Self::AnyFlag
                | Self::Tunnel
                | Self::TunnelWithElevation
                | Self::Unpaved
                | Self::Headlights
                | Self::Beacons
                | Self::NearbyHov
        )
    }
}

/// A flat snapshot of every highlight control.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSettings {
    // Segment rules
    pub locked: bool,
    pub toll: bool,
    pub no_city: bool,
    pub alt_name: bool,
    pub no_name: bool,
    pub one_way: bool,
    pub restrictions: bool,
    pub speed_limits: bool,
    /// Include ramps in the speed-limit rule.
    pub speed_limits_ramps: bool,
    /// Include plain streets in the speed-limit rule.
    pub speed_limits_streets: bool,
    pub avg_speed_cams: bool,
    pub lanes: bool,
    pub no_house_numbers: bool,
    pub routing_pref: bool,

    // Filters shared between segments and places
    pub city_filter: bool,
    pub city_invert: bool,
    pub selected_city: Option<CityId>,
    pub editor_filter: bool,
    pub selected_editor: Option<EditorSelector>,
    pub road_type_filter: bool,
    pub selected_road_type: Option<RoadTypeSelector>,
    pub recent: bool,
    /// Day threshold of the recent-edits rule.
    pub recent_days: u32,

    // Place rules
    pub places: bool,
    pub places_locked: bool,
    pub places_incomplete: bool,

    // Hazards
    pub hazards: bool,
}

impl Default for HighlightSettings {
    /// First-run defaults: place highlighting on, a one-week recent-edit
    /// window, everything else off.
    fn default() -> Self {
        Self {
            locked: false,
            toll: false,
            no_city: false,
            alt_name: false,
            no_name: false,
            one_way: false,
            restrictions: false,
            speed_limits: false,
            speed_limits_ramps: false,
            speed_limits_streets: false,
            avg_speed_cams: false,
            lanes: false,
            no_house_numbers: false,
            routing_pref: false,
            city_filter: false,
            city_invert: false,
            selected_city: None,
            editor_filter: false,
            selected_editor: None,
            road_type_filter: false,
            selected_road_type: None,
            recent: false,
            recent_days: 7,
            places: true,
            places_locked: false,
            places_incomplete: false,
            hazards: false,
        }
    }
}

impl HighlightSettings {
    /// Master switch: whether any segment rule could fire at all.
    pub fn any_segment_rule_enabled(&self) -> bool {
        self.locked
            || self.toll
            || self.no_city
            || self.no_name
            || self.alt_name
            || self.one_way
            || self.restrictions
            || self.speed_limits
            || self.avg_speed_cams
            || self.lanes
            || self.no_house_numbers
            || self.routing_pref
            || self.city_filter
            || self.editor_filter
            || self.road_type_filter
            || self.recent
    }
}
