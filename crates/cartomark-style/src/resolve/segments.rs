//! Segment style resolution.
//!
//! Precedence, first match wins:
//!
//! 1. Coarse-zoom guard for minor roads
//! 2. Pending-name guard for freshly drawn roads
//! 3. Recent-edits rule (when enabled, it replaces the base rules)
//! 4. The base rule chain (toll, permissions, locks, restrictions, names,
//!    speed limits, cameras, lanes, cities, direction, road types, routing
//!    preference, house numbers)
//! 5. Editor-filter overlay (recolors default-colored results only)
//! 6. City-filter overlay (recolors default or no-city results only)

use cartomark_core::entity::{City, RoadType, RoutingPreference, Segment, SegmentFlags, Street};
use cartomark_core::{Color, DashPattern};

use crate::context::RuleContext;
use crate::settings::{HighlightSettings, RoadTypeSelector};

use super::{
    DEFAULT_SEGMENT_COLOR, DEFAULT_SEGMENT_WIDTH, MIN_HIGHLIGHT_ZOOM, SegmentStyle, recency_green,
};

const PENDING_NAME_RED: Color = Color::RED;
const TOLL_BLUE: Color = Color::BLUE;
const LOCK_RED: Color = Color::RED;
const VIOLET: Color = Color::rgb(0x99, 0x00, 0x99);
const UNPAVED_DARK_RED: Color = Color::rgb(0x99, 0x00, 0x00);
const ALT_NAME_LIME: Color = Color::rgb(0x99, 0xcc, 0x00);
const SPEED_LIMIT_ORANGE: Color = Color::rgb(0xff, 0x88, 0x00);
const LANES_CYAN: Color = Color::rgb(0x00, 0x88, 0x88);
const UNNAMED_AMBER: Color = Color::rgb(0xff, 0xbb, 0x00);
const NO_CITY_GRAY: Color = Color::rgb(0x88, 0x88, 0x88);
const HOUSE_NUMBER_MAROON: Color = Color::MAROON;
const EDITOR_GREEN: Color = Color::LIME;
const CITY_PINK: Color = Color::rgb(0xed, 0x28, 0xea);
const ALT_CITY_PINK: Color = Color::rgb(0xed, 0x28, 0xeb);

/// Derived query results for one segment, computed by the sweep so the
/// resolver itself stays pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentQueries {
    /// The segment is part of a toll road.
    pub toll: bool,
    /// The current user may edit the segment.
    pub editable: bool,
}

impl Default for SegmentQueries {
    fn default() -> Self {
        Self {
            toll: false,
            editable: true,
        }
    }
}

/// A resolved segment style plus the overlay outcomes the sweep counts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentResolution {
    pub style: SegmentStyle,
    /// The editor-filter overlay recolored this segment.
    pub editor_match: bool,
    /// The city-filter overlay recolored this segment.
    pub city_match: bool,
}

/// Resolve the display style for one segment.
pub fn resolve(
    segment: &Segment,
    queries: SegmentQueries,
    settings: &HighlightSettings,
    ctx: &RuleContext,
) -> SegmentResolution {
    // Minor roads are not drawn at coarse zoom levels; suppress their
    // highlights entirely.
    if ctx.zoom <= MIN_HIGHLIGHT_ZOOM && !segment.road_type.in_major_range() {
        return SegmentResolution::default();
    }

    // Freshly drawn roads with no street record (or no nodes yet) get the
    // pending-name treatment and nothing else.
    if segment.primary_street.is_none()
        || (segment.is_edgeless() && !segment.road_type.is_special())
    {
        return SegmentResolution {
            style: SegmentStyle {
                color: PENDING_NAME_RED,
                opacity: 0.75,
                width: 10.0,
                dash: DashPattern::Solid,
            },
            ..Default::default()
        };
    }

    let street = segment.primary_street.and_then(|id| ctx.street(id));
    let unnamed = street.is_some_and(Street::is_unnamed);
    let city = street.and_then(|s| ctx.city_of(s));
    let no_city = city.is_some_and(City::is_empty);

    let mut style = if settings.recent {
        recent_rule(segment, ctx).unwrap_or_default()
    } else {
        base_rule(segment, queries, settings, ctx, unnamed, no_city).unwrap_or_default()
    };

    let mut editor_match = false;
    let mut city_match = false;

    // Editor-filter overlay. Only default-colored results are touched, and
    // the recent-edits rule supersedes the overlay entirely.
    if !settings.recent {
        if let Some(selector) = &ctx.editor {
            if style.is_default() {
                let updated_by = segment.modification.updated_by.as_deref();
                if selector.matches(updated_by, ctx.current_user.as_deref()) {
                    style = SegmentStyle {
                        color: EDITOR_GREEN,
                        opacity: 0.5,
                        ..Default::default()
                    };
                    editor_match = true;
                } else {
                    style = SegmentStyle::default();
                }
            }
        }
    }

    // City-filter overlay. A primary-street match is solid pink, a match
    // found only on an alternate street is dashed pink; only default or
    // no-city-gray results are recolored or reset.
    if let Some(filter) = &ctx.city {
        let primary_match = match street.and_then(|s| s.city) {
            Some(city_id) => {
                if filter.invert {
                    city_id != filter.city && !no_city
                } else {
                    city_id == filter.city
                }
            }
            None => false,
        };
        let alt_match = !primary_match
            && segment.alternate_streets.iter().any(|street_id| {
                ctx.street(*street_id).is_some_and(|s| {
                    let matched = s.city == Some(filter.city);
                    if filter.invert { !matched } else { matched }
                })
            });

        let recolorable = style.color == DEFAULT_SEGMENT_COLOR || style.color == NO_CITY_GRAY;
        if primary_match && recolorable {
            style = SegmentStyle {
                color: CITY_PINK,
                opacity: 0.5,
                ..Default::default()
            };
            city_match = true;
        } else if alt_match && recolorable {
            style = SegmentStyle {
                color: ALT_CITY_PINK,
                opacity: 0.5,
                width: DEFAULT_SEGMENT_WIDTH,
                dash: DashPattern::dashed(10, 10),
            };
            city_match = true;
        } else if !primary_match && !alt_match && !no_city && recolorable {
            style = SegmentStyle::default();
        }
    }

    SegmentResolution {
        style,
        editor_match,
        city_match,
    }
}

/// The recent-edits rule: green with brightness decaying over the window.
fn recent_rule(segment: &Segment, ctx: &RuleContext) -> Option<SegmentStyle> {
    let window = ctx.recent_days?;
    let age = segment.modification.age_days(ctx.now)?;
    if age > f64::from(window) {
        return None;
    }
    if let Some(selector) = &ctx.editor {
        let updated_by = segment.modification.updated_by.as_deref();
        if !selector.matches(updated_by, ctx.current_user.as_deref()) {
            return None;
        }
    }
    Some(SegmentStyle {
        color: recency_green(age, window),
        opacity: 0.5,
        ..Default::default()
    })
}

/// The mutually exclusive base rule chain; first match wins.
fn base_rule(
    segment: &Segment,
    queries: SegmentQueries,
    settings: &HighlightSettings,
    ctx: &RuleContext,
    unnamed: bool,
    no_city: bool,
) -> Option<SegmentStyle> {
    if settings.toll && queries.toll {
        return Some(SegmentStyle {
            color: TOLL_BLUE,
            opacity: 0.5,
            width: DEFAULT_SEGMENT_WIDTH,
            dash: DashPattern::dashed(10, 10),
        });
    }

    if settings.locked && !queries.editable {
        return Some(SegmentStyle {
            color: Color::BLACK,
            opacity: 0.75,
            width: 3.0,
            dash: DashPattern::Solid,
        });
    }

    if settings.locked && segment.lock_rank > 0 {
        return Some(SegmentStyle {
            color: LOCK_RED,
            opacity: 0.2 * f32::from(segment.lock_rank.min(5)),
            ..Default::default()
        });
    }

    if settings.restrictions && segment.has_restrictions {
        return Some(SegmentStyle {
            color: VIOLET,
            opacity: 0.5,
            width: DEFAULT_SEGMENT_WIDTH,
            dash: DashPattern::dashed(10, 10),
        });
    }

    if settings.alt_name && !segment.alternate_streets.is_empty() {
        return Some(SegmentStyle {
            color: ALT_NAME_LIME,
            opacity: 0.75,
            width: DEFAULT_SEGMENT_WIDTH,
            dash: if unnamed {
                DashPattern::dashed(10, 10)
            } else {
                DashPattern::Solid
            },
        });
    }

    if settings.speed_limits && speed_limit_missing(segment, settings) {
        return Some(SegmentStyle {
            color: SPEED_LIMIT_ORANGE,
            opacity: 0.8,
            width: 4.0,
            dash: DashPattern::Solid,
        });
    }

    if settings.avg_speed_cams && segment.flags.has_speed_camera() {
        return Some(SegmentStyle {
            color: Color::BLUE,
            opacity: 0.4,
            width: 4.0,
            dash: DashPattern::Solid,
        });
    }

    if settings.lanes && segment.flags.has_lane_guidance() {
        return Some(SegmentStyle {
            color: LANES_CYAN,
            opacity: 0.8,
            width: 4.0,
            dash: DashPattern::dashed(2, 8),
        });
    }

    // Unnamed drivable roads, except roundabouts (their name comes from
    // the junction).
    if settings.no_name && unnamed && !segment.is_roundabout() && segment.road_type.is_standard() {
        return Some(SegmentStyle {
            color: UNNAMED_AMBER,
            opacity: 0.6,
            ..Default::default()
        });
    }

    if settings.no_city && no_city {
        return Some(SegmentStyle {
            color: NO_CITY_GRAY,
            opacity: 0.5,
            ..Default::default()
        });
    }

    if settings.one_way && segment.is_one_way() {
        return Some(SegmentStyle {
            color: Color::BLUE,
            opacity: 0.4,
            width: 4.0,
            dash: DashPattern::Solid,
        });
    }

    if let Some(selector) = ctx.road_type {
        // A flag selector consumes the rest of the chain even when the
        // segment does not carry the flag.
        if selector.is_flag_selector() {
            return flag_rule(segment, selector);
        }
        if let RoadTypeSelector::Exact(road_type) = selector {
            if segment.road_type == road_type {
                return Some(violet_highlight());
            }
        }
        if selector == RoadTypeSelector::NonRoutable && segment.road_type.in_non_routable_class() {
            return Some(violet_highlight());
        }
        if selector == RoadTypeSelector::NonDrivable && segment.road_type.in_non_drivable_class() {
            return Some(violet_highlight());
        }
    }

    if settings.routing_pref {
        if let Some(pref) = segment.routing_preference {
            let color = match pref {
                RoutingPreference::Street => Color::rgb(0xff, 0xff, 0xeb),
                RoutingPreference::PrimaryStreet => Color::rgb(0xf0, 0xea, 0x58),
                RoutingPreference::Freeway => Color::rgb(0xc5, 0x77, 0xd2),
                RoutingPreference::MajorHighway => Color::rgb(0x45, 0xb8, 0xd1),
                RoutingPreference::MinorHighway => Color::rgb(0x69, 0xbf, 0x88),
            };
            return Some(SegmentStyle {
                color,
                opacity: 0.5,
                ..Default::default()
            });
        }
    }

    // Missing house numbers, except roundabouts, freeways, ramps and
    // walking trails.
    if settings.no_house_numbers
        && !segment.has_house_numbers
        && segment.junction.is_none()
        && segment.road_type.is_standard()
        && (segment.road_type.code() < 3 || segment.road_type.code() > 5)
    {
        return Some(SegmentStyle {
            color: HOUSE_NUMBER_MAROON,
            opacity: 0.5,
            width: DEFAULT_SEGMENT_WIDTH,
            dash: DashPattern::dashed(10, 10),
        });
    }

    None
}

const fn violet_highlight() -> SegmentStyle {
    SegmentStyle {
        color: VIOLET,
        opacity: 0.5,
        width: 4.0,
        dash: DashPattern::Solid,
    }
}

/// Whether the speed-limit rule applies: the road type must be in scope
/// (ramps and plain streets only by opt-in) and a traveled direction must
/// lack a verified limit.
fn speed_limit_missing(segment: &Segment, settings: &HighlightSettings) -> bool {
    let code = segment.road_type.code();
    let type_in_scope = (settings.speed_limits_streets && code == 1)
        || (settings.speed_limits_ramps && code == 4)
        || (code > 1 && code != 4);
    if !type_in_scope || code >= 8 || code == 5 {
        return false;
    }
    if !settings.speed_limits_streets && segment.junction.is_some() {
        return false;
    }
    let fwd_missing = segment.direction.allows_forward() && segment.fwd_speed_limit.is_unset();
    let rev_missing = segment.direction.allows_reverse() && segment.rev_speed_limit.is_unset();
    fwd_missing || rev_missing
}

/// Special-flag selections: one purple style per flag, except the
/// tunnel-with-elevation selector which encodes the grade level as color.
fn flag_rule(segment: &Segment, selector: RoadTypeSelector) -> Option<SegmentStyle> {
    let flags = segment.flags;
    match selector {
        RoadTypeSelector::AnyFlag => (!flags.is_empty()).then(violet_highlight),
        RoadTypeSelector::Tunnel => flags.contains(SegmentFlags::TUNNEL).then(violet_highlight),
        RoadTypeSelector::TunnelWithElevation => {
            (flags.contains(SegmentFlags::TUNNEL) && segment.elevation != 0)
                .then(|| elevation_rule(segment))
        }
        RoadTypeSelector::Unpaved => flags.contains(SegmentFlags::UNPAVED).then(|| SegmentStyle {
            color: UNPAVED_DARK_RED,
            opacity: 0.5,
            width: 4.0,
            dash: DashPattern::Solid,
        }),
        RoadTypeSelector::Headlights => {
            flags.contains(SegmentFlags::HEADLIGHTS).then(violet_highlight)
        }
        RoadTypeSelector::Beacons => flags.contains(SegmentFlags::BEACONS).then(violet_highlight),
        RoadTypeSelector::NearbyHov => {
            flags.contains(SegmentFlags::NEARBY_HOV).then(violet_highlight)
        }
        _ => None,
    }
}

/// Below-grade tunnels get one color per level; deep levels add dashes.
/// Above-grade tunnels stay teal. Railway tunnels render fainter.
fn elevation_rule(segment: &Segment) -> SegmentStyle {
    let opacity = if segment.road_type == RoadType::RAILROAD {
        0.4
    } else {
        0.8
    };
    let (color, dash) = match segment.elevation {
        -1 => (Color::GREEN, DashPattern::Solid),
        -2 => (Color::BLUE, DashPattern::Solid),
        -3 => (Color::PURPLE, DashPattern::Solid),
        -4 => (Color::RED, DashPattern::Solid),
        -5 => (Color::DARK_BLUE, DashPattern::Solid),
        -6 => (Color::BLACK, DashPattern::Solid),
        -7 => (Color::DARK_BLUE, DashPattern::dashed(6, 10)),
        -8 => (Color::BLACK, DashPattern::dashed(6, 10)),
        _ => (Color::TEAL, DashPattern::Solid),
    };
    SegmentStyle {
        color,
        opacity,
        width: DEFAULT_SEGMENT_WIDTH,
        dash,
    }
}
