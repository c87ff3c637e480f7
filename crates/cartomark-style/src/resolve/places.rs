//! Place (venue) style resolution.
//!
//! The incomplete-data rule runs first and may combine with the filters.
//! The city filter, editor filter, and recency rule each short-circuit the
//! category cascade; the locked overlay is independent and always applied
//! last.

use cartomark_core::entity::{Address, Category, GeometryKind, ParkingLotType, Street, Venue};
use cartomark_core::{Color, DashPattern};

use crate::context::RuleContext;
use crate::settings::HighlightSettings;

use super::{PlaceStyle, recency_green};

const INCOMPLETE_ORANGE: Color = Color::ORANGE;
const CITY_PINK: Color = Color::rgb(0xed, 0x28, 0xea);
const CITY_PINK_FILL: Color = Color::rgb(0xff, 0x88, 0xff);
const EDITOR_GREEN: Color = Color::LIME;
const EDITOR_GREEN_FILL: Color = Color::rgb(0x88, 0xff, 0x88);
const RESIDENTIAL_CYAN: Color = Color::rgb(0x44, 0xaf, 0xcf);
const RESIDENTIAL_CYAN_FILL: Color = Color::rgb(0x44, 0xaa, 0xcc);
const GAS_ORANGE: Color = Color::rgb(0xff, 0x99, 0x00);
const GAS_ORANGE_FILL: Color = Color::rgb(0xff, 0x99, 0x11);
const PARKING_FILL: Color = Color::rgb(0x00, 0xcc, 0xcc);
const PARKING_UNKNOWN: Color = Color::rgb(0x00, 0x99, 0x99);
const PARKING_PUBLIC: Color = Color::rgb(0x00, 0x99, 0x00);
const PARKING_RESTRICTED: Color = Color::rgb(0xaa, 0xaa, 0x00);
const PARKING_PRIVATE: Color = Color::rgb(0xaa, 0x55, 0x00);
const WATER_BLUE: Color = Color::rgb(0x00, 0x66, 0xcc);
const WATER_BLUE_FILL: Color = Color::rgb(0x00, 0x99, 0xff);
const NATURE_GREEN: Color = Color::rgb(0x00, 0xbb, 0x00);
const NATURE_GREEN_FILL: Color = Color::rgb(0x44, 0xff, 0x44);

/// Natural features whose data is curated elsewhere; the incomplete-data
/// rule never flags them.
const NATURAL_FEATURES: &[Category] = &[
    Category::JunctionInterchange,
    Category::Canal,
    Category::RiverStream,
    Category::SeaLakePool,
    Category::Park,
    Category::SwampMarsh,
    Category::ForestGrove,
    Category::GolfCourse,
];

const WATER_CATEGORIES: &[Category] =
    &[Category::RiverStream, Category::Canal, Category::SeaLakePool];

const NATURE_CATEGORIES: &[Category] = &[
    Category::Park,
    Category::SwampMarsh,
    Category::ForestGrove,
    Category::GolfCourse,
];

/// Derived query results for one venue, computed by the sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueQueries {
    /// The venue's resolved address, when a rule needs it.
    pub address: Option<Address>,
    /// Parking-lot subtype; `None` also covers "subtype not set".
    pub parking: Option<ParkingLotType>,
}

/// Resolve the display style for one place.
///
/// Returns only the attributes the matched rules demand; an empty style
/// leaves the place in its neutral look.
pub fn resolve(
    venue: &Venue,
    queries: &VenueQueries,
    settings: &HighlightSettings,
    ctx: &RuleContext,
) -> PlaceStyle {
    let mut style = PlaceStyle::default();
    let street = queries
        .address
        .as_ref()
        .and_then(|a| a.street)
        .and_then(|id| ctx.street(id));

    if settings.places_incomplete {
        incomplete_rule(venue, queries, ctx, street, &mut style);
    }

    // The filters and the recency rule short-circuit the category cascade.
    let mut cascaded = false;

    if let Some(filter) = &ctx.city {
        if let Some(city_id) = street.and_then(|s| s.city) {
            let mut matched = city_id == filter.city;
            if filter.invert {
                matched = !matched;
            }
            if matched {
                paint(&mut style, venue.geometry, CITY_PINK, CITY_PINK_FILL);
                cascaded = true;
            }
        }
    }

    if !cascaded {
        if let Some(selector) = &ctx.editor {
            let updated_by = venue.modification.updated_by.as_deref();
            if selector.matches(updated_by, ctx.current_user.as_deref()) {
                paint(&mut style, venue.geometry, EDITOR_GREEN, EDITOR_GREEN_FILL);
                cascaded = true;
            }
        }
    }

    if !cascaded {
        if let Some(window) = recent_window(ctx) {
            if let Some(age) = venue.modification.age_days(ctx.now) {
                if age <= f64::from(window) {
                    let green = recency_green(age, window);
                    paint(&mut style, venue.geometry, green, green);
                    cascaded = true;
                }
            }
        }
    }

    if !cascaded {
        category_cascade(venue, queries, ctx, &mut style);
    }

    // Locked places get a red border regardless of what matched above.
    if settings.places_locked && venue.lock_rank > 0 {
        style.stroke = Some(Color::RED);
    }

    style
}

/// Flags missing names, addresses, and ambiguous categories.
fn incomplete_rule(
    venue: &Venue,
    queries: &VenueQueries,
    ctx: &RuleContext,
    street: Option<&Street>,
    style: &mut PlaceStyle,
) {
    let mut incomplete = false;
    let mut color_highlight = false;

    // Missing venue name, unless residential (those are named by address).
    if venue.name.is_empty() {
        incomplete = !venue.residential;
        color_highlight = true;
    }

    let street_name_missing = street.is_none_or(|s| s.is_unnamed());
    let house_number_missing = queries
        .address
        .as_ref()
        .is_none_or(|a| a.house_number.is_none());

    if street_name_missing {
        incomplete = true;
        color_highlight = true;
    } else if venue.residential && house_number_missing {
        incomplete = true;
        color_highlight = true;
    } else if venue.categories.is_empty()
        || ctx.main_categories.iter().any(|c| venue.has_category(c))
    {
        // A category group used in place of a leaf category only counts
        // while the place is still unlocked.
        incomplete = venue.lock_rank == 0;
    } else if venue.external_providers.is_empty() {
        incomplete = true;
    }

    if incomplete && NATURAL_FEATURES.iter().any(|c| venue.has_category(c)) {
        incomplete = false;
        color_highlight = false;
    }

    if incomplete {
        if color_highlight {
            paint(style, venue.geometry, INCOMPLETE_ORANGE, Color::WHITE);
        }
        match venue.geometry {
            GeometryKind::Point => {
                style.dash = Some(DashPattern::dashed(3, 3));
            }
            GeometryKind::Area => {
                style.dash = Some(DashPattern::dashed(3, 6));
                style.width = Some(3.0);
            }
        }
    }
}

/// The first-match category cascade.
fn category_cascade(
    venue: &Venue,
    queries: &VenueQueries,
    ctx: &RuleContext,
    style: &mut PlaceStyle,
) {
    if venue.residential {
        paint(style, venue.geometry, RESIDENTIAL_CYAN, RESIDENTIAL_CYAN_FILL);
    } else if venue.has_category(&Category::GasStation) {
        paint(style, venue.geometry, GAS_ORANGE, GAS_ORANGE_FILL);
    } else if venue.has_category(&Category::ParkingLot) {
        match queries.parking {
            None => {
                paint(style, venue.geometry, PARKING_UNKNOWN, PARKING_FILL);
                style.dash = Some(DashPattern::dashed(3, 6));
            }
            Some(ParkingLotType::Public) => {
                paint(style, venue.geometry, PARKING_PUBLIC, PARKING_FILL);
            }
            Some(ParkingLotType::Restricted) => {
                paint(style, venue.geometry, PARKING_RESTRICTED, PARKING_FILL);
            }
            Some(ParkingLotType::Private) => {
                paint(style, venue.geometry, PARKING_PRIVATE, PARKING_FILL);
            }
        }
    } else if WATER_CATEGORIES.iter().any(|c| venue.has_category(c)) {
        paint(style, venue.geometry, WATER_BLUE, WATER_BLUE_FILL);
        style.dash = Some(DashPattern::Solid);
    } else if ctx.editor.is_none()
        && recent_window(ctx).is_none()
        && NATURE_CATEGORIES.iter().any(|c| venue.has_category(c))
    {
        paint(style, venue.geometry, NATURE_GREEN, NATURE_GREEN_FILL);
        style.dash = Some(DashPattern::Solid);
    }
}

/// Apply a foreground/background pair the way the geometry kind renders:
/// point markers take the foreground as their fill, areas take a
/// foreground stroke and a background fill.
fn paint(style: &mut PlaceStyle, geometry: GeometryKind, fg: Color, bg: Color) {
    match geometry {
        GeometryKind::Point => {
            style.fill = Some(fg);
        }
        GeometryKind::Area => {
            style.stroke = Some(fg);
            style.fill = Some(bg);
        }
    }
}

/// The recency window for places; a zero-day window is treated as off.
fn recent_window(ctx: &RuleContext) -> Option<u32> {
    ctx.recent_days.filter(|days| *days > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CityFilter;
    use crate::settings::EditorSelector;
    use cartomark_core::entity::{
        City, CityId, Modification, Street, StreetId, Venue, VenueId,
    };
    use chrono::{Duration, Utc};
    use std::collections::HashMap;

    fn venue(geometry: GeometryKind) -> Venue {
        Venue {
            id: VenueId(1),
            geometry,
            name: "Cafe Flora".into(),
            residential: false,
            lock_rank: 0,
            categories: vec![Category::Other("CAFE".into())],
            external_providers: vec!["prov:1".into()],
            being_edited: false,
            selected: false,
            modification: Modification::default(),
        }
    }

    fn queries_with_street(street: StreetId) -> VenueQueries {
        VenueQueries {
            address: Some(Address {
                street: Some(street),
                house_number: Some("12".into()),
            }),
            parking: None,
        }
    }

    fn context() -> RuleContext {
        let mut streets = HashMap::new();
        streets.insert(
            StreetId(10),
            Street { id: StreetId(10), name: "Main St".into(), city: Some(CityId(100)) },
        );
        let mut cities = HashMap::new();
        cities.insert(
            CityId(100),
            City { id: CityId(100), name: "Springfield".into(), state: None, country: None },
        );
        RuleContext {
            now: Utc::now(),
            zoom: 5,
            current_user: Some("me".into()),
            streets,
            cities,
            main_categories: vec![],
            editor: None,
            city: None,
            road_type: None,
            recent_days: None,
        }
    }

    #[test]
    fn unnamed_point_venue_flagged_incomplete() {
        let mut v = venue(GeometryKind::Point);
        v.name = String::new();
        let settings = HighlightSettings { places_incomplete: true, ..Default::default() };
        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &context());
        // Point markers take the highlight as their fill.
        assert_eq!(style.fill, Some(Color::ORANGE));
        assert_eq!(style.dash, Some(DashPattern::dashed(3, 3)));
    }

    #[test]
    fn unnamed_area_venue_gets_orange_stroke_white_fill() {
        let mut v = venue(GeometryKind::Area);
        v.name = String::new();
        let settings = HighlightSettings { places_incomplete: true, ..Default::default() };
        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &context());
        assert_eq!(style.stroke, Some(Color::ORANGE));
        assert_eq!(style.fill, Some(Color::WHITE));
        assert_eq!(style.dash, Some(DashPattern::dashed(3, 6)));
        assert_eq!(style.width, Some(3.0));
    }

    #[test]
    fn natural_features_never_flagged() {
        let mut v = venue(GeometryKind::Area);
        v.name = String::new();
        v.categories = vec![Category::Park];
        let settings = HighlightSettings { places_incomplete: true, ..Default::default() };
        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &context());
        // Not incomplete; the cascade still colors it as a green space.
        assert_eq!(style.stroke, Some(NATURE_GREEN));
        assert_eq!(style.width, None);
    }

    #[test]
    fn ambiguous_category_counts_only_while_unlocked() {
        let mut ctx = context();
        ctx.main_categories = vec![Category::Other("FOOD_AND_DRINK".into())];
        let mut v = venue(GeometryKind::Area);
        v.categories = vec![Category::Other("FOOD_AND_DRINK".into())];
        let settings = HighlightSettings { places_incomplete: true, ..Default::default() };

        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &ctx);
        assert_eq!(style.dash, Some(DashPattern::dashed(3, 6)));
        // No color highlight for the category case, outline only.
        assert_eq!(style.stroke, None);

        v.lock_rank = 2;
        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &ctx);
        assert!(style.is_empty());
    }

    #[test]
    fn missing_provider_links_flagged() {
        let mut v = venue(GeometryKind::Area);
        v.external_providers.clear();
        let settings = HighlightSettings { places_incomplete: true, ..Default::default() };
        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &context());
        assert_eq!(style.dash, Some(DashPattern::dashed(3, 6)));
        assert_eq!(style.stroke, None);
    }

    #[test]
    fn residential_without_house_number_flagged() {
        let mut v = venue(GeometryKind::Point);
        v.residential = true;
        v.name = String::new();
        let mut queries = queries_with_street(StreetId(10));
        queries.address.as_mut().unwrap().house_number = None;
        let settings = HighlightSettings { places_incomplete: true, ..Default::default() };
        let style = resolve(&v, &queries, &settings, &context());
        assert_eq!(style.fill, Some(Color::ORANGE));
    }

    #[test]
    fn city_filter_short_circuits_cascade() {
        let mut v = venue(GeometryKind::Area);
        v.categories = vec![Category::GasStation];
        let mut ctx = context();
        ctx.city = Some(CityFilter { city: CityId(100), invert: false });
        let settings = HighlightSettings::default();

        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &ctx);
        assert_eq!(style.stroke, Some(CITY_PINK));

        // Inverted, the same venue falls through to the cascade.
        ctx.city = Some(CityFilter { city: CityId(100), invert: true });
        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &ctx);
        assert_eq!(style.stroke, Some(GAS_ORANGE));
    }

    #[test]
    fn editor_filter_short_circuits_cascade() {
        let mut v = venue(GeometryKind::Area);
        v.residential = true;
        v.modification.updated_by = Some("alice".into());
        let mut ctx = context();
        ctx.editor = Some(EditorSelector::Named("alice".into()));

        let style = resolve(&v, &VenueQueries::default(), &HighlightSettings::default(), &ctx);
        assert_eq!(style.stroke, Some(Color::LIME));

        ctx.editor = Some(EditorSelector::Named("bob".into()));
        let style = resolve(&v, &VenueQueries::default(), &HighlightSettings::default(), &ctx);
        assert_eq!(style.stroke, Some(RESIDENTIAL_CYAN));
    }

    #[test]
    fn recency_uses_decaying_green() {
        let mut ctx = context();
        ctx.recent_days = Some(10);
        let mut v = venue(GeometryKind::Area);
        v.modification.updated_on = Some(ctx.now - Duration::days(5));

        let style = resolve(&v, &VenueQueries::default(), &HighlightSettings::default(), &ctx);
        let expected = recency_green(5.0, 10);
        assert_eq!(style.stroke, Some(expected));
        assert_eq!(style.fill, Some(expected));
    }

    #[test]
    fn zero_day_window_disables_place_recency() {
        let mut ctx = context();
        ctx.recent_days = Some(0);
        let mut v = venue(GeometryKind::Area);
        v.residential = true;
        v.modification.updated_on = Some(ctx.now);

        let style = resolve(&v, &VenueQueries::default(), &HighlightSettings::default(), &ctx);
        assert_eq!(style.stroke, Some(RESIDENTIAL_CYAN));
    }

    #[test]
    fn parking_subtype_shades() {
        let mut v = venue(GeometryKind::Area);
        v.categories = vec![Category::ParkingLot];
        let settings = HighlightSettings::default();
        let ctx = context();

        let style = resolve(&v, &VenueQueries::default(), &settings, &ctx);
        assert_eq!(style.stroke, Some(PARKING_UNKNOWN));
        assert_eq!(style.dash, Some(DashPattern::dashed(3, 6)));

        for (subtype, stroke) in [
            (ParkingLotType::Public, PARKING_PUBLIC),
            (ParkingLotType::Restricted, PARKING_RESTRICTED),
            (ParkingLotType::Private, PARKING_PRIVATE),
        ] {
            let queries = VenueQueries { address: None, parking: Some(subtype) };
            let style = resolve(&v, &queries, &settings, &ctx);
            assert_eq!(style.stroke, Some(stroke));
            assert_eq!(style.dash, None);
        }
    }

    #[test]
    fn nature_rule_requires_filters_off() {
        let mut v = venue(GeometryKind::Area);
        v.categories = vec![Category::ForestGrove];
        let settings = HighlightSettings::default();

        let style = resolve(&v, &VenueQueries::default(), &settings, &context());
        assert_eq!(style.stroke, Some(NATURE_GREEN));

        let mut ctx = context();
        ctx.editor = Some(EditorSelector::Named("nobody".into()));
        let style = resolve(&v, &VenueQueries::default(), &settings, &ctx);
        assert!(style.is_empty());
    }

    #[test]
    fn locked_overlay_wins_over_prior_result() {
        let mut v = venue(GeometryKind::Area);
        v.lock_rank = 3;
        v.categories = vec![Category::GasStation];
        let settings = HighlightSettings { places_locked: true, ..Default::default() };

        let style = resolve(&v, &VenueQueries::default(), &settings, &context());
        assert_eq!(style.stroke, Some(Color::RED));
        // The cascade's fill survives; only the border is forced.
        assert_eq!(style.fill, Some(GAS_ORANGE_FILL));
    }

    #[test]
    fn locked_overlay_applies_after_city_match() {
        let mut v = venue(GeometryKind::Area);
        v.lock_rank = 1;
        let mut ctx = context();
        ctx.city = Some(CityFilter { city: CityId(100), invert: false });
        let settings = HighlightSettings { places_locked: true, ..Default::default() };

        let style = resolve(&v, &queries_with_street(StreetId(10)), &settings, &ctx);
        assert_eq!(style.stroke, Some(Color::RED));
        assert_eq!(style.fill, Some(CITY_PINK_FILL));
    }
}
