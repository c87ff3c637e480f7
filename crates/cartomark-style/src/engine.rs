//! The sweep engine: full resolution passes over every loaded entity.
//!
//! A pass snapshots the settings and context at entry, resolves every
//! entity of a kind, and patches only the display attributes that changed.
//! Partial invalidation is not attempted; passes are bounded by the number
//! of loaded entities and cheap enough to run at pointer-move rate thanks
//! to the reconciler.

use chrono::{DateTime, Utc};

use cartomark_core::entity::{Category, GeometryKind};
use cartomark_core::{Color, DashPattern, DisplaySurface, LayerKind, MapDataModel, StylePatch};

use crate::context::RuleContext;
use crate::reconcile::{fill_patch, is_host_highlighted, place_patch, segment_patch};
use crate::resolve::segments::SegmentQueries;
use crate::resolve::places::VenueQueries;
use crate::resolve::{
    DEFAULT_SEGMENT_COLOR, INVISIBLE_OPACITY, PLACE_PROCESSED_OPACITY, hazards, places, segments,
};
use crate::settings::HighlightSettings;

/// Neutral place stroke restored on refresh (area geometry).
const NEUTRAL_AREA_STROKE: Color = Color::rgb(0xca, 0x9a, 0xce);
/// Neutral place fill restored on refresh.
const NEUTRAL_PLACE_FILL: Color = Color::rgb(0xc2, 0x90, 0xc6);

/// What caused a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Debounced map-data-loaded event.
    DataLoaded,
    /// Debounced pointer movement.
    PointerMoved,
    /// A highlight control was clicked.
    ControlToggled,
    /// A highlight control's value changed.
    ControlChanged,
}

impl RefreshTrigger {
    /// Whether the pass was caused by direct UI interaction. Interactive
    /// passes reset previously applied styling before re-evaluating.
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::ControlToggled | Self::ControlChanged)
    }
}

/// Counters from a segment sweep, surfaced next to the filter controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentSweepStats {
    /// Segments recolored by the editor-filter overlay.
    pub editor_matches: u32,
    /// Segments recolored by the city-filter overlay.
    pub city_matches: u32,
    /// Segments whose display attributes were actually written.
    pub restyled: u32,
}

/// Counters from a place sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceSweepStats {
    /// Places styled and marked processed this pass.
    pub processed: u32,
    /// Places restored to the neutral style by the reset pass.
    pub reset: u32,
}

/// Counters from a hazard sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardSweepStats {
    /// Hazards currently highlighted.
    pub highlighted: u32,
}

/// The combined result of one full resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub segments: SegmentSweepStats,
    pub places: PlaceSweepStats,
    pub hazards: HazardSweepStats,
}

/// Runs resolution sweeps against a host model and display surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightEngine;

impl HighlightEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run all three sweeps with a freshly built context.
    pub fn refresh(
        &self,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
        settings: &HighlightSettings,
        now: DateTime<Utc>,
        trigger: RefreshTrigger,
    ) -> SweepReport {
        let ctx = RuleContext::build(settings, model, surface.zoom(), now);
        SweepReport {
            segments: self.sweep_segments(model, surface, settings, &ctx, trigger),
            places: self.sweep_places(model, surface, settings, &ctx, trigger),
            hazards: self.sweep_hazards(model, surface, settings, &ctx, trigger),
        }
    }

    /// Resolve and reconcile every loaded segment.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn sweep_segments(
        &self,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
        settings: &HighlightSettings,
        ctx: &RuleContext,
        trigger: RefreshTrigger,
    ) -> SegmentSweepStats {
        let mut stats = SegmentSweepStats::default();

        // Master switch: with every segment rule off there is nothing to
        // resolve; a control click additionally clears residual highlights.
        if !settings.any_segment_rule_enabled() {
            if trigger == RefreshTrigger::ControlToggled {
                for segment in model.segments() {
                    let Some(element) = surface.element_mut(LayerKind::Segments, segment.id.into())
                    else {
                        continue;
                    };
                    let shown = element.style();
                    if shown.stroke_opacity > 0.1 && shown.stroke_opacity < 1.0 {
                        element.apply(&StylePatch {
                            stroke: Some(DEFAULT_SEGMENT_COLOR),
                            stroke_opacity: Some(INVISIBLE_OPACITY),
                            dash: Some(DashPattern::Solid),
                            ..Default::default()
                        });
                    }
                }
            }
            return stats;
        }

        for segment in model.segments() {
            let Some(element) = surface.element_mut(LayerKind::Segments, segment.id.into()) else {
                continue;
            };
            let shown = element.style();
            if is_host_highlighted(&shown) {
                continue;
            }

            let queries = SegmentQueries {
                toll: settings.toll && model.is_toll_segment(segment.id),
                editable: !settings.locked || model.has_edit_permission(segment.id),
            };
            let resolution = segments::resolve(&segment, queries, settings, ctx);
            stats.editor_matches += u32::from(resolution.editor_match);
            stats.city_matches += u32::from(resolution.city_match);

            let patch = segment_patch(&shown, &resolution.style);
            if !patch.is_empty() {
                element.apply(&patch);
                stats.restyled += 1;
            }
        }

        tracing::debug!(
            target: "cartomark_style::engine",
            editor = stats.editor_matches,
            city = stats.city_matches,
            restyled = stats.restyled,
            "segment sweep finished"
        );
        stats
    }

    /// Resolve and reconcile every loaded place.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn sweep_places(
        &self,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
        settings: &HighlightSettings,
        ctx: &RuleContext,
        trigger: RefreshTrigger,
    ) -> PlaceSweepStats {
        let mut stats = PlaceSweepStats::default();
        let venues = model.venues();

        // Interactive refresh: restore every place we touched this session
        // to its neutral style before re-evaluating.
        if trigger.is_interactive() {
            for venue in &venues {
                let Some(element) = surface.element_mut(LayerKind::Venues, venue.id.into()) else {
                    continue;
                };
                if element.style().stroke_opacity == PLACE_PROCESSED_OPACITY {
                    element.apply(&neutral_place_patch(venue.geometry));
                    stats.reset += 1;
                }
            }
        }

        if !settings.places {
            return stats;
        }

        for venue in &venues {
            let Some(element) = surface.element_mut(LayerKind::Venues, venue.id.into()) else {
                continue;
            };
            if venue.being_edited || venue.selected {
                continue;
            }
            let shown = element.style();
            // Mouse-over highlighting paints fill and stroke alike.
            if shown.fill == shown.stroke {
                continue;
            }
            if shown.stroke_opacity == PLACE_PROCESSED_OPACITY {
                continue;
            }

            let queries = VenueQueries {
                address: if settings.places_incomplete || ctx.city.is_some() {
                    model.venue_address(venue.id)
                } else {
                    None
                },
                parking: if venue.has_category(&Category::ParkingLot) {
                    model.parking_lot_type(venue.id)
                } else {
                    None
                },
            };

            let desired = places::resolve(venue, &queries, settings, ctx);
            let mut patch = place_patch(&shown, &desired);
            // Mark processed so later passes skip this place until the
            // next interactive refresh.
            patch.stroke_opacity = Some(PLACE_PROCESSED_OPACITY);
            element.apply(&patch);
            stats.processed += 1;
        }

        tracing::debug!(
            target: "cartomark_style::engine",
            processed = stats.processed,
            reset = stats.reset,
            "place sweep finished"
        );
        stats
    }

    /// Resolve and reconcile every loaded hazard's mirror feature.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn sweep_hazards(
        &self,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
        settings: &HighlightSettings,
        ctx: &RuleContext,
        trigger: RefreshTrigger,
    ) -> HazardSweepStats {
        let mut stats = HazardSweepStats::default();
        let hazards = model.hazards();

        if trigger.is_interactive() {
            for hazard in &hazards {
                if let Some(element) =
                    surface.element_mut(LayerKind::HazardOverlay, hazard.id.into())
                {
                    let patch = fill_patch(&element.style(), Color::TRANSPARENT);
                    if !patch.is_empty() {
                        element.apply(&patch);
                    }
                }
            }
        }

        if !settings.hazards {
            return stats;
        }

        let predicate = hazards::HazardPredicate::new(ctx);
        for hazard in &hazards {
            let Some(element) = surface.element_mut(LayerKind::HazardOverlay, hazard.id.into())
            else {
                continue;
            };
            let fill = hazards::resolve(hazard, &predicate);
            if fill == hazards::HAZARD_HIGHLIGHT {
                stats.highlighted += 1;
            }
            let patch = fill_patch(&element.style(), fill);
            if !patch.is_empty() {
                element.apply(&patch);
            }
        }

        tracing::debug!(
            target: "cartomark_style::engine",
            highlighted = stats.highlighted,
            "hazard sweep finished"
        );
        stats
    }
}

/// The neutral style a place returns to when highlighting is reset.
fn neutral_place_patch(geometry: GeometryKind) -> StylePatch {
    match geometry {
        GeometryKind::Point => StylePatch {
            stroke: Some(Color::WHITE),
            stroke_opacity: Some(1.0),
            fill: Some(NEUTRAL_PLACE_FILL),
            ..Default::default()
        },
        GeometryKind::Area => StylePatch {
            stroke: Some(NEUTRAL_AREA_STROKE),
            stroke_opacity: Some(1.0),
            stroke_width: Some(2.0),
            dash: Some(DashPattern::Solid),
            fill: Some(NEUTRAL_PLACE_FILL),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_triggers() {
        assert!(RefreshTrigger::ControlToggled.is_interactive());
        assert!(RefreshTrigger::ControlChanged.is_interactive());
        assert!(!RefreshTrigger::DataLoaded.is_interactive());
        assert!(!RefreshTrigger::PointerMoved.is_interactive());
    }

    #[test]
    fn neutral_patch_differs_by_geometry() {
        use cartomark_core::entity::GeometryKind;
        let point = neutral_place_patch(GeometryKind::Point);
        assert_eq!(point.stroke, Some(Color::WHITE));
        assert_eq!(point.stroke_width, None);

        let area = neutral_place_patch(GeometryKind::Area);
        assert_eq!(area.stroke, Some(NEUTRAL_AREA_STROKE));
        assert_eq!(area.stroke_width, Some(2.0));
        assert_eq!(area.dash, Some(DashPattern::Solid));
    }
}
