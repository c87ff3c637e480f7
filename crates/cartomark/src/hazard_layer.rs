//! The permanent-hazard mirror layer.
//!
//! Hazards have no geometry of their own in the data model, so Cartomark
//! maintains its own overlay layer: one feature per hazard, with display
//! geometry borrowed from the host's hazard rendering layers. The hazard
//! sweep then recolors these mirror features.

use cartomark_core::entity::FeatureId;
use cartomark_core::{
    Color, DisplaySurface, LayerError, LayerKind, LayerSpec, MapDataModel, ModelChange,
    OverlayFeature,
};

/// Layer configuration for the hazard overlay.
pub const HAZARD_LAYER_SPEC: LayerSpec = LayerSpec {
    kind: LayerKind::HazardOverlay,
    point_radius: 20.0,
    fill: Color::TRANSPARENT,
    fill_opacity: 0.4,
    stroked: false,
};

/// Create the overlay layer.
///
/// Returns `false` when the layer already existed (benign duplicate
/// initialization); callers then skip seeding and registration.
pub(crate) fn init_layer(surface: &mut dyn DisplaySurface) -> bool {
    match surface.add_layer(&HAZARD_LAYER_SPEC) {
        Ok(()) => true,
        Err(LayerError::AlreadyExists(_)) => {
            tracing::debug!(
                target: "cartomark::hazard_layer",
                "hazard overlay already present, skipping initialization"
            );
            false
        }
    }
}

/// Mirror every hazard already loaded in the model.
pub(crate) fn seed(surface: &mut dyn DisplaySurface, model: &dyn MapDataModel) {
    for hazard in model.hazards() {
        add_mirror(surface, hazard.id.into());
    }
}

/// Keep the mirror layer in sync with one logical hazard change.
pub(crate) fn apply_change(surface: &mut dyn DisplaySurface, change: ModelChange) {
    match change {
        ModelChange::Added(id) => add_mirror(surface, id),
        ModelChange::Removed(id) | ModelChange::Deleted(id) => {
            surface.remove_feature(LayerKind::HazardOverlay, id);
        }
        ModelChange::Changed(id) => {
            surface.remove_feature(LayerKind::HazardOverlay, id);
            add_mirror(surface, id);
        }
        ModelChange::Saved(_) => {}
    }
}

fn add_mirror(surface: &mut dyn DisplaySurface, id: FeatureId) {
    let Some(geometry) = surface.feature_geometry(id) else {
        tracing::warn!(
            target: "cartomark::hazard_layer",
            %id,
            "no display geometry found for hazard, skipping mirror feature"
        );
        return;
    };
    surface.add_feature(LayerKind::HazardOverlay, OverlayFeature { id, geometry });
}
