//! Display-surface interfaces: the host-owned on-screen features and the
//! style attributes Cartomark reads and patches.
//!
//! The engine never draws anything itself. It inspects the current style of
//! a displayed feature, computes a desired style, and hands the host a
//! minimal patch. This keeps the write path independent of any particular
//! rendering technology.

use crate::color::{Color, DashPattern};
use crate::entity::FeatureId;
use crate::error::LayerError;

/// The display layers Cartomark interacts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// The host's road-segment layer.
    Segments,
    /// The host's venue layer.
    Venues,
    /// Cartomark's own hazard-highlight overlay.
    HazardOverlay,
}

impl LayerKind {
    /// Stable layer name, used by hosts that key layers by string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Segments => "segments",
            Self::Venues => "venues",
            Self::HazardOverlay => "cartomark_permanent_hazards",
        }
    }
}

/// Configuration for an overlay layer added by Cartomark.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub kind: LayerKind,
    /// Radius for point features on this layer.
    pub point_radius: f32,
    pub fill: Color,
    pub fill_opacity: f32,
    /// Whether features on this layer draw a stroke at all.
    pub stroked: bool,
}

/// Display geometry of a feature, as rendered on the map.
///
/// This may differ from the data-model geometry; it is whatever the host's
/// rendering layers hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point { x: f64, y: f64 },
    Area(Vec<(f64, f64)>),
}

/// A feature to place on an overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFeature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

/// The style attributes of a displayed feature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementStyle {
    pub stroke: Color,
    pub stroke_opacity: f32,
    pub stroke_width: f32,
    pub dash: DashPattern,
    pub fill: Color,
}

/// A partial style write: only the attributes present are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StylePatch {
    pub stroke: Option<Color>,
    pub stroke_opacity: Option<f32>,
    pub stroke_width: Option<f32>,
    pub dash: Option<DashPattern>,
    pub fill: Option<Color>,
}

impl StylePatch {
    /// Whether the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.stroke.is_none()
            && self.stroke_opacity.is_none()
            && self.stroke_width.is_none()
            && self.dash.is_none()
            && self.fill.is_none()
    }

    /// Apply the patch to a style value.
    ///
    /// Hosts backing [`DisplayElement`] with a plain [`ElementStyle`] can
    /// implement their write path with this.
    pub fn apply_to(&self, style: &mut ElementStyle) {
        if let Some(stroke) = self.stroke {
            style.stroke = stroke;
        }
        if let Some(opacity) = self.stroke_opacity {
            style.stroke_opacity = opacity;
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }
        if let Some(dash) = self.dash {
            style.dash = dash;
        }
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
    }
}

/// A single displayed feature owned by the host.
pub trait DisplayElement {
    /// The currently displayed style attributes.
    fn style(&self) -> ElementStyle;

    /// Write the given attributes onto the feature.
    fn apply(&mut self, patch: &StylePatch);
}

/// The host map surface: viewport state, layers, and displayed features.
pub trait DisplaySurface {
    /// Current viewport zoom level; lower is coarser.
    fn zoom(&self) -> u8;

    /// Add an overlay layer. Re-adding an existing layer fails with
    /// [`LayerError::AlreadyExists`], which callers treat as benign.
    fn add_layer(&mut self, spec: &LayerSpec) -> Result<(), LayerError>;

    /// Place a feature on an overlay layer.
    fn add_feature(&mut self, layer: LayerKind, feature: OverlayFeature);

    /// Remove a feature from an overlay layer.
    fn remove_feature(&mut self, layer: LayerKind, id: FeatureId);

    /// Look up the displayed element for an entity.
    ///
    /// Returns `None` when the entity has no on-screen representation
    /// (off-screen or not yet rendered); callers skip the entity.
    fn element_mut(&mut self, layer: LayerKind, id: FeatureId) -> Option<&mut dyn DisplayElement>;

    /// Search the host's rendering layers for a feature's display geometry.
    fn feature_geometry(&self, id: FeatureId) -> Option<Geometry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_applies_only_present_fields() {
        let mut style = ElementStyle {
            stroke: Color::BLACK,
            stroke_opacity: 0.5,
            stroke_width: 6.0,
            dash: DashPattern::Solid,
            fill: Color::WHITE,
        };
        let patch = StylePatch {
            stroke: Some(Color::RED),
            stroke_width: Some(3.0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut style);
        assert_eq!(style.stroke, Color::RED);
        assert_eq!(style.stroke_width, 3.0);
        assert_eq!(style.stroke_opacity, 0.5);
        assert_eq!(style.fill, Color::WHITE);
    }

    #[test]
    fn empty_patch() {
        assert!(StylePatch::default().is_empty());
    }
}
