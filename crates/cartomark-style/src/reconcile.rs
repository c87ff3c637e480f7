//! Reconciliation of resolved styles against the live display.
//!
//! The reconciler turns a resolved style into a minimal [`StylePatch`]:
//! only attributes that differ from what is currently displayed are
//! written. Re-running resolution with unchanged inputs therefore produces
//! an empty patch, which makes the whole pipeline safe to run at
//! pointer-move rate.

use cartomark_core::{Color, ElementStyle, StylePatch};

use crate::resolve::{
    DEFAULT_SEGMENT_WIDTH, HOST_HIGHLIGHT_OPACITY, HOST_HIGHLIGHT_WIDTH, PlaceStyle, SegmentStyle,
};

/// Whether the host has applied its own highlight to this element.
///
/// Host highlights (full opacity or the host selection width) must never
/// be overridden; callers skip such elements before resolving.
pub fn is_host_highlighted(displayed: &ElementStyle) -> bool {
    displayed.stroke_opacity == HOST_HIGHLIGHT_OPACITY
        || displayed.stroke_width == HOST_HIGHLIGHT_WIDTH
}

/// Diff a resolved segment style against the displayed style.
///
/// The width is normalized back to the default whenever the stroke reverts
/// to the default color, so stale rule widths never linger on
/// unhighlighted roads.
pub fn segment_patch(displayed: &ElementStyle, desired: &SegmentStyle) -> StylePatch {
    let mut patch = StylePatch::default();
    if displayed.stroke != desired.color {
        patch.stroke = Some(desired.color);
    }
    if displayed.stroke_opacity != desired.opacity {
        patch.stroke_opacity = Some(desired.opacity);
    }
    if displayed.dash != desired.dash {
        patch.dash = Some(desired.dash);
    }
    let width = if desired.is_default() {
        DEFAULT_SEGMENT_WIDTH
    } else {
        desired.width
    };
    if displayed.stroke_width != width {
        patch.stroke_width = Some(width);
    }
    patch
}

/// Diff a resolved place style against the displayed style.
///
/// Attributes the resolver left unset keep their displayed value.
pub fn place_patch(displayed: &ElementStyle, desired: &PlaceStyle) -> StylePatch {
    let mut patch = StylePatch::default();
    if let Some(stroke) = desired.stroke {
        if displayed.stroke != stroke {
            patch.stroke = Some(stroke);
        }
    }
    if let Some(fill) = desired.fill {
        if displayed.fill != fill {
            patch.fill = Some(fill);
        }
    }
    if let Some(dash) = desired.dash {
        if displayed.dash != dash {
            patch.dash = Some(dash);
        }
    }
    if let Some(width) = desired.width {
        if displayed.stroke_width != width {
            patch.stroke_width = Some(width);
        }
    }
    patch
}

/// Diff a resolved fill color (hazard highlighting) against the display.
pub fn fill_patch(displayed: &ElementStyle, fill: Color) -> StylePatch {
    StylePatch {
        fill: (displayed.fill != fill).then_some(fill),
        ..Default::default()
    }
}
