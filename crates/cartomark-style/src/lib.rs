//! Rule evaluation and styling resolution for Cartomark.
//!
//! Given a read-only view of the host data model and an immutable settings
//! snapshot, this crate deterministically computes one visual style per
//! entity per pass and reconciles it against the live display:
//!
//! - **Settings**: the flat snapshot of every highlight control
//! - **Context**: per-pass lookup tables and resolved filter selections
//! - **Resolvers**: fixed-precedence rule chains for segments, places,
//!   and hazards, with combinable editor/city overlays
//! - **Reconciler**: desired-vs-displayed diffing so redundant writes are
//!   skipped entirely
//! - **Engine**: full-sweep passes over all loaded entities of a kind
//!
//! # Example
//!
//! ```ignore
//! use cartomark_style::prelude::*;
//!
//! let engine = HighlightEngine::new();
//! let settings = HighlightSettings { locked: true, ..Default::default() };
//! let report = engine.refresh(&model, &mut surface, &settings, now, RefreshTrigger::DataLoaded);
//! println!("restyled {} segments", report.segments.restyled);
//! ```

pub mod context;
pub mod engine;
pub mod reconcile;
pub mod resolve;
pub mod settings;

pub use context::{CityFilter, RuleContext};
pub use engine::{
    HazardSweepStats, HighlightEngine, PlaceSweepStats, RefreshTrigger, SegmentSweepStats,
    SweepReport,
};
pub use settings::{EditorSelector, HighlightSettings, RoadTypeSelector};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::context::{CityFilter, RuleContext};
    pub use crate::engine::{HighlightEngine, RefreshTrigger, SweepReport};
    pub use crate::reconcile::{fill_patch, is_host_highlighted, place_patch, segment_patch};
    pub use crate::resolve::{PlaceStyle, SegmentStyle};
    pub use crate::settings::{EditorSelector, HighlightSettings, RoadTypeSelector};
}
