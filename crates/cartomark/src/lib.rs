//! Cartomark: a visual-annotation engine for map editors.
//!
//! Cartomark inspects the editable entities of a host map editor (road
//! segments, places, hazard markers) and recolors their on-screen
//! representation according to configurable rule predicates, without ever
//! mutating the underlying data. This crate ties the styling engine to a
//! host:
//!
//! - **Controller**: debounced viewport triggers, model-event handling,
//!   and sweep orchestration
//! - **Change tracking**: the native/legacy capability probe that
//!   normalizes host notifications into logical model events
//! - **Hazard mirror layer**: overlay features for entities the host does
//!   not render highlightably on its own
//! - **Persistence**: the positional settings record and its store trait
//!
//! # Example
//!
//! ```ignore
//! use cartomark::prelude::*;
//!
//! let mut controller = HighlightController::new(ControllerConfig::default());
//! controller.load_settings(&store);
//! controller.install(&mut events, &model, &mut surface)?;
//!
//! // From the host's idle loop:
//! controller.pump(Instant::now(), Utc::now(), &model, &mut surface);
//! ```

mod controller;
mod error;
mod hazard_layer;
mod persist;
mod tracking;

pub use controller::{ControllerConfig, HighlightController};
pub use error::{Error, Result};
pub use hazard_layer::HAZARD_LAYER_SPEC;
pub use persist::{SETTINGS_KEY, SettingsStore, load_settings, save_settings};
pub use tracking::{ChangeTracker, TrackingPath};

// Re-export the building blocks so hosts depend on one crate.
pub use cartomark_core as core;
pub use cartomark_style as style;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::controller::{ControllerConfig, HighlightController};
    pub use crate::persist::{SettingsStore, load_settings, save_settings};
    pub use crate::tracking::{ChangeTracker, TrackingPath};
    pub use cartomark_core::{
        DisplayElement, DisplaySurface, ElementStyle, HostEvents, MapDataModel, MapEvent,
        ModelChange, ModelEvent, Signal, StylePatch,
    };
    pub use cartomark_style::prelude::*;
}
