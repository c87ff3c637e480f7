//! Core systems for Cartomark.
//!
//! This crate provides the foundation the styling engine is built on:
//!
//! - **Entity model**: read-only snapshots of segments, streets, cities,
//!   places, and hazards as the host data model exposes them
//! - **Host interfaces**: traits for the data model, the display surface,
//!   and the host notification systems
//! - **Display primitives**: colors, dash patterns, element styles, and
//!   minimal style patches
//! - **Signal/slot bus**: typed publish/subscribe for host events
//! - **Debounce timers**: trailing-edge coalescing for high-frequency
//!   event bursts
//!
//! Cartomark is strictly an annotation layer: nothing in this crate
//! mutates the host's domain data. The only writes that ever happen are
//! style patches applied to host-owned display elements.

mod color;
mod debounce;
mod display;
mod error;
pub mod entity;
mod events;
mod model;
mod signal;

pub use color::{Color, DashPattern};
pub use debounce::{DebounceId, DebounceManager};
pub use display::{
    DisplayElement, DisplaySurface, ElementStyle, Geometry, LayerKind, LayerSpec, OverlayFeature,
    StylePatch,
};
pub use error::{DebounceError, LayerError, TrackError};
pub use events::{
    ChangeRepository, EntityKind, HostEvents, MapEvent, ModelChange, ModelEvent,
    RawRepositoryEvent,
};
pub use model::MapDataModel;
pub use signal::{ConnectionId, Signal};
