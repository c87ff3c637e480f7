//! The highlight controller: event wiring and sweep orchestration.
//!
//! The controller sits between the host's notification systems and the
//! sweep engine. Viewport events are coalesced through trailing-edge
//! debouncers (data loads are rarer but costlier than pointer movement, so
//! they get the longer delay); model events keep the hazard mirror layer
//! in sync and schedule a re-resolution. Control interactions refresh
//! immediately.
//!
//! Everything runs single-threaded and cooperatively: the host calls
//! [`HighlightController::pump`] from its idle loop, and each resolution
//! pass runs to completion before anything else happens.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use cartomark_core::{
    DebounceId, DebounceManager, DisplaySurface, EntityKind, HostEvents, MapDataModel, MapEvent,
    ModelEvent,
};
use cartomark_style::{HighlightEngine, HighlightSettings, RefreshTrigger, SweepReport};

use crate::error::Result;
use crate::hazard_layer;
use crate::persist::{self, SettingsStore};
use crate::tracking::ChangeTracker;

type EventQueue<E> = Arc<Mutex<VecDeque<E>>>;

/// Debounce delays for the two viewport triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub data_loaded_delay: Duration,
    pub pointer_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            data_loaded_delay: Duration::from_millis(300),
            pointer_delay: Duration::from_millis(250),
        }
    }
}

/// Wires host events to debounced resolution sweeps.
pub struct HighlightController {
    engine: HighlightEngine,
    settings: HighlightSettings,
    debounce: DebounceManager,
    data_loaded: DebounceId,
    pointer: DebounceId,
    tracker: ChangeTracker,
    map_queue: EventQueue<MapEvent>,
    model_queue: EventQueue<ModelEvent>,
}

impl HighlightController {
    pub fn new(config: ControllerConfig) -> Self {
        let mut debounce = DebounceManager::new();
        let data_loaded = debounce.register(config.data_loaded_delay);
        let pointer = debounce.register(config.pointer_delay);
        Self {
            engine: HighlightEngine::new(),
            settings: HighlightSettings::default(),
            debounce,
            data_loaded,
            pointer,
            tracker: ChangeTracker::new(),
            map_queue: Arc::new(Mutex::new(VecDeque::new())),
            model_queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// The current settings snapshot.
    pub fn settings(&self) -> &HighlightSettings {
        &self.settings
    }

    /// Replace the settings. Takes effect on the next pass; callers that
    /// change settings interactively should follow up with
    /// [`HighlightController::on_control_toggled`].
    pub fn set_settings(&mut self, settings: HighlightSettings) {
        self.settings = settings;
    }

    /// Restore settings from the host's key-value store.
    pub fn load_settings(&mut self, store: &dyn SettingsStore) {
        self.settings = persist::load_settings(store);
    }

    /// Persist the current settings to the host's key-value store.
    pub fn save_settings(&self, store: &mut dyn SettingsStore) {
        persist::save_settings(store, &self.settings);
    }

    /// Hook into the host: subscribe to viewport and model events, create
    /// the hazard mirror layer, and register hazard change tracking.
    ///
    /// Fails only when the host knows no mechanism at all for tracking
    /// hazards.
    pub fn install(
        &mut self,
        events: &mut dyn HostEvents,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
    ) -> Result<()> {
        let map_queue = Arc::clone(&self.map_queue);
        events.map_events().connect(move |event: &MapEvent| {
            map_queue.lock().push_back(*event);
        });
        let model_queue = Arc::clone(&self.model_queue);
        events.model_events().connect(move |event: &ModelEvent| {
            model_queue.lock().push_back(*event);
        });

        // The mirror layer already existing means another instance set it
        // up; leave its features and registrations alone.
        if hazard_layer::init_layer(surface) {
            hazard_layer::seed(surface, model);
            self.tracker
                .install(events, EntityKind::PermanentHazards)?;
        }

        tracing::info!(target: "cartomark::controller", "highlight controller installed");
        Ok(())
    }

    /// Drain queued host events, fire due debouncers, and run any
    /// resulting sweep.
    ///
    /// `now` drives the debounce clock; `wall` is the timestamp rules see.
    /// Hosts pass (`Instant::now()`, `Utc::now()`).
    pub fn pump(
        &mut self,
        now: Instant,
        wall: DateTime<Utc>,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
    ) -> Option<SweepReport> {
        // Drain under the lock, react outside it: reacting can make the
        // host emit further events into the same queues.
        let map_events: Vec<MapEvent> = self.map_queue.lock().drain(..).collect();
        for event in map_events {
            let id = match event {
                MapEvent::DataLoaded => self.data_loaded,
                MapEvent::PointerMoved => self.pointer,
            };
            // The debouncer cannot be gone; ids live as long as self.
            let _ = self.debounce.trigger(id, now);
        }

        let model_events: Vec<ModelEvent> = self.model_queue.lock().drain(..).collect();
        for event in model_events {
            if event.kind == EntityKind::PermanentHazards {
                hazard_layer::apply_change(surface, event.change);
            }
            // Any model change re-resolves on the data-loaded cadence.
            let _ = self.debounce.trigger(self.data_loaded, now);
        }

        let fired = self.debounce.process_expired(now);
        if fired.is_empty() {
            return None;
        }
        let trigger = if fired.contains(&self.data_loaded) {
            RefreshTrigger::DataLoaded
        } else {
            RefreshTrigger::PointerMoved
        };
        Some(self.refresh(wall, model, surface, trigger))
    }

    /// Immediate full pass after a highlight control was clicked.
    pub fn on_control_toggled(
        &mut self,
        wall: DateTime<Utc>,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
    ) -> SweepReport {
        self.refresh(wall, model, surface, RefreshTrigger::ControlToggled)
    }

    /// Immediate full pass after a control's value changed.
    pub fn on_control_changed(
        &mut self,
        wall: DateTime<Utc>,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
    ) -> SweepReport {
        self.refresh(wall, model, surface, RefreshTrigger::ControlChanged)
    }

    /// The earliest pending debouncer deadline, for hosts that schedule
    /// their idle loop around it.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.debounce.time_until_next(now)
    }

    fn refresh(
        &mut self,
        wall: DateTime<Utc>,
        model: &dyn MapDataModel,
        surface: &mut dyn DisplaySurface,
        trigger: RefreshTrigger,
    ) -> SweepReport {
        self.engine
            .refresh(model, surface, &self.settings, wall, trigger)
    }
}

impl Default for HighlightController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
