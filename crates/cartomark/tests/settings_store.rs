//! Settings persistence against a file-backed store.

mod common;

use std::fs;
use std::path::PathBuf;

use cartomark::prelude::*;
use cartomark::{SETTINGS_KEY, load_settings, save_settings};

/// One file per key inside a directory, the way a desktop host would back
/// its key-value store.
struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: String) {
        fs::write(self.path_for(key), value).expect("store write");
    }
}

#[test]
fn settings_survive_a_session_boundary() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore { dir: dir.path().to_owned() };

    let settings = HighlightSettings {
        locked: true,
        restrictions: true,
        recent: true,
        recent_days: 30,
        places: true,
        places_incomplete: true,
        hazards: true,
        selected_road_type: Some(RoadTypeSelector::NonDrivable),
        road_type_filter: true,
        ..Default::default()
    };

    // Session end.
    let mut controller = HighlightController::new(ControllerConfig::default());
    controller.set_settings(settings.clone());
    controller.save_settings(&mut store);

    // Next session start.
    let mut restored = HighlightController::new(ControllerConfig::default());
    restored.load_settings(&store);
    assert_eq!(restored.settings(), &settings);
}

#[test]
fn record_written_is_a_positional_array() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore { dir: dir.path().to_owned() };

    save_settings(&mut store, &HighlightSettings::default());

    let payload = store.get(SETTINGS_KEY).unwrap();
    let slots: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
    assert!(slots.len() >= 31);
    // Slot 0 is never used; slot 7 carries the places toggle.
    assert_eq!(slots[0], serde_json::Value::Null);
    assert_eq!(slots[7], serde_json::Value::from(true));

    let loaded = load_settings(&store);
    assert_eq!(loaded, HighlightSettings::default());
}
