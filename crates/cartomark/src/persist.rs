//! Settings persistence.
//!
//! Settings are stored as a single positional JSON array in a host
//! key-value store, read at startup and written at session end. The layout
//! is versioned by position: new controls claim new slots, and loading
//! tolerates records that are shorter or carry foreign values (missing
//! slots fall back to defaults). Saving preserves slots this version does
//! not understand, so switching between versions loses nothing.

use serde_json::Value;

use cartomark_style::{HighlightSettings, RoadTypeSelector};

/// Key under which the settings record is stored.
pub const SETTINGS_KEY: &str = "cartomark.highlights";

/// Number of slots the current layout uses (index 0 stays unused).
const SLOT_COUNT: usize = 31;

/// A flat key-value store for persisted settings, owned by the host.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Load settings from the store, falling back to first-run defaults when
/// no record exists or it cannot be parsed.
pub fn load_settings(store: &dyn SettingsStore) -> HighlightSettings {
    let Some(payload) = store.get(SETTINGS_KEY) else {
        return HighlightSettings::default();
    };
    let slots: Vec<Value> = match serde_json::from_str(&payload) {
        Ok(slots) => slots,
        Err(error) => {
            tracing::warn!(
                target: "cartomark::persist",
                %error,
                "malformed settings record, using defaults"
            );
            return HighlightSettings::default();
        }
    };

    let mut settings = HighlightSettings {
        // Once a record exists, every control comes from it; an absent
        // slot means unchecked. Only the recent-days count keeps its
        // default when missing.
        places: false,
        ..Default::default()
    };

    settings.locked = uint_at(&slots, 1).is_some_and(|bits| bits % 2 == 1);
    settings.toll = bool_at(&slots, 2);
    settings.no_name = bool_at(&slots, 3);
    settings.no_city = bool_at(&slots, 4);
    settings.one_way = bool_at(&slots, 5);
    settings.places = bool_at(&slots, 7);
    settings.recent = bool_at(&slots, 11);
    settings.recent_days = uint_at(&slots, 12).map_or(7, |days| days.min(365) as u32);
    settings.editor_filter = bool_at(&slots, 13);
    settings.city_filter = bool_at(&slots, 15);
    settings.road_type_filter = bool_at(&slots, 16);
    settings.selected_road_type = uint_at(&slots, 17)
        .and_then(|code| u8::try_from(code).ok())
        .and_then(RoadTypeSelector::from_code);
    settings.restrictions = bool_at(&slots, 19);
    settings.places_locked = bool_at(&slots, 20);
    settings.places_incomplete = bool_at(&slots, 21);
    settings.alt_name = bool_at(&slots, 22);
    settings.speed_limits = bool_at(&slots, 23);
    settings.speed_limits_streets = bool_at(&slots, 24);
    settings.routing_pref = bool_at(&slots, 25);
    settings.speed_limits_ramps = bool_at(&slots, 26);
    settings.avg_speed_cams = bool_at(&slots, 27);
    settings.no_house_numbers = bool_at(&slots, 28);
    settings.lanes = bool_at(&slots, 29);
    settings.hazards = bool_at(&slots, 30);

    settings
}

/// Write settings to the store, preserving any slots already present that
/// the current layout does not claim.
pub fn save_settings(store: &mut dyn SettingsStore, settings: &HighlightSettings) {
    let mut slots: Vec<Value> = store
        .get(SETTINGS_KEY)
        .and_then(|payload| serde_json::from_str(&payload).ok())
        .unwrap_or_default();
    if slots.len() < SLOT_COUNT {
        slots.resize(SLOT_COUNT, Value::Null);
    }

    slots[1] = Value::from(u64::from(settings.locked) + 2 * u64::from(settings.places_locked));
    slots[2] = Value::from(settings.toll);
    slots[3] = Value::from(settings.no_name);
    slots[4] = Value::from(settings.no_city);
    slots[5] = Value::from(settings.one_way);
    slots[7] = Value::from(settings.places);
    slots[11] = Value::from(settings.recent);
    slots[12] = Value::from(settings.recent_days);
    slots[13] = Value::from(settings.editor_filter);
    slots[15] = Value::from(settings.city_filter);
    slots[16] = Value::from(settings.road_type_filter);
    slots[17] = settings
        .selected_road_type
        .map_or(Value::Null, |selector| Value::from(selector.code()));
    slots[19] = Value::from(settings.restrictions);
    slots[20] = Value::from(settings.places_locked);
    slots[21] = Value::from(settings.places_incomplete);
    slots[22] = Value::from(settings.alt_name);
    slots[23] = Value::from(settings.speed_limits);
    slots[24] = Value::from(settings.speed_limits_streets);
    slots[25] = Value::from(settings.routing_pref);
    slots[26] = Value::from(settings.speed_limits_ramps);
    slots[27] = Value::from(settings.avg_speed_cams);
    slots[28] = Value::from(settings.no_house_numbers);
    slots[29] = Value::from(settings.lanes);
    slots[30] = Value::from(settings.hazards);

    match serde_json::to_string(&slots) {
        Ok(payload) => store.set(SETTINGS_KEY, payload),
        Err(error) => tracing::warn!(
            target: "cartomark::persist",
            %error,
            "failed to serialize settings record"
        ),
    }
}

/// Read a slot as a boolean, accepting the numeric encodings older
/// records used.
fn bool_at(slots: &[Value], index: usize) -> bool {
    match slots.get(index) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_u64().is_some_and(|n| n != 0),
        _ => false,
    }
}

/// Read a slot as an unsigned integer, accepting string-encoded numbers.
fn uint_at(slots: &[Value], index: usize) -> Option<u64> {
    match slots.get(index)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        entries: HashMap<String, String>,
    }

    impl SettingsStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }
        fn set(&mut self, key: &str, value: String) {
            self.entries.insert(key.to_owned(), value);
        }
    }

    #[test]
    fn empty_store_yields_first_run_defaults() {
        let store = MemoryStore::default();
        let settings = load_settings(&store);
        assert_eq!(settings, HighlightSettings::default());
        assert!(settings.places);
        assert_eq!(settings.recent_days, 7);
    }

    #[test]
    fn settings_round_trip() {
        let mut store = MemoryStore::default();
        let settings = HighlightSettings {
            locked: true,
            toll: true,
            one_way: true,
            recent: true,
            recent_days: 14,
            places: true,
            places_locked: true,
            places_incomplete: true,
            road_type_filter: true,
            selected_road_type: Some(RoadTypeSelector::TunnelWithElevation),
            speed_limits: true,
            speed_limits_ramps: true,
            hazards: true,
            ..Default::default()
        };

        save_settings(&mut store, &settings);
        let loaded = load_settings(&store);

        // Selections of the editor and city filters are session-only.
        assert_eq!(loaded, settings);
    }

    #[test]
    fn short_records_tolerated() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, "[null, 1, true, true]".into());
        let settings = load_settings(&store);
        assert!(settings.locked);
        assert!(settings.toll);
        assert!(settings.no_name);
        assert!(!settings.places);
        assert_eq!(settings.recent_days, 7);
    }

    #[test]
    fn locked_slot_is_a_bitfield() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, "[null, 2]".into());
        let settings = load_settings(&store);
        assert!(!settings.locked);
        // Slot 20 is authoritative for place locks; the bitfield alone
        // does not enable it.
        assert!(!settings.places_locked);

        store.set(SETTINGS_KEY, "[null, 3, null, null, null, null, null, null, \
             null, null, null, null, null, null, null, null, null, null, null, \
             null, true]".into());
        let settings = load_settings(&store);
        assert!(settings.locked);
        assert!(settings.places_locked);
    }

    #[test]
    fn string_encoded_day_count_accepted() {
        let mut store = MemoryStore::default();
        store.set(
            SETTINGS_KEY,
            r#"[null, 0, false, false, false, false, null, true, null, null, null, true, "21"]"#
                .into(),
        );
        let settings = load_settings(&store);
        assert!(settings.recent);
        assert_eq!(settings.recent_days, 21);
    }

    #[test]
    fn unknown_slots_survive_a_save() {
        let mut store = MemoryStore::default();
        // Slot 6 belongs to some other script version.
        store.set(SETTINGS_KEY, r#"[null, 0, false, false, false, false, "legacy"]"#.into());

        save_settings(&mut store, &HighlightSettings::default());

        let slots: Vec<Value> = serde_json::from_str(&store.get(SETTINGS_KEY).unwrap()).unwrap();
        assert_eq!(slots[6], Value::from("legacy"));
    }

    #[test]
    fn malformed_record_falls_back_to_defaults() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, "{not json".into());
        assert_eq!(load_settings(&store), HighlightSettings::default());
    }
}
