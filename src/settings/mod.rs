//! Project settings and their single owning store
//!
//! All settings mutation goes through `SettingsStore::dispatch`, which is
//! also the only path that writes the `settings` slot. Views read through
//! `SettingsStore::view`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::{read_json, write_json, KeyValueStore, SETTINGS_KEY};

/// Threshold applied when none is configured
pub const DEFAULT_THRESHOLD: i64 = 5;

/// Global project configuration edited by users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Count above which a zone is in alert. Not validated: zero and
    /// negative values are stored as given.
    pub threshold: i64,
    pub alert_email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            alert_email: String::new(),
        }
    }
}

impl Settings {
    /// Overlay the fields of a stored object onto these settings.
    ///
    /// Each field is taken independently. A missing, null or mistyped field
    /// keeps its current value; a non-integer threshold counts as unset.
    pub fn merge_stored(mut self, stored: &Map<String, Value>) -> Self {
        if let Some(threshold) = stored.get("threshold").and_then(Value::as_i64) {
            self.threshold = threshold;
        }
        if let Some(email) = stored.get("alertEmail").and_then(Value::as_str) {
            self.alert_email = email.to_string();
        }
        self
    }

    /// Threshold used for evaluation; zero falls back to `fallback`
    pub fn effective_threshold(&self, fallback: i64) -> i64 {
        if self.threshold == 0 {
            fallback
        } else {
            self.threshold
        }
    }
}

/// A settings edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    SetThreshold(i64),
    SetAlertEmail(String),
}

/// Owner of the settings value and its persistence slot
pub struct SettingsStore<S: KeyValueStore> {
    settings: Settings,
    backend: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Open the store; stored fields are merged over the defaults
    pub fn open(backend: S) -> Self {
        let settings = match read_json::<Map<String, Value>>(&backend, SETTINGS_KEY) {
            Some(stored) => Settings::default().merge_stored(&stored),
            None => Settings::default(),
        };
        Self { settings, backend }
    }

    /// Read-only projection for views
    pub fn view(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Apply an edit and write the slot once
    pub fn dispatch(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::SetThreshold(threshold) => {
                tracing::info!(threshold, "threshold updated");
                self.settings.threshold = threshold;
            }
            SettingsAction::SetAlertEmail(email) => {
                tracing::info!(email = %email, "alert email updated");
                self.settings.alert_email = email;
            }
        }

        if let Err(e) = write_json(&mut self.backend, SETTINGS_KEY, &self.settings) {
            tracing::warn!(error = %e, "failed to persist settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        let store = SettingsStore::open(MemoryStore::new());
        assert_eq!(store.view(), &Settings::default());
        assert_eq!(store.view().threshold, 5);
    }

    #[test]
    fn test_partial_object_merges_over_defaults() {
        let mut backend = MemoryStore::new();
        backend
            .set(SETTINGS_KEY, "{\"alertEmail\": \"ops@example.com\"}")
            .unwrap();
        let store = SettingsStore::open(backend);
        assert_eq!(store.view().threshold, 5);
        assert_eq!(store.view().alert_email, "ops@example.com");
    }

    #[test]
    fn test_malformed_yields_defaults() {
        let mut backend = MemoryStore::new();
        backend.set(SETTINGS_KEY, "not json").unwrap();
        let store = SettingsStore::open(backend);
        assert_eq!(store.view(), &Settings::default());
    }

    #[test]
    fn test_dispatch_writes_once_per_action() {
        let mut store = SettingsStore::open(MemoryStore::new());
        store.dispatch(SettingsAction::SetThreshold(8));
        store.dispatch(SettingsAction::SetAlertEmail("a@b.c".into()));
        assert_eq!(store.backend().write_count(), 2);

        let reopened = SettingsStore::open(store.backend().clone());
        assert_eq!(reopened.view().threshold, 8);
        assert_eq!(reopened.view().alert_email, "a@b.c");
    }

    #[test]
    fn test_zero_threshold_accepted_but_falls_back() {
        let mut store = SettingsStore::open(MemoryStore::new());
        store.dispatch(SettingsAction::SetThreshold(0));
        assert_eq!(store.view().threshold, 0);
        assert_eq!(store.view().effective_threshold(DEFAULT_THRESHOLD), 5);
    }

    #[test]
    fn test_negative_threshold_kept() {
        let settings = Settings {
            threshold: -2,
            alert_email: String::new(),
        };
        assert_eq!(settings.effective_threshold(DEFAULT_THRESHOLD), -2);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"alertEmail\""));
        assert!(json.contains("\"threshold\":5"));
    }

    #[test]
    fn test_null_threshold_keeps_email() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                SETTINGS_KEY,
                "{\"threshold\": null, \"alertEmail\": \"ops@example.com\"}",
            )
            .unwrap();
        let store = SettingsStore::open(backend);
        assert_eq!(store.view().threshold, 5);
        assert_eq!(store.view().alert_email, "ops@example.com");
    }

    #[test]
    fn test_mistyped_fields_merge_independently() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                SETTINGS_KEY,
                "{\"threshold\": 7.5, \"alertEmail\": \"ops@example.com\"}",
            )
            .unwrap();
        let store = SettingsStore::open(backend);
        assert_eq!(store.view().threshold, 5);
        assert_eq!(store.view().alert_email, "ops@example.com");

        let mut backend = MemoryStore::new();
        backend
            .set(SETTINGS_KEY, "{\"threshold\": 9, \"alertEmail\": 42}")
            .unwrap();
        let store = SettingsStore::open(backend);
        assert_eq!(store.view().threshold, 9);
        assert_eq!(store.view().alert_email, "");
    }

    #[test]
    fn test_non_object_yields_defaults() {
        let mut backend = MemoryStore::new();
        backend.set(SETTINGS_KEY, "[1, 2]").unwrap();
        let store = SettingsStore::open(backend);
        assert_eq!(store.view(), &Settings::default());
    }
}
