//! Zone Store - the canonical, persisted list of zones
//!
//! Every mutation writes the full list back to the `zones` slot. Readers
//! get slices; only the store mutates zones.

use crate::core::error::Result;
use crate::core::types::{Rect, ZoneId};
use crate::storage::{read_json, write_json, KeyValueStore, ZONES_KEY};
use crate::zones::zone::Zone;

/// Ordered collection of zones backed by a key-value slot
pub struct ZoneStore<S: KeyValueStore> {
    zones: Vec<Zone>,
    selected: Option<ZoneId>,
    backend: S,
}

impl<S: KeyValueStore> ZoneStore<S> {
    /// Open the store, restoring whatever the backend holds
    pub fn open(backend: S) -> Self {
        let zones = load_zones(&backend);
        tracing::debug!(count = zones.len(), "zones restored");
        Self {
            zones,
            selected: None,
            backend,
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Create a zone from a drawn rectangle; the new zone becomes selected
    pub fn add_zone(&mut self, rect: Rect) -> Zone {
        let zone = Zone::create(rect, self.zones.len());
        tracing::info!(id = %zone.id, name = %zone.name, "zone added");
        self.zones.push(zone.clone());
        self.selected = Some(zone.id.clone());
        self.persist();
        zone
    }

    /// Replace a zone's name. Returns false when no zone has this id.
    pub fn rename_zone(&mut self, id: &ZoneId, name: impl Into<String>) -> bool {
        let Some(zone) = self.zones.iter_mut().find(|z| &z.id == id) else {
            return false;
        };
        zone.name = name.into();
        self.persist();
        true
    }

    /// Replace a zone's rectangle. Returns false when no zone has this id.
    pub fn update_geometry(&mut self, id: &ZoneId, rect: Rect) -> bool {
        let Some(zone) = self.zones.iter_mut().find(|z| &z.id == id) else {
            return false;
        };
        zone.rect = rect.normalized();
        self.persist();
        true
    }

    /// Remove a zone, clearing the selection if it pointed there
    pub fn remove_zone(&mut self, id: &ZoneId) -> Option<Zone> {
        let idx = self.zones.iter().position(|z| &z.id == id)?;
        let removed = self.zones.remove(idx);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        tracing::info!(id = %removed.id, name = %removed.name, "zone removed");
        self.persist();
        Some(removed)
    }

    // === SELECTION ===

    /// Select a zone; unknown ids are ignored
    pub fn select(&mut self, id: &ZoneId) {
        if self.get(id).is_some() {
            self.selected = Some(id.clone());
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ZoneId> {
        self.selected.as_ref()
    }

    // === PERSISTENCE ===

    /// Write the full list to the backend
    pub fn save(&mut self) -> Result<()> {
        write_json(&mut self.backend, ZONES_KEY, &self.zones)
    }

    /// Replace the in-memory list with the backend's contents
    pub fn load(&mut self) -> &[Zone] {
        self.zones = load_zones(&self.backend);
        let selection_valid = self
            .selected
            .as_ref()
            .map_or(true, |id| self.zones.iter().any(|z| &z.id == id));
        if !selection_valid {
            self.selected = None;
        }
        &self.zones
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to persist zones");
        }
    }
}

/// Read the zone list from a backend.
///
/// Absent data or anything other than a JSON array yields no zones. Entries
/// that do not parse as a zone are skipped.
pub fn load_zones(backend: &dyn KeyValueStore) -> Vec<Zone> {
    let Some(entries) = read_json::<Vec<serde_json::Value>>(backend, ZONES_KEY) else {
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Zone>(entry) {
            Ok(zone) => Some(zone),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed zone entry");
                None
            }
        })
        .collect()
}
