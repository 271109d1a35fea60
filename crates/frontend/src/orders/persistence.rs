use chrono::{DateTime, Duration, Utc};
use contracts::domain::a001_orders::request::OrderFilterRequest;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::FilterConfig;
use crate::shared::storage::{KeyValueStorage, StorageError};

/// Snapshot of the filter panel written after every successful query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub filters: OrderFilterRequest,
    pub current_page: u32,
    pub per_page: u32,
    /// Unix epoch, milliseconds
    pub timestamp: i64,
}

impl FilterState {
    /// Time since the snapshot was written; `None` when the timestamp is
    /// out of range
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        now.timestamp_millis()
            .checked_sub(self.timestamp)
            .and_then(Duration::try_milliseconds)
    }
}

/// Named filter sets, keyed by the name the user gave them
pub type SavedFilterSets = BTreeMap<String, OrderFilterRequest>;

/// UI state of the order filter panel kept in client storage
pub struct FilterStateStore<S> {
    storage: S,
    state_key: String,
    panel_expanded_key: String,
    saved_sets_key: String,
    ttl: Duration,
}

impl<S: KeyValueStorage> FilterStateStore<S> {
    pub fn new(storage: S, config: &FilterConfig) -> Self {
        Self {
            storage,
            state_key: config.state_key.clone(),
            panel_expanded_key: config.panel_expanded_key.clone(),
            saved_sets_key: config.saved_sets_key.clone(),
            ttl: config.state_ttl(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&self, state: &FilterState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        self.storage.set_item(&self.state_key, &raw)?;
        debug!("filter state saved (page {})", state.current_page);
        Ok(())
    }

    /// Stored snapshot, if present and younger than the TTL.
    ///
    /// Malformed and expired records are removed.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Option<FilterState>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.state_key)? else {
            return Ok(None);
        };

        let state = match serde_json::from_str::<FilterState>(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("discarding malformed filter state: {}", e);
                self.storage.remove_item(&self.state_key)?;
                return Ok(None);
            }
        };

        let Some(age) = state.age(now) else {
            warn!("discarding filter state with bad timestamp {}", state.timestamp);
            self.storage.remove_item(&self.state_key)?;
            return Ok(None);
        };
        if age > self.ttl {
            debug!("discarding filter state older than {}h", self.ttl.num_hours());
            self.storage.remove_item(&self.state_key)?;
            return Ok(None);
        }

        Ok(Some(state))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.state_key)
    }

    /// Filter panel expanded flag; expanded unless stored otherwise
    pub fn panel_expanded(&self) -> bool {
        match self.storage.get_item(&self.panel_expanded_key) {
            Ok(Some(raw)) => raw != "false",
            Ok(None) => true,
            Err(e) => {
                warn!("failed to read filter panel flag: {}", e);
                true
            }
        }
    }

    pub fn set_panel_expanded(&self, expanded: bool) -> Result<(), StorageError> {
        self.storage
            .set_item(&self.panel_expanded_key, if expanded { "true" } else { "false" })
    }

    /// Saved filter sets. A malformed record reads as empty.
    pub fn saved_sets(&self) -> Result<SavedFilterSets, StorageError> {
        let Some(raw) = self.storage.get_item(&self.saved_sets_key)? else {
            return Ok(SavedFilterSets::new());
        };
        match serde_json::from_str(&raw) {
            Ok(sets) => Ok(sets),
            Err(e) => {
                warn!("ignoring malformed saved filter sets: {}", e);
                Ok(SavedFilterSets::new())
            }
        }
    }

    pub fn save_set(&self, name: &str, request: &OrderFilterRequest) -> Result<(), StorageError> {
        let mut sets = self.saved_sets()?;
        sets.insert(name.to_string(), request.clone());
        self.write_sets(&sets)
    }

    /// Returns false when no set has that name
    pub fn delete_set(&self, name: &str) -> Result<bool, StorageError> {
        let mut sets = self.saved_sets()?;
        if sets.remove(name).is_none() {
            return Ok(false);
        }
        self.write_sets(&sets)?;
        Ok(true)
    }

    fn write_sets(&self, sets: &SavedFilterSets) -> Result<(), StorageError> {
        let raw = serde_json::to_string(sets)?;
        self.storage.set_item(&self.saved_sets_key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use chrono::TimeZone;
    use contracts::domain::a001_orders::request::FilterRecord;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn store() -> FilterStateStore<MemoryStorage> {
        FilterStateStore::new(MemoryStorage::new(), &FilterConfig::default())
    }

    fn state_at(timestamp: DateTime<Utc>) -> FilterState {
        let filters: FilterRecord = [("location_city", "Austin")].into_iter().collect();
        FilterState {
            filters: OrderFilterRequest {
                filters,
                page: 2,
                per_page: 50,
            },
            current_page: 2,
            per_page: 50,
            timestamp: timestamp.timestamp_millis(),
        }
    }

    #[test]
    fn fresh_state_is_restored() {
        let store = store();
        let state = state_at(now() - Duration::hours(1));
        store.save(&state).unwrap();

        assert_eq!(store.load(now()).unwrap(), Some(state));
    }

    #[test]
    fn expired_state_is_discarded_and_removed() {
        let store = store();
        store.save(&state_at(now() - Duration::hours(25))).unwrap();

        assert_eq!(store.load(now()).unwrap(), None);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn malformed_state_is_removed() {
        let store = store();
        store
            .storage()
            .set_item("orders_filter_state_v1", "{\"filters\":")
            .unwrap();

        assert_eq!(store.load(now()).unwrap(), None);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn out_of_range_timestamp_is_removed() {
        let store = store();
        store
            .storage()
            .set_item(
                "orders_filter_state_v1",
                r#"{"filters":{"page":1,"per_page":50},"currentPage":1,"perPage":50,"timestamp":-9223372036854775807}"#,
            )
            .unwrap();

        assert_eq!(store.load(now()).unwrap(), None);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let raw = serde_json::to_value(state_at(now())).unwrap();
        assert_eq!(raw["currentPage"], 2);
        assert_eq!(raw["perPage"], 50);
        assert_eq!(raw["filters"]["location_city"], "Austin");
        assert_eq!(raw["filters"]["page"], 2);
    }

    #[test]
    fn panel_flag_defaults_to_expanded() {
        let store = store();
        assert!(store.panel_expanded());
        store.set_panel_expanded(false).unwrap();
        assert!(!store.panel_expanded());
    }

    #[test]
    fn saved_sets_round_trip() {
        let store = store();
        let request = state_at(now()).filters;
        store.save_set("austin", &request).unwrap();
        store.save_set("all", &request).unwrap();

        let names: Vec<_> = store.saved_sets().unwrap().into_keys().collect();
        assert_eq!(names, vec!["all".to_string(), "austin".to_string()]);

        assert!(store.delete_set("all").unwrap());
        assert!(!store.delete_set("missing").unwrap());
        assert_eq!(store.saved_sets().unwrap().len(), 1);
    }
}
