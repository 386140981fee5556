//! Typed access to the persisted keys.
//!
//! Loads never fail: a missing, unreadable or corrupt value falls back to the
//! default and is logged. Saves report errors to the caller.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};
use crate::models::{CalculatorKind, HistoryEntry};

pub const DARK_MODE_KEY: &str = "ai-labor-dark-mode";
pub const INPUTS_KEY_PREFIX: &str = "ai-labor-inputs/";
pub const HISTORY_KEY: &str = "ai-labor-history";

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn inputs_key(kind: CalculatorKind) -> String {
        format!("{INPUTS_KEY_PREFIX}{}", kind.as_str())
    }

    pub fn load_dark_mode(&self) -> bool {
        self.load_or_default(DARK_MODE_KEY)
    }

    pub fn save_dark_mode(
        &self,
        enabled: bool,
    ) -> Result<(), StoreError> {
        self.save(DARK_MODE_KEY, &enabled)
    }

    /// Last saved form snapshot for `kind`, or an empty form.
    pub fn load_inputs<T>(
        &self,
        kind: CalculatorKind,
    ) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.load_or_default(&Self::inputs_key(kind))
    }

    pub fn save_inputs<T>(
        &self,
        kind: CalculatorKind,
        snapshot: &T,
    ) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        self.save(&Self::inputs_key(kind), snapshot)
    }

    /// Forgets the snapshot for `kind`; the next load gives an empty form.
    pub fn clear_inputs(
        &self,
        kind: CalculatorKind,
    ) -> Result<(), StoreError> {
        let key = Self::inputs_key(kind);
        self.store.remove(&key)?;
        debug!(key = %key, "inputs removed");
        Ok(())
    }

    pub fn load_history(&self) -> Vec<HistoryEntry> {
        self.load_or_default(HISTORY_KEY)
    }

    pub fn save_history(
        &self,
        entries: &[HistoryEntry],
    ) -> Result<(), StoreError> {
        self.save(HISTORY_KEY, &entries)
    }

    fn load_or_default<T>(
        &self,
        key: &str,
    ) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!(key, error = %e, "could not read stored value; using default");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "stored value is corrupt; using default");
            T::default()
        })
    }

    fn save<T>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(key, &json)?;
        debug!(key, bytes = json.len(), "value saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;
    use crate::store::MemoryStore;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        #[serde(default)]
        hourly_rate: String,
    }

    fn prefs() -> (Preferences, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Preferences::new(store.clone()), store)
    }

    #[test]
    fn dark_mode_defaults_to_false() {
        let (prefs, _) = prefs();

        assert!(!prefs.load_dark_mode());
    }

    #[test]
    fn dark_mode_round_trips_as_json_bool() {
        let (prefs, store) = prefs();
        prefs.save_dark_mode(true).unwrap();

        assert!(prefs.load_dark_mode());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap(), Some("true".to_string()));
    }

    #[test]
    fn corrupt_dark_mode_reads_as_false() {
        let (prefs, store) = prefs();
        store.set(DARK_MODE_KEY, "{not json").unwrap();

        assert!(!prefs.load_dark_mode());
    }

    #[test]
    fn inputs_are_keyed_per_calculator() {
        let (prefs, store) = prefs();
        let snapshot = Snapshot {
            hourly_rate: "10000".to_string(),
        };
        prefs.save_inputs(CalculatorKind::OvertimePay, &snapshot).unwrap();

        assert!(store.get("ai-labor-inputs/overtime-pay").unwrap().is_some());
        assert_eq!(prefs.load_inputs::<Snapshot>(CalculatorKind::OvertimePay), snapshot);
        assert_eq!(
            prefs.load_inputs::<Snapshot>(CalculatorKind::AnnualLeave),
            Snapshot::default()
        );
    }

    #[test]
    fn corrupt_inputs_read_as_empty_form() {
        let (prefs, store) = prefs();
        store.set("ai-labor-inputs/severance-pay", "[1, 2").unwrap();

        assert_eq!(
            prefs.load_inputs::<Snapshot>(CalculatorKind::SeverancePay),
            Snapshot::default()
        );
    }

    #[test]
    fn cleared_inputs_load_as_empty_form() {
        let (prefs, store) = prefs();
        let snapshot = Snapshot {
            hourly_rate: "9860".to_string(),
        };
        prefs.save_inputs(CalculatorKind::OvertimePay, &snapshot).unwrap();

        prefs.clear_inputs(CalculatorKind::OvertimePay).unwrap();

        assert_eq!(store.get("ai-labor-inputs/overtime-pay").unwrap(), None);
        let loaded: Snapshot = prefs.load_inputs(CalculatorKind::OvertimePay);
        assert_eq!(loaded, Snapshot::default());
    }

    #[test]
    fn missing_history_is_empty() {
        let (prefs, _) = prefs();

        assert!(prefs.load_history().is_empty());
    }
}
