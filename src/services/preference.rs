//! Remembered filter preference
//!
//! Reads and writes never fail from the caller's point of view: unavailable
//! or broken storage means the preference is simply not remembered.

use super::store::KeyValueStore;
use crate::model::filter::FilterPreference;
use tracing::{debug, warn};

/// Namespaced key under which the filter value is stored
pub const PREFERENCE_KEY: &str = "guia_lenhador_filtro_plantavel";

pub struct PreferenceStore {
    backend: Box<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Stored preference, `None` if never saved or unreadable
    pub fn load(&self) -> Option<FilterPreference> {
        let raw = match self.backend.get(PREFERENCE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read filter preference");
                return None;
            }
        };

        match raw.parse() {
            Ok(preference) => Some(preference),
            Err(e) => {
                debug!(error = %e, "ignoring stored filter preference");
                None
            }
        }
    }

    pub fn save(&mut self, preference: FilterPreference) {
        if let Err(e) = self.backend.set(PREFERENCE_KEY, preference.token()) {
            warn!(error = %e, "could not save filter preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{JsonFileStore, MemoryStore, UnavailableStore};
    use tempfile::TempDir;

    #[test]
    fn test_load_absent() {
        let store = PreferenceStore::new(Box::new(MemoryStore::new()));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = PreferenceStore::new(Box::new(MemoryStore::new()));
        store.save(FilterPreference::Negative);
        assert_eq!(store.load(), Some(FilterPreference::Negative));
        store.save(FilterPreference::All);
        assert_eq!(store.load(), Some(FilterPreference::All));
    }

    #[test]
    fn test_round_trip_across_sessions() {
        let dir = TempDir::new().unwrap();

        let mut first = PreferenceStore::new(Box::new(JsonFileStore::in_dir(dir.path())));
        first.save(FilterPreference::Positive);
        drop(first);

        let second = PreferenceStore::new(Box::new(JsonFileStore::in_dir(dir.path())));
        assert_eq!(second.load(), Some(FilterPreference::Positive));
    }

    #[test]
    fn test_unknown_token_is_absent() {
        let mut backend = MemoryStore::new();
        backend.set(PREFERENCE_KEY, "talvez").unwrap();
        let store = PreferenceStore::new(Box::new(backend));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut store = PreferenceStore::new(Box::new(UnavailableStore));
        store.save(FilterPreference::Positive);
        assert_eq!(store.load(), None);
    }
}
