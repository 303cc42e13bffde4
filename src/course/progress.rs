//! Per-learner completion state for the current session

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::quiz::percentage;

/// Persisted completion fact for one learner and section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Owning module name
    #[serde(default)]
    pub module_name: String,
    /// Section name
    pub section_name: String,
    /// Whether the section is completed
    #[serde(default)]
    pub completed: bool,
    /// Course percentage at the time of completion (or quiz score)
    #[serde(default)]
    pub progress_percentage: u8,
}

/// Cache of `section → completed` for one learner
///
/// The backend is the system of record; this store is hydrated once and then
/// updated optimistically.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    completed: HashMap<String, bool>,
}

impl ProgressStore {
    /// Create an empty store (every section but the first is locked)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the map with records fetched from the backend
    ///
    /// Records for sections outside the catalog are dropped.
    pub fn hydrate(&mut self, catalog: &Catalog, records: &[ProgressRecord]) {
        self.completed.clear();
        for record in records {
            if catalog.position(&record.section_name).is_none() {
                tracing::debug!("Ignoring progress for unknown section {:?}", record.section_name);
                continue;
            }
            self.completed.insert(record.section_name.clone(), record.completed);
        }
        tracing::debug!("Hydrated {} progress records", self.completed.len());
    }

    /// Mark a section completed; returns true if it was not already
    pub fn mark_completed(&mut self, section: &str) -> bool {
        let entry = self.completed.entry(section.to_string()).or_insert(false);
        let changed = !*entry;
        *entry = true;
        changed
    }

    /// Whether a section is completed
    pub fn is_completed(&self, section: &str) -> bool {
        self.completed.get(section).copied().unwrap_or(false)
    }

    /// Number of catalog sections marked completed
    pub fn completed_count(&self, catalog: &Catalog) -> usize {
        catalog.flattened_sections().iter().filter(|s| self.is_completed(&s.name)).count()
    }

    /// Completed sections as a rounded percentage of the whole course
    pub fn completion_ratio(&self, catalog: &Catalog) -> u8 {
        percentage(self.completed_count(catalog), catalog.total_sections())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::catalog::Module;

    fn catalog_of(n: usize) -> Catalog {
        let module = (0..n).fold(Module::new("M"), |m, i| m.lesson(format!("s{}", i)));
        Catalog::new(vec![module])
    }

    fn record(section: &str, completed: bool) -> ProgressRecord {
        ProgressRecord {
            module_name: "M".into(),
            section_name: section.into(),
            completed,
            progress_percentage: 0,
        }
    }

    #[test]
    fn nine_of_45_is_20_percent() {
        let catalog = catalog_of(45);
        let mut store = ProgressStore::new();
        for i in 0..9 {
            store.mark_completed(&format!("s{}", i));
        }
        assert_eq!(store.completion_ratio(&catalog), 20);
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let catalog = catalog_of(4);
        let mut store = ProgressStore::new();

        assert!(store.mark_completed("s0"));
        let ratio = store.completion_ratio(&catalog);
        assert!(!store.mark_completed("s0"));
        assert_eq!(store.completion_ratio(&catalog), ratio);
        assert_eq!(ratio, 25);
    }

    #[test]
    fn hydrate_replaces_previous_state() {
        let catalog = catalog_of(3);
        let mut store = ProgressStore::new();
        store.mark_completed("s2");

        store.hydrate(&catalog, &[record("s0", true), record("s1", false)]);

        assert!(store.is_completed("s0"));
        assert!(!store.is_completed("s1"));
        assert!(!store.is_completed("s2"));
    }

    #[test]
    fn hydrate_ignores_unknown_sections() {
        let catalog = catalog_of(2);
        let mut store = ProgressStore::new();
        store.hydrate(&catalog, &[record("elsewhere", true)]);
        assert_eq!(store.completed_count(&catalog), 0);
    }

    #[test]
    fn record_uses_camel_case_and_fails_closed() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"moduleName":"M","sectionName":"s0"}"#).unwrap();
        assert!(!record.completed);
        assert_eq!(record.progress_percentage, 0);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"sectionName\""));
        assert!(json.contains("\"progressPercentage\""));
    }
}
