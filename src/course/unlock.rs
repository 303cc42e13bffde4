//! Sequential section gating
//!
//! A section is open when the one before it in the flattened course order is
//! completed. Module boundaries play no part.

use super::catalog::{Catalog, Section};
use super::progress::ProgressStore;

/// Whether a learner may open `section`
///
/// The first section is always unlocked. Unknown sections are locked.
pub fn is_unlocked(section: &str, catalog: &Catalog, store: &ProgressStore) -> bool {
    match catalog.position(section) {
        Some(0) => true,
        Some(i) => catalog.section_at(i - 1).is_some_and(|prev| store.is_completed(&prev.name)),
        None => false,
    }
}

/// First section in course order that is still locked
pub fn first_locked<'a>(catalog: &'a Catalog, store: &ProgressStore) -> Option<&'a Section> {
    catalog.flattened_sections().into_iter().find(|s| !is_unlocked(&s.name, catalog, store))
}

/// Furthest unlocked section that is not completed yet, where a learner resumes
pub fn resume_point<'a>(catalog: &'a Catalog, store: &ProgressStore) -> Option<&'a Section> {
    catalog
        .flattened_sections()
        .into_iter()
        .rev()
        .find(|s| is_unlocked(&s.name, catalog, store) && !store.is_completed(&s.name))
}
