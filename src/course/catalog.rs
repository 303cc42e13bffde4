//! Course structure: modules, sections and quiz answer keys
//!
//! A [`Catalog`] is built once and shared by reference with everything that
//! needs to know the course layout. It never changes at runtime.

use std::collections::HashMap;

use super::quiz::AnswerKey;

/// What kind of content a section holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Reading material, completed with "next section"
    Lesson,
    /// A scored quiz, completed only after passing
    Quiz,
    /// The course certificate
    Certificate,
}

/// A single completable unit of the course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Human-readable identifier, unique within the catalog
    pub name: String,
    /// Name of the owning module (e.g. "MODULE_1")
    pub module: String,
    /// Kind of content
    pub kind: SectionKind,
}

/// A named, ordered group of sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Module name (e.g. "MODULE_1", "FINAL")
    pub name: String,
    /// Sections in course order
    pub sections: Vec<Section>,
}

impl Module {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), sections: Vec::new() }
    }

    /// Append a lesson section
    pub fn lesson(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), SectionKind::Lesson);
        self
    }

    /// Append a quiz section
    pub fn quiz(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), SectionKind::Quiz);
        self
    }

    /// Append a certificate section
    pub fn certificate(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), SectionKind::Certificate);
        self
    }

    fn push(&mut self, name: String, kind: SectionKind) {
        let module = self.name.clone();
        self.sections.push(Section { name, module, kind });
    }
}

/// Immutable course layout plus the answer key of every quiz section
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<Module>,
    quizzes: HashMap<String, AnswerKey>,
    /// Flattened position of every section, keyed by section name
    positions: HashMap<String, usize>,
    /// (module index, section index) for every flattened position
    flat: Vec<(usize, usize)>,
}

impl Catalog {
    /// Build a catalog from modules in course order
    ///
    /// Duplicate section names keep their first position.
    pub fn new(modules: Vec<Module>) -> Self {
        let mut positions = HashMap::new();
        let mut flat = Vec::new();

        for (m, module) in modules.iter().enumerate() {
            for (s, section) in module.sections.iter().enumerate() {
                positions.entry(section.name.clone()).or_insert(flat.len());
                flat.push((m, s));
            }
        }

        Self { modules, quizzes: HashMap::new(), positions, flat }
    }

    /// Attach the answer key for a quiz section
    pub fn with_quiz(mut self, key: AnswerKey) -> Self {
        self.quizzes.insert(key.section.clone(), key);
        self
    }

    /// All modules in course order
    pub fn all_modules(&self) -> &[Module] {
        &self.modules
    }

    /// Every section, concatenated module by module
    pub fn flattened_sections(&self) -> Vec<&Section> {
        self.flat.iter().map(|&(m, s)| &self.modules[m].sections[s]).collect()
    }

    /// Total number of sections across every module
    pub fn total_sections(&self) -> usize {
        self.flat.len()
    }

    /// Position of a section in the flattened order
    pub fn position(&self, section: &str) -> Option<usize> {
        self.positions.get(section).copied()
    }

    /// Section at a flattened position
    pub fn section_at(&self, index: usize) -> Option<&Section> {
        self.flat.get(index).map(|&(m, s)| &self.modules[m].sections[s])
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.position(name).and_then(|i| self.section_at(i))
    }

    /// Section that follows `section` in the flattened order
    pub fn next_after(&self, section: &str) -> Option<&Section> {
        self.position(section).and_then(|i| self.section_at(i + 1))
    }

    /// Answer key for a quiz section
    pub fn quiz(&self, section: &str) -> Option<&AnswerKey> {
        self.quizzes.get(section)
    }
}
