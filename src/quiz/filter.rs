use std::collections::HashSet;

use crate::core::Verb;

/// Which CEFR levels are ticked, plus the derived "all" toggle.
#[derive(Debug, Clone, Default)]
pub struct LevelFilter {
    known: Vec<String>,
    selected: HashSet<String>,
}

impl LevelFilter {
    /// Every known level starts selected.
    pub fn new(known: Vec<String>) -> Self {
        let selected = known.iter().cloned().collect();
        Self { known, selected }
    }

    /// Replace the known levels (after a reload) and reselect all of them.
    pub fn set_known(&mut self, known: Vec<String>) {
        *self = Self::new(known);
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Replace the selection. Levels that are not known are ignored.
    pub fn set_selection(&mut self, levels: HashSet<String>) {
        self.selected = levels.into_iter().filter(|l| self.known.contains(l)).collect();
    }

    pub fn is_selected(&self, level: &str) -> bool {
        self.selected.contains(level)
    }

    pub fn set_level(&mut self, level: &str, on: bool) {
        if !self.known.iter().any(|k| k == level) {
            return;
        }
        if on {
            self.selected.insert(level.to_string());
        } else {
            self.selected.remove(level);
        }
    }

    /// The master toggle: checks or clears every individual level.
    pub fn set_all(&mut self, on: bool) {
        self.selected = if on { self.known.iter().cloned().collect() } else { HashSet::new() };
    }

    /// True iff every individual level is checked.
    pub fn all_selected(&self) -> bool {
        self.known.iter().all(|level| self.selected.contains(level))
    }

    pub fn derive_pool(&self, verbs: &[Verb]) -> Vec<Verb> {
        derive_pool(verbs, &self.known, &self.selected)
    }
}

/// Verbs eligible for the next question under `selection`.
///
/// Selecting every known level returns the full list, including verbs with no level tag.
pub fn derive_pool(verbs: &[Verb], known: &[String], selection: &HashSet<String>) -> Vec<Verb> {
    if selection.is_empty() {
        return Vec::new();
    }

    let covers_all = known.len() == selection.len() && known.iter().all(|k| selection.contains(k));
    if covers_all {
        return verbs.to_vec();
    }

    verbs.iter().filter(|verb| verb.has_any_level(selection)).cloned().collect()
}
