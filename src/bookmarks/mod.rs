//! Saved verbs ("bookmarks") and their mirror in the remote store.

pub mod export;
pub mod remote;

pub use remote::{
    BookmarkSync,
    FirebaseStore,
    RemoteStore,
};

use crate::core::Verb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    AlreadySaved,
    /// The verb had no base form.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteLoad {
    /// `stored` verbs came from the remote list; `added` session saves were appended to them.
    Merged { stored: usize, added: usize },
    /// Nothing is stored for this user yet; the local list is unchanged.
    NothingStored,
}

/// Where the list stands relative to the remote copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SyncState {
    /// No remote is configured. The list lasts for this session only.
    #[default]
    Local,
    /// The stored list is being fetched. Saves are kept locally until it arrives.
    Loading,
    /// The stored list has been merged and every new save is written through.
    Synced,
    /// The stored list could not be read. Nothing is written over it.
    Unavailable,
}

/// A save, plus the full list to write remotely when one is due.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub outcome: SaveOutcome,
    pub push: Option<Vec<Verb>>,
}

/// Ordered saved verbs, unique by base form, append-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkStore {
    verbs: Vec<Verb>,
    state: SyncState,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn contains(&self, base: &str) -> bool {
        self.verbs.iter().any(|v| v.base == base)
    }

    pub fn find(&self, base: &str) -> Option<&Verb> {
        self.verbs.iter().find(|v| v.base == base)
    }

    /// A remote was configured and its stored list has been requested.
    pub fn begin_remote_load(&mut self) {
        self.state = SyncState::Loading;
    }

    pub fn disconnect(&mut self) {
        self.state = SyncState::Local;
    }

    pub fn remote_load_failed(&mut self) {
        self.state = SyncState::Unavailable;
    }

    /// Append `verb` unless its base is empty or already saved. The list is only handed
    /// back for writing once the stored list has been merged in.
    pub fn save(&mut self, verb: &Verb) -> Saved {
        let outcome = self.insert(verb);
        let push = match (outcome, self.state) {
            (SaveOutcome::Added, SyncState::Synced) => Some(self.verbs.clone()),
            _ => None,
        };
        Saved { outcome, push }
    }

    /// Merge the fetched remote list: stored verbs first, then session saves they lack.
    /// Returns the merged list for writing when the session added anything.
    pub fn apply_remote(&mut self, stored: Option<Vec<Verb>>) -> (RemoteLoad, Option<Vec<Verb>>) {
        self.state = SyncState::Synced;

        let Some(stored) = stored else {
            let push = (!self.verbs.is_empty()).then(|| self.verbs.clone());
            return (RemoteLoad::NothingStored, push);
        };

        let session = std::mem::take(&mut self.verbs);
        for verb in &stored {
            self.insert(verb);
        }
        let stored_count = self.verbs.len();
        for verb in &session {
            self.insert(verb);
        }
        let added = self.verbs.len() - stored_count;

        let push = (added > 0).then(|| self.verbs.clone());
        (RemoteLoad::Merged { stored: stored_count, added }, push)
    }

    fn insert(&mut self, verb: &Verb) -> SaveOutcome {
        if verb.base.is_empty() {
            return SaveOutcome::Ignored;
        }
        if self.contains(&verb.base) {
            return SaveOutcome::AlreadySaved;
        }
        self.verbs.push(verb.clone());
        SaveOutcome::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go() -> Verb {
        Verb::new("go", "went", "gone", &["A1"])
    }

    fn hit() -> Verb {
        Verb::new("hit", "hit", "hit", &["A2"])
    }

    fn write() -> Verb {
        Verb::new("write", "wrote", "written", &["B1"])
    }

    fn synced() -> BookmarkStore {
        let mut store = BookmarkStore::new();
        store.begin_remote_load();
        store.apply_remote(None);
        store
    }

    fn bases(verbs: &[Verb]) -> Vec<&str> {
        verbs.iter().map(|v| v.base.as_str()).collect()
    }

    #[test]
    fn test_save_deduplicates_by_base() {
        let mut store = BookmarkStore::new();
        assert_eq!(store.save(&go()).outcome, SaveOutcome::Added);

        let mut variant = go();
        variant.cefr_tokens = vec!["B1".to_string()];
        assert_eq!(store.save(&variant).outcome, SaveOutcome::AlreadySaved);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("go").unwrap().cefr_tokens, vec!["A1"]);

        let blank = Verb::new("", "x", "y", &[]);
        assert_eq!(store.save(&blank).outcome, SaveOutcome::Ignored);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_without_remote_is_local_only() {
        let mut store = BookmarkStore::new();
        let saved = store.save(&go());
        assert_eq!(saved.outcome, SaveOutcome::Added);
        assert_eq!(saved.push, None);
    }

    #[test]
    fn test_synced_save_pushes_full_list_once() {
        let mut store = synced();
        assert_eq!(store.save(&go()).push, Some(vec![go()]));
        assert_eq!(store.save(&hit()).push, Some(vec![go(), hit()]));

        let again = store.save(&go());
        assert_eq!(again.outcome, SaveOutcome::AlreadySaved);
        assert_eq!(again.push, None);
    }

    #[test]
    fn test_save_while_loading_is_held_then_merged() {
        let mut store = BookmarkStore::new();
        store.begin_remote_load();

        let saved = store.save(&go());
        assert_eq!(saved.outcome, SaveOutcome::Added);
        assert_eq!(saved.push, None);

        let (load, push) = store.apply_remote(Some(vec![hit(), write()]));
        assert_eq!(load, RemoteLoad::Merged { stored: 2, added: 1 });
        assert_eq!(bases(store.verbs()), vec!["hit", "write", "go"]);
        assert_eq!(push.as_deref(), Some(store.verbs()));
    }

    #[test]
    fn test_merge_skips_session_saves_already_stored() {
        let mut store = BookmarkStore::new();
        store.begin_remote_load();
        store.save(&hit());

        let (load, push) = store.apply_remote(Some(vec![hit(), write()]));
        assert_eq!(load, RemoteLoad::Merged { stored: 2, added: 0 });
        assert_eq!(bases(store.verbs()), vec!["hit", "write"]);
        assert_eq!(push, None);
    }

    #[test]
    fn test_nothing_stored_keeps_list() {
        let mut store = BookmarkStore::new();
        store.begin_remote_load();
        assert_eq!(store.apply_remote(None), (RemoteLoad::NothingStored, None));

        let mut store = BookmarkStore::new();
        store.begin_remote_load();
        store.save(&go());
        let (load, push) = store.apply_remote(None);
        assert_eq!(load, RemoteLoad::NothingStored);
        assert_eq!(push, Some(vec![go()]));
        assert_eq!(store.verbs(), &[go()]);
    }

    #[test]
    fn test_failed_load_leaves_list_intact_and_writes_nothing() {
        let mut store = BookmarkStore::new();
        store.begin_remote_load();
        store.save(&go());
        store.remote_load_failed();

        let saved = store.save(&hit());
        assert_eq!(saved.outcome, SaveOutcome::Added);
        assert_eq!(saved.push, None);
        assert_eq!(store.verbs(), &[go(), hit()]);
    }
}
