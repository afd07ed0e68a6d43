pub use super::handle::{
    Generation,
    RequestChannel,
};
use crate::{
    core::Verb,
    dataset::LoadReport,
};

/// What a remote fetch found: `None` when nothing is stored for the user.
pub type FetchResult = Result<Option<Vec<Verb>>, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPurpose {
    /// Show the list in the saved-verbs window.
    Show,
    /// Write the list to an HTML page at the chosen path.
    Export,
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    DatasetLoaded { generation: Generation, report: LoadReport },

    BookmarksLoaded { generation: Generation, result: FetchResult },
    BookmarksSaved { generation: Generation, result: Result<usize, String> },

    ListingFetched { generation: Generation, purpose: ListingPurpose, result: FetchResult },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::DatasetLoaded { .. } => "dataset_loaded",
            TaskResult::BookmarksLoaded { .. } => "bookmarks_loaded",
            TaskResult::BookmarksSaved { .. } => "bookmarks_saved",
            TaskResult::ListingFetched { .. } => "listing_fetched",
        }
    }

    pub fn channel(&self) -> RequestChannel {
        match self {
            TaskResult::DatasetLoaded { .. } => RequestChannel::Dataset,
            TaskResult::BookmarksLoaded { .. } => RequestChannel::BookmarkLoad,
            TaskResult::BookmarksSaved { .. } => RequestChannel::BookmarkWrite,
            TaskResult::ListingFetched { .. } => RequestChannel::Listing,
        }
    }

    pub fn generation(&self) -> Generation {
        match self {
            TaskResult::DatasetLoaded { generation, .. }
            | TaskResult::BookmarksLoaded { generation, .. }
            | TaskResult::BookmarksSaved { generation, .. }
            | TaskResult::ListingFetched { generation, .. } => *generation,
        }
    }
}
