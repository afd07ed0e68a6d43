use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use reqwest::Client;
use tokio::{
    runtime::Runtime,
    sync::mpsc::{
        unbounded_channel,
        UnboundedReceiver,
        UnboundedSender,
    },
};

use super::{
    handle::{
        Generation,
        RequestTracker,
    },
    types::{
        ListingPurpose,
        RequestChannel,
    },
    TaskResult,
};
use crate::{
    bookmarks::BookmarkSync,
    core::{
        http::http_client,
        Verb,
        VerbDrillError,
    },
    dataset,
};

struct WriteJob {
    generation: Generation,
    sync: BookmarkSync,
    verbs: Vec<Verb>,
}

/// Runs network work off the UI thread and hands results back through a channel that the
/// UI drains once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    client: Client,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    writes: UnboundedSender<WriteJob>,
    tracker: RequestTracker,
    pending: usize,
}

impl TaskManager {
    pub fn new() -> Result<Self, VerbDrillError> {
        let runtime = Arc::new(Runtime::new()?);
        let client = http_client()?;
        let (sender, receiver) = mpsc::channel();

        let (writes, queue) = unbounded_channel();
        runtime.spawn(write_bookmarks(queue, sender.clone()));

        Ok(Self {
            runtime,
            client,
            receiver,
            sender,
            writes,
            tracker: RequestTracker::new(),
            pending: 0,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// True while a spawned job has not reported back yet.
    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// Drain finished tasks, dropping any that a newer request on the same channel superseded.
    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            if self.tracker.is_current(result.channel(), result.generation()) {
                results.push(result);
            } else if let TaskResult::BookmarksSaved { result: Err(e), .. } = &result {
                log::error!("Saving bookmarks failed: {e}");
            } else {
                log::debug!("Discarding stale {} result", result.task_type());
            }
        }

        results
    }

    fn task_context(&mut self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, Client) {
        self.pending += 1;
        (self.sender.clone(), self.runtime.clone(), self.client.clone())
    }

    pub fn load_dataset(&mut self, url: &str) {
        let generation = self.tracker.begin(RequestChannel::Dataset);
        let (sender, runtime, client) = self.task_context();
        let url = url.to_string();

        thread::spawn(move || {
            let report = runtime.block_on(dataset::load_or_fallback(&client, &url));
            let _ = sender.send(TaskResult::DatasetLoaded { generation, report });
        });
    }

    pub fn load_bookmarks(&mut self, sync: BookmarkSync) {
        let generation = self.tracker.begin(RequestChannel::BookmarkLoad);
        let (sender, runtime, _) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(sync.fetch()).map_err(|e| e.to_string());
            let _ = sender.send(TaskResult::BookmarksLoaded { generation, result });
        });
    }

    /// Queue an overwrite of the remote list. Writes go out one at a time in call order, so
    /// the last list queued is the one left stored.
    pub fn save_bookmarks(&mut self, sync: BookmarkSync, verbs: Vec<Verb>) {
        let generation = self.tracker.begin(RequestChannel::BookmarkWrite);
        let job = WriteJob { generation, sync, verbs };

        if self.writes.send(job).is_err() {
            log::error!("Bookmark writer has stopped; saved verbs were not synced");
            return;
        }
        self.pending += 1;
    }

    pub fn fetch_listing(&mut self, sync: BookmarkSync, purpose: ListingPurpose) {
        let generation = self.tracker.begin(RequestChannel::Listing);
        let (sender, runtime, _) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(sync.fetch()).map_err(|e| e.to_string());
            let _ = sender.send(TaskResult::ListingFetched { generation, purpose, result });
        });
    }
}

async fn write_bookmarks(
    mut queue: UnboundedReceiver<WriteJob>,
    sender: mpsc::Sender<TaskResult>,
) {
    while let Some(job) = queue.recv().await {
        let result =
            job.sync.push(&job.verbs).await.map(|_| job.verbs.len()).map_err(|e| e.to_string());
        if sender.send(TaskResult::BookmarksSaved { generation: job.generation, result }).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{
        Duration,
        Instant,
    };

    use super::*;
    use crate::bookmarks::{
        remote::memory::MemoryStore,
        BookmarkStore,
    };

    fn wait_for_results(manager: &mut TaskManager, sent: usize) -> Vec<TaskResult> {
        // Results are filtered, so poll until every queued task has had time to report.
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        let mut seen = 0;
        while Instant::now() < deadline && seen < sent {
            while let Ok(result) = manager.receiver.try_recv() {
                seen += 1;
                manager.pending = manager.pending.saturating_sub(1);
                if manager.tracker.is_current(result.channel(), result.generation()) {
                    results.push(result);
                }
            }
            thread::sleep(Duration::from_millis(10));
        }
        results
    }

    fn go() -> Verb {
        Verb::new("go", "went", "gone", &["A1"])
    }

    fn hit() -> Verb {
        Verb::new("hit", "hit", "hit", &["A2"])
    }

    fn write() -> Verb {
        Verb::new("write", "wrote", "written", &["B1"])
    }

    fn stored(manager: &TaskManager, sync: &BookmarkSync) -> Vec<String> {
        let verbs = manager.runtime.block_on(sync.fetch()).unwrap().unwrap_or_default();
        verbs.into_iter().map(|v| v.base).collect()
    }

    #[test]
    fn test_load_and_save_are_both_applied() {
        let mut manager = TaskManager::new().unwrap();
        let store = Arc::new(MemoryStore::default());
        let sync = BookmarkSync::new(store.clone(), "u1");

        manager.load_bookmarks(sync.clone());
        manager.save_bookmarks(sync.clone(), vec![go()]);
        assert!(manager.has_pending());

        let results = wait_for_results(&mut manager, 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|r| matches!(r, TaskResult::BookmarksLoaded { .. })));
        assert!(results
            .iter()
            .any(|r| matches!(r, TaskResult::BookmarksSaved { result: Ok(1), .. })));
        assert_eq!(store.writes(), 1);
        assert!(!manager.has_pending());
    }

    #[test]
    fn test_failed_load_stops_writes() {
        let mut manager = TaskManager::new().unwrap();
        let sync = BookmarkSync::new(Arc::new(MemoryStore::failing()), "u1");

        let mut bookmarks = BookmarkStore::new();
        bookmarks.begin_remote_load();
        manager.load_bookmarks(sync);

        let results = wait_for_results(&mut manager, 1);
        assert!(matches!(results[0], TaskResult::BookmarksLoaded { result: Err(_), .. }));

        bookmarks.remote_load_failed();
        let saved = bookmarks.save(&go());
        assert_eq!(saved.push, None);
        assert_eq!(bookmarks.len(), 1);
    }

    #[test]
    fn test_slow_write_is_not_overtaken() {
        let mut manager = TaskManager::new().unwrap();
        let store = Arc::new(MemoryStore::default().with_set_delays(&[Duration::from_millis(300)]));
        let sync = BookmarkSync::new(store.clone(), "u1");

        manager.save_bookmarks(sync.clone(), vec![go()]);
        manager.save_bookmarks(sync.clone(), vec![go(), hit()]);

        let results = wait_for_results(&mut manager, 2);
        assert_eq!(results.len(), 1);
        match &results[0] {
            TaskResult::BookmarksSaved { result, .. } => assert_eq!(result, &Ok(2)),
            other => panic!("Expected BookmarksSaved, got {:?}", other.task_type()),
        }
        assert_eq!(store.writes(), 2);
        assert_eq!(stored(&manager, &sync), vec!["go", "hit"]);
    }

    #[test]
    fn test_save_during_load_keeps_stored_verbs() {
        let mut manager = TaskManager::new().unwrap();
        let store = Arc::new(MemoryStore::default().with_get_delay(Duration::from_millis(200)));
        let sync = BookmarkSync::new(store.clone(), "u1");
        store.insert(&sync.path(), serde_json::to_value(vec![hit(), write()]).unwrap());

        let mut bookmarks = BookmarkStore::new();
        bookmarks.begin_remote_load();
        manager.load_bookmarks(sync.clone());

        let saved = bookmarks.save(&go());
        assert_eq!(saved.push, None);

        let results = wait_for_results(&mut manager, 1);
        let fetched = match results.into_iter().next() {
            Some(TaskResult::BookmarksLoaded { result, .. }) => result.unwrap(),
            other => panic!("Expected BookmarksLoaded, got {:?}", other.map(|r| r.task_type())),
        };
        assert_eq!(store.writes(), 0);

        let (_, push) = bookmarks.apply_remote(fetched);
        manager.save_bookmarks(sync.clone(), push.unwrap());
        let results = wait_for_results(&mut manager, 1);
        assert!(matches!(results[0], TaskResult::BookmarksSaved { result: Ok(3), .. }));

        let local: Vec<&str> = bookmarks.verbs().iter().map(|v| v.base.as_str()).collect();
        assert_eq!(local, vec!["hit", "write", "go"]);
        assert_eq!(stored(&manager, &sync), local);
    }
}
