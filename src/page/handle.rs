use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::debug;

use super::document::{Document, Patch};

const NAVIGATION_TIMER: &str = "__navigation";

/// Shared handle to a page's `Document` plus the timers that act on it.
///
/// Each timer key owns at most one pending task: scheduling a new one aborts the previous,
/// so an older message's hide can never hide a newer message.
#[derive(Clone)]
pub struct PageHandle {
    inner: Arc<PageInner>,
}

struct PageInner {
    document: Mutex<Document>,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl PageHandle {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(PageInner {
                document: Mutex::new(document),
                timers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Runs `f` against the document. Never call this across an `.await`.
    pub fn with<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut doc = self.document();
        f(&mut doc)
    }

    fn document(&self) -> MutexGuard<'_, Document> {
        self.inner
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn drain_patches(&self) -> Vec<Patch> {
        self.with(Document::drain_patches)
    }

    pub fn location(&self) -> Option<String> {
        self.with(|doc| doc.location().map(str::to_owned))
    }

    /// Hides `id` after `delay`, replacing any hide already pending for it.
    pub fn hide_after(&self, id: &str, delay: Duration) {
        self.with(|doc| doc.schedule_hide(id, delay.as_millis() as u64));
        let page = self.clone();
        let target = id.to_owned();
        self.replace_timer(id, async move {
            tokio::time::sleep(delay).await;
            page.with(|doc| doc.hide_silently(&target));
        });
    }

    /// Navigates to `url` after `delay`.
    pub fn navigate_after(&self, url: &str, delay: Duration) {
        self.with(|doc| doc.announce_navigation(url, delay.as_millis() as u64));
        let page = self.clone();
        let url = url.to_owned();
        self.replace_timer(NAVIGATION_TIMER, async move {
            tokio::time::sleep(delay).await;
            debug!(%url, "navigating");
            page.with(|doc| doc.navigate_silently(&url));
        });
    }

    fn replace_timer<F>(&self, key: &str, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let mut timers = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timers.insert(key.to_owned(), handle) {
            previous.abort();
        }
    }
}
