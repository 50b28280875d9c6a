use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::controllers::page_session::PageSession;

struct SessionEntry {
    session: Arc<PageSession>,
    last_seen: Instant,
}

/// In-memory registry of live page sessions. A session idle for `ttl` or longer is never served
/// again; expired entries are purged whenever a new one is saved.
pub struct PageSessionRepository {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl PageSessionRepository {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn save(&self, session: Arc<PageSession>) {
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        if sessions.len() < before {
            info!(evicted = before - sessions.len(), "evicted idle page sessions");
        }

        debug!(session_id = %session.id(), "saving page session");
        sessions.insert(
            session.id(),
            SessionEntry {
                session,
                last_seen: now,
            },
        );
    }

    /// Looks a live session up and marks it as seen. An expired session is removed instead.
    pub fn get(&self, id: &Uuid) -> Option<Arc<PageSession>> {
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.get_mut(id)?;
        if self.is_expired(entry, now) {
            sessions.remove(id);
            info!(session_id = %id, "page session expired");
            return None;
        }
        entry.last_seen = now;
        Some(entry.session.clone())
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.duration_since(entry.last_seen) >= self.ttl
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
