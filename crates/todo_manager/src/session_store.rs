//! In-memory store of every live browser session.

use crate::error::{Result, TodoError};
use crate::structs::{SessionId, TodoSession};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Holds sessions with LRU eviction and idle expiry.
///
/// Lock ordering: the cache lock may be held while taking a session lock,
/// never the other way round.
pub struct SessionStore {
    sessions: Mutex<LruCache<SessionId, Arc<Mutex<TodoSession>>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolve the session named by `requested`, or start a fresh one.
    ///
    /// Returns the session id to use and whether it was created by this call.
    pub async fn get_or_create(&self, requested: Option<SessionId>) -> (SessionId, bool) {
        let mut cache = self.sessions.lock().await;

        if let Some(id) = requested {
            let expired = match cache.get(&id) {
                Some(session) => Some(session.lock().await.is_expired(self.ttl)),
                None => None,
            };
            match expired {
                Some(false) => return (id, false),
                Some(true) => {
                    cache.pop(&id);
                    tracing::debug!(session_id = %id, "SessionStore: Session expired");
                }
                None => {
                    tracing::debug!(session_id = %id, "SessionStore: Unknown session");
                }
            }
        }

        let id = SessionId::new();
        if let Some((evicted, _)) = cache.push(id, Arc::new(Mutex::new(TodoSession::new()))) {
            tracing::info!(session_id = %evicted, "SessionStore: Evicted least recently used session");
        }

        tracing::info!(
            session_id = %id,
            session_count = cache.len(),
            "SessionStore: Session created"
        );
        (id, true)
    }

    /// Run `f` against a session while holding its lock.
    ///
    /// Refreshes the session's idle timer. Fails if the session is unknown or
    /// expired; an expired session is dropped.
    pub async fn with_session<F, R>(&self, id: SessionId, f: F) -> Result<R>
    where
        F: FnOnce(&mut TodoSession) -> R,
    {
        let session = {
            let mut cache = self.sessions.lock().await;
            cache.get(&id).cloned()
        }
        .ok_or(TodoError::SessionNotFound(id))?;

        let mut guard = session.lock().await;
        if guard.is_expired(self.ttl) {
            drop(guard);
            self.remove(id).await;
            return Err(TodoError::SessionNotFound(id));
        }

        guard.touch();
        Ok(f(&mut *guard))
    }

    pub async fn remove(&self, id: SessionId) -> bool {
        let mut cache = self.sessions.lock().await;
        cache.pop(&id).is_some()
    }

    /// Drop every expired session. Sessions busy with a request are skipped.
    pub async fn purge_expired(&self) -> usize {
        let mut cache = self.sessions.lock().await;
        let expired: Vec<SessionId> = cache
            .iter()
            .filter(|(_, session)| {
                session
                    .try_lock()
                    .map(|session| session.is_expired(self.ttl))
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            cache.pop(id);
        }

        if !expired.is_empty() {
            tracing::debug!(
                purged = expired.len(),
                remaining = cache.len(),
                "SessionStore: Purged expired sessions"
            );
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
