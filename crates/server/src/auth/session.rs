//! # Session Store
//!
//! Each successful login creates a `Session`. The session owns the last
//! generated snippet, so two operators never see each other's output and
//! nothing survives a logout.

use chrono::{DateTime, Duration, Utc};
use quickabout::GeneratedSnippet;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tracing::{debug, info};
use uuid::Uuid;

/// One logged-in operator.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// The most recent successful generation, if any.
    pub last_output: Option<GeneratedSnippet>,
}

impl Session {
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at: Utc::now(),
            last_output: None,
        }
    }

    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.created_at + ttl
    }

    /// A session is expired once `ttl` has fully elapsed since login.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= self.expires_at(ttl)
    }
}

/// A shared, in-memory map of live sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh session for `username` and returns a copy of it.
    pub fn create(&self, username: &str) -> Session {
        let session = Session::new(username);
        info!(session_id = %session.id, "Created session for '{}'", username);
        self.insert(session.clone());
        session
    }

    /// Stores `session`, replacing any session with the same id.
    pub fn insert(&self, session: Session) {
        self.write().insert(session.id, session);
    }

    pub fn get(&self, id: &Uuid) -> Option<Session> {
        self.read().get(id).cloned()
    }

    /// Replaces the stored output. Returns `false` if the session is gone.
    pub fn store_output(&self, id: &Uuid, output: GeneratedSnippet) -> bool {
        match self.write().get_mut(id) {
            Some(session) => {
                session.last_output = Some(output);
                true
            }
            None => false,
        }
    }

    pub fn last_output(&self, id: &Uuid) -> Option<GeneratedSnippet> {
        self.read().get(id).and_then(|s| s.last_output.clone())
    }

    /// Drops the stored output, returning it if there was one.
    pub fn clear_output(&self, id: &Uuid) -> Option<GeneratedSnippet> {
        self.write().get_mut(id).and_then(|s| s.last_output.take())
    }

    pub fn remove(&self, id: &Uuid) -> Option<Session> {
        let removed = self.write().remove(id);
        if removed.is_some() {
            info!(session_id = %id, "Removed session");
        }
        removed
    }

    /// Removes every session older than `ttl`. Returns how many were dropped.
    pub fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, ttl));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {purged} expired session(s)");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock only means another request panicked mid-update; the map
    // itself is still usable.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Session>> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Session>> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
