//! Session state storage.
//!
//! The store maps opaque session ids to their current [`Phase`]. Entries are
//! created on first write and live for the process lifetime; there is no
//! eviction, TTL, or persistence. `put` replaces the stored phase wholesale.
//!
//! Concurrent requests for the same session id are not coordinated: the last
//! writer wins. Callers own serializing requests per session.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::Phase;

/// Keyed session-state storage.
///
/// Injected into the request handler so tests (and an eventual external
/// store) can swap the backing without touching the stage machine.
pub trait SessionStore: Send + Sync {
    /// The stored phase, or the default (backend stage) when the session has
    /// never been seen.
    fn get(&self, session_id: &str) -> Phase;

    /// Replace the stored phase for this session.
    fn put(&self, session_id: &str, phase: Phase);
}

/// In-memory session store backed by a mutexed map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<HashMap<String, Phase>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, session_id: &str) -> Phase {
        let inner = self.inner.lock().expect("session store lock poisoned");
        inner.get(session_id).cloned().unwrap_or_default()
    }

    fn put(&self, session_id: &str, phase: Phase) {
        let mut inner = self.inner.lock().expect("session store lock poisoned");
        inner.insert(session_id.to_string(), phase);
    }
}
