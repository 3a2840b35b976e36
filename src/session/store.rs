//! In-memory session store.
//!
//! Sessions live for the lifetime of the process. The table keeps insertion
//! order so the fallback scan is deterministic.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use super::types::{Session, SessionId};
use crate::access::Service;

#[derive(Debug, Default)]
struct SessionTable {
    sessions: HashMap<SessionId, Session>,
    /// Insertion order. An overwritten ID keeps its original slot.
    order: Vec<SessionId>,
}

/// Process-wide session store, shared across request handlers.
#[derive(Debug, Default)]
pub struct SessionStore {
    table: RwLock<SessionTable>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `service` and return its ID.
    pub fn create(&self, service: Service) -> Result<SessionId> {
        self.insert(Session::new(service))
    }

    /// Store a session. An existing record with the same ID is replaced.
    pub fn insert(&self, session: Session) -> Result<SessionId> {
        let id = session.id;
        let mut table = self
            .table
            .write()
            .map_err(|_| anyhow!("Session store lock poisoned"))?;

        if table.sessions.insert(id, session).is_none() {
            table.order.push(id);
        } else {
            debug!(session_id = %id, "Session ID collision, previous record replaced");
        }

        Ok(id)
    }

    /// Get session by ID.
    pub fn get(&self, id: &SessionId) -> Result<Option<Session>> {
        let table = self
            .table
            .read()
            .map_err(|_| anyhow!("Session store lock poisoned"))?;
        Ok(table.sessions.get(id).cloned())
    }

    /// First session of `service` in insertion order.
    pub fn find_any_by_service(&self, service: Service) -> Result<Option<Session>> {
        let table = self
            .table
            .read()
            .map_err(|_| anyhow!("Session store lock poisoned"))?;

        Ok(table
            .order
            .iter()
            .filter_map(|id| table.sessions.get(id))
            .find(|session| session.service == service)
            .cloned())
    }

    /// Number of stored sessions.
    pub fn size(&self) -> Result<usize> {
        let table = self
            .table
            .read()
            .map_err(|_| anyhow!("Session store lock poisoned"))?;
        Ok(table.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_session_create_and_get() {
        let store = SessionStore::new();

        let id = store.create(Service::Proxy).unwrap();

        let retrieved = store.get(&id).unwrap().unwrap();
        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.service, Service::Proxy);
    }

    #[test]
    fn test_get_unknown() {
        let store = SessionStore::new();
        store.create(Service::Chat).unwrap();
        assert!(store.get(&SessionId::new()).unwrap().is_none());
    }

    #[test]
    fn test_distinct_ids() {
        let store = SessionStore::new();
        let a = store.create(Service::Proxy).unwrap();
        let b = store.create(Service::Proxy).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.size().unwrap(), 2);
    }

    #[test]
    fn test_find_any_returns_first_inserted() {
        let store = SessionStore::new();
        store.create(Service::Chat).unwrap();
        let first = store.create(Service::Proxy).unwrap();
        store.create(Service::Proxy).unwrap();

        let found = store.find_any_by_service(Service::Proxy).unwrap().unwrap();
        assert_eq!(found.id, first);
    }

    #[test]
    fn test_find_any_without_match() {
        let store = SessionStore::new();
        store.create(Service::Chat).unwrap();
        assert!(store.find_any_by_service(Service::Proxy).unwrap().is_none());
    }

    #[test]
    fn test_collision_overwrites_in_place() {
        let store = SessionStore::new();
        let original = Session::new(Service::Proxy);
        let id = store.insert(original.clone()).unwrap();
        store.create(Service::Proxy).unwrap();

        let replacement = Session {
            service: Service::Chat,
            ..original
        };
        store.insert(replacement).unwrap();

        assert_eq!(store.size().unwrap(), 2);
        assert_eq!(store.get(&id).unwrap().unwrap().service, Service::Chat);
        // The replaced record no longer matches proxy, so the scan skips it.
        let found = store.find_any_by_service(Service::Proxy).unwrap().unwrap();
        assert_ne!(found.id, id);
    }

    #[test]
    fn test_concurrent_creates() {
        let store = Arc::new(SessionStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.create(Service::Chat).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.size().unwrap(), 800);
    }
}
