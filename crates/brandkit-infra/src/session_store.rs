//! In-memory wizard session store.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use brandkit_core::repository::session::{SessionHandle, SessionSummary, WizardSessionStore};
use brandkit_types::error::RepositoryError;
use brandkit_types::wizard::WizardSession;

/// Sessions keyed by id, each behind its own async mutex.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<Uuid, SessionHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl WizardSessionStore for InMemorySessionStore {
    async fn insert(&self, session: WizardSession) -> Result<SessionHandle, RepositoryError> {
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(id, handle.clone());
        Ok(handle)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<SessionHandle>, RepositoryError> {
        Ok(self.sessions.get(id).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, id: &Uuid) -> Result<bool, RepositoryError> {
        Ok(self.sessions.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<SessionSummary>, RepositoryError> {
        // Handles are cloned out first so no map shard is held while locking.
        let handles: Vec<SessionHandle> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let mut summaries: Vec<SessionSummary> = handles
            .iter()
            .filter_map(|handle| handle.try_lock().ok())
            .map(|session| SessionSummary {
                id: session.id,
                step: session.step,
                brand_name: session.draft.name.clone(),
                updated_at: session.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}
