//! Wizard session storage.
//!
//! Sessions are handed out behind a shared async mutex. A caller holds the
//! lock for the whole turn, so a second turn on the same session waits for
//! the first to settle. Removing a session only drops the store's handle;
//! a turn already holding the lock finishes against that detached copy.

use std::future::Future;
use std::sync::Arc;

use brandkit_types::error::RepositoryError;
use brandkit_types::wizard::{WizardSession, WizardStep};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

pub type SessionHandle = Arc<Mutex<WizardSession>>;

/// Listing row for a stored session.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub step: WizardStep,
    pub brand_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

pub trait WizardSessionStore: Send + Sync {
    /// Store a new session and return its handle.
    fn insert(
        &self,
        session: WizardSession,
    ) -> impl Future<Output = Result<SessionHandle, RepositoryError>> + Send;

    fn get(
        &self,
        id: &Uuid,
    ) -> impl Future<Output = Result<Option<SessionHandle>, RepositoryError>> + Send;

    /// Drop a session. Returns whether it existed.
    fn remove(&self, id: &Uuid) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Summaries of every session not currently locked by a turn.
    fn list(&self) -> impl Future<Output = Result<Vec<SessionSummary>, RepositoryError>> + Send;
}
