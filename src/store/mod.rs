//! In-memory session store.
//!
//! One session per uploaded statement. Each accepted edit replaces the
//! statement wholesale with the new version produced by the flattening
//! service and bumps the version counter and checksum; there is no
//! persistence and no history, a removed or re-uploaded session simply
//! discards the old document.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::AreaStatement;
use crate::services::flatten::{apply_edit, EditError, FieldPath};

/// Store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    SessionNotFound(Uuid),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// One review session: the current statement version plus its metadata.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Session {
    pub id: Uuid,
    pub filename: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    /// Starts at 1 on upload, bumped by every accepted edit.
    pub version: u64,
    pub checksum: String,
    pub statement: AreaStatement,
}

/// Thread-safe in-memory session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a freshly validated statement.
    pub fn create(&self, statement: AreaStatement, filename: Option<String>) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            filename,
            uploaded_at: Utc::now(),
            version: 1,
            checksum: statement.checksum(),
            statement,
        };
        self.sessions.write().insert(session.id, session.clone());
        log::info!("session {} created", session.id);
        session
    }

    pub fn get(&self, id: Uuid) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::SessionNotFound(id))
    }

    /// All sessions, most recent upload first.
    pub fn list(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.sessions.read().values().cloned().collect();
        sessions.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        sessions
    }

    /// Apply one leaf edit to a session's statement, replacing it wholesale.
    pub fn apply_edit(
        &self,
        id: Uuid,
        path: &FieldPath,
        raw: &str,
    ) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(&id)
            .ok_or(StoreError::SessionNotFound(id))?;

        let edited = apply_edit(session.statement.fields(), path, raw)?;
        session.statement = AreaStatement::new(edited);
        session.version += 1;
        session.checksum = session.statement.checksum();
        Ok(session.clone())
    }

    /// Discard a session.
    pub fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.sessions
            .write()
            .remove(&id)
            .map(|_| log::info!("session {} discarded", id))
            .ok_or(StoreError::SessionNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
