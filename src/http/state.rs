//! Application state for the HTTP server.

use crate::store::SessionStore;

/// Shared application state passed to all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Session store holding the current statement version per upload
    pub store: SessionStore,
}

impl AppState {
    /// Create a new application state with an empty session store.
    pub fn new() -> Self {
        Self {
            store: SessionStore::new(),
        }
    }
}
