//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::CustomerStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable. Holds the store handle that the console task also
/// receives, so both interfaces see the same records.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn CustomerStore>,
}

impl AppState {
    /// Create a new application state around a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Get a reference to the customer store.
    #[must_use]
    pub fn store(&self) -> &dyn CustomerStore {
        self.store.as_ref()
    }

    /// Get an owned handle to the customer store.
    #[must_use]
    pub fn store_handle(&self) -> Arc<dyn CustomerStore> {
        Arc::clone(&self.store)
    }
}
