use std::sync::Arc;

use crate::database::repository::Repository;

/// Per-process application state, cloned into each handler by axum.
/// The repository sits behind a trait object so tests can substitute an
/// in-memory double for the Postgres implementation.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }
}
