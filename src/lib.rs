use std::sync::Arc;

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod routers;
pub mod store;

use store::SongStore;

/// Router state: the one store handle shared by every request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn SongStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        AppState { store }
    }

    pub fn store(&self) -> &dyn SongStore {
        self.store.as_ref()
    }
}
