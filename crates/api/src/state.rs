use std::sync::Arc;

use projecthub_db::gateway::{Session, Store};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend shared by all requests.
    pub store: Arc<dyn Store>,
    /// Server configuration (anti-forgery secret, timeouts).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Open a unit of work scoped to the current request.
    pub fn session(&self) -> Session {
        Session::new(Arc::clone(&self.store))
    }
}
