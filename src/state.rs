use std::sync::Arc;

use crate::auth::token::JwtSettings;
use crate::store::{MemoryStore, TaskStore, UserStore};

/// Shared application state, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub jwt: JwtSettings,
}

impl AppState {
    /// Uses one backend for both credentials and tasks.
    pub fn new<S>(store: S, jwt: JwtSettings) -> Self
    where
        S: UserStore + TaskStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            tasks: store,
            jwt,
        }
    }

    pub fn in_memory(jwt: JwtSettings) -> Self {
        Self::new(MemoryStore::new(), jwt)
    }
}
