//! Shared application state.

use std::sync::Arc;

use swapdesk_db::Database;

use crate::config::ApiConfig;
use crate::service::UserService;

/// State handed to every handler.
///
/// Cloning is cheap: the pool and the config are reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    /// User operations over this state's database.
    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone())
    }
}
