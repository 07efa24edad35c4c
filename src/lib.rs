pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::DaemonConfig;
use storage::Storage;
use tasks::TaskStorage;

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    pub storage: Arc<Storage>,
    pub tasks: Arc<TaskStorage>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: Arc<DaemonConfig>, storage: Arc<Storage>) -> Self {
        let tasks = Arc::new(TaskStorage::new(storage.pool()));
        Self {
            config,
            storage,
            tasks,
            started_at: std::time::Instant::now(),
        }
    }
}
