/// Everything that can go wrong between a task request and the store.
///
/// Variant order mirrors the order checks run in: validation and id-shape
/// errors fire before any query; `NotFound` and `Store` come back from the
/// pool. Handlers map these to 400 / 400 / 404 / 500 respectively.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid task ID")]
    InvalidId,
    #[error("Task not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
