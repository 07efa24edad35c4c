pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::TaskError;
pub use model::{NewTask, TaskPatch, TaskRow, TaskStatus};
pub use storage::TaskStorage;
