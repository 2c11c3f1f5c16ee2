pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod storage;
pub mod store;

pub use error::AppError;
pub use model::{Priority, Task, is_valid_priority};
pub use store::{TaskStore, with_store};
