mod priority;
mod task;

pub use priority::{Priority, is_valid_priority};
pub use task::Task;
