//! Aggregates module

pub mod task;

pub use task::{Priority, Task, TaskError, TaskStatus};
