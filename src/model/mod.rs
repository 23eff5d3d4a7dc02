//! To-do list domain model
//!
//! - `task`: a single to-do item and its identifier
//! - `task_list`: a named, insertion-ordered collection of tasks
//! - `list_store`: all lists keyed by name (the aggregate root)
//! - `sort`: deadline and priority orderings for sorted views

mod list_store;
mod sort;
mod task;
mod task_list;

pub use list_store::ListStore;
pub use sort::{SortOrder, by_deadline, by_priority, priority_rank};
pub use task::{DEFAULT_PRIORITY, Task, TaskId};
pub use task_list::TaskList;
