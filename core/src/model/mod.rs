pub mod filter;
pub mod task;

// Re-export
pub use filter::{filter_sort, FilterCriteria, SortDirection, SortKey};
pub use task::{Priority, Status, Task, TaskDraft, TaskPatch};
