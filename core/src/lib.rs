pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod validate;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use model::filter::{filter_sort, FilterCriteria, SortDirection, SortKey};
pub use model::task::{Priority, Status, Task, TaskDraft, TaskPatch};
pub use repository::{HttpTaskRepository, TaskRepository};
pub use service::store::TaskStore;
pub use time::parse_human_date;
pub use validate::{validate_draft, FieldError};
