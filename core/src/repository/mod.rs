pub mod http;
pub mod traits;

// Re-export
pub use http::HttpTaskRepository;
pub use traits::TaskRepository;
