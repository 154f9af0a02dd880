use uuid::Uuid;

use crate::error::ApiResult;
use crate::model::task::{Task, TaskDraft, TaskPatch};

/// The five CRUD operations the backend exposes for tasks.
///
/// Async so HTTP transports fit naturally; tests swap in an in-memory mock.
#[allow(async_fn_in_trait)]
pub trait TaskRepository {
    async fn list(&self) -> ApiResult<Vec<Task>>;
    async fn get(&self, id: Uuid) -> ApiResult<Task>;
    async fn create(&self, draft: &TaskDraft) -> ApiResult<Task>;
    async fn update(&self, id: Uuid, patch: &TaskPatch) -> ApiResult<Task>;
    async fn remove(&self, id: Uuid) -> ApiResult<()>;
}
