use tracing::{debug, warn};
use uuid::Uuid;

use crate::model::task::{Task, TaskDraft, TaskPatch};
use crate::repository::TaskRepository;

/// Session-lived task state: the authoritative collection, a loading flag
/// and the current error banner message.
///
/// The repository is injected so tests (and any second surface) construct
/// their own isolated instance; there is no ambient singleton. The collection
/// is kept across failed operations, so the UI can still render stale data
/// under the error banner.
///
/// Overlapping calls are neither queued nor deduplicated. Each one applies
/// its own transition when it resolves; with true overlap the last response
/// to land wins.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

impl<R: TaskRepository> TaskStore<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Replace the whole collection from the backend. On failure the previous
    /// collection stays visible and only the error message changes.
    pub async fn fetch_all(&mut self) {
        self.loading = true;
        match self.repo.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "collection replaced");
                self.tasks = tasks;
                self.error = None;
            }
            Err(err) => {
                warn!(%err, "list failed");
                self.error = Some("Failed to fetch tasks".to_string());
            }
        }
        self.loading = false;
    }

    /// Create a task and append the server's record (with its assigned id and
    /// timestamps) to the end of the collection.
    pub async fn create(&mut self, draft: &TaskDraft) {
        self.loading = true;
        match self.repo.create(draft).await {
            Ok(task) => {
                debug!(%task.id, "task created");
                self.tasks.push(task);
                self.error = None;
            }
            Err(err) => {
                warn!(%err, "create failed");
                self.error = Some("Failed to create task".to_string());
            }
        }
        self.loading = false;
    }

    /// Apply a partial update, then re-fetch the whole collection. The patch
    /// does not carry server-computed fields (`updated_at`), so merging it
    /// locally would drift from server truth.
    pub async fn update(&mut self, id: Uuid, patch: &TaskPatch) {
        self.loading = true;
        match self.repo.update(id, patch).await {
            Ok(_) => {
                self.error = None;
                self.loading = false;
                self.fetch_all().await;
            }
            Err(err) => {
                warn!(%err, %id, "update failed");
                self.error = Some("Failed to update task".to_string());
                self.loading = false;
            }
        }
    }

    /// Delete a task and drop it from the collection by id, no re-fetch.
    pub async fn remove(&mut self, id: Uuid) {
        self.loading = true;
        match self.repo.remove(id).await {
            Ok(()) => {
                debug!(%id, "task removed");
                self.tasks.retain(|t| t.id != id);
                self.error = None;
            }
            Err(err) => {
                warn!(%err, %id, "delete failed");
                self.error = Some("Failed to delete task".to_string());
            }
        }
        self.loading = false;
    }
}
