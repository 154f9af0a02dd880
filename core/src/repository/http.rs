use reqwest::{Response, StatusCode};
use tracing::debug;
use uuid::Uuid;

use crate::config::{ApiConfig, REQUEST_TIMEOUT};
use crate::error::{ApiError, ApiResult};
use crate::model::task::{Task, TaskDraft, TaskPatch};
use crate::repository::traits::TaskRepository;

const RESOURCE_PATH: &str = "tasks";

/// JSON-over-HTTP task repository. One shared `reqwest::Client` with the
/// fixed request deadline; every call targets `<base_url>/tasks`.
#[derive(Clone)]
pub struct HttpTaskRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskRepository {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, RESOURCE_PATH)
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/{}/{}", self.base_url, RESOURCE_PATH, id)
    }
}

/// Uniform status handling: 2xx passes through, 404 becomes `NotFound`,
/// anything else is a plain status error.
fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    debug!(code = status.as_u16(), "request rejected by backend");
    if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound)
    } else {
        Err(ApiError::Status {
            code: status.as_u16(),
        })
    }
}

impl TaskRepository for HttpTaskRepository {
    async fn list(&self) -> ApiResult<Vec<Task>> {
        debug!("GET {}", self.collection_url());
        let response = self.client.get(self.collection_url()).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn get(&self, id: Uuid) -> ApiResult<Task> {
        debug!(%id, "GET task");
        let response = self.client.get(self.item_url(id)).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn create(&self, draft: &TaskDraft) -> ApiResult<Task> {
        debug!(title = %draft.title, "POST task");
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn update(&self, id: Uuid, patch: &TaskPatch) -> ApiResult<Task> {
        debug!(%id, "PUT task");
        let response = self
            .client
            .put(self.item_url(id))
            .json(patch)
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn remove(&self, id: Uuid) -> ApiResult<()> {
        debug!(%id, "DELETE task");
        let response = self.client.delete(self.item_url(id)).send().await?;
        check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(base_url: &str) -> HttpTaskRepository {
        HttpTaskRepository::new(&ApiConfig {
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_urls_join_cleanly() {
        let r = repo("http://localhost:5001/api");
        assert_eq!(r.collection_url(), "http://localhost:5001/api/tasks");

        // A trailing slash in config must not produce a double slash.
        let r = repo("http://localhost:5001/api/");
        assert_eq!(r.collection_url(), "http://localhost:5001/api/tasks");

        let id = Uuid::nil();
        assert_eq!(
            r.item_url(id),
            "http://localhost:5001/api/tasks/00000000-0000-0000-0000-000000000000"
        );
    }
}
