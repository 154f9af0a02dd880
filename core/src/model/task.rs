use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow status of a task.
///
/// The backend speaks bare integers (0/1/2) on the wire; display strings
/// come from `label()` and never leak into serialization.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Next status in workflow order, wrapping back to the start.
    pub fn advanced(&self) -> Status {
        match self {
            Status::NotStarted => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::NotStarted,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::NotStarted
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        match status {
            Status::NotStarted => 0,
            Status::InProgress => 1,
            Status::Completed => 2,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::NotStarted),
            1 => Ok(Status::InProgress),
            2 => Ok(Status::Completed),
            other => Err(format!("unknown status value: {}", other)),
        }
    }
}

/// Task priority. Wire representation is 0/1/2 like `Status`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Comparator weight: Low=1, Medium=2, High=3. Not the wire value.
    pub fn sort_weight(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        match priority {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            other => Err(format!("unknown priority value: {}", other)),
        }
    }
}

/// A task as the backend returns it. `id`, `created_at` and `updated_at`
/// are server-assigned and read-only on this side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload: everything the user supplies, nothing the server assigns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
}

impl TaskDraft {
    /// Pre-fill a draft from an existing task, for the edit form.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
        }
    }
}

/// Partial-update payload. `None` fields are left off the wire entirely so
/// the backend only touches what was sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn status_only(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<TaskDraft> for TaskPatch {
    fn from(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            priority: Some(draft.priority),
            due_date: Some(draft.due_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_enums_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&Status::NotStarted).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Status::Completed).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "2");

        assert_eq!(serde_json::from_str::<Status>("1").unwrap(), Status::InProgress);
        assert_eq!(serde_json::from_str::<Priority>("0").unwrap(), Priority::Low);
        assert!(serde_json::from_str::<Status>("7").is_err());
    }

    #[test]
    fn test_labels_are_not_wire_values() {
        assert_eq!(Status::NotStarted.label(), "Not Started");
        assert_eq!(Priority::Medium.label(), "Medium");
        // sort weight is 1-based on purpose
        assert_eq!(Priority::Low.sort_weight(), 1);
        assert_eq!(Priority::High.sort_weight(), 3);
    }

    #[test]
    fn test_task_wire_format_is_camel_case() {
        let task = Task {
            id: Uuid::nil(),
            title: "Write report".to_string(),
            description: String::new(),
            status: Status::InProgress,
            priority: Priority::High,
            due_date: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"dueDate\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"status\":1"));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = TaskPatch::status_only(Status::Completed);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, "{\"status\":2}");
    }
}
