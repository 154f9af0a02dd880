use chrono::Local;

use crate::model::task::{Status, TaskDraft};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A single field-scoped validation failure. Submission is blocked while any
/// of these exist; the backend is never contacted with an invalid draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a draft before create or update.
///
/// `editing_status` is the current status of the task being edited (`None`
/// when creating). The future-date rule is skipped when that status is
/// `Completed`: a finished task keeps whatever due date it already had.
pub fn validate_draft(draft: &TaskDraft, editing_status: Option<Status>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let title_len = draft.title.trim().chars().count();
    if title_len == 0 {
        errors.push(FieldError::new("title", "Title is required"));
    } else if title_len < TITLE_MIN_CHARS {
        errors.push(FieldError::new(
            "title",
            "Title must be at least 3 characters long",
        ));
    } else if title_len > TITLE_MAX_CHARS {
        errors.push(FieldError::new("title", "Title cannot exceed 100 characters"));
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push(FieldError::new(
            "description",
            "Description cannot exceed 500 characters",
        ));
    }

    if editing_status != Some(Status::Completed) {
        // Compare at calendar-day granularity in the user's zone.
        let today = Local::now().date_naive();
        let due = draft.due_date.with_timezone(&Local).date_naive();
        if due < today {
            errors.push(FieldError::new(
                "due_date",
                "Due date must be today or in the future",
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use chrono::{Duration, Utc};

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            status: Status::NotStarted,
            priority: Priority::Medium,
            due_date: Utc::now() + Duration::days(1),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&draft("Buy milk"), None).is_empty());
    }

    #[test]
    fn test_title_length_bounds() {
        assert_eq!(fields(&validate_draft(&draft(""), None)), vec!["title"]);
        assert_eq!(fields(&validate_draft(&draft("ab"), None)), vec!["title"]);
        assert!(validate_draft(&draft("abc"), None).is_empty());

        let long = "x".repeat(101);
        assert_eq!(fields(&validate_draft(&draft(&long), None)), vec!["title"]);
        let just_fits = "x".repeat(100);
        assert!(validate_draft(&draft(&just_fits), None).is_empty());
    }

    #[test]
    fn test_description_cap() {
        let mut d = draft("Write notes");
        d.description = "y".repeat(501);
        assert_eq!(fields(&validate_draft(&d, None)), vec!["description"]);
        d.description = "y".repeat(500);
        assert!(validate_draft(&d, None).is_empty());
    }

    #[test]
    fn test_past_due_date_rejected_on_create() {
        let mut d = draft("Old chore");
        d.due_date = Utc::now() - Duration::days(2);
        assert_eq!(fields(&validate_draft(&d, None)), vec!["due_date"]);
    }

    #[test]
    fn test_past_due_date_allowed_when_editing_completed_task() {
        let mut d = draft("Done ages ago");
        d.due_date = Utc::now() - Duration::days(30);

        assert!(validate_draft(&d, Some(Status::Completed)).is_empty());
        // Any other current status still enforces the rule.
        assert_eq!(
            fields(&validate_draft(&d, Some(Status::InProgress))),
            vec!["due_date"]
        );
    }

    #[test]
    fn test_errors_accumulate_per_field() {
        let mut d = draft("ab");
        d.description = "z".repeat(600);
        d.due_date = Utc::now() - Duration::days(1);
        assert_eq!(
            fields(&validate_draft(&d, None)),
            vec!["title", "description", "due_date"]
        );
    }
}
