use chrono::Local;
use taskline_core::{
    parse_human_date, validate_draft, FieldError, Priority, Status, Task, TaskDraft,
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::DueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::DueDate => "Due Date",
        }
    }

    /// Name used by the validation layer for this field.
    fn key(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Status => "status",
            FormField::Priority => "priority",
            FormField::DueDate => "due_date",
        }
    }
}

/// State behind the create/edit view: current field values, the focused
/// field, and whatever validation errors the last submit attempt produced.
pub struct TaskForm {
    /// `Some((id, status))` when editing; the status is the task's current
    /// one, which controls the due-date validation bypass.
    pub editing: Option<(Uuid, Status)>,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_input: String,
    pub focus: FormField,
    pub errors: Vec<FieldError>,
}

impl TaskForm {
    pub fn for_create() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            status: Status::default(),
            priority: Priority::default(),
            due_input: "today".to_string(),
            focus: FormField::Title,
            errors: Vec::new(),
        }
    }

    pub fn for_edit(task: &Task) -> Self {
        Self {
            editing: Some((task.id, task.status)),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_input: task
                .due_date
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string(),
            focus: FormField::Title,
            errors: Vec::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn next_field(&mut self) {
        self.focus = Self::neighbor(self.focus, 1);
    }

    pub fn prev_field(&mut self) {
        self.focus = Self::neighbor(self.focus, FormField::ORDER.len() - 1);
    }

    fn neighbor(current: FormField, step: usize) -> FormField {
        let idx = FormField::ORDER
            .iter()
            .position(|f| *f == current)
            .unwrap_or(0);
        FormField::ORDER[(idx + step) % FormField::ORDER.len()]
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Title => self.title.push(c),
            FormField::Description => self.description.push(c),
            FormField::DueDate => self.due_input.push(c),
            // Enum fields cycle with arrow keys instead of taking text.
            FormField::Status | FormField::Priority => {}
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::DueDate => {
                self.due_input.pop();
            }
            FormField::Status | FormField::Priority => {}
        }
    }

    /// Left/right on an enum field steps through its variants.
    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            FormField::Status => {
                self.status = cycle(&Status::ALL, self.status, forward);
            }
            FormField::Priority => {
                self.priority = cycle(&Priority::ALL, self.priority, forward);
            }
            _ => {}
        }
    }

    /// Turn the current field values into a validated draft. On failure the
    /// errors stay on the form for rendering and `None` is returned.
    pub fn build_draft(&mut self) -> Option<TaskDraft> {
        let due_date = match parse_human_date(&self.due_input) {
            Ok(dt) => dt,
            Err(_) => {
                self.errors = vec![FieldError {
                    field: "due_date",
                    message: "Enter a date like 2025-06-01, today, tomorrow or +3d".to_string(),
                }];
                return None;
            }
        };

        let draft = TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date,
        };

        let editing_status = self.editing.map(|(_, status)| status);
        self.errors = validate_draft(&draft, editing_status);
        if self.errors.is_empty() {
            Some(draft)
        } else {
            None
        }
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field.key())
            .map(|e| e.message.as_str())
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn completed_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Archived milestone".to_string(),
            description: String::new(),
            status: Status::Completed,
            priority: Priority::Low,
            due_date: Utc::now() - Duration::days(90),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_build_draft_rejects_short_title() {
        let mut form = TaskForm::for_create();
        form.title = "ab".to_string();
        assert!(form.build_draft().is_none());
        assert!(form.error_for(FormField::Title).is_some());
        assert!(form.error_for(FormField::DueDate).is_none());
    }

    #[test]
    fn test_build_draft_rejects_unparsable_date() {
        let mut form = TaskForm::for_create();
        form.title = "Valid title".to_string();
        form.due_input = "whenever".to_string();
        assert!(form.build_draft().is_none());
        assert!(form.error_for(FormField::DueDate).is_some());
    }

    #[test]
    fn test_editing_completed_task_keeps_past_due_date() {
        let task = completed_task();
        let mut form = TaskForm::for_edit(&task);
        // due_input was pre-filled with a date three months in the past
        let draft = form.build_draft().expect("completed tasks bypass the date rule");
        assert_eq!(draft.title, "Archived milestone");
    }

    #[test]
    fn test_field_cycling_wraps() {
        let mut form = TaskForm::for_create();
        assert_eq!(form.focus, FormField::Title);
        form.prev_field();
        assert_eq!(form.focus, FormField::DueDate);
        form.next_field();
        assert_eq!(form.focus, FormField::Title);

        form.focus = FormField::Priority;
        form.cycle_focused(true);
        assert_eq!(form.priority, Priority::High);
        form.cycle_focused(true);
        assert_eq!(form.priority, Priority::Low);
    }
}
