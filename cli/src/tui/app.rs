use ratatui::widgets::TableState;
use taskline_core::{
    filter_sort, FilterCriteria, HttpTaskRepository, Priority, SortKey, Status, Task, TaskPatch,
    TaskRepository, TaskStore,
};
use uuid::Uuid;

use crate::tui::form::TaskForm;

/// The views the client can be on. The list is the default; detail and edit
/// are parametrized by task id; unknown ids land on the not-found view.
pub enum Route {
    List,
    Detail(Uuid),
    Edit,
    NotFound,
}

pub enum InputMode {
    Normal,
    Search,
    Form,
}

pub struct App {
    pub store: TaskStore<HttpTaskRepository>,
    // Direct repository handle for single-task reads (detail/edit); the
    // store only deals in the whole collection.
    repo: HttpTaskRepository,
    pub criteria: FilterCriteria,
    pub visible: Vec<Task>,
    pub table: TableState,
    pub route: Route,
    pub input_mode: InputMode,
    pub form: Option<TaskForm>,
    pub detail: Option<Task>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore<HttpTaskRepository>, repo: HttpTaskRepository) -> App {
        App {
            store,
            repo,
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            table: TableState::default(),
            route: Route::List,
            input_mode: InputMode::Normal,
            form: None,
            detail: None,
            should_quit: false,
        }
    }

    /// Initial mount: load the collection once, then derive the visible list.
    pub async fn init(&mut self) {
        self.store.fetch_all().await;
        self.refresh_visible();
        if !self.visible.is_empty() {
            self.table.select(Some(0));
        }
    }

    /// Re-derive the visible list from the authoritative collection and the
    /// current criteria. Called after every store or criteria change; the
    /// visible list is never edited in place.
    pub fn refresh_visible(&mut self) {
        self.visible = filter_sort(self.store.tasks(), &self.criteria);
        match self.table.selected() {
            Some(_) if self.visible.is_empty() => self.table.select(None),
            Some(i) if i >= self.visible.len() => self.table.select(Some(self.visible.len() - 1)),
            None if !self.visible.is_empty() => self.table.select(Some(0)),
            _ => {}
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.table.selected().and_then(|i| self.visible.get(i))
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.table.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.table.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table.select(Some(i));
    }

    // --- routing ---

    pub fn go_to_list(&mut self) {
        self.route = Route::List;
        self.input_mode = InputMode::Normal;
        self.form = None;
        self.detail = None;
        self.refresh_visible();
    }

    /// Detail view re-reads the task from the backend rather than trusting
    /// the collection; a vanished id routes to not-found.
    pub async fn open_detail(&mut self, id: Uuid) {
        match self.repo.get(id).await {
            Ok(task) => {
                self.detail = Some(task);
                self.route = Route::Detail(id);
            }
            Err(_) => {
                self.detail = None;
                self.route = Route::NotFound;
            }
        }
    }

    pub async fn open_selected_detail(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.open_detail(id).await;
        }
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(TaskForm::for_create());
        self.route = Route::Edit;
        self.input_mode = InputMode::Form;
    }

    pub async fn open_edit_form(&mut self, id: Uuid) {
        match self.repo.get(id).await {
            Ok(task) => {
                self.form = Some(TaskForm::for_edit(&task));
                self.route = Route::Edit;
                self.input_mode = InputMode::Form;
            }
            Err(_) => {
                self.route = Route::NotFound;
            }
        }
    }

    pub async fn open_selected_edit(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.open_edit_form(id).await;
        }
    }

    // --- store intents ---

    pub async fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let Some(draft) = form.build_draft() else {
            return; // field errors stay on the form
        };
        match form.editing {
            Some((id, _)) => {
                self.store.update(id, &TaskPatch::from(draft)).await;
            }
            None => {
                self.store.create(&draft).await;
            }
        }
        self.go_to_list();
    }

    pub async fn delete_selected(&mut self) {
        let Some(i) = self.table.selected() else {
            return;
        };
        let Some(id) = self.visible.get(i).map(|t| t.id) else {
            return;
        };
        self.store.remove(id).await;
        self.refresh_visible();
        // Keep the cursor near where it was after the row disappears.
        if self.visible.is_empty() {
            self.table.select(None);
        } else if i >= self.visible.len() {
            self.table.select(Some(self.visible.len() - 1));
        } else {
            self.table.select(Some(i));
        }
    }

    /// Space on the list: advance the selected task one workflow step.
    pub async fn advance_selected_status(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, next) = (task.id, task.status.advanced());
        self.store.update(id, &TaskPatch::status_only(next)).await;
        self.refresh_visible();
    }

    /// Status buttons on the detail view.
    pub async fn set_detail_status(&mut self, status: Status) {
        let Some(id) = self.detail.as_ref().map(|t| t.id) else {
            return;
        };
        self.store.update(id, &TaskPatch::status_only(status)).await;
        self.refresh_visible();
        // Mirror the change locally so the view doesn't need a second fetch.
        if let Some(task) = self.detail.as_mut() {
            if self.store.error().is_none() {
                task.status = status;
            }
        }
    }

    // --- filter intents ---

    pub fn cycle_status_filter(&mut self) {
        self.criteria.status = cycle_option(&Status::ALL, self.criteria.status);
        self.refresh_visible();
    }

    pub fn cycle_priority_filter(&mut self) {
        self.criteria.priority = cycle_option(&Priority::ALL, self.criteria.priority);
        self.refresh_visible();
    }

    pub fn cycle_sort_key(&mut self) {
        let idx = SortKey::ALL
            .iter()
            .position(|k| *k == self.criteria.sort_key)
            .unwrap_or(0);
        self.criteria.sort_key = SortKey::ALL[(idx + 1) % SortKey::ALL.len()];
        self.refresh_visible();
    }

    pub fn flip_sort_direction(&mut self) {
        self.criteria.sort_direction = self.criteria.sort_direction.flipped();
        self.refresh_visible();
    }

    /// One atomic reset of all criteria, one recomputation.
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.refresh_visible();
    }

    pub fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_input(&mut self, c: char) {
        self.criteria.search_term.push(c);
        self.refresh_visible();
    }

    pub fn search_backspace(&mut self) {
        self.criteria.search_term.pop();
        self.refresh_visible();
    }

    pub fn dismiss_error(&mut self) {
        self.store.dismiss_error();
    }
}

/// None -> first -> ... -> last -> None.
fn cycle_option<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|v| *v == value).unwrap_or(0);
            if idx + 1 < all.len() {
                Some(all[idx + 1])
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_option_walks_all_then_clears() {
        let mut current: Option<Status> = None;
        current = cycle_option(&Status::ALL, current);
        assert_eq!(current, Some(Status::NotStarted));
        current = cycle_option(&Status::ALL, current);
        assert_eq!(current, Some(Status::InProgress));
        current = cycle_option(&Status::ALL, current);
        assert_eq!(current, Some(Status::Completed));
        current = cycle_option(&Status::ALL, current);
        assert_eq!(current, None);
    }
}
