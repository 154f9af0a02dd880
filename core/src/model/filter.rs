use std::cmp::Ordering;

use crate::model::task::{Priority, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::DueDate, SortKey::Priority, SortKey::Title];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DueDate => "Due Date",
            SortKey::Priority => "Priority",
            SortKey::Title => "Title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }

    pub fn flipped(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Everything the caller can narrow or reorder the visible list by.
///
/// Defaults: no status/priority filter, empty search, due date ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl FilterCriteria {
    /// Reset every criterion to its default in one assignment, so callers
    /// recompute the visible list exactly once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        let term = self.search_term.trim();
        if !term.is_empty() {
            let term = term.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&term);
            let in_description = task.description.to_lowercase().contains(&term);
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.sort_key {
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::Priority => a.priority.sort_weight().cmp(&b.priority.sort_weight()),
            SortKey::Title => compare_titles(&a.title, &b.title),
        };
        match self.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Derive the visible task list: filter by status, priority and search term,
/// then stable-sort by the selected key. Pure; inputs are never mutated and
/// the output is always a subsequence of `tasks` (ties keep input order, in
/// either direction, because reversing `Equal` is still `Equal`).
pub fn filter_sort(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| criteria.matches(task))
        .cloned()
        .collect();
    visible.sort_by(|a, b| criteria.compare(a, b));
    visible
}

// Case-folded comparison stands in for locale-aware collation.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn task(title: &str, description: &str, status: Status, priority: Priority, due: DateTime<Utc>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            status,
            priority,
            due_date: due,
            created_at: date(2025, 1, 1),
            updated_at: date(2025, 1, 1),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("A", "", Status::NotStarted, Priority::High, date(2025, 1, 10)),
            task("B", "", Status::Completed, Priority::Low, date(2025, 1, 5)),
        ]
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_output_is_subsequence_of_input() {
        let tasks = sample();
        let criteria = FilterCriteria::default();
        let visible = filter_sort(&tasks, &criteria);

        // Nothing fabricated, nothing duplicated.
        assert!(visible.len() <= tasks.len());
        for t in &visible {
            assert_eq!(visible.iter().filter(|v| v.id == t.id).count(), 1);
            assert!(tasks.iter().any(|orig| orig.id == t.id));
        }
    }

    #[test]
    fn test_refiltering_is_idempotent() {
        let tasks = vec![
            task("Alpha", "", Status::NotStarted, Priority::High, date(2025, 1, 3)),
            task("Beta", "", Status::InProgress, Priority::Low, date(2025, 1, 1)),
            task("Gamma", "", Status::NotStarted, Priority::Medium, date(2025, 1, 2)),
        ];
        let criteria = FilterCriteria {
            status: Some(Status::NotStarted),
            search_term: "a".to_string(),
            ..FilterCriteria::default()
        };
        let once = filter_sort(&tasks, &criteria);
        let twice = filter_sort(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let due = date(2025, 6, 1);
        let tasks = vec![
            task("first", "", Status::NotStarted, Priority::Medium, due),
            task("second", "", Status::NotStarted, Priority::Medium, due),
            task("third", "", Status::NotStarted, Priority::Medium, due),
        ];
        let mut criteria = FilterCriteria::default();

        let ascending = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&ascending), vec!["first", "second", "third"]);

        // Direction flips the comparator sign, but ties still keep input order.
        criteria.sort_direction = SortDirection::Descending;
        let descending = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&descending), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_clear_resets_to_due_date_ascending() {
        let tasks = sample();
        let mut criteria = FilterCriteria {
            status: Some(Status::Completed),
            priority: Some(Priority::Low),
            search_term: "b".to_string(),
            sort_key: SortKey::Title,
            sort_direction: SortDirection::Descending,
        };
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());

        // Everything visible again, ordered by ascending due date: B (Jan 5) first.
        let visible = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&visible), vec!["B", "A"]);
    }

    #[test]
    fn test_status_filter_keeps_exact_matches_only() {
        let tasks = sample();
        let criteria = FilterCriteria {
            status: Some(Status::NotStarted),
            ..FilterCriteria::default()
        };
        let visible = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&visible), vec!["A"]);
    }

    #[test]
    fn test_search_matches_title_or_description_case_folded() {
        let tasks = vec![
            task("Alpha", "", Status::NotStarted, Priority::Medium, date(2025, 1, 1)),
            task("Beta", "workaround notes", Status::NotStarted, Priority::Medium, date(2025, 1, 2)),
            task("Zzz", "nothing here", Status::NotStarted, Priority::Medium, date(2025, 1, 3)),
        ];
        let criteria = FilterCriteria {
            search_term: "A".to_string(),
            ..FilterCriteria::default()
        };
        // "Alpha" matches in the title, "Beta" both ways, "Zzz" only via its
        // description ("nothing here" has no 'a'... it does not match).
        let visible = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&visible), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_priority_descending_orders_high_medium_low() {
        let tasks = vec![
            task("low", "", Status::NotStarted, Priority::Low, date(2025, 1, 1)),
            task("high", "", Status::NotStarted, Priority::High, date(2025, 1, 2)),
            task("medium", "", Status::NotStarted, Priority::Medium, date(2025, 1, 3)),
        ];
        let criteria = FilterCriteria {
            sort_key: SortKey::Priority,
            sort_direction: SortDirection::Descending,
            ..FilterCriteria::default()
        };
        let visible = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&visible), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_title_sort_is_case_insensitive() {
        let tasks = vec![
            task("banana", "", Status::NotStarted, Priority::Medium, date(2025, 1, 1)),
            task("Apple", "", Status::NotStarted, Priority::Medium, date(2025, 1, 2)),
            task("cherry", "", Status::NotStarted, Priority::Medium, date(2025, 1, 3)),
        ];
        let criteria = FilterCriteria {
            sort_key: SortKey::Title,
            ..FilterCriteria::default()
        };
        let visible = filter_sort(&tasks, &criteria);
        assert_eq!(titles(&visible), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let criteria = FilterCriteria::default();
        assert!(filter_sort(&[], &criteria).is_empty());
    }

    #[test]
    fn test_whitespace_search_term_matches_everything() {
        let tasks = sample();
        let criteria = FilterCriteria {
            search_term: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_sort(&tasks, &criteria).len(), tasks.len());
    }
}
