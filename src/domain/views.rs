use super::list::TaskList;
use super::task::Task;
use chrono::{DateTime, Utc};

/// Label shown once a due date has passed
pub const OVERDUE: &str = "Overdue";

/// Per-list totals for overview screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub total: usize,
    pub active: usize,
    pub percentage: u32,
}

/// The list the selection points at, if it still exists
pub fn active_list<'a>(lists: &'a [TaskList], selected: Option<&str>) -> Option<&'a TaskList> {
    let selected = selected?;
    lists.iter().find(|l| l.id == selected)
}

/// Keep the selection if it names an existing list, otherwise fall back to the first list
pub fn resolve_selection(lists: &[TaskList], selected: Option<&str>) -> Option<String> {
    match active_list(lists, selected) {
        Some(list) => Some(list.id.clone()),
        None => lists.first().map(|l| l.id.clone()),
    }
}

/// Tasks of the selected list in insertion order
pub fn filtered_tasks<'a>(tasks: &'a [Task], selected: Option<&str>) -> Vec<&'a Task> {
    match selected {
        Some(id) => tasks.iter().filter(|t| t.list_id == id).collect(),
        None => Vec::new(),
    }
}

/// Number of tasks not yet completed
pub fn active_task_count(tasks: &[&Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

/// Rounded share of completed tasks, 0 for an empty set
pub fn completion_percentage(tasks: &[&Task]) -> u32 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    (100.0 * done as f64 / tasks.len() as f64).round() as u32
}

/// Human-relative time until the due date, or `None` without one
pub fn remaining_time(task: &Task, now: DateTime<Utc>) -> Option<String> {
    let due = task.due_date?;
    if now >= due {
        return Some(OVERDUE.to_string());
    }

    let left = due - now;
    let days = left.num_days();
    let hours = left.num_hours() % 24;
    let minutes = left.num_minutes() % 60;

    let label = if days > 0 {
        format!("{}d {}h left", days, hours)
    } else if hours > 0 {
        format!("{}h {}m left", hours, minutes)
    } else if minutes > 0 {
        format!("{}m left", minutes)
    } else {
        "less than a minute left".to_string()
    };
    Some(label)
}

/// Totals for every list, in list order
pub fn list_summaries(lists: &[TaskList], tasks: &[Task]) -> Vec<ListSummary> {
    lists
        .iter()
        .map(|list| {
            let owned = filtered_tasks(tasks, Some(&list.id));
            ListSummary {
                id: list.id.clone(),
                name: list.name.clone(),
                total: owned.len(),
                active: active_task_count(&owned),
                percentage: completion_percentage(&owned),
            }
        })
        .collect()
}
