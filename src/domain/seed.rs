use super::list::TaskList;
use super::task::Task;
use chrono::{DateTime, Duration, Utc};

/// Creation time of the first seed task (2024-01-01T09:00:00Z)
const SEED_EPOCH_SECS: i64 = 1_704_099_600;

/// (id, name)
const SEED_LISTS: [(&str, &str); 4] = [
    ("1", "My Day"),
    ("2", "Important"),
    ("3", "Planned"),
    ("4", "Personal"),
];

/// (id, list id, text, completed)
const SEED_TASKS: [(&str, &str, &str, bool); 10] = [
    ("t1", "1", "Plan the week", true),
    ("t2", "1", "Reply to emails", false),
    ("t3", "1", "Take a 30 minute walk", false),
    ("t4", "2", "Renew passport", false),
    ("t5", "2", "Pay electricity bill", false),
    ("t6", "2", "Prepare quarterly review", false),
    ("t7", "3", "Book dentist appointment", false),
    ("t8", "3", "Team offsite", false),
    ("t9", "4", "Call mom", false),
    ("t10", "4", "Read a chapter", false),
];

/// The lists used when storage holds none
pub fn seed_lists() -> Vec<TaskList> {
    SEED_LISTS
        .iter()
        .map(|(id, name)| TaskList::with_id(id, name))
        .collect()
}

/// The tasks used when storage holds none
pub fn seed_tasks() -> Vec<Task> {
    let epoch = DateTime::<Utc>::from_timestamp(SEED_EPOCH_SECS, 0).unwrap_or_default();

    SEED_TASKS
        .iter()
        .enumerate()
        .map(|(i, (id, list_id, text, completed))| Task {
            id: id.to_string(),
            list_id: list_id.to_string(),
            text: text.to_string(),
            completed: *completed,
            created_at: epoch + Duration::minutes(i as i64),
            due_date: None,
            alarm_enabled: None,
        })
        .collect()
}
