use crate::domain::Task;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Task record as it may appear in storage, including legacy records
/// written before `createdAt` existed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTask {
    pub id: String,
    pub list_id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub alarm_enabled: Option<bool>,
}

impl StoredTask {
    /// Admit the record, back-filling `created_at` with `now` when absent
    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        Task {
            id: self.id,
            list_id: self.list_id,
            text: self.text,
            completed: self.completed,
            created_at: self.created_at.unwrap_or(now),
            due_date: self.due_date,
            alarm_enabled: self.alarm_enabled,
        }
    }
}

/// Migrate stored records into tasks.
///
/// Returns the tasks and how many needed a back-filled `created_at`.
pub fn migrate_tasks(records: Vec<StoredTask>, now: DateTime<Utc>) -> (Vec<Task>, usize) {
    let mut migrated = 0;
    let tasks = records
        .into_iter()
        .map(|record| {
            if record.created_at.is_none() {
                migrated += 1;
            }
            record.into_task(now)
        })
        .collect();

    (tasks, migrated)
}
