use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task belonging to exactly one list
///
/// Stored in a flat collection; membership is the `list_id` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier, immutable after creation
    pub id: String,
    /// Owning list
    pub list_id: String,
    /// Description, never empty
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Creation time, immutable
    pub created_at: DateTime<Utc>,
    /// Optional deadline, enables the countdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Only meaningful with a due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_enabled: Option<bool>,
}

impl Task {
    pub fn new(
        list_id: &str,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        alarm_enabled: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            list_id: list_id.to_string(),
            text: text.trim().to_string(),
            completed: false,
            created_at,
            alarm_enabled: Some(alarm_enabled && due_date.is_some()),
            due_date,
        }
    }

    /// Whether the alarm is armed (requires a due date)
    pub fn alarm_on(&self) -> bool {
        self.due_date.is_some() && self.alarm_enabled.unwrap_or(false)
    }

    /// Flip completion and return the new value
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Merge a patch into this task.
    ///
    /// The alarm is forced off whenever the merged task has no due date,
    /// whatever the patch asked for.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            self.text = text.trim().to_string();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        match patch.due_date {
            DueDateChange::Keep => {}
            DueDateChange::Set(due) => self.due_date = Some(due),
            DueDateChange::Clear => self.due_date = None,
        }
        if let Some(alarm) = patch.alarm_enabled {
            self.alarm_enabled = Some(alarm);
        }
        if self.due_date.is_none() {
            self.alarm_enabled = Some(false);
        }
    }
}

/// How an update treats the due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueDateChange {
    #[default]
    Keep,
    Set(DateTime<Utc>),
    Clear,
}

/// Partial fields for `update_task`; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub due_date: DueDateChange,
    pub alarm_enabled: Option<bool>,
}

impl TaskPatch {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn due(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = DueDateChange::Set(due);
        self
    }

    pub fn clear_due(mut self) -> Self {
        self.due_date = DueDateChange::Clear;
        self
    }

    pub fn alarm(mut self, enabled: bool) -> Self {
        self.alarm_enabled = Some(enabled);
        self
    }
}
