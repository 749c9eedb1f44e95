use crate::domain::{remaining_time, Task};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Due-date countdowns are re-evaluated on this interval
pub const COUNTDOWN_INTERVAL_SECS: u64 = 60;

/// Get countdown refresh interval
pub fn countdown_interval() -> Duration {
    Duration::from_secs(COUNTDOWN_INTERVAL_SECS)
}

/// Cached "time left" labels, refreshed by polling rather than on every change
///
/// Wall-clock time is not an observable state change, so the caller's loop
/// asks `refresh` on each pass and the labels are recomputed at most once per
/// interval.
#[derive(Debug, Clone)]
pub struct Countdown {
    interval: chrono::Duration,
    last_refresh: Option<DateTime<Utc>>,
    labels: HashMap<String, String>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self::with_interval(countdown_interval())
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval: chrono::Duration::from_std(interval)
                .unwrap_or_else(|_| chrono::Duration::seconds(COUNTDOWN_INTERVAL_SECS as i64)),
            last_refresh: None,
            labels: HashMap::new(),
        }
    }

    /// Whether the interval has elapsed since the last refresh, or the
    /// clock stepped back behind it
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_refresh {
            Some(last) => {
                let elapsed = now - last;
                elapsed < chrono::Duration::zero() || elapsed >= self.interval
            }
            None => true,
        }
    }

    /// Recompute labels if due; returns whether anything was recomputed
    pub fn refresh<'a>(
        &mut self,
        tasks: impl IntoIterator<Item = &'a Task>,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.force_refresh(tasks, now);
        true
    }

    /// Recompute labels now (after a mutation changed due dates)
    pub fn force_refresh<'a>(&mut self, tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) {
        self.labels = tasks
            .into_iter()
            .filter_map(|task| remaining_time(task, now).map(|label| (task.id.clone(), label)))
            .collect();
        self.last_refresh = Some(now);
    }

    pub fn label(&self, task_id: &str) -> Option<&str> {
        self.labels.get(task_id).map(String::as_str)
    }
}
