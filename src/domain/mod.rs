pub mod list;
pub mod seed;
pub mod task;
pub mod views;

pub use list::TaskList;
pub use seed::{seed_lists, seed_tasks};
pub use task::{DueDateChange, Task, TaskPatch};
pub use views::{
    active_list, active_task_count, completion_percentage, filtered_tasks, list_summaries,
    remaining_time, resolve_selection, ListSummary, OVERDUE,
};
