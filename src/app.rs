use crate::domain::{self, Task, TaskList, TaskPatch};
use crate::persistence::{self, Snapshot, Store, StoreError};
use chrono::{DateTime, Utc};
use log::{debug, info};
use thiserror::Error;

/// Why a mutation was refused or could not be persisted
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("List name cannot be empty")]
    EmptyListName,

    #[error("Task text cannot be empty")]
    EmptyTaskText,

    #[error("You cannot delete the last list")]
    LastList,

    #[error("Select a list before adding tasks")]
    NoListSelected,

    #[error("No list with id `{0}`")]
    ListNotFound(String),

    #[error("No task with id `{0}`")]
    TaskNotFound(String),

    /// The in-memory change was applied but the write-through failed
    #[error("Could not save changes: {0}")]
    Persist(#[from] StoreError),
}

impl MutationError {
    /// Validation failures are user-facing warnings; state is unchanged
    pub fn is_warning(&self) -> bool {
        !matches!(self, MutationError::Persist(_))
    }
}

/// Main application state: lists, tasks and the selected list
///
/// Owns the store it was loaded from. Every successful mutation writes the
/// whole state back before returning.
pub struct TaskFlow<S: Store> {
    store: S,
    lists: Vec<TaskList>,
    tasks: Vec<Task>,
    selected_list_id: Option<String>,
}

impl<S: Store> TaskFlow<S> {
    /// Hydrate from `store`
    pub fn load(store: S) -> Self {
        Self::load_at(store, Utc::now())
    }

    /// Hydrate from `store`, stamping legacy tasks with `now`
    pub fn load_at(store: S, now: DateTime<Utc>) -> Self {
        let snapshot = persistence::load(&store, now);
        let mut app = Self {
            store,
            lists: Vec::new(),
            tasks: Vec::new(),
            selected_list_id: None,
        };
        app.replace(snapshot);
        app
    }

    /// Replace all state with what is currently stored
    pub fn reload(&mut self) {
        let snapshot = persistence::load(&self.store, Utc::now());
        self.replace(snapshot);
    }

    fn replace(&mut self, snapshot: Snapshot) {
        self.lists = snapshot.lists;
        self.tasks = snapshot.tasks;
        self.selected_list_id = snapshot.selected_list_id;
    }

    /// Write lists, tasks and selection through to the store
    pub fn save(&mut self) -> Result<(), MutationError> {
        persistence::save(
            &mut self.store,
            &self.lists,
            &self.tasks,
            self.selected_list_id.as_deref(),
        )?;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lists: self.lists.clone(),
            tasks: self.tasks.clone(),
            selected_list_id: self.selected_list_id.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected_list_id(&self) -> Option<&str> {
        self.selected_list_id.as_deref()
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // Derived views over the current state

    pub fn active_list(&self) -> Option<&TaskList> {
        domain::active_list(&self.lists, self.selected_list_id())
    }

    /// Tasks of the selected list
    pub fn visible_tasks(&self) -> Vec<&Task> {
        domain::filtered_tasks(&self.tasks, self.selected_list_id())
    }

    pub fn active_task_count(&self) -> usize {
        domain::active_task_count(&self.visible_tasks())
    }

    pub fn completion_percentage(&self) -> u32 {
        domain::completion_percentage(&self.visible_tasks())
    }

    // Mutations

    /// Create a list and select it; returns the new id
    pub fn add_list(&mut self, name: &str) -> Result<String, MutationError> {
        if name.trim().is_empty() {
            return Err(MutationError::EmptyListName);
        }

        let list = TaskList::new(name);
        let id = list.id.clone();
        info!("Adding list {} ({})", list.name, id);
        self.lists.push(list);
        self.selected_list_id = Some(id.clone());

        self.save()?;
        Ok(id)
    }

    pub fn rename_list(&mut self, id: &str, name: &str) -> Result<(), MutationError> {
        if name.trim().is_empty() {
            return Err(MutationError::EmptyListName);
        }
        let list = self
            .lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MutationError::ListNotFound(id.to_string()))?;

        list.name = name.trim().to_string();
        self.save()
    }

    /// Delete a list and every task it owns.
    ///
    /// Refused when it is the last list. Moves the selection to the first
    /// remaining list when the deleted one was selected.
    pub fn delete_list(&mut self, id: &str) -> Result<(), MutationError> {
        if self.lists.len() <= 1 {
            return Err(MutationError::LastList);
        }
        let index = self
            .lists
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| MutationError::ListNotFound(id.to_string()))?;

        self.lists.remove(index);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.list_id != id);
        info!(
            "Deleted list {} and {} task(s)",
            id,
            before - self.tasks.len()
        );

        if self.selected_list_id.as_deref() == Some(id) {
            self.selected_list_id = self.lists.first().map(|l| l.id.clone());
        }

        self.save()
    }

    pub fn select_list(&mut self, id: &str) -> Result<(), MutationError> {
        if !self.lists.iter().any(|l| l.id == id) {
            return Err(MutationError::ListNotFound(id.to_string()));
        }
        self.selected_list_id = Some(id.to_string());
        self.save()
    }

    /// Add a task to the selected list; returns the new id.
    ///
    /// The alarm is kept only when a due date is given.
    pub fn add_task(
        &mut self,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        alarm_enabled: bool,
    ) -> Result<String, MutationError> {
        if text.trim().is_empty() {
            return Err(MutationError::EmptyTaskText);
        }
        let list_id = self
            .active_list()
            .map(|l| l.id.clone())
            .ok_or(MutationError::NoListSelected)?;

        let task = Task::new(&list_id, text, due_date, alarm_enabled, Utc::now());
        let id = task.id.clone();
        debug!("Adding task {} to list {}", id, list_id);
        self.tasks.push(task);

        self.save()?;
        Ok(id)
    }

    /// Flip completion; returns the new value (true when just completed)
    pub fn toggle_task(&mut self, id: &str) -> Result<bool, MutationError> {
        let task = self.task_mut(id)?;
        let completed = task.toggle();
        self.save()?;
        Ok(completed)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<(), MutationError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| MutationError::TaskNotFound(id.to_string()))?;

        self.tasks.remove(index);
        self.save()
    }

    /// Merge `patch` into a task. Without a due date the alarm ends up off.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<(), MutationError> {
        if matches!(&patch.text, Some(text) if text.trim().is_empty()) {
            return Err(MutationError::EmptyTaskText);
        }

        let task = self.task_mut(id)?;
        task.apply(patch);
        self.save()
    }

    /// Remove completed tasks from the selected list; returns how many went
    pub fn clear_completed(&mut self) -> Result<usize, MutationError> {
        let list_id = self
            .selected_list_id
            .clone()
            .ok_or(MutationError::NoListSelected)?;

        let before = self.tasks.len();
        self.tasks.retain(|t| !(t.list_id == list_id && t.completed));
        let removed = before - self.tasks.len();

        self.save()?;
        Ok(removed)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task, MutationError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| MutationError::TaskNotFound(id.to_string()))
    }
}
