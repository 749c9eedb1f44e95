use super::migration::{migrate_tasks, StoredTask};
use super::store::{Store, StoreError};
use crate::domain::{resolve_selection, seed_lists, seed_tasks, Task, TaskList};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const LISTS_KEY: &str = "taskmaster-lists";
pub const TASKS_KEY: &str = "taskmaster-tasks";
pub const SELECTED_LIST_KEY: &str = "taskmaster-selectedListId";
/// Reserved for account records; never read or written here
pub const USERS_KEY: &str = "taskmaster-users";
/// Reserved for the signed-in account; never read or written here
pub const CURRENT_USER_KEY: &str = "taskmaster-currentUser";

/// Everything the repository persists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lists: Vec<TaskList>,
    pub tasks: Vec<Task>,
    pub selected_list_id: Option<String>,
}

impl Snapshot {
    /// The built-in starting data
    pub fn seed() -> Self {
        let lists = seed_lists();
        let selected_list_id = resolve_selection(&lists, None);
        Self {
            lists,
            tasks: seed_tasks(),
            selected_list_id,
        }
    }
}

enum Stored<T> {
    Missing,
    Corrupt,
    Parsed(T),
}

fn read_json<T, S>(store: &S, key: &str) -> Stored<T>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Stored::Missing,
        Err(e) => {
            warn!("Could not read `{}`, treating it as missing: {}", key, e);
            return Stored::Missing;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Stored::Parsed(value),
        Err(e) => {
            warn!("Stored `{}` is not valid, ignoring it: {}", key, e);
            Stored::Corrupt
        }
    }
}

/// Hydrate state from the store.
///
/// Never fails: missing or corrupt lists or tasks are replaced by the seed
/// dataset, an unreadable selection by the first list. Tasks lacking
/// `createdAt` are stamped with `now`.
pub fn load<S: Store + ?Sized>(store: &S, now: DateTime<Utc>) -> Snapshot {
    let lists = match read_json::<Vec<TaskList>, _>(store, LISTS_KEY) {
        Stored::Parsed(lists) if !lists.is_empty() => lists,
        Stored::Parsed(_) => {
            warn!("Stored lists are empty, using seed lists");
            seed_lists()
        }
        Stored::Corrupt => seed_lists(),
        Stored::Missing => {
            info!("No stored lists, using seed lists");
            seed_lists()
        }
    };

    let tasks = match read_json::<Vec<StoredTask>, _>(store, TASKS_KEY) {
        Stored::Parsed(records) => {
            let (tasks, migrated) = migrate_tasks(records, now);
            if migrated > 0 {
                info!("Back-filled createdAt on {} legacy task(s)", migrated);
            }
            tasks
        }
        Stored::Corrupt => seed_tasks_for(&lists),
        Stored::Missing => {
            info!("No stored tasks, using seed tasks");
            seed_tasks_for(&lists)
        }
    };

    let stored_selection = match read_json::<String, _>(store, SELECTED_LIST_KEY) {
        Stored::Parsed(id) => Some(id),
        Stored::Missing | Stored::Corrupt => None,
    };
    let selected_list_id = resolve_selection(&lists, stored_selection.as_deref());

    debug!(
        "Loaded {} list(s), {} task(s), selected {:?}",
        lists.len(),
        tasks.len(),
        selected_list_id
    );

    Snapshot {
        lists,
        tasks,
        selected_list_id,
    }
}

/// Seed tasks whose list exists; stored user lists never gain orphans
fn seed_tasks_for(lists: &[TaskList]) -> Vec<Task> {
    seed_tasks()
        .into_iter()
        .filter(|task| lists.iter().any(|l| l.id == task.list_id))
        .collect()
}

fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Write lists, tasks and selection back, unconditionally
pub fn save<S: Store + ?Sized>(
    store: &mut S,
    lists: &[TaskList],
    tasks: &[Task],
    selected_list_id: Option<&str>,
) -> Result<(), StoreError> {
    write_json(store, LISTS_KEY, lists)?;
    write_json(store, TASKS_KEY, tasks)?;
    match selected_list_id {
        Some(id) => write_json(store, SELECTED_LIST_KEY, id)?,
        None => store.remove(SELECTED_LIST_KEY)?,
    }

    debug!("Saved {} list(s), {} task(s)", lists.len(), tasks.len());
    Ok(())
}
