use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use std::io;
use std::path::PathBuf;
use taskflow::domain::{completion_percentage, filtered_tasks};
use taskflow::persistence::{load, save, StoreError, LISTS_KEY, SELECTED_LIST_KEY, TASKS_KEY};
use taskflow::{FileStore, MemoryStore, MutationError, Store, TaskFlow, TaskList, TaskPatch};

/// Wraps a memory store and fails reads or writes on demand
#[derive(Default)]
struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStore {
    fn io_error(key: &str) -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, format!("{} is locked", key))
    }
}

impl Store for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read {
                path: PathBuf::from(key),
                source: Self::io_error(key),
            });
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write {
                path: PathBuf::from(key),
                source: Self::io_error(key),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

fn seeded() -> TaskFlow<MemoryStore> {
    TaskFlow::load(MemoryStore::new())
}

#[test]
fn add_list_grows_by_one_and_selects_it() {
    for name in ["Work", "  Side project ", "x", "Ünïcödé"] {
        let mut app = seeded();
        let before = app.lists().len();

        let id = app.add_list(name).unwrap();
        assert_eq!(app.lists().len(), before + 1);
        assert_eq!(app.selected_list_id(), Some(id.as_str()));
        assert_eq!(app.active_list().unwrap().name, name.trim());
    }
}

#[test]
fn deleting_the_sole_list_changes_nothing() {
    let mut store = MemoryStore::new();
    let lists = vec![TaskList::with_id("only", "Only")];
    save(&mut store, &lists, &[], Some("only")).unwrap();

    let mut app = TaskFlow::load(store);
    app.add_task("Keep me", None, false).unwrap();

    let err = app.delete_list("only").unwrap_err();
    assert!(matches!(err, MutationError::LastList));
    assert_eq!(app.lists().len(), 1);
    assert_eq!(app.tasks().len(), 1);
}

#[test]
fn deleting_a_list_removes_exactly_its_tasks() {
    for doomed in ["1", "2", "3", "4"] {
        let mut app = seeded();
        let survivors: Vec<String> = app
            .tasks()
            .iter()
            .filter(|t| t.list_id != doomed)
            .map(|t| t.id.clone())
            .collect();

        app.delete_list(doomed).unwrap();
        let remaining: Vec<String> = app.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(remaining, survivors);
    }
}

#[test]
fn toggle_is_self_inverse() {
    let mut app = seeded();
    let ids: Vec<String> = app.tasks().iter().map(|t| t.id.clone()).collect();

    for id in ids {
        let original = app.find_task(&id).unwrap().completed;
        app.toggle_task(&id).unwrap();
        app.toggle_task(&id).unwrap();
        assert_eq!(app.find_task(&id).unwrap().completed, original);
    }
}

#[test]
fn clearing_due_date_always_disables_alarm() {
    let mut app = seeded();
    let due = Utc::now() + Duration::hours(6);
    let with_alarm = app.add_task("Call plumber", Some(due), true).unwrap();
    let without_alarm = app.add_task("Water plants", Some(due), false).unwrap();

    for id in [with_alarm, without_alarm, "t2".to_string()] {
        app.update_task(&id, TaskPatch::default().clear_due()).unwrap();
        assert_eq!(app.find_task(&id).unwrap().alarm_enabled, Some(false));

        app.update_task(&id, TaskPatch::default().alarm(true)).unwrap();
        assert_eq!(app.find_task(&id).unwrap().alarm_enabled, Some(false));
    }
}

#[test]
fn completion_percentage_edges() {
    let mut app = seeded();
    app.add_list("Empty").unwrap();
    assert_eq!(app.completion_percentage(), 0);

    app.select_list("2").unwrap();
    for id in ["t4", "t5", "t6"] {
        app.toggle_task(id).unwrap();
    }
    assert_eq!(app.completion_percentage(), 100);
}

#[test]
fn save_then_load_round_trips() {
    let now = Utc::now();
    let mut app = seeded();
    app.add_list("Trips").unwrap();
    app.add_task("Book hotel", Some(now + Duration::days(7)), true)
        .unwrap();
    app.toggle_task("t2").unwrap();
    let expected = app.snapshot();

    let store = app.into_store();
    let loaded = load(&store, now);
    assert_eq!(loaded.lists, expected.lists);
    assert_eq!(loaded.tasks, expected.tasks);
    assert_eq!(loaded.selected_list_id, expected.selected_list_id);
}

#[test]
fn state_survives_restart_on_disk() {
    let temp_dir = tempfile::tempdir().unwrap();

    let id = {
        let mut app = TaskFlow::load(FileStore::open(temp_dir.path()).unwrap());
        app.select_list("4").unwrap();
        app.add_task("Call grandma", None, false).unwrap()
    };

    let app = TaskFlow::load(FileStore::open(temp_dir.path()).unwrap());
    assert_eq!(app.selected_list_id(), Some("4"));
    assert_eq!(app.find_task(&id).unwrap().list_id, "4");
    assert_eq!(app.tasks().len(), 11);
}

#[test]
fn seed_my_day_is_one_third_done() {
    let app = seeded();
    let list = app.active_list().unwrap();
    assert_eq!(list.id, "1");
    assert_eq!(list.name, "My Day");

    let my_day = filtered_tasks(app.tasks(), Some("1"));
    assert_eq!(my_day.len(), 3);
    assert_eq!(my_day.iter().filter(|t| t.completed).count(), 1);
    assert_eq!(completion_percentage(&my_day), 33);
}

#[test]
fn add_task_without_due_date() {
    let mut app = seeded();
    let id = app.add_task("Buy milk", None, false).unwrap();

    let task = app.find_task(&id).unwrap();
    assert!(!task.completed);
    assert!(!task.alarm_enabled.unwrap_or(false));
    assert_eq!(task.list_id, "1");
    assert_eq!(task.text, "Buy milk");
}

#[test]
fn legacy_task_gets_load_timestamp() {
    let now = Utc::now();
    let mut store = MemoryStore::new();
    store
        .set(LISTS_KEY, r#"[{"id":"1","name":"My Day"}]"#)
        .unwrap();
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"legacy","listId":"1","text":"Old habit","completed":true,"dueDate":"2030-01-01T08:00:00Z","alarmEnabled":true}]"#,
        )
        .unwrap();
    store.set(SELECTED_LIST_KEY, r#""1""#).unwrap();

    let app = TaskFlow::load_at(store, now);
    let task = app.find_task("legacy").unwrap();
    assert_eq!(task.created_at, now);
    assert_eq!(task.text, "Old habit");
    assert!(task.completed);
    assert!(task.alarm_on());
    assert_eq!(task.due_date.unwrap().to_rfc3339(), "2030-01-01T08:00:00+00:00");
}

#[test]
fn corrupt_storage_never_fails_load() {
    let mut store = MemoryStore::new();
    store.set(LISTS_KEY, "not json at all").unwrap();
    store.set(TASKS_KEY, "{\"oops\": true}").unwrap();
    store.set(SELECTED_LIST_KEY, "[]").unwrap();

    let app = TaskFlow::load(store);
    assert_eq!(app.lists().len(), 4);
    assert_eq!(app.tasks().len(), 10);
    assert_eq!(app.selected_list_id(), Some("1"));
}

#[test]
fn rejected_mutations_leave_storage_untouched() {
    let mut app = seeded();
    assert!(app.add_list("").is_err());
    assert!(app.add_task("", None, false).is_err());
    assert!(app.delete_task("missing").is_err());
    assert!(app.store().is_empty());
}

#[test]
fn unreadable_storage_loads_seed_data() {
    let mut store = FailingStore::default();
    store
        .inner
        .set(LISTS_KEY, r#"[{"id":"mine","name":"Mine"}]"#)
        .unwrap();
    store.fail_reads = true;

    let app = TaskFlow::load(store);
    assert_eq!(app.lists().len(), 4);
    assert_eq!(app.tasks().len(), 10);
    assert_eq!(app.selected_list_id(), Some("1"));
}

#[test]
fn failed_write_keeps_change_and_is_not_a_warning() {
    let store = FailingStore {
        fail_writes: true,
        ..FailingStore::default()
    };
    let mut app = TaskFlow::load(store);

    let err = app.add_list("Unsaved").unwrap_err();
    assert!(matches!(err, MutationError::Persist(_)));
    assert!(!err.is_warning());
    assert_eq!(app.lists().len(), 5);
    assert_eq!(app.active_list().unwrap().name, "Unsaved");
    assert!(app.store().inner.is_empty());
}
