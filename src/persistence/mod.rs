pub mod files;
pub mod migration;
pub mod repository;
pub mod store;

pub use files::{atomic_write, ensure_dir, find_local_data_dir, get_data_dir, init_data_dir, init_local_data_dir, read_file};
pub use migration::{migrate_tasks, StoredTask};
pub use repository::{
    load, save, Snapshot, CURRENT_USER_KEY, LISTS_KEY, SELECTED_LIST_KEY, TASKS_KEY, USERS_KEY,
};
pub use store::{FileStore, MemoryStore, Store, StoreError};
