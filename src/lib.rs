//! TaskFlow: lists and tasks with write-through key/value persistence.
//!
//! `persistence` hydrates and saves state through an injected [`Store`],
//! `app::TaskFlow` is the mutation API, `domain::views` the derived views.

pub mod ai;
pub mod app;
pub mod config;
pub mod domain;
pub mod logging;
pub mod persistence;
pub mod ticker;

pub use app::{MutationError, TaskFlow};
pub use domain::{Task, TaskList, TaskPatch};
pub use persistence::{FileStore, MemoryStore, Store};
