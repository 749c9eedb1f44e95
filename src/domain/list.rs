use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named list that owns tasks by reference (`Task::list_id`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Opaque identifier, immutable after creation
    pub id: String,
    /// Display label, never empty
    pub name: String,
}

impl TaskList {
    /// Create a list with a fresh id. The caller validates `name`.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
        }
    }

    /// Build a list with a known id (seed data, tests)
    pub fn with_id(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_trims_name() {
        let list = TaskList::new("  Groceries  ");
        assert_eq!(list.name, "Groceries");
        assert!(!list.id.is_empty());
    }

    #[test]
    fn test_new_lists_get_distinct_ids() {
        let a = TaskList::new("A");
        let b = TaskList::new("A");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_list_json_shape() {
        let list = TaskList::with_id("1", "My Day");
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"My Day"}"#);
    }
}
