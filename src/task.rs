// Task record for the task list

use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// Field order matches the persisted encoding: `id`, `title`, `done`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub done: bool,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Task {
    /// Create an open task with the given id and title
    ///
    /// The title is stored as given; callers trim and reject empty titles.
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done: false,
            created_at,
        }
    }

    /// Check that a record read from storage can be held by the store
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(eyre!("Task ID cannot be empty or whitespace-only"));
        }
        if self.title.trim().is_empty() {
            return Err(eyre!("Task {} has an empty title", self.id));
        }
        Ok(())
    }
}

/// Generate a fresh task id
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms() {
        let ts = now_ms();
        // Should be reasonable timestamp (after year 2020)
        assert!(ts > 1_600_000_000_000);
    }

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new("t1", "buy milk", 1000);
        assert_eq!(task.id, "t1");
        assert_eq!(task.title, "buy milk");
        assert!(!task.done);
        assert_eq!(task.created_at, 1000);
    }

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_task_serialization_field_names() {
        let task = Task::new("t1", "Buy Milk", 1700000000000);
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":"t1","title":"Buy Milk","done":false,"createdAt":1700000000000}"#
        );
    }

    #[test]
    fn test_validate() {
        assert!(Task::new("t1", "ok", 0).validate().is_ok());
        assert!(Task::new("t1", "   ", 0).validate().is_err());
        assert!(Task::new("", "title", 0).validate().is_err());
    }
}
