// Key-value persistence for the task list

use crate::task::{Task, now_ms};
use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key the task list is stored under unless configured otherwise
pub const DEFAULT_KEY: &str = "todo.tasks.v1";

/// A key-value byte store
pub trait Storage {
    /// Read the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, overwriting any prior value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile storage backed by a map
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Durable storage in a single SQLite table
pub struct SqliteStorage {
    path: PathBuf,
    db: Connection,
}

impl SqliteStorage {
    /// Open or create a database file at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create storage directory")?;
            }
        }

        let db = Connection::open(&path).context("Failed to open SQLite database")?;
        let storage = Self { path, db };
        storage.create_schema()?;

        info!(path = ?storage.path, "Opened task storage");
        Ok(storage)
    }

    /// Get the path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating storage schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .db
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()
            .context("Failed to read key from storage")?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.db
            .execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, now_ms()],
            )
            .context("Failed to write key to storage")?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.db
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .context("Failed to delete key from storage")?;

        Ok(())
    }
}

/// Serialize a task list as a JSON array
pub fn encode_tasks(tasks: &[Task]) -> Result<Vec<u8>> {
    serde_json::to_vec(tasks).context("Failed to serialize tasks")
}

/// Parse a JSON array of tasks
pub fn decode_tasks(bytes: &[u8]) -> Result<Vec<Task>> {
    serde_json::from_slice(bytes).context("Failed to parse stored tasks")
}

/// Load the task list stored under `key`
///
/// Never fails: an absent key, a read error or unparseable bytes all yield an
/// empty list. Records with an empty title and repeated ids are dropped.
pub fn load_tasks<S: Storage + ?Sized>(storage: &S, key: &str) -> Vec<Task> {
    let bytes = match storage.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!(key, "No stored tasks, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = ?e, "Failed to read stored tasks, starting empty");
            return Vec::new();
        }
    };

    let decoded = match decode_tasks(&bytes) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(key, error = ?e, "Stored tasks are malformed, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(decoded.len());
    for task in decoded {
        if let Err(e) = task.validate() {
            warn!(key, error = %e, "Dropping invalid task");
            continue;
        }
        if !seen.insert(task.id.clone()) {
            warn!(key, id = %task.id, "Dropping task with duplicate id");
            continue;
        }
        tasks.push(task);
    }

    info!(key, count = tasks.len(), "Loaded tasks");
    tasks
}

/// Overwrite the value under `key` with the full task list
pub fn save_tasks<S: Storage + ?Sized>(storage: &mut S, key: &str, tasks: &[Task]) -> Result<()> {
    let bytes = encode_tasks(tasks)?;
    storage.set(key, &bytes)?;
    debug!(key, count = tasks.len(), "Saved tasks");
    Ok(())
}
