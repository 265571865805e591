// Task list state container with save-after-mutate persistence

use crate::edit::EditState;
use crate::filter::{self, FilterMode};
use crate::storage::{self, DEFAULT_KEY, MemoryStorage, Storage};
use crate::task::{Task, new_id, now_ms};
use tracing::{debug, info, warn};

/// Owns the task list (newest first) and the edit state
///
/// Every operation that changes the list writes the full list back to the
/// storage backend. Write failures are logged and otherwise ignored; the
/// in-memory list stays authoritative.
pub struct TaskStore<S: Storage> {
    tasks: Vec<Task>,
    edit: EditState,
    storage: S,
    key: String,
}

impl TaskStore<MemoryStorage> {
    /// Create an empty store that persists to memory only
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new(), DEFAULT_KEY)
    }
}

impl<S: Storage> TaskStore<S> {
    /// Open a store, loading whatever task list is held under `key`
    ///
    /// A missing or unreadable value yields an empty list.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = storage::load_tasks(&storage, &key);

        Self {
            tasks,
            edit: EditState::Idle,
            storage,
            key,
        }
    }

    /// All tasks, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn editing(&self) -> &EditState {
        &self.edit
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a task titled with the trimmed `raw_title` at the front of the list
    ///
    /// Returns `None` without touching the list when the title is blank.
    pub fn add(&mut self, raw_title: &str) -> Option<&Task> {
        let title = raw_title.trim();
        if title.is_empty() {
            debug!("add: blank title ignored");
            return None;
        }

        let mut id = new_id();
        while self.position(&id).is_some() {
            id = new_id();
        }

        debug!(id = %id, "add: created task");
        self.tasks.insert(0, Task::new(id, title, now_ms()));
        self.persist();
        self.tasks.first()
    }

    /// Flip the completion flag. Returns false if no task has this id.
    pub fn toggle_done(&mut self, id: &str) -> bool {
        let Some(i) = self.position(id) else {
            debug!(id, "toggle_done: unknown id");
            return false;
        };

        self.tasks[i].done = !self.tasks[i].done;
        self.persist();
        true
    }

    /// Delete a task. Returns false if no task has this id.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(i) = self.position(id) else {
            debug!(id, "remove: unknown id");
            return false;
        };

        self.tasks.remove(i);
        if self.edit.is_editing(id) {
            self.edit.cancel();
        }
        self.persist();
        true
    }

    /// Enter edit mode for `id`, with its current title as the draft
    ///
    /// An edit already in progress on another task is cancelled.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(title) = self.get(id).map(|t| t.title.clone()) else {
            debug!(id, "begin_edit: unknown id");
            return false;
        };

        if let Some(previous) = self.edit.editing_id() {
            if previous != id {
                debug!(previous, id, "begin_edit: switching edit target");
            }
        }
        self.edit.begin(id, title);
        true
    }

    /// Replace the draft of the edit in progress
    pub fn update_draft(&mut self, text: &str) {
        self.edit.set_draft(text);
    }

    /// Save `draft` as the title of `id` and leave edit mode
    ///
    /// A blank draft deletes the task. Edit mode is left even when no task
    /// has this id; returns false in that case.
    pub fn commit_edit(&mut self, id: &str, draft: &str) -> bool {
        self.edit.cancel();

        if self.position(id).is_none() {
            debug!(id, "commit_edit: unknown id");
            return false;
        }
        self.apply_edit(id, draft);
        true
    }

    /// Commit the held draft of the task being edited
    pub fn commit_draft(&mut self) -> bool {
        match self.edit.take() {
            Some((id, draft)) => {
                self.apply_edit(&id, &draft);
                true
            }
            None => false,
        }
    }

    /// Leave edit mode without changing anything
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Delete every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        let removed = before - self.tasks.len();

        if removed > 0 {
            let orphaned = self.edit.editing_id().is_some_and(|id| self.position(id).is_none());
            if orphaned {
                self.edit.cancel();
            }
            info!(removed, "Cleared completed tasks");
            self.persist();
        }

        removed
    }

    /// Set the completion flag on every task
    pub fn set_all_done(&mut self, value: bool) {
        let changed = self.tasks.iter().any(|t| t.done != value);
        for task in &mut self.tasks {
            task.done = value;
        }

        if changed {
            self.persist();
        }
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Tasks matching `mode` whose titles contain `query`, in list order
    pub fn view(&self, mode: FilterMode, query: &str) -> Vec<&Task> {
        filter::view(&self.tasks, mode, query)
    }

    /// Number of tasks not yet done
    pub fn count_active(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn apply_edit(&mut self, id: &str, draft: &str) {
        let title = draft.trim();
        if title.is_empty() {
            debug!(id, "commit_edit: blank title, deleting task");
            self.remove(id);
            return;
        }

        let Some(i) = self.position(id) else {
            return;
        };
        if self.tasks[i].title != title {
            self.tasks[i].title = title.to_string();
            self.persist();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = storage::save_tasks(&mut self.storage, &self.key, &self.tasks) {
            warn!(key = %self.key, error = ?e, "Failed to save tasks, keeping in-memory state");
        }
    }
}
