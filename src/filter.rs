// View derivation: completion filter plus title search

use crate::task::Task;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Selects tasks by completion status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Active, // not done
    Done,
}

impl FilterMode {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.done,
            FilterMode::Done => task.done,
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Active => write!(f, "active"),
            FilterMode::Done => write!(f, "done"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "active" => Ok(FilterMode::Active),
            "done" => Ok(FilterMode::Done),
            other => Err(eyre!("Unknown filter mode: {} (expected all, active or done)", other)),
        }
    }
}

/// Compute the visible subsequence of `tasks`
///
/// Filter and search compose by intersection. A query that is empty after
/// trimming matches everything; otherwise the lowercased query must appear in
/// the lowercased title. Order is preserved.
pub fn view<'a>(tasks: &'a [Task], mode: FilterMode, query: &str) -> Vec<&'a Task> {
    let needle = if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    };

    tasks
        .iter()
        .filter(|task| mode.matches(task))
        .filter(|task| match &needle {
            Some(q) => task.title.to_lowercase().contains(q.as_str()),
            None => true,
        })
        .collect()
}
