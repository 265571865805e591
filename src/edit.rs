// Edit mode: at most one task's title is being revised at a time

/// Editing state of the task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        id: String,
        draft: String,
    },
}

impl EditState {
    /// Start editing `id` with `title` as the draft
    ///
    /// Replaces any edit already in progress; the previous draft is discarded.
    pub fn begin(&mut self, id: impl Into<String>, title: impl Into<String>) {
        *self = EditState::Editing {
            id: id.into(),
            draft: title.into(),
        };
    }

    /// Replace the draft of the edit in progress. No-op when idle.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditState::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    pub fn cancel(&mut self) {
        *self = EditState::Idle;
    }

    /// Leave edit mode, returning the `(id, draft)` that was being edited
    pub fn take(&mut self) -> Option<(String, String)> {
        match std::mem::take(self) {
            EditState::Editing { id, draft } => Some((id, draft)),
            EditState::Idle => None,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditState::Editing { id, .. } => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditState::Idle)
    }
}
