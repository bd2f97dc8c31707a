//! The view state owned by `TodoController`.
//!
//! Read access is public; every write goes through the controller so the
//! list and both error slots have a single writer.

use crate::types::TodoItem;

/// Progress of the initial (or an explicitly requested) list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded,
    LoadFailed,
}

/// Draft title for the one item currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i64,
    pub title: String,
}

/// Snapshot of everything a front-end needs to draw the todo list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub(crate) items: Vec<TodoItem>,
    pub(crate) phase: LoadPhase,
    pub(crate) load_error: Option<String>,
    pub(crate) mutation_error: Option<String>,
    pub(crate) new_title: String,
    pub(crate) editing: Option<EditDraft>,
}

impl ViewState {
    /// Items in server order, with locally created ones appended.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn item(&self, id: i64) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn load_phase(&self) -> LoadPhase {
        self.phase
    }

    /// True only while a list request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    /// Current text of the create form.
    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.id == id)
    }

    /// Swap in the server's copy of `id`, keeping its position.
    pub(crate) fn replace_item(&mut self, id: i64, updated: TodoItem) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id == id) {
            *slot = updated;
        }
    }

    pub(crate) fn remove_item(&mut self, id: i64) {
        self.items.retain(|item| item.id != id);
    }
}
