//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! from the mock-server crate. Integration tests catch any schema drift
//! between the two.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API. The `id` is assigned by the server
/// and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

/// Partial update for an existing todo. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Patch that only renames the item.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    /// Patch that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}
