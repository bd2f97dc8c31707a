//! Async todo API: `TodoClient` plus a `Transport`.
//!
//! Each operation builds exactly one request, executes it once and parses
//! the result. When the base URL is missing the build step fails and the
//! transport is never called.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreateTodo, TodoItem, UpdateTodo};

#[derive(Debug, Clone)]
pub struct TodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub async fn list_todos(&self) -> Result<Vec<TodoItem>, ApiError> {
        let request = self.client.build_list_todos()?;
        let response = self.transport.execute(request).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn create_todo(&self, input: &CreateTodo) -> Result<TodoItem, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    pub async fn update_todo(&self, id: i64, input: &UpdateTodo) -> Result<TodoItem, ApiError> {
        let request = self.client.build_update_todo(id, input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_todo(response)
    }
}
