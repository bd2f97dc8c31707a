//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a [`BaseUrl`] source and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The base URL is resolved inside every `build_*`, so an
//! unconfigured client fails before a request exists.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BaseUrl;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, TodoItem, UpdateTodo};

const TODOS_PATH: &str = "/api/todos";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: BaseUrl,
}

impl TodoClient {
    pub fn new(base_url: impl Into<BaseUrl>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client that reads `TODO_API_BASE_URL` on every call.
    pub fn from_env() -> Self {
        Self::new(BaseUrl::from_env())
    }

    pub fn build_list_todos(&self) -> Result<HttpRequest, ApiError> {
        let url = self.collection_url()?;
        Ok(bodyless(HttpMethod::Get, url))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let url = self.collection_url()?;
        with_json_body(HttpMethod::Post, url, input)
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let url = self.item_url(id)?;
        with_json_body(HttpMethod::Patch, url, input)
    }

    pub fn build_delete_todo(&self, id: i64) -> Result<HttpRequest, ApiError> {
        let url = self.item_url(id)?;
        Ok(bodyless(HttpMethod::Delete, url))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> Result<String, ApiError> {
        Ok(format!("{}{TODOS_PATH}", self.base_url.resolve()?))
    }

    fn item_url(&self, id: i64) -> Result<String, ApiError> {
        Ok(format!("{}{TODOS_PATH}/{id}", self.base_url.resolve()?))
    }
}

fn bodyless(method: HttpMethod, url: String) -> HttpRequest {
    tracing::debug!(%method, %url, "built request");
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json_body<T: Serialize>(
    method: HttpMethod,
    url: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    tracing::debug!(%method, %url, "built request");
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Any 2xx is success; everything else becomes `ApiError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
