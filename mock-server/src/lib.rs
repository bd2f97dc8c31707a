//! In-memory implementation of the todo REST backend.
//!
//! Serves `/api/todos` with the same validation rules as the real backend:
//! ids are positive integers handed out in sequence, titles are trimmed and
//! must not be empty, and request bodies are decoded strictly.

pub mod config;
pub mod error;

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Method, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ServerError;

pub const SEED_TITLES: [&str; 3] = ["Buy milk", "Read docs", "Build TODO list UI"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Todos keyed by id, so listing is ordered by id.
#[derive(Debug)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            todos: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    pub fn seeded() -> Self {
        let mut store = Self::default();
        for title in SEED_TITLES {
            store.insert(title.to_string());
        }
        store
    }

    pub fn insert(&mut self, title: String) -> Todo {
        let todo = Todo {
            id: self.next_id,
            title,
            completed: false,
        };
        self.next_id += 1;
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    pub fn list(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Router with an empty store.
pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::default())))
}

pub fn router(db: Db) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, router(Arc::new(RwLock::new(store)))).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.list())
}

async fn create_todo(
    State(db): State<Db>,
    input: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ServerError> {
    let Json(input) = input.map_err(|_| ServerError::BadRequest("invalid request body"))?;
    let title = required_title(&input.title)?;
    let todo = db.write().await.insert(title);
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    input: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ServerError> {
    let id = parse_id(&id)?;
    let Json(input) = input.map_err(|_| ServerError::BadRequest("invalid request body"))?;
    if input.title.is_none() && input.completed.is_none() {
        return Err(ServerError::BadRequest("title or completed is required"));
    }
    let title = input.title.as_deref().map(required_title).transpose()?;

    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(ServerError::NotFound)?;
    if let Some(title) = title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = parse_id(&id)?;
    db.write()
        .await
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ServerError::NotFound)
}

fn required_title(raw: &str) -> Result<String, ServerError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ServerError::BadRequest("title is required"));
    }
    Ok(title.to_string())
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServerError::BadRequest("invalid todo id")),
    }
}
