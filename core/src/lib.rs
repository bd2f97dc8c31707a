//! API client and view-state controller for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. A `Transport` executes the round-trip, and
//! `TodoApi` joins the two into async CRUD calls. `TodoController` owns the
//! list shown to the user and reconciles it with server responses.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only a `BaseUrl` source that is
//!   resolved on every call.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the client is deterministic under test.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod state;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use client::TodoClient;
pub use config::{BaseUrl, BASE_URL_ENV};
pub use controller::TodoController;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{EditDraft, LoadPhase, ViewState};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, TodoItem, UpdateTodo};
