//! View-state controller: owns the displayed list and drives it from user
//! actions through the todo API.
//!
//! # Design
//! Every operation takes `&mut self`, so one action's outcome is applied in
//! full before the next action can start. Each action issues at most one
//! request. The local list only ever receives server-confirmed objects; a
//! failed request leaves it untouched and sets one of the two error slots.
//! `ApiError`s stop here: they are logged and turned into slot messages.
//!
//! Observers either borrow the state with [`TodoController::state`] or take
//! a [`watch`] receiver from [`TodoController::subscribe`], which gets a new
//! snapshot after every change.

use tokio::sync::watch;

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::state::{EditDraft, LoadPhase, ViewState};
use crate::transport::Transport;
use crate::types::{CreateTodo, UpdateTodo};

pub const LOAD_FAILED: &str = "Failed to load todos";
pub const TITLE_REQUIRED: &str = "Please enter a todo title";
pub const CREATE_FAILED: &str = "Failed to add todo";
pub const UPDATE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";

pub struct TodoController<T> {
    api: TodoApi<T>,
    state: ViewState,
    publisher: watch::Sender<ViewState>,
}

impl<T: Transport> TodoController<T> {
    /// Controller in the `Loading` phase. Call [`load`](Self::load) to fetch.
    pub fn new(api: TodoApi<T>) -> Self {
        let state = ViewState::default();
        let (publisher, _) = watch::channel(state.clone());
        Self {
            api,
            state,
            publisher,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.publisher.subscribe()
    }

    pub fn api(&self) -> &TodoApi<T> {
        &self.api
    }

    /// Fetch the full list. Also used for an explicit reload.
    pub async fn load(&mut self) {
        self.state.phase = LoadPhase::Loading;
        self.publish();

        match self.api.list_todos().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "loaded todos");
                self.state.items = items;
                self.state.load_error = None;
                self.state.phase = LoadPhase::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load todos");
                self.state.items.clear();
                self.state.load_error = Some(LOAD_FAILED.to_string());
                self.state.phase = LoadPhase::LoadFailed;
            }
        }
        // A draft may only point at a displayed item.
        let stale = self
            .state
            .editing
            .as_ref()
            .is_some_and(|draft| self.state.item(draft.id).is_none());
        if stale {
            tracing::debug!("edit dropped: todo no longer listed");
            self.state.editing = None;
        }
        self.publish();
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.state.new_title = title.into();
        self.publish();
    }

    /// Submit the create form.
    pub async fn create(&mut self) {
        let title = self.state.new_title.trim().to_string();
        if title.is_empty() {
            self.state.mutation_error = Some(TITLE_REQUIRED.to_string());
            self.publish();
            return;
        }

        match self.api.create_todo(&CreateTodo::new(title)).await {
            Ok(created) => {
                tracing::debug!(id = created.id, "created todo");
                self.state.items.push(created);
                self.state.new_title.clear();
                self.state.mutation_error = None;
            }
            Err(err) => self.mutation_failed(CREATE_FAILED, &err),
        }
        self.publish();
    }

    /// Flip the completion flag of `id`. Unknown ids are ignored.
    pub async fn toggle(&mut self, id: i64) {
        let Some(completed) = self.state.item(id).map(|item| item.completed) else {
            tracing::debug!(id, "toggle ignored: no such todo");
            return;
        };

        match self.api.update_todo(id, &UpdateTodo::completed(!completed)).await {
            Ok(updated) => {
                self.state.replace_item(id, updated);
                self.state.mutation_error = None;
            }
            Err(err) => self.mutation_failed(UPDATE_FAILED, &err),
        }
        self.publish();
    }

    /// Open the title editor for `id`, replacing any other open draft.
    pub fn start_editing(&mut self, id: i64) {
        let Some(item) = self.state.item(id) else {
            tracing::debug!(id, "edit ignored: no such todo");
            return;
        };
        self.state.editing = Some(EditDraft {
            id,
            title: item.title.clone(),
        });
        self.state.mutation_error = None;
        self.publish();
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.state.editing.as_mut() {
            draft.title = title.into();
            self.publish();
        }
    }

    pub fn cancel_editing(&mut self) {
        if self.state.editing.take().is_some() {
            self.publish();
        }
    }

    /// Save the open draft. Stays in editing mode on any failure.
    pub async fn save_edit(&mut self) {
        let Some(draft) = self.state.editing.as_ref() else {
            return;
        };
        let id = draft.id;
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            self.state.mutation_error = Some(TITLE_REQUIRED.to_string());
            self.publish();
            return;
        }

        match self.api.update_todo(id, &UpdateTodo::title(title)).await {
            Ok(updated) => {
                self.state.replace_item(id, updated);
                self.state.editing = None;
                self.state.mutation_error = None;
            }
            Err(err) => self.mutation_failed(UPDATE_FAILED, &err),
        }
        self.publish();
    }

    pub async fn delete(&mut self, id: i64) {
        match self.api.delete_todo(id).await {
            Ok(()) => {
                tracing::debug!(id, "deleted todo");
                self.state.remove_item(id);
                if self.state.is_editing(id) {
                    self.state.editing = None;
                }
                self.state.mutation_error = None;
            }
            Err(err) => self.mutation_failed(DELETE_FAILED, &err),
        }
        self.publish();
    }

    fn mutation_failed(&mut self, message: &str, err: &ApiError) {
        tracing::warn!(error = %err, "{message}");
        self.state.mutation_error = Some(message.to_string());
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::client::TodoClient;
    use crate::http::HttpMethod;
    use crate::mock::ScriptedTransport;
    use crate::types::TodoItem;

    const BASE: &str = "http://localhost:8080";

    fn item(id: i64, title: &str, completed: bool) -> TodoItem {
        TodoItem {
            id,
            title: title.to_string(),
            completed,
        }
    }

    fn controller(transport: &ScriptedTransport) -> TodoController<ScriptedTransport> {
        TodoController::new(TodoApi::new(TodoClient::new(BASE), transport.clone()))
    }

    /// Controller that has already loaded `items`.
    async fn loaded(
        transport: &ScriptedTransport,
        items: &[TodoItem],
    ) -> TodoController<ScriptedTransport> {
        transport.respond_json(200, &items);
        let mut controller = controller(transport);
        controller.load().await;
        controller
    }

    fn sample() -> Vec<TodoItem> {
        vec![item(1, "Buy milk", false), item(2, "Read docs", true)]
    }

    #[tokio::test]
    async fn load_shows_server_items() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            r#"[{"id":1,"title":"Buy milk","completed":false},{"id":2,"title":"Read docs","completed":true}]"#,
        );
        let mut controller = controller(&transport);
        assert!(controller.state().is_loading());

        controller.load().await;

        let state = controller.state();
        assert_eq!(state.items(), sample().as_slice());
        assert!(!state.is_loading());
        assert_eq!(state.load_phase(), LoadPhase::Loaded);
        assert_eq!(state.load_error(), None);
        assert_eq!(state.mutation_error(), None);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://localhost:8080/api/todos");
    }

    #[tokio::test]
    async fn load_failure_sets_load_error_and_empty_list() {
        let transport = ScriptedTransport::new();
        transport.respond(500, "boom");
        let mut controller = controller(&transport);

        controller.load().await;

        let state = controller.state();
        assert_eq!(state.load_error(), Some(LOAD_FAILED));
        assert!(state.items().is_empty());
        assert!(!state.is_loading());
        assert_eq!(state.load_phase(), LoadPhase::LoadFailed);
    }

    #[tokio::test]
    async fn load_malformed_body_is_a_load_failure() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"not":"a list"}"#);
        let mut controller = controller(&transport);

        controller.load().await;

        assert_eq!(controller.state().load_error(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn reload_with_same_data_is_idempotent() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        let first = controller.state().items().to_vec();

        transport.respond_json(200, &sample());
        controller.load().await;

        assert_eq!(controller.state().items(), first.as_slice());
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn reload_keeps_draft_of_listed_item() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        controller.start_editing(2);
        controller.set_edit_title("Read more docs");

        transport.respond_json(200, &sample());
        controller.load().await;

        assert_eq!(
            controller.state().editing(),
            Some(&EditDraft {
                id: 2,
                title: "Read more docs".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn reload_without_edited_item_closes_draft() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        controller.start_editing(1);

        transport.respond_json(200, &[item(2, "Read docs", true)]);
        controller.load().await;

        assert_eq!(controller.state().editing(), None);
        controller.save_edit().await;
        assert_eq!(transport.request_count(), 2, "no PATCH for a vanished item");
        assert_eq!(controller.state().items(), &[item(2, "Read docs", true)]);
    }

    #[tokio::test]
    async fn failed_reload_closes_draft() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        controller.start_editing(1);

        transport.respond(500, "");
        controller.load().await;

        assert!(controller.state().items().is_empty());
        assert_eq!(controller.state().editing(), None);
    }

    #[tokio::test]
    async fn successful_reload_clears_load_error() {
        let transport = ScriptedTransport::new();
        transport.respond(503, "");
        let mut controller = controller(&transport);
        controller.load().await;
        assert!(controller.state().load_error().is_some());

        transport.respond_json(200, &sample());
        controller.load().await;

        assert_eq!(controller.state().load_error(), None);
        assert_eq!(controller.state().items().len(), 2);
    }

    #[tokio::test]
    async fn create_appends_server_item_and_clears_input() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond_json(201, &item(3, "Write tests", false));

        controller.set_new_title("  Write tests  ");
        controller.create().await;

        let state = controller.state();
        assert_eq!(state.items().last(), Some(&item(3, "Write tests", false)));
        assert_eq!(state.items().len(), 3);
        assert_eq!(state.new_title(), "");
        assert_eq!(state.mutation_error(), None);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let post = &requests[1];
        assert_eq!(post.method, HttpMethod::Post);
        assert_eq!(post.url, "http://localhost:8080/api/todos");
        let body: serde_json::Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "title": "Write tests" }));
    }

    #[tokio::test]
    async fn create_rejects_blank_titles_without_a_request() {
        for title in ["", "   ", "\t\n"] {
            let transport = ScriptedTransport::new();
            let mut controller = loaded(&transport, &sample()).await;

            controller.set_new_title(title);
            controller.create().await;

            assert_eq!(controller.state().mutation_error(), Some(TITLE_REQUIRED));
            assert_eq!(controller.state().items(), sample().as_slice());
            assert_eq!(transport.request_count(), 1, "only the load request for {title:?}");
        }
    }

    #[tokio::test]
    async fn create_failure_keeps_list_and_input() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(500, "");

        controller.set_new_title("Write tests");
        controller.create().await;

        let state = controller.state();
        assert_eq!(state.mutation_error(), Some(CREATE_FAILED));
        assert_eq!(state.items(), sample().as_slice());
        assert_eq!(state.new_title(), "Write tests");
    }

    #[tokio::test]
    async fn create_then_toggle_uses_server_objects() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &[]).await;
        transport.respond_json(201, &item(3, "Write tests", false));
        transport.respond_json(200, &item(3, "Write tests", true));

        controller.set_new_title("Write tests");
        controller.create().await;
        controller.toggle(3).await;

        assert_eq!(controller.state().items(), &[item(3, "Write tests", true)]);

        let requests = transport.requests();
        let patch = &requests[2];
        assert_eq!(patch.method, HttpMethod::Patch);
        assert_eq!(patch.url, "http://localhost:8080/api/todos/3");
        let body: serde_json::Value = serde_json::from_str(patch.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "completed": true }));
    }

    #[tokio::test]
    async fn toggle_takes_the_server_copy_verbatim() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        // Server also renamed the item; the local copy must follow.
        transport.respond_json(200, &item(1, "Buy oat milk", true));

        controller.toggle(1).await;

        assert_eq!(controller.state().items()[0], item(1, "Buy oat milk", true));
        assert_eq!(controller.state().items()[1], item(2, "Read docs", true));
    }

    #[tokio::test]
    async fn toggle_failure_does_not_flip() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(500, "");

        controller.toggle(1).await;

        assert_eq!(controller.state().items(), sample().as_slice());
        assert_eq!(controller.state().mutation_error(), Some(UPDATE_FAILED));
    }

    #[tokio::test]
    async fn toggle_unknown_id_sends_nothing() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;

        controller.toggle(42).await;

        assert_eq!(transport.request_count(), 1);
        assert_eq!(controller.state().mutation_error(), None);
    }

    #[tokio::test]
    async fn success_clears_previous_mutation_error() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(500, "");
        transport.respond_json(200, &item(1, "Buy milk", true));

        controller.toggle(1).await;
        assert_eq!(controller.state().mutation_error(), Some(UPDATE_FAILED));
        controller.toggle(1).await;
        assert_eq!(controller.state().mutation_error(), None);
    }

    #[tokio::test]
    async fn error_slots_are_overwritten_independently() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;

        controller.set_new_title("  ");
        controller.create().await;
        assert_eq!(controller.state().mutation_error(), Some(TITLE_REQUIRED));

        transport.respond(500, "");
        controller.delete(1).await;
        assert_eq!(controller.state().mutation_error(), Some(DELETE_FAILED));

        // A failed load fills its own slot only.
        transport.respond(503, "");
        controller.load().await;
        assert_eq!(controller.state().load_error(), Some(LOAD_FAILED));
        assert_eq!(controller.state().mutation_error(), Some(DELETE_FAILED));

        transport.respond(500, "");
        controller.set_new_title("Write tests");
        controller.create().await;
        assert_eq!(controller.state().mutation_error(), Some(CREATE_FAILED));
        assert_eq!(controller.state().load_error(), Some(LOAD_FAILED));

        transport.respond_json(200, &sample());
        controller.load().await;
        assert_eq!(controller.state().load_error(), None);
        assert_eq!(controller.state().mutation_error(), Some(CREATE_FAILED));
    }

    #[tokio::test]
    async fn edit_save_replaces_item_and_exits_editing() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond_json(200, &item(2, "Read more docs", true));

        controller.start_editing(2);
        assert_eq!(
            controller.state().editing(),
            Some(&EditDraft {
                id: 2,
                title: "Read docs".to_string(),
            })
        );
        controller.set_edit_title(" Read more docs ");
        controller.save_edit().await;

        let state = controller.state();
        assert_eq!(state.items()[1], item(2, "Read more docs", true));
        assert_eq!(state.editing(), None);
        assert_eq!(state.mutation_error(), None);

        let patch = &transport.requests()[1];
        let body: serde_json::Value = serde_json::from_str(patch.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "title": "Read more docs" }));
    }

    #[tokio::test]
    async fn edit_save_blank_title_stays_editing_without_request() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;

        controller.start_editing(1);
        controller.set_edit_title("   ");
        controller.save_edit().await;

        assert_eq!(controller.state().mutation_error(), Some(TITLE_REQUIRED));
        assert!(controller.state().is_editing(1));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn edit_save_failure_stays_editing() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(404, "todo not found");

        controller.start_editing(1);
        controller.set_edit_title("Buy bread");
        controller.save_edit().await;

        let state = controller.state();
        assert_eq!(state.mutation_error(), Some(UPDATE_FAILED));
        assert_eq!(
            state.editing(),
            Some(&EditDraft {
                id: 1,
                title: "Buy bread".to_string(),
            })
        );
        assert_eq!(state.items(), sample().as_slice());
    }

    #[tokio::test]
    async fn start_editing_clears_mutation_error_and_replaces_draft() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        controller.set_new_title("");
        controller.create().await;
        assert!(controller.state().mutation_error().is_some());

        controller.start_editing(1);
        controller.start_editing(2);

        assert_eq!(controller.state().mutation_error(), None);
        assert_eq!(controller.state().editing().map(|d| d.id), Some(2));

        controller.cancel_editing();
        assert_eq!(controller.state().editing(), None);
    }

    #[tokio::test]
    async fn save_without_draft_is_a_no_op() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;

        controller.save_edit().await;
        controller.set_edit_title("ignored");

        assert_eq!(transport.request_count(), 1);
        assert_eq!(controller.state().editing(), None);
    }

    #[tokio::test]
    async fn delete_removes_item() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(204, "");

        controller.delete(1).await;

        assert_eq!(controller.state().items(), &[item(2, "Read docs", true)]);
        let request = &transport.requests()[1];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://localhost:8080/api/todos/1");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn delete_of_edited_item_exits_editing() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(204, "");

        controller.start_editing(2);
        controller.delete(2).await;

        assert_eq!(controller.state().editing(), None);
    }

    #[tokio::test]
    async fn delete_of_other_item_keeps_editing() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(204, "");

        controller.start_editing(2);
        controller.delete(1).await;

        assert!(controller.state().is_editing(2));
    }

    #[tokio::test]
    async fn delete_failure_keeps_item() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.respond(500, "");

        controller.delete(1).await;

        assert_eq!(controller.state().items(), sample().as_slice());
        assert_eq!(controller.state().mutation_error(), Some(DELETE_FAILED));
    }

    #[tokio::test]
    async fn transport_failure_is_contained() {
        let transport = ScriptedTransport::new();
        let mut controller = loaded(&transport, &sample()).await;
        transport.fail(ApiError::Transport("connection refused".to_string()));

        controller.delete(2).await;

        assert_eq!(controller.state().mutation_error(), Some(DELETE_FAILED));
        assert_eq!(controller.state().items().len(), 2);
    }

    #[tokio::test]
    async fn missing_base_url_never_reaches_the_transport() {
        let transport = ScriptedTransport::new();
        let api = TodoApi::new(TodoClient::new(""), transport.clone());
        let mut controller = TodoController::new(api);

        controller.load().await;
        controller.set_new_title("Write tests");
        controller.create().await;

        assert_eq!(transport.request_count(), 0);
        assert_eq!(controller.state().load_error(), Some(LOAD_FAILED));
        assert_eq!(controller.state().mutation_error(), Some(CREATE_FAILED));
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_result() {
        let transport = ScriptedTransport::new();
        transport.respond_json(200, &sample());
        let mut controller = controller(&transport);
        let mut rx = controller.subscribe();
        assert!(rx.borrow_and_update().is_loading());

        controller.load().await;

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(&snapshot, controller.state());
        assert_eq!(snapshot.items().len(), 2);
    }
}
