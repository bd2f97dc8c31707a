//! Text rendering of a `ViewState`.

use todo_core::{LoadPhase, ViewState};

pub fn render(state: &ViewState) -> String {
    let mut out = String::from("TODO List\n");

    if state.is_loading() {
        out.push_str("Loading...\n");
    }
    for message in [state.load_error(), state.mutation_error()].into_iter().flatten() {
        out.push_str(&format!("! {message}\n"));
    }

    // The list is only shown once a load has succeeded.
    if state.load_phase() != LoadPhase::Loaded {
        return out;
    }
    if state.items().is_empty() {
        out.push_str("(no todos)\n");
    }
    for item in state.items() {
        let mark = if item.completed { 'x' } else { ' ' };
        match state.editing().filter(|draft| draft.id == item.id) {
            Some(draft) => {
                out.push_str(&format!("[{mark}] {}  (editing: {})\n", item.id, draft.title));
            }
            None => out.push_str(&format!("[{mark}] {}  {}\n", item.id, item.title)),
        }
    }
    out
}
