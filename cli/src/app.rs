//! Maps parsed commands onto controller actions.

use todo_core::{TodoController, Transport};

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn apply<T: Transport>(controller: &mut TodoController<T>, command: Command) -> Flow {
    match command {
        Command::Add(title) => {
            controller.set_new_title(title);
            controller.create().await;
        }
        Command::Toggle(id) => controller.toggle(id).await,
        Command::Edit(id) => controller.start_editing(id),
        Command::Title(title) => controller.set_edit_title(title),
        Command::Save => controller.save_edit().await,
        Command::Cancel => controller.cancel_editing(),
        Command::Delete(id) => controller.delete(id).await,
        Command::Reload => controller.load().await,
        Command::Help => {}
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}
