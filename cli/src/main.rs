//! Terminal front-end for the todo service.
//!
//! Reads `TODO_API_BASE_URL` from the environment (or a `.env` file) on
//! every request, renders the list after each command and takes one command
//! per line on stdin. Logs go to stderr; `RUST_LOG` sets the filter.

mod app;
mod command;
mod render;

use todo_core::{ReqwestTransport, TodoApi, TodoClient, TodoController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{apply, Flow};
use crate::command::{Command, CommandError, USAGE};
use crate::render::render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = TodoApi::new(TodoClient::from_env(), ReqwestTransport::new());
    let mut controller = TodoController::new(api);

    print!("{}", render(controller.state()));
    controller.load().await;
    print!("{}", render(controller.state()));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                println!("{err}\n{USAGE}");
                continue;
            }
        };
        if command == Command::Help {
            println!("{USAGE}");
        }
        if apply(&mut controller, command).await == Flow::Quit {
            break;
        }
        print!("{}", render(controller.state()));
    }

    tracing::info!("bye");
    Ok(())
}
