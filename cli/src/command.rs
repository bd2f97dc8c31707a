//! Line commands typed at the prompt.

use std::str::FromStr;

pub const USAGE: &str = "\
commands:
  add <title>     add a todo
  toggle <id>     flip completion
  edit <id>       start editing a title
  title <text>    change the draft title
  save            save the draft
  cancel          drop the draft
  delete <id>     delete a todo (alias: rm)
  reload          fetch the list again
  help            show this text (alias: ?)
  quit            exit (aliases: exit, q)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(i64),
    Edit(i64),
    Title(String),
    Save,
    Cancel,
    Delete(i64),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{0} needs a todo id")]
    MissingId(&'static str),

    #[error("not a todo id: {0}")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "" => Err(CommandError::Empty),
            // Blank titles are passed through so the controller reports them.
            "add" => Ok(Command::Add(rest.to_string())),
            "title" => Ok(Command::Title(rest.to_string())),
            "toggle" => parse_id("toggle", rest).map(Command::Toggle),
            "edit" => parse_id("edit", rest).map(Command::Edit),
            "delete" | "rm" => parse_id("delete", rest).map(Command::Delete),
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(command: &'static str, raw: &str) -> Result<i64, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingId(command));
    }
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}
