//! Console command parsing

use catalog_api::models::{DssField, FieldError, SipField};
use thiserror::Error;

/// One operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(String),
    Reload,
    Show,
    Sip { field: SipField, value: String },
    Dss { index: usize, field: DssField, value: String },
    Add,
    Save,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid DSS index: {0}")]
    InvalidIndex(String),

    #[error(transparent)]
    Field(#[from] FieldError),
}

pub const HELP: &str = "\
commands:
  list                          list available configs
  select <id>                   load a config (keeps edits if already selected)
  reload                        load the selected config again, dropping edits
  show                          print the SIP account and DSS keys
  sip <field> [value]           set a SIP field
  dss <index> <field> [value]   set key_type|value|label|icon of DSS key <index> (0-based)
  add                           append a blank DSS key
  save                          send the config to the catalog
  help                          show this help
  quit                          leave";

/// Split off the first whitespace-delimited word. The remainder keeps inner spaces.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = split_word(line);

        let command = match word {
            "" => return Ok(None),
            "list" | "ls" => Command::List,
            "select" | "open" => {
                let id = rest.trim();
                if id.is_empty() {
                    return Err(CommandError::Usage("select <id>"));
                }
                Command::Select(id.to_string())
            }
            "reload" => Command::Reload,
            "show" => Command::Show,
            "sip" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandError::Usage("sip <field> [value]"));
                }
                Command::Sip {
                    field: field.parse()?,
                    value: value.to_string(),
                }
            }
            "dss" => {
                let (index, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                if index.is_empty() || field.is_empty() {
                    return Err(CommandError::Usage("dss <index> <field> [value]"));
                }
                Command::Dss {
                    index: index
                        .parse()
                        .map_err(|_| CommandError::InvalidIndex(index.to_string()))?,
                    field: field.parse()?,
                    value: value.to_string(),
                }
            }
            "add" => Command::Add,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}
