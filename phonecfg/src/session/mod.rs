//! Operator console
//!
//! Line-oriented front end for an [`EditorState`]: one command per line,
//! status messages echoed after every catalog call.

pub mod command;

use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::editor::{EditorState, Outcome, Projection, StatusLevel};
use crate::errors::CfgError;
use crate::session::command::{Command, HELP};

/// Read commands from `input` until it ends or the operator quits
pub async fn run<R, W>(editor: &mut EditorState, input: R, out: &mut W) -> Result<(), CfgError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "phonecfg console, `help` lists commands")?;
    let outcome = editor.refresh().await;
    print_list(editor, out)?;
    if outcome == Outcome::Failed {
        print_status(editor, out)?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(editor, command, out).await?,
            Err(e) => writeln!(out, "{}", e.to_string().yellow())?,
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Apply one command to the editor and report the result
pub async fn execute<W: Write>(
    editor: &mut EditorState,
    command: Command,
    out: &mut W,
) -> Result<(), CfgError> {
    let result = match command {
        Command::List => {
            let outcome = editor.refresh().await;
            print_list(editor, out)?;
            if outcome == Outcome::Failed {
                print_status(editor, out)?;
            }
            return Ok(());
        }
        Command::Select(id) => {
            match editor.select(&id).await {
                Outcome::Applied => writeln!(out, "{}", format!("loaded {}", id).green())?,
                Outcome::Unchanged => writeln!(out, "{} is already selected", id)?,
                _ => print_status(editor, out)?,
            }
            return Ok(());
        }
        Command::Reload => editor.reload().await.map(|_| true),
        Command::Save => editor.save().await.map(|_| true),
        Command::Show => {
            return match editor.projection() {
                Some(projection) => print_projection(projection, out),
                None => Ok(writeln!(out, "{}", "no config selected".yellow())?),
            };
        }
        Command::Sip { field, value } => editor.update_sip_field(field, value).map(|_| false),
        Command::Dss { index, field, value } => {
            editor.update_dss_field(index, field, &value).map(|_| false)
        }
        Command::Add => editor.append_dss_key().map(|position| {
            debug!("Appended DSS key {}", position);
            false
        }),
        Command::Help => return Ok(writeln!(out, "{}", HELP)?),
        Command::Quit => return Ok(()),
    };

    match result {
        Ok(true) => print_status(editor, out),
        Ok(false) => Ok(()),
        // mutation guards are reported, never fatal
        Err(e @ CfgError::ContractViolation(_)) => Ok(writeln!(out, "{}", e.to_string().yellow())?),
        Err(e) => Err(e),
    }
}

fn print_list<W: Write>(editor: &EditorState, out: &mut W) -> Result<(), CfgError> {
    if editor.available().is_empty() {
        writeln!(out, "no configs available")?;
    }
    let bound = editor.projection().map(Projection::id);
    for id in editor.available() {
        let marker = if Some(id.as_str()) == bound { "*" } else { " " };
        writeln!(out, "{} {}", marker, id)?;
    }
    Ok(())
}

fn print_status<W: Write>(editor: &EditorState, out: &mut W) -> Result<(), CfgError> {
    if let Some(status) = editor.status() {
        match status.level {
            StatusLevel::Info => writeln!(out, "{}", status.text.green())?,
            StatusLevel::Error => writeln!(out, "{}", status.text.red())?,
        }
    }
    Ok(())
}

fn print_projection<W: Write>(projection: &Projection, out: &mut W) -> Result<(), CfgError> {
    writeln!(out, "{}", projection.id().bold())?;
    writeln!(out, "SIP1")?;
    for (field, value) in projection.sip_account().entries() {
        writeln!(out, "  {:<18} {}", field.as_str(), value)?;
    }
    writeln!(out, "DSS keys")?;
    if projection.dss_keys().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (index, key) in projection.dss_keys().iter().enumerate() {
        writeln!(
            out,
            "  [{}] #{} type={} value={:?} label={:?} icon={}",
            index, key.position, key.key_type, key.value, key.label, key.icon
        )?;
    }
    Ok(())
}
