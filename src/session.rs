//! Interactive form session.
//!
//! Reads one command per line and prints the form after each one. Commands
//! are handled to completion before the next line is read.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::clock::Clock;
use crate::form::Form;
use crate::render;
use crate::validate::Field;

const HELP: &str = "\
commands:
  day <value>     set the day field
  month <value>   set the month field
  year <value>    set the year field
  submit          validate and compute
  show            print the form
  clear           empty every field
  quit            leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Edit(Field, String),
    Submit,
    Show,
    Clear,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match word.to_ascii_lowercase().as_str() {
        "submit" => Ok(Command::Submit),
        "show" => Ok(Command::Show),
        "clear" => Ok(Command::Clear),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => match other.parse::<Field>() {
            Ok(field) => Ok(Command::Edit(field, rest.trim().to_string())),
            Err(_) => Err(format!("unknown command '{word}' (try 'help')")),
        },
    }
}

fn snapshot<C: Clock>(form: &Form<C>, json: bool) -> Result<String> {
    let mut out = render::render(form, json)?;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Runs the session until `quit` or end of input.
pub async fn run<C, R, W>(form: &mut Form<C>, json: bool, reader: R, mut writer: W) -> Result<()>
where
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    log::debug!("form session started in {:?} mode", form.mode());
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => HELP.to_string(),
            Ok(Command::Edit(field, value)) => {
                form.edit(field, value);
                snapshot(form, json)?
            }
            Ok(Command::Submit) => {
                form.submit();
                snapshot(form, json)?
            }
            Ok(Command::Clear) => {
                form.clear();
                snapshot(form, json)?
            }
            Ok(Command::Show) => snapshot(form, json)?,
            Err(message) => format!("{message}\n"),
        };

        writer
            .write_all(output.as_bytes())
            .await
            .context("Failed to write output")?;
        writer.flush().await.context("Failed to flush output")?;
    }

    log::debug!("form session ended");
    Ok(())
}
