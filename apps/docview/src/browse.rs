//! Interactive browse session: reads commands, dispatches view events and runs
//! backend effects concurrently, re-rendering as completions arrive.

use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use client_core::{execute, DocumentsApi, Effect, ViewController, ViewEvent};
use shared::{
    domain::{Category, Importance},
    query::SortField,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc::{unbounded_channel, UnboundedSender},
};
use tracing::debug;

use crate::render::{render_status, render_view};

pub const HELP: &str = "\
commands:
  category <public|internal|restricted|confidential|all>
  active <yes|no|all>
  importance <low|medium|high|critical|all>
  sort <created_at|title|importance|active>
  toggle                 flip ascending/descending
  from <YYYY-MM-DD|none>
  to <YYYY-MM-DD|none>
  reset                  clear all filters
  refresh                reload with current filters
  import                 trigger a backend import
  show                   print the current table
  help
  quit
";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Event(ViewEvent),
    Show,
    Help,
    Quit,
}

fn optional<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<Option<T>, String> {
    match value.to_ascii_lowercase().as_str() {
        "all" | "none" | "any" => Ok(None),
        _ => parse(value).map(Some),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{value}' (expected YYYY-MM-DD): {err}"))
}

fn parse_active(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "active" => Ok(true),
        "no" | "false" | "inactive" => Ok(false),
        _ => Err(format!("invalid active filter '{value}', expected yes, no or all")),
    }
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(BrowseCommand::Show);
    };
    let argument = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for '{command}'"));
    }

    let require = |name: &str| argument.ok_or_else(|| format!("'{name}' needs a value"));
    let event = match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(BrowseCommand::Quit),
        "help" | "?" => return Ok(BrowseCommand::Help),
        "show" | "ls" => return Ok(BrowseCommand::Show),
        "category" => ViewEvent::SetCategory(optional(require("category")?, |v| {
            v.parse::<Category>().map_err(|err| err.to_string())
        })?),
        "active" => ViewEvent::SetActive(optional(require("active")?, parse_active)?),
        "importance" => ViewEvent::SetImportance(optional(require("importance")?, |v| {
            v.parse::<Importance>().map_err(|err| err.to_string())
        })?),
        "sort" => ViewEvent::SetSortField(
            require("sort")?
                .parse::<SortField>()
                .map_err(|err| err.to_string())?,
        ),
        "toggle" | "order" => ViewEvent::ToggleSortOrder,
        "from" => ViewEvent::SetCreatedFrom(optional(require("from")?, parse_date)?),
        "to" => ViewEvent::SetCreatedTo(optional(require("to")?, parse_date)?),
        "reset" => ViewEvent::ResetFilters,
        "refresh" | "reload" => ViewEvent::Refresh,
        "import" => ViewEvent::ImportRequested,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(BrowseCommand::Event(event))
}

struct EffectRunner<A> {
    api: Arc<A>,
    done_tx: UnboundedSender<ViewEvent>,
    in_flight: usize,
}

impl<A: DocumentsApi + 'static> EffectRunner<A> {
    fn spawn(&mut self, effect: Option<Effect>) {
        let Some(effect) = effect else {
            return;
        };
        debug!(effect = effect.name(), "spawning effect");
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            let completion = execute(&*api, effect).await;
            let _ = done_tx.send(completion);
        });
    }
}

/// Runs the session until `quit` or end of input. At end of input, requests
/// still in flight are awaited so piped scripts see their results.
pub async fn run<A, R, W>(api: Arc<A>, input: R, mut output: W) -> Result<()>
where
    A: DocumentsApi + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (done_tx, mut done_rx) = unbounded_channel();
    let mut controller = ViewController::new(Arc::clone(&api));
    let mut runner = EffectRunner {
        api,
        done_tx,
        in_flight: 0,
    };
    let mut lines = input.lines();
    let mut input_open = true;

    runner.spawn(controller.dispatch(ViewEvent::Initialize));
    write!(output, "{}", render_status(controller.state()))?;

    loop {
        if !input_open && runner.in_flight == 0 {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("failed to read command")? else {
                    input_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(BrowseCommand::Help) => write!(output, "{HELP}")?,
                    Ok(BrowseCommand::Show) => write!(output, "{}", render_view(controller.state()))?,
                    Ok(BrowseCommand::Event(event)) => {
                        let effect = controller.dispatch(event);
                        if effect.is_none() {
                            writeln!(output, "nothing to do")?;
                        }
                        runner.spawn(effect);
                        write!(output, "{}", render_status(controller.state()))?;
                    }
                    Err(message) => writeln!(output, "{message}")?,
                }
            }
            Some(completion) = done_rx.recv() => {
                runner.in_flight -= 1;
                let followup = controller.dispatch(completion);
                runner.spawn(followup);
                write!(output, "{}", render_view(controller.state()))?;
            }
        }
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
