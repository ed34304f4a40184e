//! Line-oriented terminal front-end for the carousel.
//!
//! Reads one command per line from stdin and reprints the view whenever
//! the controller publishes a new one.

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::carousel::{CarouselHandle, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Next,
    Previous,
    /// Zero-based index parsed from a one-based number.
    Select(usize),
    /// `c` on its own creates a generated user.
    Create,
    CreateWith { full_name: String, email: String },
    Refresh,
    Show,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let word = words.next()?.to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();

    if matches!(word.as_str(), "c" | "create" | "new") {
        return match rest.split_last() {
            None => Some(Input::Create),
            Some((email, name)) if !name.is_empty() => Some(Input::CreateWith {
                full_name: name.join(" "),
                email: (*email).to_string(),
            }),
            Some(_) => None,
        };
    }
    if !rest.is_empty() {
        return None;
    }

    let input = match word.as_str() {
        "n" | "next" => Input::Next,
        "p" | "prev" | "previous" => Input::Previous,
        "r" | "refresh" => Input::Refresh,
        "v" | "view" | "show" => Input::Show,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(number) if number > 0 => Input::Select(number - 1),
            _ => return None,
        },
    };
    Some(input)
}

const HELP: &str =
    "commands: n next | p previous | <number> select | c [<name> <email>] new user | r refresh | v show | q quit";

/// Runs until `q` or end of input.
pub async fn run(handle: CarouselHandle) -> Result<()> {
    let mut views = handle.subscribe();
    let printer = tokio::spawn(async move {
        print_view(&views.borrow_and_update());
        while views.changed().await.is_ok() {
            print_view(&views.borrow_and_update());
        }
    });

    println!("{}", HELP.dimmed());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read from stdin")? {
        let Some(input) = parse_input(&line) else {
            if !line.trim().is_empty() {
                println!("{} {}", "unknown command:".yellow(), line.trim());
                println!("{}", HELP.dimmed());
            }
            continue;
        };
        debug!(?input, "Input");

        let sent = match input {
            Input::Next => handle.next().await,
            Input::Previous => handle.previous().await,
            Input::Select(index) => handle.select_index(index).await,
            Input::Create => handle.create_random().await,
            Input::CreateWith { full_name, email } => handle.request_create(full_name, email).await,
            Input::Refresh => handle.refresh().await,
            Input::Show => {
                print_view(&handle.view());
                Ok(())
            }
            Input::Help => {
                println!("{}", HELP.dimmed());
                Ok(())
            }
            Input::Quit => break,
        };
        sent.context("carousel is no longer running")?;
    }

    printer.abort();
    Ok(())
}

fn print_view(view: &View) {
    println!("\n{}", view.render());
}
