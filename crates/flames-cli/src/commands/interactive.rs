//! Interactive calculator page.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use flames_application::{CalculateOutcome, PageView};
use flames_core::share::shared_result_id;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::bootstrap::AppContext;
use crate::render;

const COMMANDS: [&str; 6] = ["/new", "/history", "/delete", "/share", "/help", "/quit"];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Empty,
    Quit,
    Help,
    New,
    History,
    Share,
    Delete(String),
    Calculate(String, String),
    Unknown(String),
}

/// Parses a line. Two names may be separated by a comma, a `+`, or plain
/// whitespace when each name is a single word.
fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }

    if let Some(command) = line.strip_prefix('/') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("quit" | "exit" | "q"), _) => ReplCommand::Quit,
            (Some("help"), _) => ReplCommand::Help,
            (Some("new"), _) => ReplCommand::New,
            (Some("history"), _) => ReplCommand::History,
            (Some("share"), _) => ReplCommand::Share,
            (Some("delete"), Some(id)) => ReplCommand::Delete(id.to_string()),
            _ => ReplCommand::Unknown(line.to_string()),
        };
    }

    if let Some((one, two)) = line.split_once(',').or_else(|| line.split_once('+')) {
        return ReplCommand::Calculate(one.trim().to_string(), two.trim().to_string());
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [one, two] => ReplCommand::Calculate(one.to_string(), two.to_string()),
        // A lone name still goes through validation so the field errors show.
        [one] => ReplCommand::Calculate(one.to_string(), String::new()),
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// rustyline helper providing slash-command completion, highlighting and hints.
#[derive(Clone)]
struct PageHelper {
    commands: Vec<String>,
}

impl PageHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for PageHelper {}

impl Completer for PageHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for PageHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PageHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for PageHelper {}

fn print_help() {
    println!("{}", "Enter two names, e.g. 'Alice, Bob', to calculate.".bright_black());
    println!("{}", "  /new           start a new calculation".bright_black());
    println!("{}", "  /history       show past results".bright_black());
    println!("{}", "  /delete <id>   remove a past result".bright_black());
    println!("{}", "  /share         share the current result".bright_black());
    println!("{}", "  /quit          leave".bright_black());
}

pub async fn run(ctx: AppContext, shared: Option<&str>) -> Result<()> {
    let page = &ctx.page;

    println!("{}", "=== FLAMES ===".bright_magenta().bold());
    print_help();
    println!();

    let shared_id = shared.and_then(shared_result_id);
    if let Some(id) = shared_id.as_deref() {
        println!("{}", format!("Loading shared result {}...", id).bright_black());
    }
    match page.load(shared_id.as_deref()).await {
        Some(result) => println!("{}", render::result_card(&result)),
        None if shared_id.is_some() => {
            println!("{}", "The shared result could not be loaded.".yellow())
        }
        None => {}
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(PageHelper::new()));

    loop {
        let prompt = match page.snapshot().await.view() {
            PageView::Idle => "names> ",
            PageView::ResultShown => "flames> ",
        };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if page.snapshot().await.show_celebration {
            page.acknowledge_celebration().await;
        }

        let command = parse_line(&line);
        if command != ReplCommand::Empty {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::New => {
                page.new_calculation().await;
                println!("{}", "Enter two new names.".bright_black());
            }
            ReplCommand::History => {
                page.refresh_history().await;
                println!("{}", render::history_list(&page.snapshot().await.history));
            }
            ReplCommand::Share => {
                println!("{}", render::share_outcome(&page.share().await));
            }
            ReplCommand::Delete(id) => match page.delete_history_item(&id).await {
                Ok(()) => {
                    println!("{}", format!("✓ Deleted {}", id).green());
                    println!("{}", render::history_list(&page.snapshot().await.history));
                }
                Err(e) => println!("{}", format!("Could not delete {}: {}", id, e).red()),
            },
            ReplCommand::Calculate(one, two) => match page.calculate(&one, &two).await {
                CalculateOutcome::Computed(result) => {
                    println!("{}", render::result_card(&result));
                    if page.snapshot().await.show_celebration {
                        println!("{}", render::celebration_banner());
                    }
                }
                CalculateOutcome::Invalid(errors) => {
                    println!("{}", render::field_errors(&errors))
                }
                CalculateOutcome::Failed => println!(
                    "{}",
                    "The FLAMES service did not return a result. Please try again.".red()
                ),
                CalculateOutcome::Superseded => {}
            },
            ReplCommand::Unknown(input) => println!(
                "{}",
                format!("Unknown input '{}'. Type /help for commands.", input).bright_black()
            ),
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
