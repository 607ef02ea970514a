// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A tiny shell on top of `term_line_editor`, running in a native terminal. Try the
//! arrow keys, `Tab` at the start of a line, `Ctrl+C`, `Ctrl+L`, and `history`. Type
//! `exit` or press `Ctrl+D` to quit.

use std::{io, path::PathBuf};

use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::{StreamExt, future};
use miette::IntoDiagnostic;
use term_line_editor::{AnsiRenderBackend, Collaborators, CommandInterpreter, Completion,
                       CompletionEngine, HistoryLog, HostInputEvent, InputSourceAdapter,
                       LineEditorConfig, LineEditorError, Modifiers, PinnedInputStream, RawKey,
                       RawKeyEvent, RenderBackend, SessionContext, SessionEnd,
                       SessionState, TracingConfig, run_session};

#[derive(Debug, Parser)]
#[command(bin_name = "line-editor-demo")]
#[command(about = "Line editor demo shell", version)]
#[command(help_template = "{about}\n{usage-heading}\n  {usage}\n\n{all-args}")]
struct CliArg {
    /// Config file to use instead of `<config_dir>/term-line-editor/config.json`.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Prompt template, `{cwd}` is replaced with the working directory.
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Don't restore or save history.
    #[arg(long)]
    no_history: bool,

    /// Write debug logs to this file.
    #[arg(long, short = 'l')]
    log_file: Option<String>,

    /// Browser user agent to emulate. A touch device turns on the virtual field mirror.
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_arg = CliArg::parse();

    if let Some(log_file) = &cli_arg.log_file {
        TracingConfig::new_file(log_file.as_str()).install_global()?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let mut config = match &cli_arg.config {
        Some(path) => LineEditorConfig::try_load(path)?,
        None => LineEditorConfig::try_load_or_default()?,
    };
    if let Some(prompt) = cli_arg.prompt {
        config.prompt_template = prompt;
    }
    if cli_arg.no_history {
        config.persist_history = false;
    }

    let mut history_store = config.history_store();
    let restored = history_store.load().unwrap_or_else(|error| {
        // % is Display, ? is Debug.
        tracing::warn!(message = "Could not restore history.", error = %error);
        vec![]
    });

    let mut session = SessionState::new_from_config(&config, restored);
    let mut adapter = InputSourceAdapter::new_for_user_agent(
        cli_arg.user_agent.as_deref().unwrap_or_default(),
        config.refocus_delay(),
    );
    let mut screen = AnsiRenderBackend::new(io::stdout(), config.prompt());
    let mut interpreter = DemoShell;
    let mut completer = DemoCompleter;

    crossterm::terminal::enable_raw_mode().into_diagnostic()?;

    let result: Result<SessionEnd, LineEditorError> = async {
        screen.prompt(session.cwd())?;
        screen.flush()?;
        let mut collaborators = Collaborators {
            screen: &mut screen,
            interpreter: &mut interpreter,
            completer: &mut completer,
            history_store: history_store.as_mut(),
        };
        run_session(
            &mut crossterm_input_stream(),
            &mut adapter,
            &mut session,
            &mut collaborators,
            None,
        )
        .await
    }
    .await;

    crossterm::terminal::disable_raw_mode().into_diagnostic()?;
    println!();

    let session_end = result.into_diagnostic()?;
    tracing::debug!(message = "Stop logging...", session_end = ?session_end);
    Ok(())
}

/// Key presses from the terminal, ending at `Ctrl+D`.
fn crossterm_input_stream() -> PinnedInputStream<HostInputEvent> {
    let ctrl_d = RawKeyEvent::new(RawKey::Char('d'), Modifiers::CTRL);
    let it = EventStream::new()
        .filter_map(|result| {
            future::ready(match result {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(RawKeyEvent::from(key))
                }
                _ => None,
            })
        })
        .take_while(move |key| future::ready(*key != ctrl_d))
        .map(HostInputEvent::Key);
    Box::pin(it)
}

const COMMAND_NAMES: [&str; 7] = ["cd", "clear", "echo", "exit", "help", "history", "pwd"];

/// Built in commands. There is no filesystem: `cd` just changes what the prompt shows.
#[derive(Debug, Default, Clone, Copy)]
struct DemoShell;

impl CommandInterpreter for DemoShell {
    fn execute(
        &mut self,
        line: &str,
        screen: &mut dyn RenderBackend,
        context: &mut SessionContext,
        history: &HistoryLog,
    ) -> io::Result<()> {
        let line = line.trim();
        let (command, args) = line.split_once(' ').unwrap_or((line, ""));
        let args = args.trim();

        match command {
            "" => {}
            "help" => screen.writeln(&format!("Commands: {}", COMMAND_NAMES.join(", ")))?,
            "echo" => screen.writeln(args)?,
            "pwd" => screen.writeln(&context.cwd)?,
            "cd" => {
                context.cwd = if args.is_empty() { "~" } else { args }.to_string();
            }
            "history" => {
                for (index, entry) in history.entries().enumerate() {
                    screen.writeln(&format!("{:>4}  {entry}", index + 1))?;
                }
            }
            "clear" => screen.clear_screen()?,
            "exit" => context.exit_requested = true,
            other => screen.writeln(&format!("{other}: command not found"))?,
        }
        Ok(())
    }
}

/// Completes the command name at the start of the line.
#[derive(Debug, Default, Clone, Copy)]
struct DemoCompleter;

impl CompletionEngine for DemoCompleter {
    fn complete(&mut self, line: &str) -> Option<Completion> {
        if line.contains(' ') {
            return None;
        }
        let matches: Vec<String> = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(line))
            .map(ToString::to_string)
            .collect();
        match matches.len() {
            0 => None,
            1 => Some(Completion::Replace(format!("{} ", matches[0]))),
            _ => Some(Completion::Candidates(matches)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use term_line_editor::test_fixtures::ScreenModel;
    use test_case::test_case;

    #[test_case("hi", Some(Completion::Replace("history ".into())))]
    #[test_case("c", Some(Completion::Candidates(vec!["cd".into(), "clear".into()])))]
    #[test_case("zzz", None)]
    #[test_case("echo h", None)]
    fn test_demo_completer(line: &str, expected: Option<Completion>) {
        assert_eq!(DemoCompleter.complete(line), expected);
    }

    #[test]
    fn test_demo_shell_commands() {
        let mut screen = ScreenModel::new("{cwd} $ ");
        let mut context = SessionContext::new("~");
        let mut history = HistoryLog::new();
        history.record("pwd");

        let mut shell = DemoShell;
        shell.execute("cd /srv", &mut screen, &mut context, &history).unwrap();
        shell.execute("pwd", &mut screen, &mut context, &history).unwrap();
        shell.execute("echo  a b", &mut screen, &mut context, &history).unwrap();
        shell.execute("nope", &mut screen, &mut context, &history).unwrap();
        shell.execute("history", &mut screen, &mut context, &history).unwrap();

        assert_eq!(context.cwd, "/srv");
        assert_eq!(screen.row_text(0), "/srv");
        assert_eq!(screen.row_text(1), "a b");
        assert_eq!(screen.row_text(2), "nope: command not found");
        assert_eq!(screen.row_text(3), "   1  pwd");

        shell.execute("exit", &mut screen, &mut context, &history).unwrap();
        assert!(context.exit_requested);
    }
}
