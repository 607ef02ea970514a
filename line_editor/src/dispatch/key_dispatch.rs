// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use thiserror::Error;

use super::{Collaborators, Completion, EditEvent, SessionState};
use crate::{EditIntent, RedrawPlan, RenderBackend};

#[derive(Debug, Error)]
pub enum LineEditorError {
    /// Writing to the terminal failed. The session state is still consistent, but the
    /// screen may not match it anymore.
    #[error(transparent)]
    IO(#[from] io::Error),
}

/// What a [`dispatch()`] call did, for the host to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Neither the line nor the cursor changed.
    Unchanged,
    /// The line, the cursor, or the screen changed.
    Edited,
    /// This line (before the reset) was handed to the interpreter.
    Submitted(String),
    /// The line was abandoned.
    Interrupted,
}

/// Apply one [`EditEvent`] to `session`, and bring the screen up to date through
/// `collaborators.screen`.
///
/// Every event is accepted in every state. Events that make no sense right now (eg:
/// [`EditEvent::MoveLeft`] at the start of the line) change nothing and write nothing.
/// After this returns [Ok], the visual cursor column is `prompt width + cursor`.
///
/// # Errors
///
/// Only terminal I/O can fail. State changes are applied before rendering, so an error
/// leaves a consistent [`SessionState`] behind.
pub fn dispatch(
    session: &mut SessionState,
    event: EditEvent,
    collaborators: &mut Collaborators<'_>,
) -> Result<DispatchOutcome, LineEditorError> {
    // % is Display, ? is Debug.
    tracing::debug!(
        message = "dispatch",
        event = %event.as_ref(),
        cursor = session.input.cursor(),
        len = session.input.len()
    );

    let screen = &mut *collaborators.screen;
    match event {
        EditEvent::Submit => handle_submit(session, collaborators),
        EditEvent::Backspace => handle_backspace(session, screen),
        EditEvent::Delete => handle_delete(session, screen),
        EditEvent::MoveLeft => handle_move_by(session, screen, -1),
        EditEvent::MoveRight => handle_move_by(session, screen, 1),
        EditEvent::Home => handle_move_to(session, screen, 0),
        EditEvent::End => {
            let len = session.input.len();
            handle_move_to(session, screen, len)
        }
        EditEvent::HistoryPrev => handle_history_prev(session, screen),
        EditEvent::HistoryNext => handle_history_next(session, screen),
        EditEvent::Interrupt => handle_interrupt(session, screen),
        EditEvent::ClearScreen => handle_clear_screen(session, screen),
        EditEvent::CompleteRequest => handle_complete(session, collaborators),
        EditEvent::PrintableChar(ch) => handle_char(session, screen, ch),
        EditEvent::ReplaceAll(text) => handle_replace_all(session, screen, text),
    }
}

fn render(
    session: &SessionState,
    screen: &mut dyn RenderBackend,
    intent: EditIntent,
) -> Result<DispatchOutcome, LineEditorError> {
    RedrawPlan::compute(intent, &session.input).execute(screen, &session.context.cwd)?;
    Ok(DispatchOutcome::Edited)
}

fn handle_submit(
    session: &mut SessionState,
    collaborators: &mut Collaborators<'_>,
) -> Result<DispatchOutcome, LineEditorError> {
    let line = session.input.take();

    if session.history.record(&line) {
        let entries = session.history.to_vec();
        if let Err(error) = collaborators.history_store.save(&entries) {
            // % is Display, ? is Debug.
            tracing::warn!(message = "Could not save history.", error = %error);
        }
    } else {
        session.history.reset();
    }

    // Finish the row the line was typed on.
    collaborators.screen.writeln("")?;

    collaborators.interpreter.execute(
        &line,
        &mut *collaborators.screen,
        &mut session.context,
        &session.history,
    )?;

    collaborators.screen.prompt(&session.context.cwd)?;
    collaborators.screen.flush()?;

    Ok(DispatchOutcome::Submitted(line))
}

fn handle_backspace(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
) -> Result<DispatchOutcome, LineEditorError> {
    if session.input.is_cursor_at_start() {
        return Ok(DispatchOutcome::Unchanged);
    }
    session.input.delete_before();
    render(session, screen, EditIntent::Deletion)
}

fn handle_delete(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
) -> Result<DispatchOutcome, LineEditorError> {
    if session.input.is_cursor_at_end() {
        return Ok(DispatchOutcome::Unchanged);
    }
    session.input.delete_at();
    render(session, screen, EditIntent::Deletion)
}

fn handle_move_by(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
    delta: isize,
) -> Result<DispatchOutcome, LineEditorError> {
    let target = session.input.cursor().saturating_add_signed(delta);
    handle_move_to(session, screen, target)
}

/// Shared by the arrow keys and `Home` / `End`. Out of range targets are clamped, and a
/// move that goes nowhere writes nothing.
fn handle_move_to(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
    target: usize,
) -> Result<DispatchOutcome, LineEditorError> {
    let from = session.input.cursor();
    let (_, to) = session.input.move_to(target);
    if to == from {
        return Ok(DispatchOutcome::Unchanged);
    }
    render(session, screen, EditIntent::CursorMove { from })
}

fn handle_history_prev(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
) -> Result<DispatchOutcome, LineEditorError> {
    let draft = session.input.text().to_string();
    match session.history.prev(&draft).map(str::to_string) {
        Some(line) => {
            session.input.replace(line);
            render(session, screen, EditIntent::FullReplacement)
        }
        None => Ok(DispatchOutcome::Unchanged),
    }
}

fn handle_history_next(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
) -> Result<DispatchOutcome, LineEditorError> {
    match session.history.next().map(str::to_string) {
        Some(line) => {
            session.input.replace(line);
            render(session, screen, EditIntent::FullReplacement)
        }
        None => Ok(DispatchOutcome::Unchanged),
    }
}

/// The abandoned line stays on screen, with `^C` after its last char.
fn handle_interrupt(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
) -> Result<DispatchOutcome, LineEditorError> {
    let after_cursor = session.input.len() - session.input.cursor();
    session.input.clear();
    session.history.reset();

    screen.move_right(after_cursor)?;
    screen.writeln("^C")?;
    screen.prompt(&session.context.cwd)?;
    screen.flush()?;

    Ok(DispatchOutcome::Interrupted)
}

/// The line survives the clear, so it is drawn again after the prompt.
fn handle_clear_screen(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
) -> Result<DispatchOutcome, LineEditorError> {
    screen.clear_screen()?;
    render(session, screen, EditIntent::FullReplacement)
}

fn handle_complete(
    session: &mut SessionState,
    collaborators: &mut Collaborators<'_>,
) -> Result<DispatchOutcome, LineEditorError> {
    let screen = &mut *collaborators.screen;
    match collaborators.completer.complete(session.input.text()) {
        Some(Completion::Replace(line)) => {
            session.input.replace(line);
            render(session, screen, EditIntent::FullReplacement)
        }
        Some(Completion::Candidates(candidates)) if !candidates.is_empty() => {
            screen.writeln("")?;
            for candidate in &candidates {
                screen.writeln(candidate)?;
            }
            // Same line, same cursor, on a new row.
            render(session, screen, EditIntent::FullReplacement)
        }
        _ => Ok(DispatchOutcome::Unchanged),
    }
}

fn handle_char(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
    ch: char,
) -> Result<DispatchOutcome, LineEditorError> {
    if ch.is_control() {
        return Ok(DispatchOutcome::Unchanged);
    }
    let at = session.input.cursor();
    session.input.insert(ch.encode_utf8(&mut [0; 4]));
    render(session, screen, EditIntent::Insertion { at })
}

fn handle_replace_all(
    session: &mut SessionState,
    screen: &mut dyn RenderBackend,
    text: String,
) -> Result<DispatchOutcome, LineEditorError> {
    if text == session.input.text() && session.input.is_cursor_at_end() {
        return Ok(DispatchOutcome::Unchanged);
    }
    session.input.replace(text);
    render(session, screen, EditIntent::FullReplacement)
}
