// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use super::RenderBackend;
use crate::InputBuffer;

/// What kind of change was just made to the [`InputBuffer`]. This is all the render
/// synchronizer needs to know in order to pick the cheapest way to bring the screen up
/// to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr)]
pub enum EditIntent {
    /// Only the cursor moved. `from` is where it was before.
    CursorMove { from: usize },
    /// Text was inserted at char offset `at`, and the cursor now sits right after it.
    Insertion { at: usize },
    /// Text was removed somewhere on the line.
    Deletion,
    /// The whole line was swapped out (history recall, completion, virtual field).
    FullReplacement,
}

/// The terminal operations needed after an edit, computed by [`RedrawPlan::compute`]
/// without touching the terminal, then carried out by [`RedrawPlan::execute`] against
/// any [`RenderBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedrawPlan {
    /// The screen already matches the buffer.
    Nothing,
    /// Move the visual cursor by this many columns (negative is left).
    MoveBy(isize),
    /// Write `text` at the visual cursor, then move left by `move_back` columns.
    WriteSuffix { text: String, move_back: usize },
    /// Blank the input line, redraw prompt and `line`, then move left by `move_back`
    /// columns.
    FullRedraw { line: String, move_back: usize },
}

impl RedrawPlan {
    /// `buffer` is the state *after* the edit described by `intent`.
    #[must_use]
    pub fn compute(intent: EditIntent, buffer: &InputBuffer) -> Self {
        let cursor = buffer.cursor();
        match intent {
            EditIntent::CursorMove { from } => match signed_delta(from, cursor) {
                0 => RedrawPlan::Nothing,
                delta => RedrawPlan::MoveBy(delta),
            },
            EditIntent::Insertion { at } => {
                let text = buffer.suffix_from(at).to_string();
                let inserted_count = cursor.saturating_sub(at);
                let move_back = text.chars().count().saturating_sub(inserted_count);
                RedrawPlan::WriteSuffix { text, move_back }
            }
            EditIntent::Deletion | EditIntent::FullReplacement => RedrawPlan::FullRedraw {
                line: buffer.text().to_string(),
                move_back: buffer.len() - cursor,
            },
        }
    }

    /// Carry out this plan. `cwd` is needed to redraw the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn execute(&self, backend: &mut dyn RenderBackend, cwd: &str) -> io::Result<()> {
        // % is Display, ? is Debug.
        tracing::trace!(message = "Executing redraw plan.", plan = ?self);

        match self {
            RedrawPlan::Nothing => return Ok(()),
            RedrawPlan::MoveBy(delta) => {
                if *delta < 0 {
                    backend.move_left(delta.unsigned_abs())?;
                } else {
                    backend.move_right(delta.unsigned_abs())?;
                }
            }
            RedrawPlan::WriteSuffix { text, move_back } => {
                backend.write_text(text)?;
                backend.move_left(*move_back)?;
            }
            RedrawPlan::FullRedraw { line, move_back } => {
                backend.reset_input_display(cwd, line)?;
                backend.move_left(*move_back)?;
            }
        }

        backend.flush()
    }
}

fn signed_delta(from: usize, to: usize) -> isize {
    let magnitude = isize::try_from(from.abs_diff(to)).unwrap_or(isize::MAX);
    if to < from { -magnitude } else { magnitude }
}
