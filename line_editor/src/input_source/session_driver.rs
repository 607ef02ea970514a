// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use futures_util::StreamExt;

use super::{FocusControl, InputSourceAdapter, RawKeyEvent};
use crate::{Collaborators, DispatchOutcome, LineEditorError, PinnedInputStream,
            SessionState};

/// Everything a host can report about user input, from either input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostInputEvent {
    Key(RawKeyEvent),
    /// The virtual field's value changed.
    VirtualInput(String),
    /// `Enter` in the virtual field.
    VirtualSubmit,
    /// The user tapped the terminal or the virtual field.
    VirtualFocus,
    /// The virtual field lost focus.
    VirtualBlur,
}

/// Why [`run_session`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The interpreter set [`crate::SessionContext::exit_requested`].
    ExitRequested,
    /// The input stream ended.
    InputClosed,
}

/// Feed `input` through `adapter` until the interpreter asks to exit or the stream ends.
/// The host draws the first prompt before calling this.
///
/// `field` is what gets refocused on [`HostInputEvent::VirtualBlur`]. The refocus task
/// is not awaited.
///
/// # Errors
///
/// Returns the first terminal I/O error. The session stays usable.
pub async fn run_session(
    input: &mut PinnedInputStream<HostInputEvent>,
    adapter: &mut InputSourceAdapter,
    session: &mut SessionState,
    collaborators: &mut Collaborators<'_>,
    field: Option<Arc<dyn FocusControl>>,
) -> Result<SessionEnd, LineEditorError> {
    while let Some(event) = input.next().await {
        let outcome = match event {
            HostInputEvent::Key(key) => {
                adapter.handle_physical_key(&key, session, collaborators)?
            }
            HostInputEvent::VirtualInput(value) => {
                adapter.handle_virtual_input(&value, session, collaborators)?
            }
            HostInputEvent::VirtualSubmit => {
                adapter.handle_virtual_submit(session, collaborators)?
            }
            HostInputEvent::VirtualFocus => {
                adapter.handle_virtual_focus(session);
                DispatchOutcome::Unchanged
            }
            HostInputEvent::VirtualBlur => {
                if let Some(field) = &field {
                    _ = adapter.handle_virtual_blur(field.clone());
                }
                DispatchOutcome::Unchanged
            }
        };

        if let DispatchOutcome::Submitted(line) = &outcome {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Line submitted.", len = line.len());
        }

        if session.context.exit_requested {
            return Ok(SessionEnd::ExitRequested);
        }
    }
    Ok(SessionEnd::InputClosed)
}
