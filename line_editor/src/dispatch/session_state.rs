// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{HistoryLog, InputBuffer, LineEditorConfig};

/// The part of the session that the command interpreter is allowed to change, eg: `cd`
/// updates [`Self::cwd`], which the next prompt then shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub cwd: String,
    /// Set by the interpreter to ask the host to end the session.
    pub exit_requested: bool,
}

impl SessionContext {
    #[must_use]
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            exit_requested: false,
        }
    }
}

/// Everything one editing session owns. A fresh one is passed by `&mut` into every
/// [`crate::dispatch()`] call, so there is no global editor state.
///
/// Only dispatch mutates [`Self::input`] and the navigation state of [`Self::history`].
/// Everyone else gets read access.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) input: InputBuffer,
    pub(crate) history: HistoryLog,
    pub context: SessionContext,
}

impl SessionState {
    #[must_use]
    pub fn new(cwd: impl Into<String>, history: HistoryLog) -> Self {
        Self {
            input: InputBuffer::new(),
            history,
            context: SessionContext::new(cwd),
        }
    }

    /// Empty history sized and configured from `config` (after
    /// [`LineEditorConfig::sanitized`]), then seeded with `restored_history` (oldest
    /// first).
    #[must_use]
    pub fn new_from_config(
        config: &LineEditorConfig,
        restored_history: impl IntoIterator<Item = String>,
    ) -> Self {
        let config = config.clone().sanitized();
        let mut history =
            HistoryLog::new_with(config.history_max_size, config.history_next_past_end);
        history.load(restored_history);
        Self::new(config.initial_cwd.clone(), history)
    }

    #[must_use]
    pub fn input(&self) -> &InputBuffer { &self.input }

    #[must_use]
    pub fn history(&self) -> &HistoryLog { &self.history }

    #[must_use]
    pub fn cwd(&self) -> &str { &self.context.cwd }
}
