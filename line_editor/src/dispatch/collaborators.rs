// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt, io};

use crate::{HistoryLog, HistoryStore, RenderBackend, SessionContext};

/// Runs a submitted line. The line editor doesn't know what any command means.
pub trait CommandInterpreter {
    /// Called on every submit with the line as it was before the buffer was reset (it
    /// may be blank). Output goes through `screen`. The visual cursor is at the start of
    /// an empty row when this is called, and the prompt is drawn after it returns.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `screen` fails.
    fn execute(
        &mut self,
        line: &str,
        screen: &mut dyn RenderBackend,
        context: &mut SessionContext,
        history: &HistoryLog,
    ) -> io::Result<()>;
}

/// What a [`CompletionEngine`] came up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Use this as the whole new line.
    Replace(String),
    /// Ambiguous. Show these to the user and leave the line alone.
    Candidates(Vec<String>),
}

pub trait CompletionEngine {
    /// [None] means there is nothing to complete.
    fn complete(&mut self, line: &str) -> Option<Completion>;
}

/// Never completes anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCompletion;

impl CompletionEngine for NoCompletion {
    fn complete(&mut self, _line: &str) -> Option<Completion> { None }
}

/// The external pieces that [`crate::dispatch()`] drives. Bundled so that the dispatch
/// signature stays stable when a collaborator is swapped out.
pub struct Collaborators<'a> {
    pub screen: &'a mut dyn RenderBackend,
    pub interpreter: &'a mut dyn CommandInterpreter,
    pub completer: &'a mut dyn CompletionEngine,
    pub history_store: &'a mut dyn HistoryStore,
}

impl fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
