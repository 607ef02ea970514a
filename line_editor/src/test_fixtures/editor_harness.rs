// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use super::ScreenModel;
use crate::{Collaborators, CommandInterpreter, Completion, CompletionEngine,
            DEFAULT_CWD, DEFAULT_PROMPT_TEMPLATE, DispatchOutcome, EditEvent, HistoryLog,
            HistoryStore, HistoryStoreError, LineEditorError, RenderBackend,
            SessionContext, SessionState, dispatch};

/// Records every submitted line. Understands `cd <dir>`, which changes the session's
/// working directory, and `exit`.
#[derive(Debug, Default)]
pub struct RecordingInterpreter {
    pub lines: Vec<String>,
}

impl CommandInterpreter for RecordingInterpreter {
    fn execute(
        &mut self,
        line: &str,
        _screen: &mut dyn RenderBackend,
        context: &mut SessionContext,
        _history: &HistoryLog,
    ) -> io::Result<()> {
        self.lines.push(line.to_string());
        let line = line.trim();
        if let Some(dir) = line.strip_prefix("cd ") {
            context.cwd = dir.trim().to_string();
        } else if line == "exit" {
            context.exit_requested = true;
        }
        Ok(())
    }
}

/// Always answers with [`Self::result`], and records what it was asked.
#[derive(Debug, Default)]
pub struct ScriptedCompleter {
    pub result: Option<Completion>,
    pub requests: Vec<String>,
}

impl CompletionEngine for ScriptedCompleter {
    fn complete(&mut self, line: &str) -> Option<Completion> {
        self.requests.push(line.to_string());
        self.result.clone()
    }
}

/// Keeps every save in memory. Set [`Self::fail`] to simulate a full disk.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    pub saved: Vec<Vec<String>>,
    pub fail: bool,
}

impl HistoryStore for MemoryHistoryStore {
    fn save(&mut self, entries: &[String]) -> Result<(), HistoryStoreError> {
        if self.fail {
            return Err(io::Error::other("no space left on device").into());
        }
        self.saved.push(entries.to_vec());
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<String>, HistoryStoreError> {
        Ok(self.saved.last().cloned().unwrap_or_default())
    }
}

/// A complete editing session over a [`ScreenModel`], with recording collaborators. The
/// prompt is `"{cwd} $ "` and the session starts in `~`, with the first prompt already
/// drawn.
#[derive(Debug)]
pub struct EditorHarness {
    pub session: SessionState,
    pub screen: ScreenModel,
    pub interpreter: RecordingInterpreter,
    pub completer: ScriptedCompleter,
    pub history_store: MemoryHistoryStore,
}

impl Default for EditorHarness {
    fn default() -> Self { Self::new() }
}

impl EditorHarness {
    #[must_use]
    pub fn new() -> Self { Self::new_with_history(HistoryLog::new()) }

    #[must_use]
    pub fn new_with_history(history: HistoryLog) -> Self {
        let session = SessionState::new(DEFAULT_CWD, history);
        let mut screen = ScreenModel::new(DEFAULT_PROMPT_TEMPLATE);
        _ = screen.prompt(session.cwd());
        Self {
            session,
            screen,
            interpreter: RecordingInterpreter::default(),
            completer: ScriptedCompleter::default(),
            history_store: MemoryHistoryStore::default(),
        }
    }

    /// Run `f` with the session and all the collaborators borrowed at once.
    pub fn with_collaborators<R>(
        &mut self,
        f: impl FnOnce(&mut SessionState, &mut Collaborators<'_>) -> R,
    ) -> R {
        let mut collaborators = Collaborators {
            screen: &mut self.screen,
            interpreter: &mut self.interpreter,
            completer: &mut self.completer,
            history_store: &mut self.history_store,
        };
        f(&mut self.session, &mut collaborators)
    }

    /// # Errors
    ///
    /// Never, since [`ScreenModel`] can't fail.
    pub fn send(&mut self, event: EditEvent) -> Result<DispatchOutcome, LineEditorError> {
        self.with_collaborators(|session, collaborators| dispatch(session, event, collaborators))
    }

    /// # Errors
    ///
    /// Never, since [`ScreenModel`] can't fail.
    pub fn type_text(&mut self, text: &str) -> Result<(), LineEditorError> {
        for ch in text.chars() {
            self.send(EditEvent::PrintableChar(ch))?;
        }
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the screen doesn't show the session's line and cursor.
    pub fn assert_screen_in_sync(&self) {
        self.screen
            .assert_in_sync(self.session.cwd(), self.session.input());
    }
}
