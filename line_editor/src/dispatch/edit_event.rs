// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The events that drive the line editor. Both input sources (physical keyboard and the
/// virtual text field) produce these, so [`crate::dispatch`] never has to know where an
/// edit came from.
///
/// The [`AsRef<str>`] impl yields the variant name, which is what gets logged. The typed
/// text itself is not.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::AsRefStr)]
pub enum EditEvent {
    /// Accept the line (`Enter`).
    Submit,
    /// Delete the char before the cursor.
    Backspace,
    /// Delete the char under the cursor.
    Delete,
    MoveLeft,
    MoveRight,
    Home,
    End,
    /// Recall an older history entry (`ArrowUp`).
    HistoryPrev,
    /// Recall a newer history entry (`ArrowDown`).
    HistoryNext,
    /// Abandon the line (`Ctrl+C`).
    Interrupt,
    /// `Ctrl+L`.
    ClearScreen,
    /// `Tab`.
    CompleteRequest,
    /// A single printable code point typed at the cursor.
    PrintableChar(char),
    /// The virtual text field now holds this value. Replaces the whole line.
    ReplaceAll(String),
}
