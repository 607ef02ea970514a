// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `term_line_editor`
//!
//! The line editing core of a terminal that runs in a browser (eg: on top of xterm.js),
//! usable just as well from a native terminal via [crossterm]. It turns a stream of key
//! events into an editable single line with a cursor, and handles:
//!
//! - cursor movement, insertion and deletion anywhere on the line,
//! - recall of the last [`HISTORY_SIZE_MAX`] submitted lines, with optional persistence,
//! - tab completion through a pluggable [`CompletionEngine`],
//! - handing submitted lines to a pluggable [`CommandInterpreter`],
//! - keeping a touch device's text field (the "mirror") in step with the line.
//!
//! # Mental model
//!
//! ```text
//! RawKeyEvent ─┐
//!              ├─► InputSourceAdapter ─► EditEvent ─► dispatch() ─► SessionState
//! field value ─┘                                          │
//!                                                         ▼
//!                                          RedrawPlan ─► RenderBackend (terminal)
//! ```
//!
//! 1. The [`InputSourceAdapter`] turns physical keys ([`RawKeyEvent`]) and virtual field
//!    changes into [`EditEvent`]s.
//! 2. [`dispatch()`] applies the event to the [`SessionState`] you own and pass in. There
//!    is no global state.
//! 3. A [`RedrawPlan`] is computed from what changed, and executed against a
//!    [`RenderBackend`]. Typing at the end of the line writes one char. Moving the cursor
//!    writes one cursor motion sequence. Only deletions and whole line replacements
//!    redraw the line.
//!
//! After every [`dispatch()`] the visual cursor sits at `prompt width + cursor`.
//!
//! # Testing
//!
//! The [`test_fixtures`] module has [`test_fixtures::ScreenModel`], a [`RenderBackend`]
//! that simulates a terminal row, and [`test_fixtures::EditorHarness`] which wires it up
//! with recording collaborators.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

use std::{pin::Pin, time::Duration};

use futures_core::Stream;

/// Number of submitted lines that are kept and persisted.
pub const HISTORY_SIZE_MAX: usize = 100;

/// Folder under the platform config and data dirs where config and history live.
pub const CONFIG_FOLDER_NAME: &str = "term-line-editor";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "{cwd} $ ";

pub const DEFAULT_CWD: &str = "~";

/// How long to wait after the virtual field loses focus before taking it back.
pub const DEFAULT_REFOCUS_DELAY: Duration = Duration::from_millis(100);

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type InlineVec<T> = smallvec::SmallVec<[T; 8]>;

pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;

// Attach sources.
pub mod config;
pub mod dispatch;
pub mod history;
pub mod input_source;
pub mod line_buffer;
pub mod log;
pub mod render;
pub mod test_fixtures;

// Re-export.
pub use config::*;
pub use dispatch::*;
pub use history::*;
pub use input_source::*;
pub use line_buffer::*;
pub use log::*;
pub use render::*;
