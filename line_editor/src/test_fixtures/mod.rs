// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod editor_harness;
pub mod focus_mock;
pub mod input_stream_mock;
pub mod screen_model;
pub mod stdout_mock;
pub mod temp_dir;

// Re-export.
pub use editor_harness::*;
pub use focus_mock::*;
pub use input_stream_mock::*;
pub use screen_model::*;
pub use stdout_mock::*;
pub use temp_dir::*;
