// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod history_log;
pub mod history_store;

// Re-export.
pub use history_log::*;
pub use history_store::*;
