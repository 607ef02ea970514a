// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod focus_retention;
pub mod input_source_adapter;
pub mod raw_key;
pub mod secondary_input_mirror;
pub mod session_driver;

// Re-export.
pub use focus_retention::*;
pub use input_source_adapter::*;
pub use raw_key::*;
pub use secondary_input_mirror::*;
pub use session_driver::*;
