// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_buffer;

// Re-export.
pub use input_buffer::*;
