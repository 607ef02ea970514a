// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod redraw_plan;
pub mod render_backend;

// Re-export.
pub use redraw_plan::*;
pub use render_backend::*;
