// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod collaborators;
pub mod edit_event;
pub mod key_dispatch;
pub mod session_state;

// Re-export.
pub use collaborators::*;
pub use edit_event::*;
pub use key_dispatch::*;
pub use session_state::*;
