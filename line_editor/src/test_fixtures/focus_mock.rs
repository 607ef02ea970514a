// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::FocusControl;

/// A virtual text field that only tracks whether it is focused, and how many times
/// [`FocusControl::focus`] was called.
#[derive(Debug, Default)]
pub struct FocusMock {
    focused: AtomicBool,
    focus_count: AtomicUsize,
}

impl FocusMock {
    #[must_use]
    pub fn new(focused: bool) -> Self {
        Self {
            focused: AtomicBool::new(focused),
            focus_count: AtomicUsize::new(0),
        }
    }

    pub fn blur(&self) { self.focused.store(false, Ordering::SeqCst); }

    #[must_use]
    pub fn focus_count(&self) -> usize { self.focus_count.load(Ordering::SeqCst) }
}

impl FocusControl for FocusMock {
    fn is_focused(&self) -> bool { self.focused.load(Ordering::SeqCst) }

    fn focus(&self) {
        self.focused.store(true, Ordering::SeqCst);
        self.focus_count.fetch_add(1, Ordering::SeqCst);
    }
}
