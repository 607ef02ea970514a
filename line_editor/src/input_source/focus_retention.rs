// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{sync::Arc, time::Duration};

use tokio::{runtime::Handle, task::JoinHandle};

use crate::DEFAULT_REFOCUS_DELAY;

/// Focus control over the virtual text field, implemented by the host.
pub trait FocusControl: Send + Sync {
    fn is_focused(&self) -> bool;

    fn focus(&self);
}

/// Keeps the virtual text field focused, so the on screen keyboard doesn't go away when
/// the user taps elsewhere on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRetention {
    pub delay: Duration,
}

impl Default for FocusRetention {
    fn default() -> Self {
        Self {
            delay: DEFAULT_REFOCUS_DELAY,
        }
    }
}

impl FocusRetention {
    #[must_use]
    pub fn new(delay: Duration) -> Self { Self { delay } }

    /// Fire and forget: after [`Self::delay`], focus `target` unless something already
    /// did. Nothing needs to await the returned handle. Input that arrives before the
    /// task runs is handled normally.
    ///
    /// Returns [None], and schedules nothing, when called outside a tokio runtime.
    pub fn schedule_refocus(&self, target: Arc<dyn FocusControl>) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(message = "No tokio runtime, virtual input field won't be refocused.");
            return None;
        };
        let delay = self.delay;
        Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if target.is_focused() {
                return;
            }
            target.focus();
            tracing::trace!(message = "Refocused virtual input field.");
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::FocusMock;

    #[tokio::test]
    async fn test_refocus_after_delay() {
        let field = Arc::new(FocusMock::new(false));
        let handle = FocusRetention::new(Duration::from_millis(20))
            .schedule_refocus(field.clone())
            .unwrap();

        // Nothing happens right away.
        assert_eq!(field.focus_count(), 0);

        handle.await.unwrap();
        assert_eq!(field.focus_count(), 1);
        assert!(field.is_focused());
    }

    #[tokio::test]
    async fn test_no_refocus_when_already_focused() {
        let field = Arc::new(FocusMock::new(false));
        let handle = FocusRetention::new(Duration::from_millis(10))
            .schedule_refocus(field.clone())
            .unwrap();

        // The user tapped back into the field before the task ran.
        field.focus();

        handle.await.unwrap();
        assert_eq!(field.focus_count(), 1);
    }

    #[test]
    fn test_no_runtime_schedules_nothing() {
        let field = Arc::new(FocusMock::new(false));
        let handle =
            FocusRetention::new(Duration::from_millis(1)).schedule_refocus(field.clone());

        assert!(handle.is_none());
        assert_eq!(field.focus_count(), 0);
    }
}
