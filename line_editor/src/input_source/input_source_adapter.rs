// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use super::{FocusControl, FocusRetention, RawKeyEvent, SecondaryInputMirror,
            is_touch_user_agent, map_raw_key};
use crate::{Collaborators, DispatchOutcome, EditEvent, LineEditorError, SessionState,
            dispatch};

/// Feeds both input sources into [`dispatch()`].
///
/// - Physical keys go through [`map_raw_key`].
/// - The virtual text field (present only when [`Self::mirror`] is [Some]) sends its
///   whole value on every change, which becomes [`EditEvent::ReplaceAll`].
///
/// After every physical key the mirror is overwritten from the buffer, so the field
/// always shows the line the terminal shows.
#[derive(Debug, Default)]
pub struct InputSourceAdapter {
    pub mirror: Option<SecondaryInputMirror>,
    pub focus_retention: FocusRetention,
}

impl InputSourceAdapter {
    #[must_use]
    pub fn new(has_virtual_field: bool, refocus_delay: Duration) -> Self {
        Self {
            mirror: has_virtual_field.then(SecondaryInputMirror::new),
            focus_retention: FocusRetention::new(refocus_delay),
        }
    }

    /// Only touch devices get a virtual field.
    #[must_use]
    pub fn new_for_user_agent(user_agent: &str, refocus_delay: Duration) -> Self {
        Self::new(is_touch_user_agent(user_agent), refocus_delay)
    }

    /// What the host should show in the virtual field, if there is one.
    #[must_use]
    pub fn mirror_text(&self) -> Option<&str> {
        self.mirror.as_ref().map(SecondaryInputMirror::text)
    }

    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn handle_physical_key(
        &mut self,
        key: &RawKeyEvent,
        session: &mut SessionState,
        collaborators: &mut Collaborators<'_>,
    ) -> Result<DispatchOutcome, LineEditorError> {
        let outcome = match map_raw_key(key) {
            Some(event) => dispatch(session, event, collaborators)?,
            None => {
                // % is Display, ? is Debug.
                tracing::trace!(message = "Ignoring key.", key = ?key);
                DispatchOutcome::Unchanged
            }
        };
        self.sync_mirror(session);
        Ok(outcome)
    }

    /// The virtual field's value changed to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn handle_virtual_input(
        &mut self,
        value: &str,
        session: &mut SessionState,
        collaborators: &mut Collaborators<'_>,
    ) -> Result<DispatchOutcome, LineEditorError> {
        if let Some(mirror) = &mut self.mirror {
            mirror.set(value);
        }
        dispatch(session, EditEvent::ReplaceAll(value.to_string()), collaborators)
    }

    /// `Enter` in the virtual field. The field is emptied first, then the line is
    /// submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn handle_virtual_submit(
        &mut self,
        session: &mut SessionState,
        collaborators: &mut Collaborators<'_>,
    ) -> Result<DispatchOutcome, LineEditorError> {
        if let Some(mirror) = &mut self.mirror {
            mirror.clear();
        }
        dispatch(session, EditEvent::Submit, collaborators)
    }

    /// The user tapped the terminal or the field. Load the current line into the field
    /// so that editing continues from there.
    pub fn handle_virtual_focus(&mut self, session: &SessionState) { self.sync_mirror(session); }

    /// The field lost focus. Schedules taking it back, see
    /// [`FocusRetention::schedule_refocus`]. Returns [None] when there is no virtual
    /// field, or no tokio runtime to run the refocus on.
    pub fn handle_virtual_blur(&self, field: Arc<dyn FocusControl>) -> Option<JoinHandle<()>> {
        self.mirror
            .as_ref()
            .and_then(|_| self.focus_retention.schedule_refocus(field))
    }

    fn sync_mirror(&mut self, session: &SessionState) {
        if let Some(mirror) = &mut self.mirror {
            mirror.sync_from(session.input());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Modifiers,
                test_fixtures::{EditorHarness, FocusMock}};
    use pretty_assertions::assert_eq;

    fn touch_adapter() -> InputSourceAdapter {
        InputSourceAdapter::new_for_user_agent("Mozilla/5.0 (iPhone)", Duration::from_millis(5))
    }

    fn press(
        adapter: &mut InputSourceAdapter,
        harness: &mut EditorHarness,
        name: &str,
    ) -> DispatchOutcome {
        let key = RawKeyEvent::from_dom_key(name, Modifiers::NONE);
        harness
            .with_collaborators(|session, collaborators| {
                adapter.handle_physical_key(&key, session, collaborators)
            })
            .unwrap()
    }

    #[test]
    fn test_desktop_has_no_mirror() {
        let adapter = InputSourceAdapter::new_for_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
            Duration::from_millis(5),
        );
        assert_eq!(adapter.mirror_text(), None);
    }

    #[test]
    fn test_physical_edit_then_focus_shows_buffer() {
        let mut adapter = touch_adapter();
        let mut harness = EditorHarness::new();

        for name in ["g", "i", "t", "ArrowLeft", "Backspace"] {
            press(&mut adapter, &mut harness, name);
        }
        adapter.handle_virtual_focus(&harness.session);

        assert_eq!(harness.session.input().text(), "gt");
        assert_eq!(adapter.mirror_text(), Some("gt"));
    }

    #[test]
    fn test_unmapped_key_still_resyncs_mirror() {
        let mut adapter = touch_adapter();
        let mut harness = EditorHarness::new();
        press(&mut adapter, &mut harness, "a");
        if let Some(mirror) = &mut adapter.mirror {
            mirror.set("diverged");
        }

        assert_eq!(
            press(&mut adapter, &mut harness, "F7"),
            DispatchOutcome::Unchanged
        );
        assert_eq!(adapter.mirror_text(), Some("a"));
    }

    #[test]
    fn test_virtual_input_replaces_line() {
        let mut adapter = touch_adapter();
        let mut harness = EditorHarness::new();
        press(&mut adapter, &mut harness, "x");

        harness
            .with_collaborators(|session, collaborators| {
                adapter.handle_virtual_input("echo hi", session, collaborators)
            })
            .unwrap();

        assert_eq!(harness.session.input().text(), "echo hi");
        assert_eq!(harness.session.input().cursor(), 7);
        assert_eq!(adapter.mirror_text(), Some("echo hi"));
        harness.assert_screen_in_sync();
    }

    #[test]
    fn test_virtual_submit_clears_field() {
        let mut adapter = touch_adapter();
        let mut harness = EditorHarness::new();
        harness
            .with_collaborators(|session, collaborators| {
                adapter.handle_virtual_input("pwd", session, collaborators)
            })
            .unwrap();

        let outcome = harness
            .with_collaborators(|session, collaborators| {
                adapter.handle_virtual_submit(session, collaborators)
            })
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Submitted("pwd".into()));
        assert_eq!(adapter.mirror_text(), Some(""));
        assert_eq!(harness.interpreter.lines, vec!["pwd".to_string()]);
    }

    #[tokio::test]
    async fn test_blur_refocuses_only_with_virtual_field() {
        let field = Arc::new(FocusMock::new(false));

        let desktop = InputSourceAdapter::new(false, Duration::from_millis(5));
        assert!(desktop.handle_virtual_blur(field.clone()).is_none());

        let handle = touch_adapter().handle_virtual_blur(field.clone());
        handle.unwrap().await.unwrap();
        assert_eq!(field.focus_count(), 1);
    }

    #[test]
    fn test_blur_outside_runtime_is_skipped() {
        let field = Arc::new(FocusMock::new(false));
        assert!(touch_adapter().handle_virtual_blur(field.clone()).is_none());
        assert_eq!(field.focus_count(), 0);
    }
}
