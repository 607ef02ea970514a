// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::InputBuffer;

/// User agent fragments of devices that bring up an on screen keyboard, matched case
/// insensitively.
pub const TOUCH_USER_AGENT_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Whether the browser identified by `user_agent` needs a virtual text field to get an
/// on screen keyboard.
#[must_use]
pub fn is_touch_user_agent(user_agent: &str) -> bool {
    let user_agent = user_agent.to_lowercase();
    TOUCH_USER_AGENT_MARKERS
        .iter()
        .any(|marker| user_agent.contains(marker))
}

/// A copy of the line that lives in the virtual text field on touch devices. It is never
/// the source of truth: whenever it and the [`InputBuffer`] disagree, the buffer wins
/// and gets copied over.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SecondaryInputMirror {
    mirrored_text: String,
}

impl SecondaryInputMirror {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// What the host should show in the field.
    #[must_use]
    pub fn text(&self) -> &str { &self.mirrored_text }

    /// Record what the user typed into the field.
    pub fn set(&mut self, value: &str) {
        value.clone_into(&mut self.mirrored_text);
    }

    pub fn clear(&mut self) { self.mirrored_text.clear(); }

    /// Overwrite with the buffer text. Returns whether anything changed, ie: whether the
    /// host has to update the field.
    pub fn sync_from(&mut self, buffer: &InputBuffer) -> bool {
        if self.mirrored_text == buffer.text() {
            return false;
        }
        self.set(buffer.text());
        true
    }

    #[must_use]
    pub fn is_in_sync_with(&self, buffer: &InputBuffer) -> bool {
        self.mirrored_text == buffer.text()
    }
}
