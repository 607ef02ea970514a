// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::EditEvent;

/// Modifier keys held down during a key press. Shift is not tracked, since it is already
/// reflected in the char that was produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        meta: false,
    };

    #[must_use]
    pub fn is_none(&self) -> bool { !(self.ctrl || self.alt || self.meta) }
}

/// A key as a browser reports it in `KeyboardEvent.key`. Named keys parse from their DOM
/// names (eg: `"ArrowLeft"`), anything else that is a single code point is a
/// [`RawKey::Char`].
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::EnumString)]
pub enum RawKey {
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    #[strum(disabled)]
    Char(char),
    /// Named keys the editor doesn't use (`"F5"`, `"PageUp"`, `"Shift"`, ...).
    #[strum(default)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: RawKey,
    pub modifiers: Modifiers,
}

impl RawKeyEvent {
    #[must_use]
    pub fn new(key: RawKey, modifiers: Modifiers) -> Self { Self { key, modifiers } }

    /// Decode a browser `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(name: &str, modifiers: Modifiers) -> Self {
        let mut chars = name.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(ch), None) => RawKey::Char(ch),
            // `EnumString` with a default variant can't fail.
            _ => RawKey::from_str(name).unwrap_or_else(|_| RawKey::Other(name.to_string())),
        };
        Self { key, modifiers }
    }
}

impl From<KeyEvent> for RawKeyEvent {
    fn from(event: KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Enter => RawKey::Enter,
            KeyCode::Backspace => RawKey::Backspace,
            KeyCode::Tab => RawKey::Tab,
            KeyCode::Delete => RawKey::Delete,
            KeyCode::Home => RawKey::Home,
            KeyCode::End => RawKey::End,
            KeyCode::Esc => RawKey::Escape,
            KeyCode::Up => RawKey::ArrowUp,
            KeyCode::Down => RawKey::ArrowDown,
            KeyCode::Left => RawKey::ArrowLeft,
            KeyCode::Right => RawKey::ArrowRight,
            KeyCode::Char(ch) => RawKey::Char(ch),
            other => RawKey::Other(format!("{other:?}")),
        };
        let modifiers = Modifiers {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            meta: event
                .modifiers
                .intersects(KeyModifiers::META | KeyModifiers::SUPER),
        };
        Self { key, modifiers }
    }
}

/// Map a physical key press onto an [`EditEvent`]. Keys with no meaning for the editor
/// (and printable chars typed with `Ctrl`, `Alt` or `Meta` held) map to [None].
///
/// The checks run in a fixed order: named editing keys first, then the `Ctrl`
/// shortcuts, then plain printable chars. So eg: `Ctrl+ArrowLeft` is still
/// [`EditEvent::MoveLeft`].
#[must_use]
pub fn map_raw_key(event: &RawKeyEvent) -> Option<EditEvent> {
    let RawKeyEvent { key, modifiers } = event;
    let it = match key {
        RawKey::Enter => EditEvent::Submit,
        RawKey::Backspace => EditEvent::Backspace,
        RawKey::Tab => EditEvent::CompleteRequest,
        RawKey::ArrowLeft => EditEvent::MoveLeft,
        RawKey::ArrowRight => EditEvent::MoveRight,
        RawKey::ArrowUp => EditEvent::HistoryPrev,
        RawKey::ArrowDown => EditEvent::HistoryNext,
        RawKey::Char(ch) if modifiers.ctrl => match ch.to_ascii_lowercase() {
            'c' => EditEvent::Interrupt,
            'l' => EditEvent::ClearScreen,
            'a' => EditEvent::Home,
            'e' => EditEvent::End,
            _ => return None,
        },
        RawKey::Delete => EditEvent::Delete,
        RawKey::Home => EditEvent::Home,
        RawKey::End => EditEvent::End,
        RawKey::Char(ch) if modifiers.is_none() && !ch.is_control() => {
            EditEvent::PrintableChar(*ch)
        }
        _ => return None,
    };
    Some(it)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("Enter", RawKey::Enter)]
    #[test_case("ArrowLeft", RawKey::ArrowLeft)]
    #[test_case("Delete", RawKey::Delete)]
    #[test_case("a", RawKey::Char('a'))]
    #[test_case(" ", RawKey::Char(' '))]
    #[test_case("é", RawKey::Char('é'))]
    #[test_case("PageUp", RawKey::Other("PageUp".into()))]
    #[test_case("", RawKey::Other(String::new()))]
    fn test_from_dom_key(name: &str, expected: RawKey) {
        assert_eq!(RawKeyEvent::from_dom_key(name, Modifiers::NONE).key, expected);
    }

    #[test_case("Enter", Modifiers::NONE, Some(EditEvent::Submit))]
    #[test_case("Backspace", Modifiers::NONE, Some(EditEvent::Backspace))]
    #[test_case("Tab", Modifiers::NONE, Some(EditEvent::CompleteRequest))]
    #[test_case("ArrowUp", Modifiers::NONE, Some(EditEvent::HistoryPrev))]
    #[test_case("ArrowDown", Modifiers::NONE, Some(EditEvent::HistoryNext))]
    #[test_case("ArrowLeft", Modifiers::CTRL, Some(EditEvent::MoveLeft))]
    #[test_case("c", Modifiers::CTRL, Some(EditEvent::Interrupt))]
    #[test_case("L", Modifiers::CTRL, Some(EditEvent::ClearScreen))]
    #[test_case("a", Modifiers::CTRL, Some(EditEvent::Home))]
    #[test_case("e", Modifiers::CTRL, Some(EditEvent::End))]
    #[test_case("x", Modifiers::CTRL, None)]
    #[test_case("Home", Modifiers::NONE, Some(EditEvent::Home))]
    #[test_case("End", Modifiers::NONE, Some(EditEvent::End))]
    #[test_case("Delete", Modifiers::NONE, Some(EditEvent::Delete))]
    #[test_case("q", Modifiers::NONE, Some(EditEvent::PrintableChar('q')))]
    #[test_case("Escape", Modifiers::NONE, None)]
    #[test_case("F1", Modifiers::NONE, None)]
    fn test_map_raw_key(name: &str, modifiers: Modifiers, expected: Option<EditEvent>) {
        let event = RawKeyEvent::from_dom_key(name, modifiers);
        assert_eq!(map_raw_key(&event), expected);
    }

    #[test]
    fn test_printable_with_alt_or_meta_is_ignored() {
        for modifiers in [
            Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            },
        ] {
            let event = RawKeyEvent::from_dom_key("b", modifiers);
            assert_eq!(map_raw_key(&event), None);
        }
    }

    #[test]
    fn test_from_crossterm_key_event() {
        let event: RawKeyEvent =
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL).into();
        assert_eq!(event, RawKeyEvent::new(RawKey::Char('c'), Modifiers::CTRL));
        assert_eq!(map_raw_key(&event), Some(EditEvent::Interrupt));

        let event: RawKeyEvent = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE).into();
        assert_eq!(map_raw_key(&event), Some(EditEvent::MoveLeft));

        let event: RawKeyEvent = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE).into();
        assert_eq!(event.key, RawKey::Other("F(5)".into()));
    }
}
