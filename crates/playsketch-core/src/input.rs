//! Pointer and keyboard events fed to the canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// A key press, named the way browsers name `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// The editor command bound to this key press, if any.
    pub fn command(&self) -> Option<KeyCommand> {
        let key = self.key.as_str();
        if self.modifiers.command() {
            return match key {
                "z" | "Z" if self.modifiers.shift => Some(KeyCommand::Redo),
                "z" | "Z" => Some(KeyCommand::Undo),
                "y" | "Y" => Some(KeyCommand::Redo),
                _ => None,
            };
        }
        match key {
            "Delete" | "Backspace" => Some(KeyCommand::DeleteSelected),
            "Escape" => Some(KeyCommand::Cancel),
            _ => None,
        }
    }
}

/// Commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    DeleteSelected,
    Cancel,
    Undo,
    Redo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(shift: bool) -> Modifiers {
        Modifiers {
            ctrl: true,
            shift,
            ..Default::default()
        }
    }

    #[test]
    fn test_delete_keys() {
        assert_eq!(KeyPress::new("Delete").command(), Some(KeyCommand::DeleteSelected));
        assert_eq!(KeyPress::new("Backspace").command(), Some(KeyCommand::DeleteSelected));
        assert_eq!(KeyPress::new("Escape").command(), Some(KeyCommand::Cancel));
        assert_eq!(KeyPress::new("a").command(), None);
    }

    #[test]
    fn test_undo_redo_shortcuts() {
        assert_eq!(KeyPress::with_modifiers("z", ctrl(false)).command(), Some(KeyCommand::Undo));
        assert_eq!(KeyPress::with_modifiers("Z", ctrl(true)).command(), Some(KeyCommand::Redo));
        assert_eq!(KeyPress::with_modifiers("y", ctrl(false)).command(), Some(KeyCommand::Redo));

        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert_eq!(KeyPress::with_modifiers("z", meta).command(), Some(KeyCommand::Undo));
        // Plain "z" is just a letter.
        assert_eq!(KeyPress::new("z").command(), None);
        // Ctrl+Backspace is not bound.
        assert_eq!(KeyPress::with_modifiers("Backspace", ctrl(false)).command(), None);
    }

    #[test]
    fn test_pointer_event_serde() {
        let event = PointerEvent::Down {
            position: Point::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PointerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_key_press_modifiers_default() {
        let key: KeyPress = serde_json::from_str(r#"{"key": "Delete"}"#).unwrap();
        assert_eq!(key.modifiers, Modifiers::default());
    }
}
