#![forbid(unsafe_code)]

//! Raw input vocabulary the adapters understand.

use dragline_core::ActivateKey;

/// Keys relevant to drag handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Arrow(Direction),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" | "Up" => Self::Arrow(Direction::Up),
            "ArrowDown" | "Down" => Self::Arrow(Direction::Down),
            "ArrowLeft" | "Left" => Self::Arrow(Direction::Left),
            "ArrowRight" | "Right" => Self::Arrow(Direction::Right),
            _ => Self::Other,
        }
    }

    /// The activation key this is, if any.
    #[must_use]
    pub const fn as_activate(self) -> Option<ActivateKey> {
        match self {
            Self::Space => Some(ActivateKey::Space),
            Self::Enter => Some(ActivateKey::Enter),
            _ => None,
        }
    }
}

/// Arrow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Down and Right step forward through containers.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }

    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Window-level events, delivered only while a session's listeners are
/// attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalEvent {
    PointerUp,
    PointerCancel,
    /// The window lost focus.
    Blur,
    KeyDown(Key),
}
