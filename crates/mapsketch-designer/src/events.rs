//! Input events delivered to the active tool.
//!
//! Pointer positions are canvas (device) coordinates.

use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held when the event was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        control: false,
        alt: false,
    };

    pub const CONTROL: Modifiers = Modifiers {
        shift: false,
        control: true,
        alt: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Shift,
    Control,
    Alt,
    Character(char),
}

impl Key {
    /// Unit direction of an arrow key in map space, `None` for other keys.
    pub fn arrow_direction(&self) -> Option<(f64, f64)> {
        match self {
            Key::ArrowLeft => Some((-1.0, 0.0)),
            Key::ArrowRight => Some((1.0, 0.0)),
            Key::ArrowUp => Some((0.0, -1.0)),
            Key::ArrowDown => Some((0.0, 1.0)),
            _ => None,
        }
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    PointerDown {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        /// Auto-repeat tick of a held key.
        repeat: bool,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
}

impl ToolEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        ToolEvent::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        ToolEvent::PointerMove {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        ToolEvent::PointerUp {
            position: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_down(key: Key) -> Self {
        ToolEvent::KeyDown {
            key,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_repeat(key: Key) -> Self {
        ToolEvent::KeyDown {
            key,
            repeat: true,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_up(key: Key) -> Self {
        ToolEvent::KeyUp {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the same event with `modifiers` replaced.
    pub fn with_modifiers(mut self, new: Modifiers) -> Self {
        match &mut self {
            ToolEvent::PointerDown { modifiers, .. }
            | ToolEvent::PointerMove { modifiers, .. }
            | ToolEvent::PointerUp { modifiers, .. }
            | ToolEvent::KeyDown { modifiers, .. }
            | ToolEvent::KeyUp { modifiers, .. } => *modifiers = new,
        }
        self
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            ToolEvent::PointerDown { modifiers, .. }
            | ToolEvent::PointerMove { modifiers, .. }
            | ToolEvent::PointerUp { modifiers, .. }
            | ToolEvent::KeyDown { modifiers, .. }
            | ToolEvent::KeyUp { modifiers, .. } => *modifiers,
        }
    }
}
