//! Toolkit-neutral input events.

use crate::geometry::Point;

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
    DoubleClick,
}

/// A mouse event. Positions are scene coordinates when delivered to a
/// scene and pixel coordinates when delivered to a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, pos: Point) -> Self {
        Self {
            kind,
            pos,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Press, Point::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Release, Point::new(x, y))
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::DoubleClick, Point::new(x, y))
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// Keys the editor view binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Left,
    Right,
    Up,
    Down,
    PageUp,
    Escape,
    Delete,
    Enter,
}
