use crate::math::Point2;

/// A keyboard modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
}

/// The set of modifiers held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Returns the set holding only `modifier`.
    #[must_use]
    pub fn only(modifier: Modifier) -> Self {
        let mut set = Self::NONE;
        match modifier {
            Modifier::Shift => set.shift = true,
            Modifier::Control => set.control = true,
            Modifier::Alt => set.alt = true,
        }
        set
    }

    /// Returns `true` if `modifier` is held.
    #[must_use]
    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Control => self.control,
            Modifier::Alt => self.alt,
        }
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Char(char),
}

/// An input event delivered by the host during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to `position` (viewport pixels).
    MouseMove { position: Point2 },
    /// A mouse button was pressed.
    MouseDown { button: MouseButton, modifiers: Modifiers },
    /// The scroll wheel moved; only the sign of `delta` is used.
    Scroll { delta: f64, modifiers: Modifiers },
    /// A key was pressed.
    KeyDown { key: KeyCode, modifiers: Modifiers },
}

/// How the tool reacted to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventResponse {
    /// The event is not the tool's; the host should handle it.
    Ignored,
    /// The tool needs the viewport redrawn; the host may still handle it.
    Repaint,
    /// The tool used the event; the host should not handle it again.
    Consumed,
}
