//! Keycodes emitted by the engine and modifier key sets.

/// A keycode as reported to the host. These are abstract output codes; the
/// mapping to HID usages (or any other wire format) belongs to the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keycode {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Number row
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Control and whitespace
    Enter, Escape, Backspace, Tab, Space, CapsLock, Delete, Insert,

    // Punctuation
    Minus, Equal, LeftBracket, RightBracket, Backslash,
    Semicolon, Quote, Grave, Comma, Dot, Slash,

    // Navigation
    Home, End, PageUp, PageDown, Left, Right, Up, Down,

    // Modifiers
    LeftCtrl, LeftShift, LeftAlt, LeftGui,
    RightCtrl, RightShift, RightAlt, RightGui,

    // Media and system
    Mute, VolumeUp, VolumeDown, MediaPlayPause, MediaNextTrack,
    PrintScreen, Power, Sleep, Calculator, MyComputer,
}

impl Keycode {
    /// Whether this keycode is itself a modifier key.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Keycode::LeftCtrl
                | Keycode::LeftShift
                | Keycode::LeftAlt
                | Keycode::LeftGui
                | Keycode::RightCtrl
                | Keycode::RightShift
                | Keycode::RightAlt
                | Keycode::RightGui
        )
    }
}

/// A set of modifier keys, used by one-shot modifiers and macro wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub gui: bool,
}

impl Modifiers {
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false, gui: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false, gui: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true, gui: false };
    pub const GUI: Self = Self { shift: false, ctrl: false, alt: false, gui: true };

    /// Combines two modifier sets.
    pub fn union(self, other: Self) -> Self {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            gui: self.gui || other.gui,
        }
    }

    /// Checks if any modifier is set.
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.gui
    }

    /// The keycodes for this set, in press order. Releases walk the same
    /// list in reverse.
    pub fn keycodes(self) -> Vec<Keycode> {
        let mut codes = Vec::new();
        if self.ctrl {
            codes.push(Keycode::LeftCtrl);
        }
        if self.alt {
            codes.push(Keycode::LeftAlt);
        }
        if self.gui {
            codes.push(Keycode::LeftGui);
        }
        if self.shift {
            codes.push(Keycode::LeftShift);
        }
        codes
    }
}
