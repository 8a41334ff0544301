//! Keyboard Events
//!
//! The subset of keyboard input the widget reacts to, with DOM-style
//! default prevention.

/// Key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn parse(name: &str) -> Self {
        match name {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => Self::Other,
        }
    }
}

/// A keyboard event routed into the widget.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false, default_prevented: false }
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Suppress the host's default handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
