//! # Core Event Types
//!
//! Focus and input-mode types shared by commands, state and views.

/// Which half of the active tab receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    Form,
    #[default]
    List,
}

/// How key presses are interpreted right now.
///
/// Derived from app state: a pending delete prompt wins over an open modal,
/// which wins over the tab's focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    List,
    Form,
    Modal,
    /// y/n delete confirmation
    Confirm,
}

impl InputMode {
    /// Modes in which printable keys edit a form
    pub fn is_editing(self) -> bool {
        matches!(self, InputMode::Form | InputMode::Modal)
    }
}
