//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands only suggest; the controller decides against the current state.

use crate::app::events::Focus;
use crate::app::models::ResourceKind;

/// Direction for list selection and form field focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Quit the application
    QuitRequested,

    /// Show the tab of `kind`
    TabSelectRequested { kind: ResourceKind },

    /// Show the other tab
    TabCycleRequested,

    /// Move keyboard focus between form and list
    FocusChangeRequested { focus: Focus },

    /// Move the list selection
    SelectionMoveRequested { direction: MoveDirection },

    /// Move focus between form fields (Down = next)
    FieldFocusRequested { direction: MoveDirection },

    /// Type a character into the focused field
    CharInsertRequested { ch: char },

    /// Delete the last character of the focused field
    BackspaceRequested,

    /// Submit the creation form of the active tab
    CreateSubmitRequested,

    /// Open the edit modal for the selected card
    EditRequested,

    /// Ask for confirmation to delete the selected card
    DeleteRequested,

    /// Answer to the delete prompt
    DeleteConfirmationAnswered { confirmed: bool },

    /// Reload the active tab's list
    RefreshRequested,

    /// Submit the edit modal
    ModalSaveRequested,

    /// Close the edit modal without saving
    ModalCancelRequested,
}

impl CommandEvent {
    pub fn field_move(direction: MoveDirection) -> Self {
        Self::FieldFocusRequested { direction }
    }

    pub fn selection_move(direction: MoveDirection) -> Self {
        Self::SelectionMoveRequested { direction }
    }
}
