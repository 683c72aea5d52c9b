//! # Editing Commands
//!
//! Keys that edit the focused form, shared by the creation form and the
//! edit modal.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, MoveDirection};
use crate::app::events::InputMode;

/// Type a character
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode().is_editing()
            && matches!(event.code, KeyCode::Char(_))
            && !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![CommandEvent::CharInsertRequested { ch }]),
            _ => Ok(vec![]),
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

pub struct BackspaceCommand;

impl Command for BackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode().is_editing() && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::BackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

/// Next field (Tab/↓), previous field (Shift-Tab/↑)
pub struct MoveFieldCommand;

impl Command for MoveFieldCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode().is_editing()
            && matches!(
                event.code,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let backwards = matches!(event.code, KeyCode::BackTab | KeyCode::Up)
            || (event.code == KeyCode::Tab && event.modifiers.contains(KeyModifiers::SHIFT));
        let direction = if backwards {
            MoveDirection::Up
        } else {
            MoveDirection::Down
        };
        Ok(vec![CommandEvent::field_move(direction)])
    }

    fn name(&self) -> &'static str {
        "MoveField"
    }
}

/// Enter submits: create in the form, save in the modal
pub struct SubmitCommand;

impl Command for SubmitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode().is_editing() && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match context.mode() {
            InputMode::Modal => Ok(vec![CommandEvent::ModalSaveRequested]),
            _ => Ok(vec![CommandEvent::CreateSubmitRequested]),
        }
    }

    fn name(&self) -> &'static str {
        "Submit"
    }
}

/// Esc closes the modal
pub struct CancelModalCommand;

impl Command for CancelModalCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::Modal && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ModalCancelRequested])
    }

    fn name(&self) -> &'static str {
        "CancelModal"
    }
}
