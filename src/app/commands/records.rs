//! # Record Commands
//!
//! Card actions on the selected record and the delete prompt.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{Command, CommandContext, CommandEvent};
use crate::app::events::InputMode;

/// e, d and r on the list
pub struct RecordActionCommand;

impl Command for RecordActionCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::List
            && event.modifiers.is_empty()
            && matches!(
                event.code,
                KeyCode::Char('e') | KeyCode::Char('d') | KeyCode::Char('r')
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let command = match event.code {
            KeyCode::Char('e') => CommandEvent::EditRequested,
            KeyCode::Char('d') => CommandEvent::DeleteRequested,
            _ => CommandEvent::RefreshRequested,
        };
        Ok(vec![command])
    }

    fn name(&self) -> &'static str {
        "RecordAction"
    }
}

/// y/Enter confirms, n/Esc declines; anything else is ignored
pub struct ConfirmDeleteCommand;

impl Command for ConfirmDeleteCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::Confirm
            && matches!(
                event.code,
                KeyCode::Char('y' | 'Y' | 'n' | 'N') | KeyCode::Enter | KeyCode::Esc
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let confirmed = matches!(event.code, KeyCode::Char('y' | 'Y') | KeyCode::Enter);
        Ok(vec![CommandEvent::DeleteConfirmationAnswered { confirmed }])
    }

    fn name(&self) -> &'static str {
        "ConfirmDelete"
    }
}
