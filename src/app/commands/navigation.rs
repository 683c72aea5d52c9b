//! # Navigation Commands
//!
//! Tab switching, list selection and focus changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, MoveDirection};
use crate::app::events::{Focus, InputMode};
use crate::app::models::ResourceKind;

fn is_plain(event: &KeyEvent) -> bool {
    !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Switch tabs (←/→ cycle, 1/2 select)
pub struct SwitchTabCommand;

impl Command for SwitchTabCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::List
            && is_plain(event)
            && matches!(
                event.code,
                KeyCode::Left | KeyCode::Right | KeyCode::Char('1') | KeyCode::Char('2')
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let command = match event.code {
            KeyCode::Char('1') => CommandEvent::TabSelectRequested {
                kind: ResourceKind::Student,
            },
            KeyCode::Char('2') => CommandEvent::TabSelectRequested {
                kind: ResourceKind::Book,
            },
            _ => CommandEvent::TabCycleRequested,
        };
        Ok(vec![command])
    }

    fn name(&self) -> &'static str {
        "SwitchTab"
    }
}

/// Move list selection (j/k or arrows)
pub struct MoveSelectionCommand;

impl Command for MoveSelectionCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::List
            && is_plain(event)
            && matches!(
                event.code,
                KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Up | KeyCode::Down
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let direction = match event.code {
            KeyCode::Char('k') | KeyCode::Up => MoveDirection::Up,
            _ => MoveDirection::Down,
        };
        Ok(vec![CommandEvent::selection_move(direction)])
    }

    fn name(&self) -> &'static str {
        "MoveSelection"
    }
}

/// Focus the creation form (Tab or a)
pub struct FocusFormCommand;

impl Command for FocusFormCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::List
            && is_plain(event)
            && matches!(event.code, KeyCode::Tab | KeyCode::Char('a'))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusChangeRequested { focus: Focus::Form }])
    }

    fn name(&self) -> &'static str {
        "FocusForm"
    }
}

/// Leave the creation form (Esc)
pub struct FocusListCommand;

impl Command for FocusListCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.mode() == InputMode::Form && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusChangeRequested { focus: Focus::List }])
    }

    fn name(&self) -> &'static str {
        "FocusList"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::tests::context_in;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_should_select_tabs() {
        let context = context_in(InputMode::List);
        let events = SwitchTabCommand.execute(key(KeyCode::Char('2')), &context).unwrap();
        assert_eq!(
            events,
            vec![CommandEvent::TabSelectRequested {
                kind: ResourceKind::Book
            }]
        );
    }

    #[test]
    fn arrows_should_cycle_tabs_only_from_list() {
        assert!(SwitchTabCommand.is_relevant(&context_in(InputMode::List), &key(KeyCode::Right)));
        assert!(!SwitchTabCommand.is_relevant(&context_in(InputMode::Form), &key(KeyCode::Right)));
    }

    #[test]
    fn k_should_move_selection_up() {
        let context = context_in(InputMode::List);
        let events = MoveSelectionCommand
            .execute(key(KeyCode::Char('k')), &context)
            .unwrap();
        assert_eq!(events, vec![CommandEvent::selection_move(MoveDirection::Up)]);
    }

    #[test]
    fn esc_should_leave_form() {
        assert!(FocusListCommand.is_relevant(&context_in(InputMode::Form), &key(KeyCode::Esc)));
        assert!(!FocusListCommand.is_relevant(&context_in(InputMode::Modal), &key(KeyCode::Esc)));
    }
}
