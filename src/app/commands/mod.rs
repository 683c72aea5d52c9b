//! # Command Pattern Implementation
//!
//! Key presses are mapped to [`CommandEvent`]s by stateless commands. Each
//! command checks whether it is relevant for the current input mode; the
//! registry executes the first relevant one. Mouse and resize events do not
//! go through here, the controller handles them directly.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod app;
pub mod context;
pub mod editing;
pub mod events;
pub mod navigation;
pub mod records;

pub use context::{AppSnapshot, CommandContext};
pub use events::{CommandEvent, MoveDirection};

pub trait Command: Send + Sync {
    /// Whether this command handles `event` in the given context
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    fn name(&self) -> &'static str;
}

/// Type alias for command collection to reduce complexity
pub type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Ctrl-C first so it wins in every mode
        self.add_command(Box::new(app::AppTerminateCommand));

        self.add_command(Box::new(records::ConfirmDeleteCommand));

        self.add_command(Box::new(editing::SubmitCommand));
        self.add_command(Box::new(editing::CancelModalCommand));
        self.add_command(Box::new(editing::MoveFieldCommand));
        self.add_command(Box::new(editing::BackspaceCommand));
        self.add_command(Box::new(editing::InsertCharCommand));

        self.add_command(Box::new(navigation::FocusListCommand));
        self.add_command(Box::new(navigation::FocusFormCommand));
        self.add_command(Box::new(navigation::SwitchTabCommand));
        self.add_command(Box::new(navigation::MoveSelectionCommand));
        self.add_command(Box::new(records::RecordActionCommand));
        self.add_command(Box::new(app::QuitCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Map a key event to command events; empty when no command applies
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!(
                    "Command {} handles {:?} in {:?}",
                    command.name(),
                    event.code,
                    context.mode()
                );
                return command.execute(event, context);
            }
        }
        Ok(Vec::new())
    }

    /// Get all commands (for testing/debugging)
    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
