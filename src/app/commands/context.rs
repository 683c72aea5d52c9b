//! # Command Context
//!
//! Read-only view of the app state handed to commands.

use crate::app::events::{Focus, InputMode};
use crate::app::models::ResourceKind;
use crate::app::view_models::AppState;

/// Read-only snapshot of AppState for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSnapshot {
    pub input_mode: InputMode,
    pub active_tab: ResourceKind,
    pub focus: Focus,
}

impl AppSnapshot {
    pub fn from_app_state(state: &AppState) -> Self {
        Self {
            input_mode: state.input_mode(),
            active_tab: state.active_tab(),
            focus: state.focus(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: AppSnapshot,
}

impl CommandContext {
    pub fn new(state: AppSnapshot) -> Self {
        Self { state }
    }

    pub fn mode(&self) -> InputMode {
        self.state.input_mode
    }
}
