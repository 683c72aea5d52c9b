//! # Rosterline - Terminal Client for Students and Books
//!
//! Browse, create, edit and delete student and book records held by a REST
//! server, from one full-screen terminal view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  ViewEvents  ┌──────────────┐   Outcomes   ┌────────────┐
//! │    View     │◄─────────────│   AppState   │◄─────────────│ Dispatcher │
//! │             │              │              │              │            │
//! │ - Terminal  │              │ - Tabs/Forms │              │ - Spawned  │
//! │ - Rendering │              │ - Lists      │              │   requests │
//! │ - Modal     │              │ - Session    │              │            │
//! └─────────────┘              └──────────────┘              └────────────┘
//!                                      ▲                            ▲
//!                                      │ Commands                   │ Operations
//!                                      ▼                            │
//!                               ┌──────────────┐                    │
//!                               │  Controller  │────────────────────┘
//!                               │ - Input      │
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```

pub mod app;
pub mod cmd_args;
pub mod config;
pub mod logging;

pub use app::{AppController, AppState, OperationFailed, TerminalAppController};
pub use cmd_args::CommandLineArgs;
pub use config::ClientConfig;
