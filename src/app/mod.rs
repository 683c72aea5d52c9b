//! # Application Layer
//!
//! - `models`: resources, forms, edit session and notifications
//! - `view_models`: the single-owner [`AppState`]
//! - `views`: layout and terminal rendering
//! - `commands`: key events to command events
//! - `services`: HTTP transport, resource clients and the operation dispatcher
//! - `controllers`: the event loop

pub mod commands;
pub mod controllers;
pub mod error;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

pub use controllers::{AppController, TerminalAppController};
pub use error::OperationFailed;
pub use view_models::AppState;
