//! # Controllers
//!
//! The event loop that ties input, state, rendering and network together.

pub mod app_controller;

pub use app_controller::{AppController, TerminalAppController};
