//! # View Models
//!
//! UI state the renderer draws from and the controller mutates.

pub mod app_state;

pub use app_state::{AppState, PendingDelete, TabPanel};
