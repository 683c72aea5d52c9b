//! # Events Module
//!
//! Re-exports event types used between commands, state and views.

pub mod types;
pub mod view_events;

pub use types::{Focus, InputMode};
pub use view_events::ViewEvent;
