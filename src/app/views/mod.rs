//! # Views Module
//!
//! Card rendering, screen geometry and the terminal renderer.

pub mod layout;
pub mod list_renderer;
pub mod terminal_renderer;

pub use layout::{modal_rect, Rect, ScreenLayout};
pub use list_renderer::{render_list, Card, ListRegion};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
