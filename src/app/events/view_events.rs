//! # View Events
//!
//! Emitted by the app state when something on screen is stale. The
//! controller batches them and asks the renderer for the cheapest redraw.

use crate::app::models::ResourceKind;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Full screen redraw required (resize, tab switch, modal open/close)
    FullRedrawRequired,

    /// List region of one kind changed
    ListChanged { kind: ResourceKind },

    /// Creation form of the active tab changed
    FormChanged,

    /// Edit modal content changed
    ModalChanged,

    /// Status bar needs updating (notifications, in-flight indicator, prompts)
    StatusBarUpdateRequired,
}
