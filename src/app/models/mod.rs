//! # Models Module
//!
//! Records, forms and the transient client-side state built on them.

pub mod book;
pub mod edit_session;
pub mod form;
pub mod notification;
pub mod resource;
pub mod student;

pub use book::{Book, BookFields};
pub use edit_session::{EditSession, EditSessionError, EditTarget};
pub use form::{FieldKind, FieldValue, FormError, FormField, FormSnapshot, FormState};
pub use notification::{Notification, NotificationCenter, NotificationLevel};
pub use resource::{blank_form, FieldSet, RecordId, Resource, ResourceKind};
pub use student::{Student, StudentFields};
