//! # Resource Abstractions
//!
//! Shared vocabulary for the two record kinds: the kind tag, the opaque
//! server-assigned id, and the [`Resource`] trait the HTTP client is generic over.

use super::book::{Book, BookFields};
use super::form::{FormError, FormSnapshot, FormState};
use super::student::{Student, StudentFields};
use crate::app::views::list_renderer::Card;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two resource kinds managed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Student,
    Book,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Student, ResourceKind::Book];

    /// Collection name used in `/api/{collection}`
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::Student => "students",
            ResourceKind::Book => "books",
        }
    }

    /// Lowercase singular, as used in messages ("Error adding student")
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Student => "student",
            ResourceKind::Book => "book",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Student => "Student",
            ResourceKind::Book => "Book",
        }
    }

    /// Tab label
    pub fn plural_title(self) -> &'static str {
        match self {
            ResourceKind::Student => "Students",
            ResourceKind::Book => "Books",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ResourceKind::Student => "👨‍🎓",
            ResourceKind::Book => "📖",
        }
    }

    pub fn other(self) -> Self {
        match self {
            ResourceKind::Student => ResourceKind::Book,
            ResourceKind::Book => ResourceKind::Student,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Opaque, server-assigned record identifier.
///
/// Client code only ever obtains one by deserializing a server response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Mint an id on the server side of a transport. Only `MemoryBackend`
    /// and tests call this; everything else deserializes ids.
    #[doc(hidden)]
    pub fn assigned(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record kind that can be listed, fetched, created, updated and deleted
pub trait Resource:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ResourceKind;

    /// Every field except the id; sent on create and as the full replacement on update
    type Fields: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn id(&self) -> &RecordId;

    fn fields(&self) -> Self::Fields;

    /// Display card for the list region
    fn card(&self) -> Card;

    /// Empty creation form
    fn blank_form() -> FormState;

    /// Edit form pre-filled with this record's current values
    fn edit_form(&self) -> FormState;

    /// Convert a validated form snapshot into a field set
    fn fields_from_snapshot(snapshot: &FormSnapshot) -> Result<Self::Fields, FormError>;
}

/// A field set of either kind, so operations can cross the controller without generics
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSet {
    Student(StudentFields),
    Book(BookFields),
}

impl FieldSet {
    pub fn kind(&self) -> ResourceKind {
        match self {
            FieldSet::Student(_) => ResourceKind::Student,
            FieldSet::Book(_) => ResourceKind::Book,
        }
    }

    /// Validate a snapshot and build the field set for `kind`
    pub fn from_snapshot(kind: ResourceKind, snapshot: &FormSnapshot) -> Result<Self, FormError> {
        match kind {
            ResourceKind::Student => Student::fields_from_snapshot(snapshot).map(FieldSet::Student),
            ResourceKind::Book => Book::fields_from_snapshot(snapshot).map(FieldSet::Book),
        }
    }
}

/// Empty creation form for `kind`
pub fn blank_form(kind: ResourceKind) -> FormState {
    match kind {
        ResourceKind::Student => Student::blank_form(),
        ResourceKind::Book => Book::blank_form(),
    }
}
