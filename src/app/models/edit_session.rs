//! # Edit Session
//!
//! At most one record is edited at a time. The session is an explicit value
//! owned by the app state; the modal renderer borrows it.
//!
//! ```text
//!            begin_open            finish_open
//!   Closed ─────────────▶ Opening ─────────────▶ Open ◀──────┐
//!     ▲  ▲                   │ abort_open         │          │ finish_submit(false)
//!     │  └───────────────────┘                    │          │
//!     │                  dismiss                  │ mark_submitting
//!     ├───────────────────────────────────────────┤          │
//!     │            finish_submit(true)            ▼          │
//!     └─────────────────────────────────────── Submitting ───┘
//! ```

use super::form::{FormSnapshot, FormState};
use super::resource::{RecordId, ResourceKind};
use thiserror::Error;

/// The record being edited
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditTarget {
    pub id: RecordId,
    pub kind: ResourceKind,
}

impl EditTarget {
    pub fn new(id: RecordId, kind: ResourceKind) -> Self {
        Self { id, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession {
    Closed,
    /// Fresh copy of the record is being fetched; no modal yet
    Opening { target: EditTarget },
    Open { target: EditTarget, form: FormState },
    /// Update request in flight; input is frozen until it resolves
    Submitting { target: EditTarget, form: FormState },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditSessionError {
    #[error("an edit session is already active")]
    AlreadyActive,
    #[error("no edit session is open")]
    NotOpen,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::Closed
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::Closed
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Whether the modal is on screen
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Submitting { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn target(&self) -> Option<&EditTarget> {
        match self {
            Self::Closed => None,
            Self::Opening { target }
            | Self::Open { target, .. }
            | Self::Submitting { target, .. } => Some(target),
        }
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            Self::Open { form, .. } | Self::Submitting { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Editable form, only while Open
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Self::Open { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Closed → Opening. Rejected in any other state.
    pub fn begin_open(&mut self, target: EditTarget) -> Result<(), EditSessionError> {
        if !self.is_closed() {
            return Err(EditSessionError::AlreadyActive);
        }
        *self = Self::Opening { target };
        Ok(())
    }

    /// Opening → Open once the fetched record arrives. Stale fetches are ignored.
    pub fn finish_open(&mut self, target: &EditTarget, form: FormState) -> bool {
        match self {
            Self::Opening { target: pending } if pending == target => {
                *self = Self::Open {
                    target: target.clone(),
                    form,
                };
                true
            }
            _ => false,
        }
    }

    /// Opening → Closed when the fetch failed
    pub fn abort_open(&mut self, target: &EditTarget) -> bool {
        match self {
            Self::Opening { target: pending } if pending == target => {
                *self = Self::Closed;
                true
            }
            _ => false,
        }
    }

    /// Cancel or outside-click. Has no effect while Submitting.
    pub fn dismiss(&mut self) -> bool {
        match self {
            Self::Opening { .. } | Self::Open { .. } => {
                *self = Self::Closed;
                true
            }
            Self::Closed | Self::Submitting { .. } => false,
        }
    }

    /// Snapshot of the open form together with its target
    pub fn snapshot(&self) -> Result<(EditTarget, FormSnapshot), EditSessionError> {
        match self {
            Self::Open { target, form } => Ok((target.clone(), form.snapshot())),
            _ => Err(EditSessionError::NotOpen),
        }
    }

    /// Open → Submitting
    pub fn mark_submitting(&mut self) -> Result<(), EditSessionError> {
        match std::mem::take(self) {
            Self::Open { target, form } => {
                *self = Self::Submitting { target, form };
                Ok(())
            }
            other => {
                *self = other;
                Err(EditSessionError::NotOpen)
            }
        }
    }

    /// Submitting → Closed on success, back to Open (edits intact) on failure
    pub fn finish_submit(&mut self, target: &EditTarget, succeeded: bool) -> bool {
        match std::mem::take(self) {
            Self::Submitting {
                target: pending,
                form,
            } if &pending == target => {
                if !succeeded {
                    *self = Self::Open {
                        target: pending,
                        form,
                    };
                }
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }
}
