//! # Operation Dispatcher
//!
//! Runs resource operations without blocking the UI. Each operation is
//! spawned as its own task and reports back through a channel; the
//! controller drains the channel on its own task, so all state changes
//! happen in one place. There is no mutual exclusion between operations.

use super::http::{HttpTransport, ResourceClient};
use crate::app::error::OperationFailed;
use crate::app::models::{Book, EditTarget, FieldSet, FormState, RecordId, Resource, ResourceKind, Student};
use crate::app::views::list_renderer::{render_list, Card};
use std::sync::Arc;
use tokio::sync::mpsc;

const OUTCOME_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create { fields: FieldSet },
    List { kind: ResourceKind },
    Fetch { target: EditTarget },
    Update { id: RecordId, fields: FieldSet },
    Delete { kind: ResourceKind, id: RecordId },
}

impl Operation {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Operation::Create { fields } | Operation::Update { fields, .. } => fields.kind(),
            Operation::List { kind } | Operation::Delete { kind, .. } => *kind,
            Operation::Fetch { target } => target.kind,
        }
    }
}

/// Result of one operation, as delivered to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    Created {
        kind: ResourceKind,
        result: Result<(), OperationFailed>,
    },
    Listed {
        kind: ResourceKind,
        result: Result<Vec<Card>, OperationFailed>,
    },
    Fetched {
        target: EditTarget,
        result: Result<FormState, OperationFailed>,
    },
    Updated {
        target: EditTarget,
        result: Result<(), OperationFailed>,
    },
    Deleted {
        kind: ResourceKind,
        id: RecordId,
        result: Result<(), OperationFailed>,
    },
}

impl OperationOutcome {
    pub fn kind(&self) -> ResourceKind {
        match self {
            OperationOutcome::Created { kind, .. }
            | OperationOutcome::Listed { kind, .. }
            | OperationOutcome::Deleted { kind, .. } => *kind,
            OperationOutcome::Fetched { target, .. } | OperationOutcome::Updated { target, .. } => {
                target.kind
            }
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            OperationOutcome::Created { result, .. }
            | OperationOutcome::Updated { result, .. }
            | OperationOutcome::Deleted { result, .. } => result.is_ok(),
            OperationOutcome::Listed { result, .. } => result.is_ok(),
            OperationOutcome::Fetched { result, .. } => result.is_ok(),
        }
    }

    /// User-facing message for this outcome, if it warrants one
    pub fn message(&self) -> Option<String> {
        let kind = self.kind();
        match self {
            OperationOutcome::Created { result, .. } => Some(match result {
                Ok(()) => format!("{} added successfully!", kind.title()),
                Err(e) => format!("Error adding {kind}: {e}"),
            }),
            OperationOutcome::Listed { result, .. } => result
                .as_ref()
                .err()
                .map(|e| format!("Error loading {}: {e}", kind.collection())),
            OperationOutcome::Fetched { result, .. } => result
                .as_ref()
                .err()
                .map(|e| format!("Error getting {kind}: {e}")),
            OperationOutcome::Updated { result, .. } => Some(match result {
                Ok(()) => format!("{} updated successfully!", kind.title()),
                Err(e) => format!("Error updating {kind}: {e}"),
            }),
            OperationOutcome::Deleted { result, .. } => Some(match result {
                Ok(()) => format!("{} deleted successfully!", kind.title()),
                Err(e) => format!("Error deleting {kind}: {e}"),
            }),
        }
    }
}

/// Spawns operations and collects their outcomes
pub struct OperationDispatcher<T: HttpTransport + 'static> {
    transport: Arc<T>,
    outcome_sender: mpsc::Sender<OperationOutcome>,
    outcome_receiver: mpsc::Receiver<OperationOutcome>,
    in_flight: usize,
}

impl<T: HttpTransport + 'static> OperationDispatcher<T> {
    pub fn new(transport: T) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);
        Self {
            transport: Arc::new(transport),
            outcome_sender,
            outcome_receiver,
            in_flight: 0,
        }
    }

    /// Number of operations whose outcome has not been collected yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start an operation in the background
    pub fn dispatch(&mut self, operation: Operation) {
        tracing::debug!("Dispatching {:?}", operation);
        self.in_flight += 1;

        let transport = Arc::clone(&self.transport);
        let sender = self.outcome_sender.clone();
        tokio::spawn(async move {
            let outcome = execute(transport, operation).await;
            // Receiver only goes away on shutdown
            let _ = sender.send(outcome).await;
        });
    }

    /// Collect a finished outcome without waiting
    pub fn poll_outcome(&mut self) -> Option<OperationOutcome> {
        let outcome = self.outcome_receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }

    /// Wait for the next outcome; `None` when nothing is in flight
    pub async fn next_outcome(&mut self) -> Option<OperationOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.outcome_receiver.recv().await?;
        self.in_flight -= 1;
        Some(outcome)
    }
}

async fn execute<T: HttpTransport>(transport: Arc<T>, operation: Operation) -> OperationOutcome {
    let students = ResourceClient::<Student, T>::new(Arc::clone(&transport));
    let books = ResourceClient::<Book, T>::new(transport);

    let outcome = match operation {
        Operation::Create { fields } => {
            let kind = fields.kind();
            let result = match &fields {
                FieldSet::Student(fields) => students.create(fields).await,
                FieldSet::Book(fields) => books.create(fields).await,
            };
            OperationOutcome::Created { kind, result }
        }
        Operation::List { kind } => {
            let result = match kind {
                ResourceKind::Student => list_cards(&students).await,
                ResourceKind::Book => list_cards(&books).await,
            };
            OperationOutcome::Listed { kind, result }
        }
        Operation::Fetch { target } => {
            let result = match target.kind {
                ResourceKind::Student => edit_form(&students, &target.id).await,
                ResourceKind::Book => edit_form(&books, &target.id).await,
            };
            OperationOutcome::Fetched { target, result }
        }
        Operation::Update { id, fields } => {
            let target = EditTarget::new(id, fields.kind());
            let result = match &fields {
                FieldSet::Student(fields) => students.update(&target.id, fields).await,
                FieldSet::Book(fields) => books.update(&target.id, fields).await,
            };
            OperationOutcome::Updated { target, result }
        }
        Operation::Delete { kind, id } => {
            let result = match kind {
                ResourceKind::Student => students.delete(&id).await,
                ResourceKind::Book => books.delete(&id).await,
            };
            OperationOutcome::Deleted { kind, id, result }
        }
    };

    if outcome.is_success() {
        tracing::debug!("Operation on {} succeeded", outcome.kind());
    } else {
        tracing::error!("Operation failed: {:?}", outcome.message());
    }
    outcome
}

async fn list_cards<R: Resource, T: HttpTransport>(
    client: &ResourceClient<R, T>,
) -> Result<Vec<Card>, OperationFailed> {
    client.list_all().await.map(|records| render_list(&records))
}

async fn edit_form<R: Resource, T: HttpTransport>(
    client: &ResourceClient<R, T>,
    id: &RecordId,
) -> Result<FormState, OperationFailed> {
    client.get_one(id).await.map(|record| record.edit_form())
}
