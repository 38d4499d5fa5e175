//! Save/delete state machine.
//!
//! ```text
//! Idle -> Validating -> Invalid                       -> Idle
//!                    -> Submitting -> Success | Failed -> Idle
//! Idle -> Deleting   -> Success | Failed               -> Idle
//! ```
//!
//! Validating is synchronous, so only `Submitting` and `Deleting` are
//! observable through [`Orchestrator::phase`]. While one of them is active,
//! further requests return `Busy` without touching the store.
use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

use api_types::operation::Operation;

use crate::{
    error::{FieldError, StoreError},
    form::{FormState, OperationId},
    store::OperationStore,
    validate::validate,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    Submitting = 1,
    Deleting = 2,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Submitting,
            2 => Self::Deleting,
            _ => Self::Idle,
        }
    }
}

/// Why a store call failed, as far as the user is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCause {
    /// The server answered with an error status.
    Rejected,
    /// The server could not be reached.
    Unreachable,
}

/// Transient notification for a failed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub cause: FailureCause,
    pub message: String,
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Create,
    Update,
    Delete,
}

impl Notice {
    fn for_failure(action: Action, err: &StoreError) -> Self {
        match err {
            StoreError::Rejected { .. } => Self {
                cause: FailureCause::Rejected,
                message: match action {
                    Action::Create => "failed to save operation",
                    Action::Update => "failed to update operation",
                    Action::Delete => "failed to delete operation",
                }
                .to_string(),
            },
            StoreError::Transport(description) => Self {
                cause: FailureCause::Unreachable,
                message: format!("network error: {description}"),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Stored; the editor should close. Carries the server's copy if any.
    Saved(Option<Operation>),
    /// Nothing was sent; show the error on its field.
    Invalid(FieldError),
    /// The call failed; the form stays as it is.
    Failed(Notice),
    /// Another call is still in flight.
    Busy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The form has no persisted id; nothing to delete.
    Skipped,
    Failed(Notice),
    Busy,
}

/// Resets the shared phase to idle when the call finishes, however it
/// finishes.
struct PhaseGuard {
    phase: Arc<AtomicU8>,
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        self.phase.store(Phase::Idle as u8, Ordering::Release);
    }
}

/// Drives form submission and deletion against a store.
///
/// Clones share the store and the phase, so a clone moved into a spawned
/// task still blocks re-entrant requests made through this handle.
pub struct Orchestrator<S> {
    store: Arc<S>,
    phase: Arc<AtomicU8>,
}

impl<S> Clone for Orchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            phase: Arc::clone(&self.phase),
        }
    }
}

impl<S: OperationStore> Orchestrator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            phase: Arc::new(AtomicU8::new(Phase::Idle as u8)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    fn enter(&self, phase: Phase) -> Option<PhaseGuard> {
        self.phase
            .compare_exchange(
                Phase::Idle as u8,
                phase as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| PhaseGuard {
                phase: Arc::clone(&self.phase),
            })
    }

    /// Fetches the record to edit.
    ///
    /// Failures are logged and reported as `None`: the editor then simply
    /// starts blank.
    pub async fn load(&self, id: Option<OperationId>) -> Option<Operation> {
        let id = id?;
        tracing::debug!(%id, "loading operation");
        match self.store.get(id).await {
            Ok(operation) => Some(operation),
            Err(err) => {
                tracing::warn!(%id, "failed to load operation: {err}");
                None
            }
        }
    }

    /// Validates the form and creates or updates the operation.
    pub async fn submit(&self, form: &FormState) -> SubmitOutcome {
        if self.phase() != Phase::Idle {
            tracing::debug!("save ignored: call in flight");
            return SubmitOutcome::Busy;
        }

        let operation = match validate(form) {
            Ok(operation) => operation,
            Err(err) => {
                tracing::debug!(field = ?err.field(), "validation failed: {err}");
                return SubmitOutcome::Invalid(err);
            }
        };

        let Some(_guard) = self.enter(Phase::Submitting) else {
            tracing::debug!("save ignored: call in flight");
            return SubmitOutcome::Busy;
        };

        let (action, result) = match form.operation_id {
            Some(id) => {
                tracing::debug!(%id, ?operation, "updating operation");
                (Action::Update, self.store.update(id, &operation).await)
            }
            None => {
                tracing::debug!(?operation, "creating operation");
                (Action::Create, self.store.create(&operation).await)
            }
        };

        match result {
            Ok(saved) => {
                tracing::info!(
                    id = ?saved.as_ref().and_then(|op| op.id),
                    "operation saved"
                );
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                tracing::error!(?action, "failed to store operation: {err}");
                SubmitOutcome::Failed(Notice::for_failure(action, &err))
            }
        }
    }

    /// Deletes the persisted operation. No confirmation, no validation.
    pub async fn delete(&self, form: &FormState) -> DeleteOutcome {
        let Some(id) = form.operation_id else {
            return DeleteOutcome::Skipped;
        };

        let Some(_guard) = self.enter(Phase::Deleting) else {
            tracing::debug!("delete ignored: call in flight");
            return DeleteOutcome::Busy;
        };

        tracing::debug!(%id, "deleting operation");
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "operation deleted");
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::error!(%id, "failed to delete operation: {err}");
                DeleteOutcome::Failed(Notice::for_failure(Action::Delete, &err))
            }
        }
    }
}
