//! Operation form controller.
//!
//! Everything the operation editor does that is not drawing or transport:
//! validating the form into an [`Operation`], mapping a loaded record back
//! onto the form, capturing/restoring an in-progress edit and driving the
//! save/delete calls against an [`OperationStore`].
//!
//! The crate never touches a terminal or a socket, so every rule here is
//! testable with a plain [`FormState`] and an in-memory store.
//!
//! [`Operation`]: api_types::operation::Operation

pub mod amount;
pub mod category;
pub mod date;
pub mod display;
pub mod error;
pub mod form;
pub mod orchestrator;
pub mod restore;
pub mod store;
pub mod validate;

pub use api_types::operation::{Operation, OperationKind};
pub use category::Category;
pub use display::DisplayState;
pub use error::{Field, FieldError, StoreError};
pub use form::{FormState, OperationId};
pub use orchestrator::{DeleteOutcome, FailureCause, Notice, Orchestrator, Phase, SubmitOutcome};
pub use restore::{SavedForm, capture, restore};
pub use store::OperationStore;
pub use validate::validate;
