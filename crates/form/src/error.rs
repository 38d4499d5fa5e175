//! Errors produced by the form controller.
//!
//! - [`FieldError`]: local validation failure, attached to one form field.
//! - [`StoreError`]: a remote store call that did not succeed, split into
//!   server rejections and transport failures.
use thiserror::Error;

/// Form fields that can carry an inline error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Amount,
    Date,
}

/// First failing validation check of a form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("select a type")]
    MissingKind,
    #[error("enter an amount")]
    MissingAmount,
    #[error("enter a valid amount")]
    InvalidAmount,
    #[error("enter a date")]
    MissingDate,
    #[error("date must be YYYY-MM-DD")]
    InvalidDate,
}

impl FieldError {
    /// The field the error is shown on.
    pub fn field(&self) -> Field {
        match self {
            Self::MissingKind => Field::Kind,
            Self::MissingAmount | Self::InvalidAmount => Field::Amount,
            Self::MissingDate | Self::InvalidDate => Field::Date,
        }
    }
}

/// Failure of a remote store call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The server answered with a non-success status.
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The call never completed.
    #[error("server unreachable: {0}")]
    Transport(String),
}
