use api_types::operation::{Operation, OperationKind};

use crate::{amount::format_amount, category::Category, form::FormState};

/// What the editor shows for a loaded operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub kind: OperationKind,
    pub amount: String,
    /// `None` when the stored label is not one of the fixed categories.
    pub category: Option<Category>,
    pub date: String,
    pub note: String,
}

impl DisplayState {
    /// Maps a fetched record onto display values.
    ///
    /// Date and note are trusted verbatim; unknown kinds were already folded
    /// into [`OperationKind::Expense`] when the record was read.
    pub fn from_operation(operation: &Operation) -> Self {
        Self {
            kind: operation.kind,
            amount: format_amount(&operation.amount),
            category: Category::from_label(&operation.category),
            date: operation.date.clone(),
            note: operation.note.clone(),
        }
    }
}

impl FormState {
    /// Applies loaded values. An unknown category keeps the current
    /// selection.
    pub fn with_display(self, display: DisplayState) -> Self {
        Self {
            kind: Some(display.kind),
            amount: display.amount,
            category: display.category.unwrap_or(self.category),
            date: display.date,
            note: display.note,
            ..self
        }
    }
}
