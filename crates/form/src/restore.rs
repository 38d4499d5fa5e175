//! Capture and restore of an in-progress edit.
//!
//! The captured bag keeps raw text exactly as displayed. Restoring is not
//! validation: a half-typed amount or a malformed date comes back as is.
use api_types::operation::OperationKind;
use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    form::{FormState, OperationId},
};

/// Id stored for a form that is not persisted yet.
pub const NEW_OPERATION_ID: i64 = -1;

/// Key/value snapshot of the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedForm {
    #[serde(default = "new_operation_id")]
    pub operation_id: i64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

fn new_operation_id() -> i64 {
    NEW_OPERATION_ID
}

impl SavedForm {
    pub fn operation_id(&self) -> Option<OperationId> {
        OperationId::new(self.operation_id)
    }
}

/// Snapshots the form as displayed.
pub fn capture(form: &FormState) -> SavedForm {
    SavedForm {
        operation_id: form
            .operation_id
            .map(OperationId::get)
            .unwrap_or(NEW_OPERATION_ID),
        kind: form.kind.map(|kind| kind.as_str().to_string()),
        amount: Some(form.amount.clone()),
        category: Some(form.category.label().to_string()),
        date: Some(form.date.clone()),
        note: Some(form.note.clone()),
    }
}

/// Writes a snapshot back over `current`.
///
/// A missing or unknown kind label restores as income. An unknown category
/// keeps the current selection. Missing text restores as empty.
pub fn restore(saved: &SavedForm, current: FormState) -> FormState {
    let kind = saved
        .kind
        .as_deref()
        .and_then(OperationKind::from_label)
        .unwrap_or(OperationKind::Income);
    let category = saved
        .category
        .as_deref()
        .and_then(Category::from_label)
        .unwrap_or(current.category);

    FormState {
        operation_id: saved.operation_id(),
        kind: Some(kind),
        amount: saved.amount.clone().unwrap_or_default(),
        category,
        date: saved.date.clone().unwrap_or_default(),
        note: saved.note.clone().unwrap_or_default(),
    }
}
