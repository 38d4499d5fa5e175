use std::fmt;

use api_types::operation::OperationKind;

use crate::category::Category;

/// Identifier of a persisted operation. Always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(i64);

impl OperationId {
    /// Returns `None` for `<= 0`, which means "not persisted yet".
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Entry argument form: absent or non-positive both mean a new record.
    pub fn from_entry(raw: Option<i64>) -> Option<Self> {
        raw.and_then(Self::new)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the editor shows, exactly as displayed.
///
/// Text fields hold raw, unvalidated input. A fresh form has no kind and the
/// first category selected, like the picker's default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub operation_id: Option<OperationId>,
    pub kind: Option<OperationKind>,
    pub amount: String,
    pub category: Category,
    pub date: String,
    pub note: String,
}

impl FormState {
    pub fn new(operation_id: Option<OperationId>) -> Self {
        Self {
            operation_id,
            ..Self::default()
        }
    }

    /// `true` when editing a persisted record.
    pub fn is_existing(&self) -> bool {
        self.operation_id.is_some()
    }
}
