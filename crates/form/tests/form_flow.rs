use std::{str::FromStr, sync::Mutex};

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use operation_form::{
    Category, DeleteOutcome, DisplayState, FieldError, FormState, Operation, OperationId,
    OperationKind, OperationStore, Orchestrator, StoreError, SubmitOutcome, capture,
    date::{DateSeed, resolve_seed},
    restore,
};

/// In-memory store keyed by id, recording every request.
#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<Operation>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryStore {
    fn with(records: Vec<Operation>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn log(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }

    fn not_found() -> StoreError {
        StoreError::Rejected {
            status: 404,
            message: "Operation not found".to_string(),
        }
    }
}

impl OperationStore for MemoryStore {
    async fn get(&self, id: OperationId) -> Result<Operation, StoreError> {
        self.log(format!("GET /operations/{id}"));
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|op| op.id == Some(id.get()))
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create(&self, operation: &Operation) -> Result<Option<Operation>, StoreError> {
        self.log("POST /operations".to_string());
        let mut records = self.records.lock().unwrap();
        let created = Operation {
            id: Some(records.len() as i64 + 1),
            ..operation.clone()
        };
        records.push(created.clone());
        Ok(Some(created))
    }

    async fn update(
        &self,
        id: OperationId,
        operation: &Operation,
    ) -> Result<Option<Operation>, StoreError> {
        self.log(format!("PUT /operations/{id}"));
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|op| op.id == Some(id.get()))
            .ok_or_else(Self::not_found)?;
        *record = Operation {
            id: Some(id.get()),
            ..operation.clone()
        };
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: OperationId) -> Result<(), StoreError> {
        self.log(format!("DELETE /operations/{id}"));
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|op| op.id != Some(id.get()));
        if records.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

fn stored(id: i64) -> Operation {
    Operation {
        id: Some(id),
        kind: OperationKind::Income,
        amount: BigDecimal::from_str("1500.00").unwrap(),
        category: "Зарплата".to_string(),
        date: "2024-01-31".to_string(),
        note: "january".to_string(),
    }
}

#[tokio::test]
async fn create_expense_from_blank_form() {
    let orchestrator = Orchestrator::new(MemoryStore::default());
    let form = FormState {
        kind: Some(OperationKind::Expense),
        amount: "45.50".to_string(),
        category: Category::Food,
        date: "2024-03-10".to_string(),
        note: String::new(),
        ..FormState::new(OperationId::from_entry(None))
    };

    let outcome = orchestrator.submit(&form).await;
    let created = match outcome {
        SubmitOutcome::Saved(Some(created)) => created,
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_eq!(orchestrator.store().requests(), vec!["POST /operations"]);
    let mut body = serde_json::to_value(&created).unwrap();
    body.as_object_mut().unwrap().remove("id");
    assert_eq!(
        body,
        serde_json::json!({
            "type": "expense",
            "amount": 45.5,
            "category": "Еда",
            "date": "2024-03-10",
            "note": ""
        })
    );
}

#[tokio::test]
async fn load_edit_and_update_existing() {
    let orchestrator = Orchestrator::new(MemoryStore::with(vec![stored(7)]));
    let id = OperationId::new(7);

    let loaded = orchestrator.load(id).await.unwrap();
    let form = FormState::new(id).with_display(DisplayState::from_operation(&loaded));
    assert_eq!(form.amount, "1500");
    assert_eq!(form.category, Category::Salary);
    assert_eq!(form.kind, Some(OperationKind::Income));

    let edited = FormState {
        amount: "1600.5".to_string(),
        ..form
    };
    let outcome = orchestrator.submit(&edited).await;
    let updated = match outcome {
        SubmitOutcome::Saved(Some(updated)) => updated,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(updated.amount, BigDecimal::from_str("1600.5").unwrap());
    assert_eq!(
        orchestrator.store().requests(),
        vec!["GET /operations/7", "PUT /operations/7"]
    );
}

#[tokio::test]
async fn zero_amount_on_existing_record_sends_nothing() {
    let orchestrator = Orchestrator::new(MemoryStore::with(vec![stored(7)]));
    let form = FormState {
        kind: Some(OperationKind::Income),
        amount: "0".to_string(),
        date: "2024-01-31".to_string(),
        ..FormState::new(OperationId::new(7))
    };
    assert_eq!(
        orchestrator.submit(&form).await,
        SubmitOutcome::Invalid(FieldError::InvalidAmount)
    );
    assert!(orchestrator.store().requests().is_empty());
}

#[tokio::test]
async fn impossible_date_sends_nothing() {
    let orchestrator = Orchestrator::new(MemoryStore::default());
    let form = FormState {
        kind: Some(OperationKind::Expense),
        amount: "10".to_string(),
        date: "2024-02-30".to_string(),
        ..FormState::default()
    };
    assert_eq!(
        orchestrator.submit(&form).await,
        SubmitOutcome::Invalid(FieldError::InvalidDate)
    );
    assert!(orchestrator.store().requests().is_empty());
}

#[tokio::test]
async fn blank_form_reports_kind_first() {
    let orchestrator = Orchestrator::new(MemoryStore::default());
    assert_eq!(
        orchestrator.submit(&FormState::default()).await,
        SubmitOutcome::Invalid(FieldError::MissingKind)
    );
}

#[tokio::test]
async fn delete_needs_a_positive_id() {
    let orchestrator = Orchestrator::new(MemoryStore::with(vec![stored(7)]));
    let unsaved = FormState::new(OperationId::from_entry(Some(-1)));
    assert_eq!(orchestrator.delete(&unsaved).await, DeleteOutcome::Skipped);
    assert!(orchestrator.store().requests().is_empty());

    let existing = FormState::new(OperationId::new(7));
    assert_eq!(orchestrator.delete(&existing).await, DeleteOutcome::Deleted);
    assert_eq!(orchestrator.store().requests(), vec!["DELETE /operations/7"]);

    let outcome = orchestrator.delete(&existing).await;
    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
}

#[tokio::test]
async fn missing_record_loads_blank() {
    let orchestrator = Orchestrator::new(MemoryStore::default());
    assert!(orchestrator.load(OperationId::new(42)).await.is_none());
}

#[test]
fn interrupted_edit_restores_exactly() {
    let form = FormState {
        operation_id: OperationId::new(7),
        kind: Some(OperationKind::Expense),
        amount: "12.3".to_string(),
        category: Category::Transport,
        date: "2024-13-45".to_string(),
        note: "taxi ".to_string(),
    };
    let json = serde_json::to_string(&capture(&form)).unwrap();
    let restored = restore(&serde_json::from_str(&json).unwrap(), FormState::default());
    assert_eq!(restored, form);
}

#[test]
fn seed_for_garbage_is_today() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    assert_eq!(resolve_seed("not-a-date", today), DateSeed::from(today));
}
