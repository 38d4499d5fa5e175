use api_types::operation::Operation;

use crate::{
    amount::{is_positive, parse_amount},
    date::parse_date,
    error::FieldError,
    form::FormState,
};

/// Builds the operation to submit, or reports the first failing check.
///
/// Checks run in a fixed order: kind, amount presence, amount value, date
/// presence, date format. Amount, date and note are trimmed; category and
/// note are never rejected. The returned body carries no id.
pub fn validate(form: &FormState) -> Result<Operation, FieldError> {
    let kind = form.kind.ok_or(FieldError::MissingKind)?;

    let amount_text = form.amount.trim();
    if amount_text.is_empty() {
        return Err(FieldError::MissingAmount);
    }
    let amount = parse_amount(amount_text)
        .filter(is_positive)
        .ok_or(FieldError::InvalidAmount)?;

    let date = form.date.trim();
    if date.is_empty() {
        return Err(FieldError::MissingDate);
    }
    if parse_date(date).is_none() {
        return Err(FieldError::InvalidDate);
    }

    Ok(Operation {
        id: None,
        kind,
        amount,
        category: form.category.label().to_string(),
        date: date.to_string(),
        note: form.note.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use api_types::operation::OperationKind;
    use bigdecimal::BigDecimal;

    use super::*;
    use crate::{category::Category, form::OperationId};

    fn filled() -> FormState {
        FormState {
            operation_id: None,
            kind: Some(OperationKind::Expense),
            amount: "45.50".to_string(),
            category: Category::Food,
            date: "2024-03-10".to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn builds_operation_from_valid_form() {
        let op = validate(&filled()).unwrap();
        assert_eq!(op.id, None);
        assert_eq!(op.kind, OperationKind::Expense);
        assert_eq!(op.amount, BigDecimal::from_str("45.5").unwrap());
        assert_eq!(op.category, "Еда");
        assert_eq!(op.date, "2024-03-10");
        assert_eq!(op.note, "");
    }

    #[test]
    fn trims_amount_date_and_note() {
        let form = FormState {
            amount: " 12 ".to_string(),
            date: " 2024-02-29\t".to_string(),
            note: "  lunch  ".to_string(),
            ..filled()
        };
        let op = validate(&form).unwrap();
        assert_eq!(op.amount, BigDecimal::from(12));
        assert_eq!(op.date, "2024-02-29");
        assert_eq!(op.note, "lunch");
    }

    #[test]
    fn body_never_carries_the_form_id() {
        let form = FormState {
            operation_id: OperationId::new(7),
            ..filled()
        };
        assert_eq!(validate(&form).unwrap().id, None);
    }

    #[test]
    fn kind_is_checked_first() {
        let form = FormState::new(None);
        assert_eq!(validate(&form), Err(FieldError::MissingKind));
    }

    #[test]
    fn amount_presence_before_date() {
        let form = FormState {
            amount: "   ".to_string(),
            date: String::new(),
            ..filled()
        };
        assert_eq!(validate(&form), Err(FieldError::MissingAmount));
    }

    #[test]
    fn amount_must_be_positive_number() {
        for amount in ["0", "0.00", "-5", "abc", "1,5", "1e", "1e-400", "1e400"] {
            let form = FormState {
                amount: amount.to_string(),
                ..filled()
            };
            assert_eq!(validate(&form), Err(FieldError::InvalidAmount), "{amount}");
        }
    }

    #[test]
    fn accepted_amount_goes_out_as_positive_number() {
        let form = FormState {
            amount: "1e-300".to_string(),
            ..filled()
        };
        let body = serde_json::to_value(validate(&form).unwrap()).unwrap();
        let sent = body["amount"].as_f64().unwrap();
        assert!(sent.is_finite() && sent > 0.0, "{body}");
    }

    #[test]
    fn amount_validity_before_date() {
        let form = FormState {
            amount: "0".to_string(),
            date: "garbage".to_string(),
            ..filled()
        };
        assert_eq!(validate(&form), Err(FieldError::InvalidAmount));
    }

    #[test]
    fn date_presence_and_format() {
        let form = FormState {
            date: " ".to_string(),
            ..filled()
        };
        assert_eq!(validate(&form), Err(FieldError::MissingDate));

        for date in ["2024-02-30", "2023-13-01", "10.03.2024", "2024-3-10"] {
            let form = FormState {
                date: date.to_string(),
                ..filled()
            };
            assert_eq!(validate(&form), Err(FieldError::InvalidDate), "{date}");
        }
    }

    #[test]
    fn category_label_is_sent_verbatim() {
        let form = FormState {
            category: Category::Investments,
            kind: Some(OperationKind::Income),
            ..filled()
        };
        let op = validate(&form).unwrap();
        assert_eq!(op.category, "Инвестиции");
        assert_eq!(op.kind, OperationKind::Income);
    }
}
