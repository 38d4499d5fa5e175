use std::str::FromStr;

use bigdecimal::BigDecimal;

/// Parses amount text as a decimal number.
///
/// Accepts an optional sign, digits with an optional `.` fraction and an
/// optional exponent (`1.5e3`). Grouping separators, `,` as decimal
/// separator, `NaN` and infinities are rejected. The sign is kept: callers
/// decide whether the value is acceptable.
///
/// ```rust
/// use operation_form::amount::parse_amount;
///
/// assert!(parse_amount("45.50").is_some());
/// assert!(parse_amount("1,5").is_none());
/// assert!(parse_amount("1_000").is_none());
/// ```
pub fn parse_amount(text: &str) -> Option<BigDecimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    let has_mantissa = text
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.chars().any(|c| c.is_ascii_digit()));
    if !has_mantissa {
        return None;
    }
    BigDecimal::from_str(text).ok()
}

/// Returns `true` if the amount is strictly greater than zero, both exactly
/// and as the JSON number it is sent as. Values that overflow or underflow
/// an `f64` are not positive.
pub fn is_positive(amount: &BigDecimal) -> bool {
    *amount > BigDecimal::from(0)
        && amount
            .to_string()
            .parse::<f64>()
            .is_ok_and(|number| number.is_finite() && number > 0.0)
}

/// Renders an amount back into editable text.
///
/// Trailing fractional zeros are dropped and the exponent is expanded, so
/// the output always re-parses to the same number.
///
/// ```rust
/// use operation_form::amount::{format_amount, parse_amount};
///
/// let amount = parse_amount("250.50").unwrap();
/// assert_eq!(format_amount(&amount), "250.5");
/// ```
pub fn format_amount(amount: &BigDecimal) -> String {
    amount.normalized().to_plain_string()
}
