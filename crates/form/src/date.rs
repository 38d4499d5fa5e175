use chrono::{Datelike, Local, NaiveDate};

/// Wire and display format of operation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD` strictly.
///
/// Exactly four year digits, two month digits and two day digits, and the
/// result must be a real calendar date (`2023-02-30` and `2023-13-01` are
/// rejected, `2024-02-29` is accepted).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if !text.is_ascii() {
        return None;
    }
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let number = |part: &str| -> Option<u32> {
        if part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse().ok()
        } else {
            None
        }
    };

    let year = number(&text[0..4])?;
    let month = number(&text[5..7])?;
    let day = number(&text[8..10])?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Date to preselect when the picker opens. `month` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateSeed {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<NaiveDate> for DateSeed {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl DateSeed {
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Picks the picker seed: the field's date if it is a real `YYYY-MM-DD`
/// date, `today` otherwise.
pub fn resolve_seed(field_text: &str, today: NaiveDate) -> DateSeed {
    parse_date(field_text.trim()).unwrap_or(today).into()
}

/// [`resolve_seed`] against the local clock.
pub fn resolve_seed_today(field_text: &str) -> DateSeed {
    resolve_seed(field_text, Local::now().date_naive())
}
