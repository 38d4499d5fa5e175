use chrono::{Days, Months, NaiveDate};
use operation_form::date::DateSeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Calendar overlay state. Confirming yields the shown date; cancelling
/// yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePicker {
    pub date: NaiveDate,
    pub part: DatePart,
}

impl DatePicker {
    /// Opens on the seed, or on `fallback` if the seed is not a real date.
    pub fn open(seed: DateSeed, fallback: NaiveDate) -> Self {
        Self {
            date: seed.to_date().unwrap_or(fallback),
            part: DatePart::Day,
        }
    }

    pub fn next_part(&mut self) {
        self.part = match self.part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
    }

    pub fn prev_part(&mut self) {
        self.part = match self.part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
    }

    /// Moves the selected part by one. Month and year steps clamp the day to
    /// the end of the target month.
    pub fn step(&mut self, forward: bool) {
        let date = self.date;
        let stepped = match (self.part, forward) {
            (DatePart::Day, true) => date.checked_add_days(Days::new(1)),
            (DatePart::Day, false) => date.checked_sub_days(Days::new(1)),
            (DatePart::Month, true) => date.checked_add_months(Months::new(1)),
            (DatePart::Month, false) => date.checked_sub_months(Months::new(1)),
            (DatePart::Year, true) => date.checked_add_months(Months::new(12)),
            (DatePart::Year, false) => date.checked_sub_months(Months::new(12)),
        };
        if let Some(stepped) = stepped {
            self.date = stepped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn opens_on_seed() {
        let seed = DateSeed {
            year: 2024,
            month: 2,
            day: 29,
        };
        let picker = DatePicker::open(seed, ymd(2026, 10, 18));
        assert_eq!(picker.date, ymd(2024, 2, 29));
        assert_eq!(picker.part, DatePart::Day);
    }

    #[test]
    fn day_steps_cross_month_boundaries() {
        let mut picker = DatePicker::open(ymd(2024, 2, 29).into(), ymd(2000, 1, 1));
        picker.step(true);
        assert_eq!(picker.date, ymd(2024, 3, 1));
        picker.step(false);
        picker.step(false);
        assert_eq!(picker.date, ymd(2024, 2, 28));
    }

    #[test]
    fn month_and_year_steps_clamp_day() {
        let mut picker = DatePicker::open(ymd(2024, 1, 31).into(), ymd(2000, 1, 1));
        picker.prev_part();
        assert_eq!(picker.part, DatePart::Month);
        picker.step(true);
        assert_eq!(picker.date, ymd(2024, 2, 29));

        picker.prev_part();
        assert_eq!(picker.part, DatePart::Year);
        picker.step(true);
        assert_eq!(picker.date, ymd(2025, 2, 28));
    }

    #[test]
    fn part_cycle_wraps() {
        let mut picker = DatePicker::open(ymd(2024, 1, 1).into(), ymd(2000, 1, 1));
        picker.next_part();
        assert_eq!(picker.part, DatePart::Year);
        picker.prev_part();
        assert_eq!(picker.part, DatePart::Day);
    }
}
