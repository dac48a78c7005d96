use chrono::{Datelike, Local};

use crate::datetime::YearMonth;

/// Owns the month currently displayed by the calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarState {
    reference: YearMonth,
}

impl Default for CalendarState {
    fn default() -> Self {
        CalendarState::new(YearMonth::from_date(&Local::now().date_naive()))
    }
}

impl CalendarState {
    pub fn new(reference: YearMonth) -> Self {
        CalendarState { reference }
    }

    pub fn current(&self) -> YearMonth {
        self.reference
    }

    pub fn shift(&mut self, delta_months: i64) -> YearMonth {
        self.reference = self.reference.shifted(delta_months);
        log::debug!("Reference month is now {}", self.reference);
        self.reference
    }

    /// Moves the reference to the month containing `date`.
    pub fn reset_to<D: Datelike>(&mut self, date: &D) -> YearMonth {
        self.reference = YearMonth::from_date(date);
        self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn state(year: i32, month: u32) -> CalendarState {
        CalendarState::new(YearMonth::new(year, month).unwrap())
    }

    #[test]
    fn shift_rolls_over_year_forwards() {
        let mut s = state(2024, 12);
        assert_eq!(s.shift(1), YearMonth::new(2025, 1).unwrap());
        assert_eq!(s.current(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn shift_rolls_over_year_backwards() {
        let mut s = state(2024, 1);
        assert_eq!(s.shift(-1), YearMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn shift_round_trip_restores_reference() {
        for month in 1..=12 {
            let mut s = state(2020, month);
            let before = s.current();
            s.shift(1);
            s.shift(-1);
            assert_eq!(s.current(), before);
        }
    }

    #[test]
    fn shift_supports_large_deltas() {
        let mut s = state(2024, 5);
        assert_eq!(s.shift(-29), YearMonth::new(2021, 12).unwrap());
        assert_eq!(s.shift(120), YearMonth::new(2031, 12).unwrap());
        assert_eq!(s.shift(0), YearMonth::new(2031, 12).unwrap());
    }

    #[test]
    fn shift_saturates_on_extreme_deltas() {
        let mut s = state(2024, 3);
        assert_eq!(s.shift(i64::MAX), YearMonth::MAX);
        assert_eq!(s.shift(i64::MIN), YearMonth::MIN);
        assert_eq!(s.shift(i64::MIN), YearMonth::MIN);
        assert_eq!(s.current(), YearMonth::MIN);
    }

    #[test]
    fn reset_ignores_day_of_month() {
        let mut s = state(1999, 1);
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(s.reset_to(&date), YearMonth::new(2024, 1).unwrap());
        // Jan 31 + 1 month must not skip February.
        assert_eq!(s.shift(1), YearMonth::new(2024, 2).unwrap());
    }
}
