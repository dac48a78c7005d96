use std::fmt;

use crate::datetime::{iso_date, YearMonth};

pub const DAYS_PER_WEEK: usize = 7;

/// One position of the month grid: either a leading pad slot or a real day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    day_num: Option<u32>,
    iso_date: Option<String>,
    has_event: bool,
    is_today: bool,
}

impl DayCell {
    pub fn pad() -> Self {
        DayCell {
            day_num: None,
            iso_date: None,
            has_event: false,
            is_today: false,
        }
    }

    pub fn day(year_month: &YearMonth, day_num: u32) -> Self {
        DayCell {
            day_num: Some(day_num),
            iso_date: Some(iso_date(
                year_month.year(),
                year_month.month_number(),
                day_num,
            )),
            has_event: false,
            is_today: false,
        }
    }

    pub fn with_event(mut self, has_event: bool) -> Self {
        self.mark_event(has_event);
        self
    }

    pub fn with_today(mut self, is_today: bool) -> Self {
        self.mark_today(is_today);
        self
    }

    /// Pad cells never carry events.
    pub fn mark_event(&mut self, has_event: bool) {
        self.has_event = has_event && !self.is_pad();
    }

    pub fn mark_today(&mut self, is_today: bool) {
        self.is_today = is_today && !self.is_pad();
    }

    pub fn is_pad(&self) -> bool {
        self.day_num.is_none()
    }

    pub fn day_num(&self) -> Option<u32> {
        self.day_num
    }

    pub fn iso_date(&self) -> Option<&str> {
        self.iso_date.as_deref()
    }

    pub fn has_event(&self) -> bool {
        self.has_event
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }
}

impl fmt::Display for DayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day_num {
            Some(day) => write!(f, "{}", day),
            None => Ok(()),
        }
    }
}

/// Lays out `year_month` as leading pad cells (one per weekday before the
/// 1st, Sunday first) followed by one cell per day. No trailing pads are
/// emitted, so the grid has exactly `first_weekday + days` cells.
///
/// Event and today flags are left unset; the grid only encodes calendar math.
pub fn compute_grid(year_month: &YearMonth) -> Vec<DayCell> {
    let offset = year_month.first_weekday().num_days_from_sunday() as usize;
    let days = year_month.days();

    std::iter::repeat_with(DayCell::pad)
        .take(offset)
        .chain((1..=days).map(|day_num| DayCell::day(year_month, day_num)))
        .collect()
}

/// Like [`compute_grid`] but for a raw year and 1-based month number.
/// Returns `None` when the pair does not denote a valid month.
pub fn compute_grid_for(year: i32, month: u32) -> Option<Vec<DayCell>> {
    YearMonth::new(year, month).map(|ym| compute_grid(&ym))
}
