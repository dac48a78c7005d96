use chrono::{Datelike, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Formats a calendar day as zero-padded `YYYY-MM-DD`.
pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// A year and month pair. The day-of-month is never stored, so month
/// arithmetic cannot drift on short months.
///
/// Values are kept within the range of dates `chrono` can represent, which
/// makes every operation on a `YearMonth` total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    // Inside chrono's supported range of roughly +/- 262,000 years.
    pub const MIN: YearMonth = YearMonth {
        year: -262_000,
        month: 1,
    };
    pub const MAX: YearMonth = YearMonth {
        year: 262_000,
        month: 12,
    };

    /// Returns `None` for a month outside `1..=12` or a year chrono cannot
    /// represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let candidate = YearMonth { year, month };
        if (1..=12).contains(&month) && candidate >= Self::MIN && candidate <= Self::MAX {
            Some(candidate)
        } else {
            None
        }
    }

    pub fn from_date<D: Datelike>(date: &D) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
        .shifted(0)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_number(&self) -> u32 {
        self.month
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.month).unwrap_or(Month::January)
    }

    pub fn days(&self) -> u32 {
        days_of_month(&self.month(), self.year)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("YearMonth is kept within chrono's date range")
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_day().weekday()
    }

    /// Adds `delta` months, carrying into the year in both directions.
    /// Any `delta` is accepted; results beyond the representable range
    /// saturate at [`YearMonth::MIN`] / [`YearMonth::MAX`]. Shifting forth
    /// and back therefore restores the month except where a bound was hit,
    /// e.g. `MAX.shifted(1).shifted(-1)` is one month before `MAX`.
    pub fn shifted(&self, delta: i64) -> Self {
        let index = (self.year as i64 * 12 + (self.month as i64 - 1)).saturating_add(delta);
        let lower = Self::MIN.year as i64 * 12;
        let upper = Self::MAX.year as i64 * 12 + 11;
        let index = index.clamp(lower, upper);

        YearMonth {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.month().name(), self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::new(
                ErrorKind::Validation,
                &format!("'{}' is not a month of the form YYYY-MM", s),
            )
        };

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}
