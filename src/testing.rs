//! Fixtures shared by the unit tests.

use chrono::{TimeZone, Utc};

use crate::clock::{Clock, ClockZone};
use crate::coordinator::RenderCoordinator;
use crate::datetime::YearMonth;
use crate::error::Result;
use crate::source::EventSource;
use crate::state::CalendarState;
use crate::ui::context::Context;

pub const LAUNCH_EVENTS: &str = r#"[{"date":"2024-03-05","title":"Launch"}]"#;

pub struct StaticSource(pub &'static str);

impl EventSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_owned()
    }

    fn fetch(&self) -> Result<String> {
        Ok(self.0.to_owned())
    }
}

/// 2024-03-15 12:00 UTC, displayed in UTC with today pinned to UTC as well.
pub fn fixed_clock() -> Clock {
    let instant = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    Clock::fixed(ClockZone::Iana(chrono_tz::UTC), instant)
        .with_local_zone(ClockZone::Iana(chrono_tz::UTC))
}

/// A context showing March 2024 with a single "Launch" event on the 5th.
pub fn context() -> Context {
    let mut coordinator = RenderCoordinator::new(
        CalendarState::new(YearMonth::new(2024, 3).unwrap()),
        fixed_clock(),
    );
    coordinator.init(&StaticSource(LAUNCH_EVENTS)).unwrap();
    Context::new(coordinator)
}
