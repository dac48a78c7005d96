use chrono::Datelike;

use crate::clock::Clock;
use crate::datetime::{iso_date, YearMonth};
use crate::error::{Error, ErrorKind, Result};
use crate::grid::{compute_grid, DayCell, DAYS_PER_WEEK};
use crate::source::EventSource;
use crate::state::CalendarState;
use crate::store::{Event, EventStore};

pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    Loading,
    Ready,
}

/// Render-ready description of one month. Built fresh on every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarView {
    pub year_month: YearMonth,
    pub title: String,
    pub clock: String,
    pub cells: Vec<DayCell>,
}

impl CalendarView {
    pub fn weekday_labels(&self) -> &'static [&'static str] {
        &WEEKDAY_LABELS
    }

    /// Rows of the grid; the last row may be shorter than a week.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn day(&self, day_num: u32) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.day_num() == Some(day_num))
    }

    pub fn cell_for(&self, iso_date: &str) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.iso_date() == Some(iso_date))
    }
}

pub struct RenderCoordinator {
    state: CalendarState,
    store: EventStore,
    clock: Clock,
    widget_state: WidgetState,
}

impl RenderCoordinator {
    pub fn new(state: CalendarState, clock: Clock) -> Self {
        RenderCoordinator {
            state,
            store: EventStore::new(),
            clock,
            widget_state: WidgetState::Loading,
        }
    }

    /// Loads events once and moves to `Ready` whatever the outcome. A failed
    /// load is logged and leaves the previous events in place, so the
    /// calendar still renders.
    pub fn init(&mut self, source: &dyn EventSource) -> Result<usize> {
        self.widget_state = WidgetState::Loading;

        let result = self.store.load(source);
        if let Err(err) = &result {
            log::error!("Error loading events: {}", err);
        }

        self.widget_state = WidgetState::Ready;
        result
    }

    /// Marks the widget ready without retrieving anything.
    pub fn init_empty(&mut self) {
        self.widget_state = WidgetState::Ready;
    }

    pub fn widget_state(&self) -> WidgetState {
        self.widget_state
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn build_view(&self) -> CalendarView {
        let year_month = self.state.current();
        let today = self.clock.today();
        let today_iso = iso_date(today.year(), today.month(), today.day());

        let mut cells = compute_grid(&year_month);
        for cell in cells.iter_mut() {
            if let Some(date) = cell.iso_date().map(str::to_owned) {
                cell.mark_event(self.store.has_event_on(&date));
                cell.mark_today(date == today_iso);
            }
        }

        CalendarView {
            year_month,
            title: year_month.title(),
            clock: self.clock.display(),
            cells,
        }
    }

    pub fn clock_display(&self) -> String {
        self.clock.display()
    }

    pub fn navigate(&mut self, delta_months: i64) -> CalendarView {
        self.state.shift(delta_months);
        self.build_view()
    }

    pub fn go_to_today(&mut self) -> CalendarView {
        let today = self.clock.today();
        self.state.reset_to(&today);
        self.build_view()
    }

    /// The event stored for `iso_date`, if any. No event is a normal outcome.
    pub fn on_day_activated(&self, iso_date: &str) -> Option<&Event> {
        self.store.find_on(iso_date)
    }

    pub fn search(&self, query: &str) -> Result<Vec<&Event>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::new(
                ErrorKind::Validation,
                "Please enter a search term.",
            ));
        }

        Ok(self.store.search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixed_clock, StaticSource};

    struct Unreachable;

    impl EventSource for Unreachable {
        fn describe(&self) -> String {
            "unreachable".to_owned()
        }

        fn fetch(&self) -> Result<String> {
            Err(Error::new(ErrorKind::Retrieval, "connection refused"))
        }
    }

    const EVENTS: &str = r#"[
        {"date": "2024-03-05", "title": "Launch"},
        {"date": "2024-04-01", "title": "Launch Day retro"}
    ]"#;

    fn coordinator(year: i32, month: u32) -> RenderCoordinator {
        RenderCoordinator::new(
            CalendarState::new(YearMonth::new(year, month).unwrap()),
            fixed_clock(),
        )
    }

    #[test]
    fn starts_loading_and_becomes_ready() {
        let mut c = coordinator(2024, 3);
        assert_eq!(c.widget_state(), WidgetState::Loading);
        assert_eq!(c.init(&StaticSource(EVENTS)).unwrap(), 2);
        assert_eq!(c.widget_state(), WidgetState::Ready);
    }

    #[test]
    fn event_overlay_marks_only_matching_cell() {
        let mut c = coordinator(2024, 3);
        c.init(&StaticSource(EVENTS)).unwrap();

        let view = c.build_view();
        assert_eq!(view.title, "March 2024");

        let marked: Vec<_> = view
            .cells
            .iter()
            .filter(|cell| cell.has_event())
            .filter_map(|cell| cell.iso_date())
            .collect();
        assert_eq!(marked, vec!["2024-03-05"]);
        assert!(view.cell_for("2024-03-05").unwrap().has_event());
    }

    #[test]
    fn today_is_marked_in_current_month() {
        let mut c = coordinator(2024, 3);
        c.init_empty();

        let view = c.build_view();
        assert_eq!(view.cells.iter().filter(|cell| cell.is_today()).count(), 1);
        assert!(view.day(15).unwrap().is_today());

        let other = c.navigate(1);
        assert!(other.cells.iter().all(|cell| !cell.is_today()));
    }

    #[test]
    fn navigation_round_trip_restores_view() {
        let mut c = coordinator(2024, 3);
        c.init(&StaticSource(EVENTS)).unwrap();

        let original = c.build_view();
        let next = c.navigate(1);
        assert_eq!(next.title, "April 2024");
        assert!(next.cell_for("2024-04-01").unwrap().has_event());

        assert_eq!(c.navigate(-1), original);
    }

    #[test]
    fn navigation_rolls_over_years() {
        let mut c = coordinator(2024, 12);
        assert_eq!(c.navigate(1).year_month, YearMonth::new(2025, 1).unwrap());

        let mut c = coordinator(2024, 1);
        assert_eq!(c.navigate(-1).year_month, YearMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn go_to_today_returns_to_clock_month() {
        let mut c = coordinator(1999, 7);
        assert_eq!(c.go_to_today().year_month, YearMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn failed_load_is_fail_open() {
        let mut c = coordinator(2024, 3);
        let err = c.init(&Unreachable).unwrap_err();

        assert!(err.is_retrieval());
        assert_eq!(c.widget_state(), WidgetState::Ready);
        assert!(c.store().is_empty());

        let view = c.build_view();
        assert_eq!(view.cells.len(), 5 + 31);
        assert!(view.cells.iter().all(|cell| !cell.has_event()));
    }

    #[test]
    fn day_activation() {
        let mut c = coordinator(2024, 3);
        c.init(&StaticSource(EVENTS)).unwrap();

        assert_eq!(
            c.on_day_activated("2024-03-05").map(|e| e.title.as_str()),
            Some("Launch")
        );
        assert!(c.on_day_activated("2024-03-06").is_none());
    }

    #[test]
    fn search_validates_and_delegates() {
        let mut c = coordinator(2024, 3);
        c.init(&StaticSource(EVENTS)).unwrap();

        assert!(c.search("   ").unwrap_err().is_validation());
        assert_eq!(c.search(" laun ").unwrap().len(), 2);
        assert_eq!(c.search("RETRO").unwrap().len(), 1);
        assert!(c.search("party").unwrap().is_empty());
    }

    #[test]
    fn weeks_chunk_the_grid() {
        let c = coordinator(2024, 3);
        let view = c.build_view();
        let weeks: Vec<_> = view.weeks().collect();

        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0].len(), 7);
        assert_eq!(weeks[5].len(), 1);
        assert_eq!(view.weekday_labels()[0], "Sun");
    }
}
