use chrono::NaiveDate;

use crate::coordinator::{CalendarView, RenderCoordinator};
use crate::datetime::ISO_DATE_FORMAT;
use crate::error::{Error, ErrorKind, Result};
use crate::store::Event;
use crate::todo::TodoList;

/// Dismissible panel shown below the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    SearchResults(Vec<Event>),
}

/// Everything the front-end shows, plus the core it drives.
pub struct Context {
    coordinator: RenderCoordinator,
    view: CalendarView,
    pub todos: TodoList,
    pub panel: Option<Panel>,
    pub notice: Option<String>,
    pub quit: bool,
}

impl Context {
    pub fn new(coordinator: RenderCoordinator) -> Self {
        let view = coordinator.build_view();
        Context {
            coordinator,
            view,
            todos: TodoList::new(),
            panel: None,
            notice: None,
            quit: false,
        }
    }

    pub fn coordinator(&self) -> &RenderCoordinator {
        &self.coordinator
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn refresh(&mut self) {
        self.view = self.coordinator.build_view();
    }

    /// Only rewrites the clock of the current view.
    pub fn tick(&mut self) {
        self.view.clock = self.coordinator.clock_display();
    }

    pub fn navigate(&mut self, delta_months: i64) {
        self.view = self.coordinator.navigate(delta_months);
    }

    pub fn go_to_today(&mut self) {
        self.view = self.coordinator.go_to_today();
    }

    /// Accepts a day number of the displayed month or an ISO date.
    pub fn activate_day(&mut self, arg: &str) -> Result<()> {
        let arg = arg.trim();
        let iso_date = if let Ok(day_num) = arg.parse::<u32>() {
            self.view
                .day(day_num)
                .and_then(|cell| cell.iso_date())
                .map(str::to_owned)
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::Validation,
                        &format!("There is no day {} in {}.", day_num, self.view.title),
                    )
                })?
        } else if NaiveDate::parse_from_str(arg, ISO_DATE_FORMAT).is_ok() {
            arg.to_owned()
        } else {
            return Err(Error::new(
                ErrorKind::Validation,
                "Please enter a day number or a date like 2024-03-05.",
            ));
        };

        self.notice = Some(match self.coordinator.on_day_activated(&iso_date) {
            Some(event) => format!("Event: {}", event.title),
            None => format!("No event on {}.", iso_date),
        });

        Ok(())
    }

    pub fn search(&mut self, query: &str) -> Result<()> {
        let results = self
            .coordinator
            .search(query)?
            .into_iter()
            .cloned()
            .collect();

        self.panel = Some(Panel::SearchResults(results));
        Ok(())
    }

    pub fn dismiss(&mut self) {
        self.panel = None;
        self.notice = None;
    }

    pub fn add_todo(&mut self, text: &str) -> Result<()> {
        self.todos.add(text)?;
        Ok(())
    }

    /// `position` is 1-based, as displayed.
    pub fn delete_todo(&mut self, position: &str) -> Result<()> {
        let index = position
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|p| p.checked_sub(1))
            .ok_or_else(|| Error::new(ErrorKind::Validation, "Please enter a task number."))?;

        self.todos
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::Validation,
                    &format!("There is no task {}.", position.trim()),
                )
            })
    }
}
