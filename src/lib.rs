pub mod clock;
pub mod config;
pub mod coordinator;
pub mod datetime;
pub mod error;
pub mod events;
pub mod grid;
pub mod source;
pub mod state;
pub mod store;
pub mod todo;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{CalendarView, RenderCoordinator, WidgetState};
pub use error::{Error, ErrorKind, Result};
pub use grid::{compute_grid, DayCell};
pub use state::CalendarState;
pub use store::{Event, EventStore};
