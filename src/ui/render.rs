use itertools::Itertools;
use std::fmt::Write;
use termion::{color, style};

use super::command::HELP;
use super::context::{Context, Panel};
use crate::grid::DayCell;

/// Row (1-based) the clock is drawn on, so ticks can rewrite just that line.
pub const CLOCK_ROW: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub colored: bool,
    pub event_char: char,
    pub today_char: char,
}

impl Theme {
    pub fn plain() -> Self {
        Theme {
            colored: false,
            event_char: '*',
            today_char: '>',
        }
    }

    pub fn colored() -> Self {
        Theme {
            colored: true,
            ..Theme::plain()
        }
    }
}

fn day_cell(cell: &DayCell, theme: &Theme) -> String {
    let Some(day) = cell.day_num() else {
        return " ".repeat(5);
    };

    let today = if cell.is_today() { theme.today_char } else { ' ' };
    let event = if cell.has_event() { theme.event_char } else { ' ' };
    let text = format!("{}{:>2}{}", today, day, event);

    match (theme.colored, cell.is_today(), cell.has_event()) {
        (true, true, _) => format!("{}{}{} ", style::Invert, text, style::Reset),
        (true, false, true) => format!(
            "{}{}{} ",
            color::Fg(color::Red),
            text,
            color::Fg(color::Reset)
        ),
        _ => format!("{} ", text),
    }
}

/// Draws the whole widget as text: header, clock, grid, search panel,
/// notice line and to-do list.
pub fn render(ctx: &Context, theme: &Theme) -> String {
    let view = ctx.view();
    let mut out = String::new();

    let title = format!("<  {}  >", view.title);
    if theme.colored {
        let _ = writeln!(out, "{}{}{}", color::Fg(color::Yellow), title, color::Fg(color::Reset));
    } else {
        let _ = writeln!(out, "{}", title);
    }
    let _ = writeln!(out, "{}", view.clock);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{}",
        view.weekday_labels()
            .iter()
            .map(|label| format!(" {} ", label))
            .join("")
            .trim_end()
    );
    for week in view.weeks() {
        let _ = writeln!(
            out,
            "{}",
            week.iter().map(|cell| day_cell(cell, theme)).join("").trim_end()
        );
    }

    if let Some(Panel::SearchResults(results)) = &ctx.panel {
        let _ = writeln!(out);
        let _ = writeln!(out, "Search Results:");
        if results.is_empty() {
            let _ = writeln!(out, "  No events found.");
        } else {
            for event in results {
                let _ = writeln!(out, "  {}", event);
            }
        }
        let _ = writeln!(out, "  (x to dismiss)");
    }

    if let Some(notice) = &ctx.notice {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", notice);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Tasks:");
    for (position, item) in ctx.todos.items().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", position + 1, item.text);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", HELP);

    out
}
