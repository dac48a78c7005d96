use crate::error::{ErrorKind, Result};
use crate::events::{Dispatcher, Event};

use super::command::CommandParser;
use super::context::Context;
use super::mount::Mount;
use super::render::{render, Theme};

pub struct App {
    context: Context,
    mount: Mount,
    theme: Theme,
}

impl App {
    pub fn new(context: Context, mount: Mount) -> App {
        let theme = if mount.is_terminal() {
            Theme::colored()
        } else {
            Theme::plain()
        };

        App {
            context,
            mount,
            theme,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn draw(&self) -> Result<()> {
        self.mount.present(&render(&self.context, &self.theme))?;
        Ok(())
    }

    /// Applies one event. Returns `false` once the app should stop.
    pub fn handle(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Tick => {
                self.context.tick();
                if !self.mount.present_clock(&self.context.view().clock)? {
                    self.draw()?;
                }
            }
            Event::Input(line) => {
                self.context.notice = None;
                if let Err(err) = CommandParser::new(&mut self.context).run_command(&line) {
                    // Validation failures are prompts for the user, not faults.
                    let prompt = if matches!(err.kind, ErrorKind::Validation) {
                        err.message.clone().unwrap_or_else(|| err.to_string())
                    } else {
                        log::debug!("Rejected command '{}': {}", line, err);
                        err.to_string()
                    };
                    self.context.notice = Some(prompt);
                }
                self.draw()?;
            }
            Event::InputClosed => self.context.quit = true,
        }

        Ok(!self.context.quit)
    }

    pub fn run(&mut self, mut dispatcher: Dispatcher) -> Result<()> {
        dispatcher.arm_ticker();
        self.draw()?;

        while let Ok(event) = dispatcher.next() {
            if !self.handle(event)? {
                break;
            }
        }

        dispatcher.disarm_ticker();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::context;
    use std::fs;

    fn file_app(dir: &tempfile::TempDir) -> (App, std::path::PathBuf) {
        let path = dir.path().join("calendar.txt");
        (App::new(context(), Mount::File(path.clone())), path)
    }

    #[test]
    fn input_rerenders_the_mount() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, path) = file_app(&dir);

        assert!(app.handle(Event::Input("n".to_owned())).unwrap());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<  April 2024  >\n"));
    }

    #[test]
    fn validation_errors_become_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, path) = file_app(&dir);

        app.handle(Event::Input("s   ".to_owned())).unwrap();
        assert_eq!(
            app.context().notice.as_deref(),
            Some("Please enter a search term.")
        );
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("Please enter a search term."));

        app.handle(Event::Input("t".to_owned())).unwrap();
        assert_eq!(app.context().notice.as_deref(), Some("add a task"));
    }

    #[test]
    fn ticks_redraw_file_mounts() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, path) = file_app(&dir);

        assert!(app.handle(Event::Tick).unwrap());
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("Time and Date: 3/15/2024, 12:00:00 PM"));
    }

    #[test]
    fn quit_and_closed_input_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = file_app(&dir);
        assert!(!app.handle(Event::Input("q".to_owned())).unwrap());

        let (mut app, _) = file_app(&dir);
        assert!(!app.handle(Event::InputClosed).unwrap());
    }

    #[test]
    fn run_stops_when_input_closes() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, path) = file_app(&dir);

        let dispatcher = Dispatcher::new(std::time::Duration::from_secs(60));
        let sink = dispatcher.event_sink().clone();
        sink.send(Event::Input("t water plants".to_owned())).unwrap();
        sink.send(Event::InputClosed).unwrap();

        app.run(dispatcher).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("1. water plants"));
    }
}
