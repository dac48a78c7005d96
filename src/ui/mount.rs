use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use termion::{clear, cursor};

use crate::config::STDOUT_SELECTOR;

use super::render::CLOCK_ROW;

/// The place the widget owns and redraws from scratch on every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mount {
    Terminal,
    File(PathBuf),
}

impl Mount {
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim() {
            "" | "-" | STDOUT_SELECTOR => Mount::Terminal,
            path => Mount::File(PathBuf::from(path)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Mount::Terminal)
    }

    /// Replaces the whole content of the mount.
    pub fn present(&self, content: &str) -> io::Result<()> {
        match self {
            Mount::Terminal => {
                let mut stdout = io::stdout().lock();
                write!(stdout, "{}{}", clear::All, cursor::Goto(1, 1))?;
                stdout.write_all(content.as_bytes())?;
                stdout.flush()
            }
            Mount::File(path) => fs::write(path, content),
        }
    }

    /// Rewrites only the clock line. Files have no cursor, so the caller
    /// must present the full content instead.
    pub fn present_clock(&self, clock: &str) -> io::Result<bool> {
        match self {
            Mount::Terminal => {
                let mut stdout = io::stdout().lock();
                write!(
                    stdout,
                    "{}{}{}{}{}",
                    cursor::Save,
                    cursor::Goto(1, CLOCK_ROW),
                    clear::CurrentLine,
                    clock,
                    cursor::Restore
                )?;
                stdout.flush()?;
                Ok(true)
            }
            Mount::File(_) => Ok(false),
        }
    }
}
