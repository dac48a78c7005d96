use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::clock::ClockZone;
use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "MONTHVIEW_CONFIG_FILE";
pub const STDOUT_SELECTOR: &str = "stdout";

fn default_selector() -> String {
    STDOUT_SELECTOR.to_owned()
}

fn default_tick_rate_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Mount point the widget renders into: `stdout` or a file path.
    #[serde(default = "default_selector")]
    pub selector: String,
    pub events_url: Option<String>,
    pub timezone: ClockZone,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            selector: default_selector(),
            events_url: None,
            timezone: ClockZone::default(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::new(
                ErrorKind::Config,
                &format!("could not read '{}': {}", path.display(), err),
            )
        })?;

        Config::from_str_content(&content).map_err(|err| {
            let msg = format!(
                "{} (in '{}')",
                err.message.as_deref().unwrap_or_default(),
                path.display()
            );
            err.with_msg(&msg)
        })
    }

    pub fn from_str_content(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.tick_rate_ms == 0 {
            return Err(Error::new(ErrorKind::Config, "tick_rate_ms must be positive"));
        }
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("monthview").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".monthview.toml"));
    }

    locations
}

/// Loads `path` when given, otherwise the first existing file of the default
/// locations, falling back to built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|candidate| candidate.is_file())
    {
        Some(found) => {
            log::info!("Using config file '{}'", found.display());
            Config::from_file(&found)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::from_str_content("").unwrap(), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_str_content(
            r#"
            selector = "/tmp/calendar.txt"
            events_url = "https://example.com/events.json"
            timezone = "America/New_York"
            tick_rate_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.selector, "/tmp/calendar.txt");
        assert_eq!(
            config.events_url.as_deref(),
            Some("https://example.com/events.json")
        );
        assert_eq!(
            config.timezone,
            ClockZone::Iana(chrono_tz::America::New_York)
        );
        assert_eq!(config.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_str_content(r#"timezone = "Nowhere/Land""#).is_err());
        assert!(Config::from_str_content("tick_rate_ms = 0").is_err());
        assert!(Config::from_str_content("colour = true").is_err());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"events_url = "events.json""#).unwrap();

        let config = load_suitable_config(Some(file.path())).unwrap();
        assert_eq!(config.events_url.as_deref(), Some("events.json"));
        assert_eq!(config.selector, STDOUT_SELECTOR);
    }

    #[test]
    fn missing_explicit_path_is_config_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/monthview.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config));
    }
}
