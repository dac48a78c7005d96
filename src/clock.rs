use chrono::{DateTime, Local, NaiveDate, Utc};
use serde_with::DeserializeFromStr;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

const CLOCK_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Zone used to display the live clock. It never affects which local date a
/// grid cell denotes.
#[derive(Clone, Copy, Debug, Default, DeserializeFromStr, PartialEq)]
pub enum ClockZone {
    #[default]
    Local,
    Iana(chrono_tz::Tz),
}

impl ClockZone {
    const LOCAL_ID: &'static str = "Localtime";

    pub fn id(&self) -> &str {
        match self {
            ClockZone::Local => Self::LOCAL_ID,
            ClockZone::Iana(tz) => tz.name(),
        }
    }
}

impl Display for ClockZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ClockZone {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.trim().to_lowercase();

        if matches!(lowercase.as_str(), "localtime" | "local" | "") {
            Ok(ClockZone::Local)
        } else if let Ok(tz) = s.trim().parse::<chrono_tz::Tz>() {
            Ok(ClockZone::Iana(tz))
        } else {
            Err(Error::new(
                ErrorKind::Timezone,
                &format!("Timezone '{}' not recognized", s),
            ))
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Clock {
    zone: ClockZone,
    // Zone of the viewer's calendar date.
    local: ClockZone,
    fixed: Option<DateTime<Utc>>,
}

impl Clock {
    pub fn new(zone: ClockZone) -> Self {
        Clock {
            zone,
            local: ClockZone::Local,
            fixed: None,
        }
    }

    /// A clock that always reports `instant`.
    pub fn fixed(zone: ClockZone, instant: DateTime<Utc>) -> Self {
        Clock {
            zone,
            local: ClockZone::Local,
            fixed: Some(instant),
        }
    }

    /// Pins the zone `today` is computed in instead of the host's.
    pub fn with_local_zone(mut self, local: ClockZone) -> Self {
        self.local = local;
        self
    }

    pub fn zone(&self) -> ClockZone {
        self.zone
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.fixed.unwrap_or_else(Utc::now)
    }

    /// The viewer's local date, used for grid highlighting.
    pub fn today(&self) -> NaiveDate {
        let now = self.now_utc();
        match self.local {
            ClockZone::Local => now.with_timezone(&Local).date_naive(),
            ClockZone::Iana(tz) => now.with_timezone(&tz).date_naive(),
        }
    }

    pub fn display(&self) -> String {
        let now = self.now_utc();
        let formatted = match self.zone {
            ClockZone::Local => now.with_timezone(&Local).format(CLOCK_FORMAT).to_string(),
            ClockZone::Iana(tz) => now.with_timezone(&tz).format(CLOCK_FORMAT).to_string(),
        };

        format!("Time and Date: {}", formatted)
    }
}
