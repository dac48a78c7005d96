use derive_more::Constructor;
use serde::Deserialize;
use std::fmt;

use crate::error::Result;
use crate::source::EventSource;

/// A single day-granular event as delivered by the event source.
#[derive(Clone, Debug, PartialEq, Eq, Constructor, Deserialize)]
pub struct Event {
    pub date: String,
    pub title: String,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.date)
    }
}

pub fn parse_events(payload: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(payload)?)
}

/// Holds the loaded events in load order.
#[derive(Clone, Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        EventStore { events }
    }

    /// Fetches and parses the whole payload before swapping it in. On error
    /// the previous events are kept untouched.
    pub fn load(&mut self, source: &dyn EventSource) -> Result<usize> {
        let payload = source.fetch()?;
        let events = parse_events(&payload)?;

        log::info!("Loaded {} events from {}", events.len(), source.describe());
        self.replace(events);

        Ok(self.events.len())
    }

    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn has_event_on(&self, iso_date: &str) -> bool {
        self.events.iter().any(|event| event.date == iso_date)
    }

    pub fn find_on(&self, iso_date: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.date == iso_date)
    }

    pub fn events_on<'a>(&'a self, iso_date: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |event| event.date == iso_date)
    }

    /// Case-insensitive substring match on titles, in load order.
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Event> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.events
            .iter()
            .filter(|event| event.title.to_lowercase().contains(&needle))
            .collect()
    }
}
