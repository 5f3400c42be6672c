use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::time::days_between;

/// Fixed palette the view maps to its color tokens. Closed on purpose:
/// persisted snapshots only ever contain these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Blue,
    Green,
    Pink,
    Gray,
    Red,
    Purple,
    Orange,
    Teal,
    Indigo,
    Amber,
}

impl EventColor {
    /// Uniform random palette entry from an injected source, so tests
    /// can seed it.
    pub fn random(rng: &mut impl Rng) -> Self {
        let palette: Vec<EventColor> = EventColor::iter().collect();
        palette[rng.random_range(0..palette.len())]
    }
}

/// A time-boxed item assigned to exactly one resource row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub resource_id: String,
    pub color: EventColor,
}

impl Event {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole calendar days this event spans, by truncated endpoints.
    /// Sub-day events report 0; layout clamps to a minimum of one column.
    pub fn days_duration(&self) -> i64 {
        days_between(self.start, self.end)
    }
}

/// A schedulable row (person, room, ...) that events are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
}

/// The seed set for first run: "A" through "O".
pub fn default_resources() -> Vec<Resource> {
    ('A'..='O')
        .map(|c| Resource {
            id: c.to_string(),
            title: format!("Resource {c}"),
        })
        .collect()
}

/// 9 character base-36 id, e.g. "k3j9x0q2m"
pub fn random_event_id(rng: &mut impl Rng) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
