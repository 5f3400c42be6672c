use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::event::{default_resources, Event, Resource};
use crate::storage::SnapshotStorage;
use crate::time::first_of_month;
use crate::{Error, Result};

/// How long an unconsumed scroll target stays alive. A consumer normally
/// takes it synchronously; the deadline only guards against one that
/// never shows up.
pub const SCROLL_TARGET_TTL: Duration = Duration::from_millis(1000);

/// The full persisted state, round-trippable through JSON. Timestamps
/// serialize as ISO-8601 via chrono.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub resources: Vec<Resource>,
    pub current_date: NaiveDate,
    pub scroll_target: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy)]
struct ScrollTarget {
    date: NaiveDate,
    set_at: Instant,
}

/// Owns the canonical event/resource collections and the visible month.
/// Every mutation bumps the generation counter (the view polls it) and
/// writes a best-effort snapshot through the injected storage port.
pub struct CalendarStore {
    events: Vec<Event>,
    resources: Vec<Resource>,
    current_date: NaiveDate,
    scroll_target: Option<ScrollTarget>,
    storage: Box<dyn SnapshotStorage>,
    scroll_ttl: Duration,
    generation: u64,
}

impl CalendarStore {
    /// Build the store from a previously persisted snapshot. An absent or
    /// malformed snapshot falls back to the default state; it is never an
    /// error for the caller.
    pub fn load(storage: Box<dyn SnapshotStorage>) -> Self {
        let snapshot = match storage.load() {
            Ok(Some(contents)) => match serde_json::from_str::<Snapshot>(&contents) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    warn!("malformed calendar snapshot, starting fresh: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("could not read calendar snapshot, starting fresh: {err}");
                None
            }
        };

        let now = Instant::now();
        match snapshot {
            Some(snapshot) => Self {
                events: snapshot.events,
                resources: snapshot.resources,
                current_date: snapshot.current_date,
                scroll_target: snapshot.scroll_target.map(|date| ScrollTarget {
                    date,
                    set_at: now,
                }),
                storage,
                scroll_ttl: SCROLL_TARGET_TTL,
                generation: 0,
            },
            None => Self {
                events: Vec::new(),
                resources: default_resources(),
                current_date: Local::now().date_naive(),
                scroll_target: None,
                storage,
                scroll_ttl: SCROLL_TARGET_TTL,
                generation: 0,
            },
        }
    }

    /// Override the scroll target lifetime, for tests
    pub fn with_scroll_ttl(mut self, ttl: Duration) -> Self {
        self.scroll_ttl = ttl;
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Bumped on every committed mutation. An immediate-mode view
    /// compares this across frames instead of registering callbacks.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Peek at the pending scroll target, expiring it if it has been
    /// waiting longer than the TTL.
    pub fn scroll_target(&mut self) -> Option<NaiveDate> {
        let target = self.scroll_target?;
        if target.set_at.elapsed() >= self.scroll_ttl {
            self.scroll_target = None;
            return None;
        }
        Some(target.date)
    }

    /// Consume the scroll target. The primary path: the scroller calls
    /// this once it acts, clearing the signal synchronously.
    pub fn take_scroll_target(&mut self) -> Option<NaiveDate> {
        let date = self.scroll_target()?;
        self.scroll_target = None;
        Some(date)
    }

    pub fn add_event(&mut self, event: Event) -> Result<()> {
        if self.event(&event.id).is_some() {
            return Err(Error::duplicate_event(&event.id));
        }
        if self.resource(&event.resource_id).is_none() {
            return Err(Error::unknown_resource(&event.resource_id));
        }

        self.events.push(event);
        self.touch();
        Ok(())
    }

    pub fn update_event(&mut self, event: Event) -> Result<()> {
        let Some(slot) = self.events.iter_mut().find(|e| e.id == event.id) else {
            return Err(Error::event_not_found(&event.id));
        };

        *slot = event;
        self.touch();
        Ok(())
    }

    /// Removing an id that is not present is already satisfied, not an
    /// error.
    pub fn delete_event(&mut self, id: &str) {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() != before {
            self.touch();
        }
    }

    pub fn add_resource(&mut self, resource: Resource) -> Result<()> {
        if self.resource(&resource.id).is_some() {
            return Err(Error::duplicate_resource(&resource.id));
        }

        self.resources.push(resource);
        self.touch();
        Ok(())
    }

    /// The next generated resource, "R<n>" with a letter title, matching
    /// the add-resource action's numbering.
    pub fn next_resource(&self) -> Resource {
        let n = self.resources.len();
        let letter = (b'A' + (n % 26) as u8) as char;
        Resource {
            id: format!("R{}", n + 1),
            title: format!("Resource {letter}"),
        }
    }

    /// Show the month `date` falls in. With `should_scroll`, also raise
    /// the one-shot scroll signal for that exact date.
    pub fn navigate_to_date(&mut self, date: NaiveDate, should_scroll: bool) {
        self.current_date = first_of_month(date);
        self.scroll_target = should_scroll.then(|| ScrollTarget {
            date,
            set_at: Instant::now(),
        });
        self.touch();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            events: self.events.clone(),
            resources: self.resources.clone(),
            current_date: self.current_date,
            scroll_target: self.scroll_target.map(|t| t.date),
        }
    }

    fn touch(&mut self) {
        self.generation += 1;
        if let Err(err) = self.persist() {
            // fire and forget: a failed write never aborts the mutation
            error!("failed to persist calendar snapshot: {err}");
        }
    }

    fn persist(&mut self) -> Result<()> {
        let serialized = serde_json::to_string(&self.snapshot())?;
        self.storage.save(&serialized)
    }
}
