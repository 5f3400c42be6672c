use chrono::{NaiveDate, NaiveTime};
use rand::Rng;
use tracing::debug;

use crate::event::{random_event_id, Event, EventColor};
use crate::layout::ResizePreview;
use crate::store::CalendarStore;
use crate::time::{
    add_days, add_minutes, days_between, days_in_month, first_of_month, round_to_quantum,
    truncate_to_day,
};
use crate::Result;

/// Screen-space point fed in by the view layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Explicit description of the rendered grid, supplied by the view so
/// hit testing never queries a live render tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMetrics {
    /// Top-left corner of the grid surface in screen coordinates.
    pub origin: Point,
    /// Width of the frozen resource sidebar.
    pub sidebar_width: f32,
    /// Height of the day-header row.
    pub header_height: f32,
    pub cell_width: f32,
    pub row_height: f32,
    /// Scroll applied to the day columns / resource rows.
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// Any date inside the displayed month.
    pub month: NaiveDate,
    /// Resource ids in row order.
    pub rows: Vec<String>,
}

/// Map a screen point to the calendar cell under it.
pub fn screen_point_to_cell(point: Point, grid: &GridMetrics) -> Option<(NaiveDate, String)> {
    let x = point.x - grid.origin.x - grid.sidebar_width + grid.scroll_x;
    let y = point.y - grid.origin.y - grid.header_height + grid.scroll_y;
    if x < 0.0 || y < 0.0 {
        return None;
    }

    let col = (x / grid.cell_width) as i64;
    let row = (y / grid.row_height) as usize;

    if col >= i64::from(days_in_month(grid.month)) {
        return None;
    }

    let date = first_of_month(grid.month) + chrono::Duration::days(col);
    let resource_id = grid.rows.get(row)?.clone();
    Some((date, resource_id))
}

/// Which edge of the event a resize handle grabs. The opposite edge is
/// the anchor that stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// The pointer gesture state machine. At most one gesture is active;
/// entering a new one is gated on `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,

    Dragging {
        event_id: String,
    },

    Resizing {
        event_id: String,
        edge: ResizeEdge,
        preview: ResizePreview,
    },
}

/// Tunables for cell-click creation. The coarse grid creates hour-long
/// midnight-anchored events; a fine-grained configuration snaps to the
/// quantum instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    pub default_duration_min: i64,
    pub quantum_min: u32,
    pub snap_to_quantum: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            default_duration_min: 60,
            quantum_min: 15,
            snap_to_quantum: false,
        }
    }
}

/// Translates pointer gestures into store commits. Holds only transient
/// gesture state; the store stays authoritative throughout.
#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
    pending_delete: Option<String>,
    config: InteractionConfig,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            pending_delete: None,
            config,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    /// The live resize preview for `event_id`, if that event is the one
    /// being resized. The layout engine consumes this each frame.
    pub fn resize_preview_for(&self, event_id: &str) -> Option<&ResizePreview> {
        match &self.gesture {
            Gesture::Resizing {
                event_id: id,
                preview,
                ..
            } if id == event_id => Some(preview),
            _ => None,
        }
    }

    /// Begin dragging an event body. Ignored unless idle and the event
    /// exists.
    pub fn on_drag_start(&mut self, store: &CalendarStore, event_id: &str) {
        if !self.is_idle() || store.event(event_id).is_none() {
            return;
        }

        self.gesture = Gesture::Dragging {
            event_id: event_id.to_owned(),
        };
    }

    /// Drop the dragged event on a cell. Duration is preserved and the
    /// original start time-of-day is applied to the target date.
    pub fn on_drop(
        &mut self,
        store: &mut CalendarStore,
        date: NaiveDate,
        resource_id: &str,
    ) -> Result<()> {
        let Gesture::Dragging { event_id } = &self.gesture else {
            return Ok(());
        };
        let event_id = event_id.clone();
        self.gesture = Gesture::Idle;

        let Some(event) = store.event(&event_id) else {
            // deleted mid-gesture; nothing to move
            debug!("dragged event {event_id} disappeared, dropping gesture");
            return Ok(());
        };

        let duration = event.duration();
        let new_start = date.and_time(event.start.time());
        let updated = Event {
            start: new_start,
            end: new_start + duration,
            resource_id: resource_id.to_owned(),
            ..event.clone()
        };

        store.update_event(updated)
    }

    /// Grab a resize handle. The preview starts at the committed span
    /// with no offset.
    pub fn on_resize_start(&mut self, store: &CalendarStore, event_id: &str, edge: ResizeEdge) {
        if !self.is_idle() {
            return;
        }
        let Some(event) = store.event(event_id) else {
            return;
        };

        self.gesture = Gesture::Resizing {
            event_id: event_id.to_owned(),
            edge,
            preview: ResizePreview {
                duration_days: event.days_duration().max(1),
                offset_days: 0,
            },
        };
    }

    /// Pointer moved during an active gesture. Tracking is global: the
    /// view forwards every move until release, wherever the pointer is.
    pub fn on_pointer_move(&mut self, store: &CalendarStore, point: Point, grid: &GridMetrics) {
        let Gesture::Resizing {
            event_id,
            edge,
            preview,
        } = &mut self.gesture
        else {
            return;
        };

        let Some(event) = store.event(event_id) else {
            // deleted mid-gesture
            self.gesture = Gesture::Idle;
            return;
        };

        // off-grid pointers keep the previous preview
        let Some((pointer_date, _)) = screen_point_to_cell(point, grid) else {
            return;
        };

        let start_day = truncate_to_day(event.start);
        let diff = days_between(start_day, pointer_date.and_time(NaiveTime::MIN));

        match edge {
            ResizeEdge::End => {
                preview.duration_days = diff.max(1);
                preview.offset_days = 0;
            }
            ResizeEdge::Start => {
                let total = days_between(start_day, truncate_to_day(event.end));
                let new_duration = total - diff;
                // collapsing below one day is rejected silently: the
                // preview sticks at its last valid value
                if new_duration >= 1 {
                    preview.duration_days = new_duration;
                    preview.offset_days = diff;
                }
            }
        }
    }

    /// Pointer released. Commits an active resize; an active drag that
    /// never reached `on_drop` reverts with no commit.
    pub fn on_pointer_up(&mut self, store: &mut CalendarStore) -> Result<()> {
        let Gesture::Resizing {
            event_id,
            edge,
            preview,
        } = std::mem::take(&mut self.gesture)
        else {
            return Ok(());
        };

        let Some(event) = store.event(&event_id) else {
            debug!("resized event {event_id} disappeared, dropping gesture");
            return Ok(());
        };

        let start_day = truncate_to_day(event.start);
        let end_day = truncate_to_day(event.end);

        // move one edge by whole days, then restore each edge's original
        // time-of-day
        let (new_start, new_end) = match edge {
            ResizeEdge::End => {
                let end = add_days(start_day, preview.duration_days);
                (event.start, end.date().and_time(event.end.time()))
            }
            ResizeEdge::Start => {
                let start = add_days(end_day, -preview.duration_days);
                (start.date().and_time(event.start.time()), event.end)
            }
        };

        let updated = Event {
            start: new_start,
            end: new_end,
            ..event.clone()
        };

        store.update_event(updated)
    }

    /// Click on empty cell area: create a new event there. Returns the
    /// new event's id, or `None` when a gesture is already active.
    pub fn on_cell_activate(
        &mut self,
        store: &mut CalendarStore,
        rng: &mut impl Rng,
        date: NaiveDate,
        resource_id: &str,
        click_time: Option<NaiveTime>,
    ) -> Result<Option<String>> {
        if !self.is_idle() {
            return Ok(None);
        }

        let start = match (self.config.snap_to_quantum, click_time) {
            (true, Some(time)) => round_to_quantum(date.and_time(time), self.config.quantum_min),
            _ => date.and_time(NaiveTime::MIN),
        };

        let event = Event {
            id: random_event_id(rng),
            title: format!("Event {}", store.events().len() + 1),
            start,
            end: add_minutes(start, self.config.default_duration_min),
            resource_id: resource_id.to_owned(),
            color: EventColor::random(rng),
        };

        let id = event.id.clone();
        store.add_event(event)?;
        Ok(Some(id))
    }

    /// Click on an event body: stage it for deletion pending external
    /// confirmation.
    pub fn request_delete(&mut self, event_id: &str) {
        self.pending_delete = Some(event_id.to_owned());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn confirm_delete(&mut self, store: &mut CalendarStore) {
        if let Some(id) = self.pending_delete.take() {
            store.delete_event(&id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
