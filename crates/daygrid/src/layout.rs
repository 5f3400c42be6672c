use crate::event::Event;

/// Day-column unit width in fixed-slot mode, in pixels.
pub const CELL_WIDTH: f32 = 80.0;

/// Vertical slot size and spacing for stacked same-cell events in
/// fixed-slot mode.
pub const SLOT_HEIGHT: f32 = 20.0;
pub const SLOT_SPACING: f32 = 4.0;

/// The two geometry modes of the grid. A configuration picks one; their
/// math never mixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Event width as a percentage of its day column, spanning columns
    /// proportionally.
    #[default]
    Proportional,

    /// Fixed pixel-width day columns with vertical stacking of same-cell
    /// events.
    FixedSlot,
}

/// In-progress resize geometry, not yet committed to the store. The
/// offset is nonzero only when the start edge moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePreview {
    pub duration_days: i64,
    pub offset_days: i64,
}

/// Placement of one event inside its home cell. Horizontal values are
/// percent-of-column in proportional mode and pixels in fixed-slot mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventGeometry {
    pub x_offset: f32,
    pub width: f32,
    pub slot: usize,
}

/// Deterministic stack position among the events sharing a cell:
/// ascending start, shorter duration first, id as the final tiebreak.
pub fn stack_slot(event_id: &str, siblings: &[Event]) -> Option<usize> {
    let mut order: Vec<&Event> = siblings.iter().collect();
    order.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.duration().cmp(&b.duration()))
            .then(a.id.cmp(&b.id))
    });

    order.iter().position(|e| e.id == event_id)
}

/// Vertical pixel offset of a stack slot in fixed-slot mode.
pub fn slot_y(slot: usize) -> f32 {
    slot as f32 * (SLOT_HEIGHT + SLOT_SPACING)
}

/// Geometry for `event` among its cell's `siblings`. A live resize
/// supplies `preview`, which overrides the committed span until the
/// gesture ends; an event never renders narrower than one day column.
pub fn event_geometry(
    event: &Event,
    siblings: &[Event],
    mode: LayoutMode,
    preview: Option<&ResizePreview>,
) -> EventGeometry {
    let (span_days, offset_days) = match preview {
        Some(p) => (p.duration_days.max(1), p.offset_days),
        None => (event.days_duration().max(1), 0),
    };

    let slot = stack_slot(&event.id, siblings).unwrap_or(0);

    let unit = match mode {
        LayoutMode::Proportional => 100.0,
        LayoutMode::FixedSlot => CELL_WIDTH,
    };

    EventGeometry {
        x_offset: offset_days as f32 * unit,
        width: span_days as f32 * unit,
        slot,
    }
}
