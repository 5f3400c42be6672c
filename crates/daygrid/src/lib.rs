pub mod error;
pub mod event;
pub mod interaction;
pub mod layout;
mod result;
pub mod scroll;
pub mod storage;
pub mod store;
pub mod time;

pub use error::{Error, ValidationError};
pub use event::{default_resources, random_event_id, Event, EventColor, Resource};
pub use interaction::{
    screen_point_to_cell, Gesture, GridMetrics, InteractionConfig, InteractionController, Point,
    ResizeEdge,
};
pub use layout::{
    event_geometry, slot_y, stack_slot, EventGeometry, LayoutMode, ResizePreview, CELL_WIDTH,
};
pub use result::Result;
pub use scroll::{scroll_offset_for_date, ViewportMetrics};
pub use storage::{
    DataPath, FileSnapshotStorage, MemorySnapshotStorage, SnapshotStorage, SNAPSHOT_FILE,
};
pub use store::{CalendarStore, Snapshot, SCROLL_TARGET_TTL};
