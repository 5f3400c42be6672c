use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::time::{days_in_month, first_of_month};

/// Horizontal measurements of the scrollable grid surface, supplied by
/// the view. All values are pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Visible width of the scroll container.
    pub container_width: f32,
    /// Full width of the scrollable content.
    pub content_width: f32,
    /// Width of the frozen leading sidebar.
    pub sidebar_width: f32,
    pub cell_width: f32,
}

/// The scroll offset that centers `date`'s column in the viewport,
/// right of the frozen sidebar, clamped to the scrollable range.
///
/// `None` when nothing overflows or when `date` is outside the month
/// anchored by `month` — both recoverable, the caller simply does not
/// scroll. Applying the offset (smoothly or not) is the view's job.
pub fn scroll_offset_for_date(
    date: NaiveDate,
    month: NaiveDate,
    viewport: &ViewportMetrics,
) -> Option<f32> {
    let max_scroll = viewport.content_width - viewport.container_width;
    if max_scroll <= 0.0 {
        // content fits, nothing to do
        return None;
    }

    let month_start = first_of_month(month);
    let day_index = date.signed_duration_since(month_start).num_days();
    if day_index < 0 || day_index >= i64::from(days_in_month(month)) {
        warn!(
            "scroll target {date} is not in the displayed month {}-{:02}",
            month_start.year(),
            month_start.month()
        );
        return None;
    }

    let column_left = viewport.sidebar_width + day_index as f32 * viewport.cell_width;
    let centered = column_left
        - viewport.sidebar_width
        - (viewport.container_width - viewport.cell_width) / 2.0;

    Some(centered.clamp(0.0, max_scroll))
}
