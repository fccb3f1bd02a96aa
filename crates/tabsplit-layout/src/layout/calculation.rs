//! Layout calculation: display selection and the two-way split.

use tabsplit_common::types::{MonitorInfo, Rect, WindowBounds};
use tracing::debug;

use super::{DisplaySource, LayoutEngine, SplitLayout};

impl LayoutEngine {
    /// Compute the left/right window rectangles for a split of the display
    /// holding `current`.
    pub fn compute_split_layout(
        &self,
        current: &WindowBounds,
        monitors: &[MonitorInfo],
    ) -> SplitLayout {
        let (area, source) = self.select_display_area(current, monitors);
        let area = area.with_min_size(self.min_width, self.min_height);

        let half = area.width / 2;
        let width = half.saturating_add(self.overlap);

        let left_window = Rect::new(area.left, area.top, width, area.height);
        let right_window = Rect::new(
            area.left.saturating_add(half).saturating_sub(self.overlap),
            area.top,
            width,
            area.height,
        );

        debug!(
            ?source,
            area_width = area.width,
            area_height = area.height,
            "computed split layout"
        );

        SplitLayout {
            display: area,
            source,
            left_window,
            right_window,
        }
    }

    /// Pick the work area to split. The first monitor containing the
    /// window center wins; list order breaks ties, not proximity.
    pub fn select_display_area(
        &self,
        current: &WindowBounds,
        monitors: &[MonitorInfo],
    ) -> (Rect, DisplaySource) {
        let window = current.resolve(self.fallback_width, self.fallback_height);

        let Some(first) = monitors.first() else {
            return (window, DisplaySource::WindowBounds);
        };

        let (cx, cy) = window.center();
        monitors
            .iter()
            .position(|m| m.work_area.contains_point(cx, cy))
            .map(|idx| (monitors[idx].work_area, DisplaySource::ContainingMonitor(idx)))
            .unwrap_or((first.work_area, DisplaySource::FirstMonitor))
    }
}
