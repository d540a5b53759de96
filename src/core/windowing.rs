use std::ops::Range;

use crate::core::types::PlotArea;

// Keeps `max_scroll / item_width` from flooring one slot short.
const SLOT_EPSILON: f64 = 1e-9;

/// Horizontal category window: how many slots are visible and how wide each is.
///
/// Scroll offsets snap to whole slots when deciding which categories are
/// drawn, so the first visible category always sits at the plot's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWindow {
    total: usize,
    visible_item_count: usize,
    item_width: f64,
}

impl CategoryWindow {
    /// `item_count` of `None` or `0` shows every category.
    #[must_use]
    pub fn new(total: usize, item_count: Option<usize>, plot_width: f64) -> Self {
        let visible_item_count = item_count
            .filter(|count| *count > 0)
            .map_or(total, |count| count.min(total));
        let item_width = if visible_item_count > 0 {
            plot_width / visible_item_count as f64
        } else {
            plot_width
        };
        Self {
            total,
            visible_item_count,
            item_width,
        }
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.total
    }

    #[must_use]
    pub fn visible_item_count(self) -> usize {
        self.visible_item_count
    }

    #[must_use]
    pub fn item_width(self) -> f64 {
        self.item_width
    }

    #[must_use]
    pub fn max_scroll(self) -> f64 {
        (self.total - self.visible_item_count) as f64 * self.item_width
    }

    #[must_use]
    pub fn clamp_scroll(self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll())
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn scroll_start_index(self, scroll_offset: f64) -> usize {
        if self.item_width <= 0.0 || !scroll_offset.is_finite() || scroll_offset <= 0.0 {
            return 0;
        }
        let slots = (scroll_offset / self.item_width + SLOT_EPSILON).floor() as usize;
        slots.min(self.total - self.visible_item_count)
    }

    /// Indices drawn for `scroll_offset`.
    #[must_use]
    pub fn visible_range(self, scroll_offset: f64) -> Range<usize> {
        let start = self.scroll_start_index(scroll_offset);
        start..(start + self.visible_item_count).min(self.total)
    }

    /// Center x of the slot for category `index`; may fall outside the plot.
    #[must_use]
    pub fn slot_center_x(self, index: usize, scroll_offset: f64, plot: PlotArea) -> f64 {
        let start = self.scroll_start_index(scroll_offset) as f64;
        plot.x + (index as f64 - start) * self.item_width + self.item_width / 2.0
    }

    /// Nearest category to a touch at `x`, clamped to the visible slots.
    #[must_use]
    pub fn hit_test(self, x: f64, scroll_offset: f64, plot: PlotArea) -> Option<usize> {
        if self.visible_item_count == 0 || self.item_width <= 0.0 || !x.is_finite() {
            return None;
        }
        let relative = x - plot.x - self.item_width / 2.0;
        let slot = (relative / self.item_width).round();
        let last = (self.visible_item_count - 1) as f64;
        let slot = slot.clamp(0.0, last) as usize;
        let index = self.scroll_start_index(scroll_offset) + slot;
        (index < self.total).then_some(index)
    }
}
