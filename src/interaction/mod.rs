//! Touch gesture state: horizontal scroll and tooltip hit-testing.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::types::PlotArea;
use crate::core::windowing::CategoryWindow;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A finger is down; offsets are relative to where it landed.
    Tracking { start_x: f64, start_offset: f64 },
}

/// Scroll window and tooltip state of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportState {
    pub scroll_offset_px: f64,
    pub max_scroll_px: f64,
    pub visible_item_count: usize,
    pub item_width_px: f64,
    pub active_tooltip_index: Option<usize>,
}

/// What a single input event changed, so the host can decide on a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionOutcome {
    pub scroll_changed: bool,
    /// The hit-tested index moved to a new category (haptic trigger).
    pub index_changed: bool,
    pub tooltip_hidden: bool,
    pub tooltip_index: Option<usize>,
    pub needs_redraw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HitGeometry {
    window: CategoryWindow,
    plot: PlotArea,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionController {
    gesture: GestureState,
    viewport: ViewportState,
    enable_scroll: bool,
    geometry: Option<HitGeometry>,
}

impl InteractionController {
    #[must_use]
    pub fn new(enable_scroll: bool) -> Self {
        Self {
            enable_scroll,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset_px
    }

    #[must_use]
    pub fn active_tooltip_index(&self) -> Option<usize> {
        self.viewport.active_tooltip_index
    }

    #[must_use]
    pub fn enable_scroll(&self) -> bool {
        self.enable_scroll
    }

    pub fn set_enable_scroll(&mut self, enable_scroll: bool) {
        self.enable_scroll = enable_scroll;
    }

    /// Recomputes the scroll window after the model or viewport changed.
    ///
    /// The current offset is clamped into the new range and a tooltip index
    /// past the last category is dropped.
    pub fn sync_layout(&mut self, window: CategoryWindow, plot: PlotArea) -> InteractionOutcome {
        let previous = self.viewport;
        self.geometry = Some(HitGeometry { window, plot });
        self.viewport.max_scroll_px = window.max_scroll();
        self.viewport.visible_item_count = window.visible_item_count();
        self.viewport.item_width_px = window.item_width();
        self.viewport.scroll_offset_px = window.clamp_scroll(previous.scroll_offset_px);

        let mut outcome = InteractionOutcome {
            scroll_changed: previous.scroll_offset_px != self.viewport.scroll_offset_px,
            ..InteractionOutcome::default()
        };
        if let Some(index) = previous.active_tooltip_index {
            if index >= window.total() {
                self.viewport.active_tooltip_index = None;
                outcome.tooltip_hidden = true;
            }
        }
        outcome.tooltip_index = self.viewport.active_tooltip_index;
        outcome.needs_redraw = outcome.scroll_changed || outcome.tooltip_hidden;
        outcome
    }

    /// Nearest category index for a touch at `x`, or `None` off the data.
    #[must_use]
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        let geometry = self.geometry?;
        geometry
            .window
            .hit_test(x, self.viewport.scroll_offset_px, geometry.plot)
    }

    pub fn touch_start(&mut self, x: f64) -> ChartResult<InteractionOutcome> {
        ensure_finite_touch(x)?;
        self.gesture = GestureState::Tracking {
            start_x: x,
            start_offset: self.viewport.scroll_offset_px,
        };
        trace!(x, offset = self.viewport.scroll_offset_px, "gesture tracking");

        let mut outcome = self.activate_index(self.hit_test(x));
        outcome.needs_redraw = true;
        Ok(outcome)
    }

    pub fn touch_move(&mut self, x: f64) -> ChartResult<InteractionOutcome> {
        ensure_finite_touch(x)?;
        let GestureState::Tracking {
            start_x,
            start_offset,
        } = self.gesture
        else {
            return Ok(InteractionOutcome::default());
        };

        let mut scroll_changed = false;
        if self.enable_scroll {
            let next = (start_offset - (x - start_x)).clamp(0.0, self.viewport.max_scroll_px);
            scroll_changed = next != self.viewport.scroll_offset_px;
            self.viewport.scroll_offset_px = next;
        }

        let mut outcome = self.activate_index(self.hit_test(x));
        outcome.scroll_changed = scroll_changed;
        outcome.needs_redraw = true;
        trace!(
            x,
            offset = self.viewport.scroll_offset_px,
            index = ?outcome.tooltip_index,
            "gesture move"
        );
        Ok(outcome)
    }

    /// Ends the gesture; the final scroll offset is kept as-is.
    pub fn touch_end(&mut self) -> InteractionOutcome {
        self.gesture = GestureState::Idle;
        let mut outcome = self.hide_tooltip();
        outcome.needs_redraw = true;
        trace!(offset = self.viewport.scroll_offset_px, "gesture idle");
        outcome
    }

    /// Shows the tooltip for the category under `x`, independent of any drag.
    pub fn show_tooltip_at(&mut self, x: f64) -> ChartResult<InteractionOutcome> {
        ensure_finite_touch(x)?;
        let mut outcome = self.activate_index(self.hit_test(x));
        outcome.needs_redraw = outcome.index_changed;
        Ok(outcome)
    }

    pub fn hide_tooltip(&mut self) -> InteractionOutcome {
        let was_visible = self.viewport.active_tooltip_index.take().is_some();
        InteractionOutcome {
            tooltip_hidden: was_visible,
            needs_redraw: was_visible,
            ..InteractionOutcome::default()
        }
    }

    /// Back to the unmounted state: no gesture, no scroll, no tooltip.
    pub fn reset(&mut self) {
        self.gesture = GestureState::Idle;
        self.viewport = ViewportState::default();
        self.geometry = None;
    }

    fn activate_index(&mut self, index: Option<usize>) -> InteractionOutcome {
        // A miss leaves the current tooltip untouched.
        let Some(index) = index else {
            return InteractionOutcome {
                tooltip_index: self.viewport.active_tooltip_index,
                ..InteractionOutcome::default()
            };
        };
        let index_changed = self.viewport.active_tooltip_index != Some(index);
        self.viewport.active_tooltip_index = Some(index);
        InteractionOutcome {
            index_changed,
            tooltip_index: Some(index),
            ..InteractionOutcome::default()
        }
    }
}

fn ensure_finite_touch(x: f64) -> ChartResult<()> {
    if x.is_finite() {
        Ok(())
    } else {
        warn!(x, "rejecting non-finite touch coordinate");
        Err(ChartError::InvalidData(
            "touch x must be finite".to_owned(),
        ))
    }
}
