use crate::error::ChartResult;
use crate::interaction::InteractionOutcome;
use crate::render::Renderer;

use super::ChartEngine;

pub(super) struct InteractionCoordinator;

impl InteractionCoordinator {
    /// Publishes the outcome to plugins. Redrawing is left to the host, which
    /// checks `needs_redraw`.
    fn settle<R: Renderer>(
        engine: &mut ChartEngine<R>,
        outcome: InteractionOutcome,
    ) -> InteractionOutcome {
        engine.emit_outcome_events(outcome);
        outcome
    }

    pub(super) fn touch_start<R: Renderer>(
        engine: &mut ChartEngine<R>,
        x: f64,
    ) -> ChartResult<InteractionOutcome> {
        let outcome = engine.core.interaction.touch_start(x)?;
        Ok(Self::settle(engine, outcome))
    }

    pub(super) fn touch_move<R: Renderer>(
        engine: &mut ChartEngine<R>,
        x: f64,
    ) -> ChartResult<InteractionOutcome> {
        let outcome = engine.core.interaction.touch_move(x)?;
        Ok(Self::settle(engine, outcome))
    }

    pub(super) fn touch_end<R: Renderer>(engine: &mut ChartEngine<R>) -> InteractionOutcome {
        let outcome = engine.core.interaction.touch_end();
        Self::settle(engine, outcome)
    }

    pub(super) fn show_tooltip_at<R: Renderer>(
        engine: &mut ChartEngine<R>,
        x: f64,
    ) -> ChartResult<InteractionOutcome> {
        let outcome = engine.core.interaction.show_tooltip_at(x)?;
        Ok(Self::settle(engine, outcome))
    }

    pub(super) fn hide_tooltip<R: Renderer>(engine: &mut ChartEngine<R>) -> InteractionOutcome {
        let outcome = engine.core.interaction.hide_tooltip();
        Self::settle(engine, outcome)
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Starts a drag at `x` and shows the tooltip for the slot under it.
    pub fn touch_start(&mut self, x: f64) -> ChartResult<InteractionOutcome> {
        InteractionCoordinator::touch_start(self, x)
    }

    /// Scrolls (when enabled) and moves the tooltip; ignored without a drag.
    pub fn touch_move(&mut self, x: f64) -> ChartResult<InteractionOutcome> {
        InteractionCoordinator::touch_move(self, x)
    }

    /// Ends the drag and hides the tooltip; the scroll offset stays where it is.
    pub fn touch_end(&mut self) -> InteractionOutcome {
        InteractionCoordinator::touch_end(self)
    }

    pub fn show_tooltip_at(&mut self, x: f64) -> ChartResult<InteractionOutcome> {
        InteractionCoordinator::show_tooltip_at(self, x)
    }

    pub fn hide_tooltip(&mut self) -> InteractionOutcome {
        InteractionCoordinator::hide_tooltip(self)
    }

    /// Drops gesture, scroll and tooltip state, as on unmount.
    pub fn reset_interaction(&mut self) -> ChartResult<()> {
        self.core.interaction.reset();
        self.sync_interaction_layout()?;
        Ok(())
    }
}
