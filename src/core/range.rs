//! Y-axis domain and tick resolution.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::model::{Series, YAxisConfig};

/// Share of the data span added above and below an auto range.
pub const AUTO_MARGIN_RATIO: f64 = 0.10;
/// Absolute margin used when the data span is zero.
pub const FALLBACK_MARGIN: f64 = 1.0;
/// Share of the magnitude used instead of [`FALLBACK_MARGIN`] for values
/// large enough that adding 1.0 is lost to rounding.
pub const RELATIVE_FALLBACK_MARGIN: f64 = 1.0e-9;

/// Resolved y domain. `max > min` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub min: f64,
    pub max: f64,
    /// Explicit ticks in ascending order; `None` means auto split.
    pub ticks: Option<Vec<f64>>,
    pub split_number: usize,
}

impl ResolvedRange {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn has_explicit_ticks(&self) -> bool {
        self.ticks.is_some()
    }

    /// Values to draw grid lines and labels at, ascending.
    #[must_use]
    pub fn tick_values(&self) -> SmallVec<[f64; 8]> {
        if let Some(ticks) = &self.ticks {
            return ticks.iter().copied().collect();
        }
        let step = self.span() / self.split_number as f64;
        (0..=self.split_number)
            .map(|index| self.min + step * index as f64)
            .collect()
    }
}

/// Decides the y domain for `series` under the axis request `axis`.
///
/// Explicit ticks fix the domain to their extent; otherwise the data extent
/// widened by [`AUTO_MARGIN_RATIO`] is used, floored at zero for
/// non-negative data. Explicit `min`/`max` override either result.
#[must_use]
pub fn resolve_range(series: &[Series], axis: &YAxisConfig) -> ResolvedRange {
    let explicit_min = axis.min.filter(|value| value.is_finite());
    let explicit_max = axis.max.filter(|value| value.is_finite());
    let split_number = axis.split_number();

    let ticks = axis.ticks.as_ref().and_then(|ticks| sorted_finite(ticks));

    let (auto_min, auto_max) = match &ticks {
        Some(ticks) => (ticks[0], ticks[ticks.len() - 1]),
        None => auto_extent(series),
    };

    let min = explicit_min.unwrap_or(auto_min);
    let mut max = explicit_max.unwrap_or(auto_max);
    if max <= min {
        max = min + fallback_margin(min);
    }

    ResolvedRange {
        min,
        max,
        ticks,
        split_number,
    }
}

fn fallback_margin(anchor: f64) -> f64 {
    FALLBACK_MARGIN.max(anchor.abs() * RELATIVE_FALLBACK_MARGIN)
}

fn sorted_finite(ticks: &[f64]) -> Option<Vec<f64>> {
    let mut finite: Vec<f64> = ticks.iter().copied().filter(|tick| tick.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by_key(|tick| OrderedFloat(*tick));
    finite.dedup();
    Some(finite)
}

fn auto_extent(series: &[Series]) -> (f64, f64) {
    let mut values = series
        .iter()
        .flat_map(|series| series.data.iter().copied())
        .filter(|value| value.is_finite())
        .peekable();
    if values.peek().is_none() {
        return (0.0, FALLBACK_MARGIN);
    }

    let (raw_min, raw_max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    let span = raw_max - raw_min;
    let margin = if span > 0.0 {
        span * AUTO_MARGIN_RATIO
    } else {
        fallback_margin(raw_min)
    };

    let min = if raw_min >= 0.0 {
        (raw_min - margin).max(0.0)
    } else {
        raw_min - margin
    };
    (min, raw_max + margin)
}
