//! Value label text for axis ticks and tooltip fallbacks.

use std::fmt;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::range::ResolvedRange;

/// Host-supplied replacement for the built-in value formatting.
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

const INTEGER_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPrecision {
    /// Integers without decimals, anything else to at most 2 decimals.
    TickNatural,
    /// At most `n` decimals, trailing zeros removed.
    Decimals(u32),
    Integer,
    /// Mantissa with one decimal and a signed exponent: `1.5E+1`.
    Scientific,
}

impl LabelPrecision {
    /// Picks the label style for a resolved range.
    #[must_use]
    pub fn for_range(range: &ResolvedRange, scientific: bool) -> Self {
        if scientific {
            Self::Scientific
        } else if range.has_explicit_ticks() {
            Self::TickNatural
        } else {
            let span = range.span();
            if span <= 1.0 {
                Self::Decimals(2)
            } else if span <= 5.0 {
                Self::Decimals(1)
            } else {
                Self::Integer
            }
        }
    }
}

#[must_use]
pub fn format_value(value: f64, precision: LabelPrecision) -> String {
    if !value.is_finite() {
        return String::new();
    }
    match precision {
        LabelPrecision::TickNatural => {
            if (value - value.round()).abs() < INTEGER_TOLERANCE {
                format_integer(value)
            } else {
                format_trimmed(value, 2)
            }
        }
        LabelPrecision::Decimals(decimals) => format_trimmed(value, decimals),
        LabelPrecision::Integer => format_integer(value),
        LabelPrecision::Scientific => format_scientific(value),
    }
}

/// `15.0` -> `"1.5E+1"`, `0.5` -> `"5.0E-1"`, zero -> `"0E0"`.
#[must_use]
pub fn format_scientific(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0E0".to_owned();
    }
    let rendered = format!("{value:.1e}");
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{}", exponent.unsigned_abs())
}

// Half rounds up, matching what users see in lab reports.
fn format_integer(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}

fn format_trimmed(value: f64, decimals: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let rounded = decimal
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            if rounded.is_zero() {
                "0".to_owned()
            } else {
                rounded.to_string()
            }
        }
        None => {
            let text = format!("{value:.prec$}", prec = decimals as usize);
            if text.contains('.') {
                text.trim_end_matches('0').trim_end_matches('.').to_owned()
            } else {
                text
            }
        }
    }
}

/// Label formatter bound to one render pass: built-in precision or a host override.
#[derive(Clone)]
pub struct ValueLabeler {
    precision: LabelPrecision,
    custom: Option<ValueFormatter>,
}

impl fmt::Debug for ValueLabeler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueLabeler")
            .field("precision", &self.precision)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ValueLabeler {
    #[must_use]
    pub fn new(precision: LabelPrecision) -> Self {
        Self {
            precision,
            custom: None,
        }
    }

    #[must_use]
    pub fn for_range(range: &ResolvedRange, scientific: bool) -> Self {
        Self::new(LabelPrecision::for_range(range, scientific))
    }

    #[must_use]
    pub fn with_custom(mut self, formatter: Option<ValueFormatter>) -> Self {
        self.custom = formatter;
        self
    }

    #[must_use]
    pub fn precision(&self) -> LabelPrecision {
        self.precision
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.custom {
            Some(formatter) => formatter(value),
            None => format_value(value, self.precision),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_labels() {
        assert_eq!(format_scientific(15.0), "1.5E+1");
        assert_eq!(format_scientific(30.0), "3.0E+1");
        assert_eq!(format_scientific(0.0), "0E0");
        assert_eq!(format_scientific(0.25), "2.5E-1");
        assert_eq!(format_scientific(1_200_000.0), "1.2E+6");
    }

    #[test]
    fn tick_natural_precision() {
        assert_eq!(format_value(208.0, LabelPrecision::TickNatural), "208");
        assert_eq!(format_value(1.7, LabelPrecision::TickNatural), "1.7");
        assert_eq!(format_value(0.125, LabelPrecision::TickNatural), "0.13");
    }

    #[test]
    fn span_driven_precision() {
        assert_eq!(format_value(0.5, LabelPrecision::Decimals(2)), "0.5");
        assert_eq!(format_value(2.34, LabelPrecision::Decimals(1)), "2.3");
        assert_eq!(format_value(12.5, LabelPrecision::Integer), "13");
        assert_eq!(format_value(-0.2, LabelPrecision::Integer), "0");
    }

    #[test]
    fn custom_formatter_wins() {
        let labeler = ValueLabeler::new(LabelPrecision::Integer)
            .with_custom(Some(Arc::new(|value: f64| format!("{value} mg"))));
        assert_eq!(labeler.format(3.0), "3 mg");
    }
}
