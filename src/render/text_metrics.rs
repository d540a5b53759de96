/// Text width in logical pixels for a given font size.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64, bold: bool) -> f64;
}

/// Font-free width estimate used by headless renderers.
///
/// Wide (CJK) characters count as one em, everything else as 0.6 em; bold
/// adds 5%.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatedTextMetrics;

impl EstimatedTextMetrics {
    const NARROW_EM: f64 = 0.6;
    const BOLD_FACTOR: f64 = 1.05;

    fn char_em(ch: char) -> f64 {
        if is_wide(ch) { 1.0 } else { Self::NARROW_EM }
    }
}

impl TextMeasurer for EstimatedTextMetrics {
    fn measure_text(&self, text: &str, font_size_px: f64, bold: bool) -> f64 {
        let ems: f64 = text.chars().map(Self::char_em).sum();
        let width = ems * font_size_px;
        if bold { width * Self::BOLD_FACTOR } else { width }
    }
}

fn is_wide(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x1100..=0x115F | 0x2E80..=0x303E | 0x3041..=0x33FF | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_characters_measure_one_em() {
        let metrics = EstimatedTextMetrics;
        assert_eq!(metrics.measure_text("尿酸", 10.0, false), 20.0);
        assert_eq!(metrics.measure_text("ab", 10.0, false), 12.0);
        assert!(metrics.measure_text("ab", 10.0, true) > 12.0);
    }
}
