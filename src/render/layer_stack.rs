use serde::{Deserialize, Serialize};

/// Paint layers of one chart, listed back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Hazard and safe bands.
    Background,
    Grid,
    Axis,
    GuideLine,
    Series,
    Legend,
    Tooltip,
}

impl CanvasLayerKind {
    /// Canonical paint order; later layers occlude earlier ones.
    pub const ORDER: [Self; 7] = [
        Self::Background,
        Self::Grid,
        Self::Axis,
        Self::GuideLine,
        Self::Series,
        Self::Legend,
        Self::Tooltip,
    ];
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn tooltip_paints_last() {
        assert_eq!(CanvasLayerKind::ORDER[0], CanvasLayerKind::Background);
        assert_eq!(CanvasLayerKind::ORDER.last(), Some(&CanvasLayerKind::Tooltip));
    }
}
