use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, DrawCommand, LinePrimitive, TextPrimitive};

/// Ordered draw commands of one paint layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCommands {
    pub kind: CanvasLayerKind,
    pub commands: Vec<DrawCommand>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers are kept in [`CanvasLayerKind::ORDER`]; within a layer, commands
/// replay in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerCommands>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::ORDER
                .iter()
                .map(|kind| LayerCommands {
                    kind: *kind,
                    commands: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn push(&mut self, kind: CanvasLayerKind, command: impl Into<DrawCommand>) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.commands.push(command.into());
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> &[DrawCommand] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map(|layer| layer.commands.as_slice())
            .unwrap_or_default()
    }

    /// All commands in paint order, tagged with their layer.
    pub fn commands(&self) -> impl Iterator<Item = (CanvasLayerKind, &DrawCommand)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.commands.iter().map(move |command| (layer.kind, command)))
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands().filter_map(|(_, command)| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands().filter_map(|(_, command)| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.commands.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.command_count() == 0
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for (_, command) in self.commands() {
            command.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn commands_replay_in_layer_order() {
        let mut frame = RenderFrame::new(Viewport::new(100, 50));
        frame.push(
            CanvasLayerKind::Series,
            LinePrimitive::new(0.0, 2.0, 5.0, 3.0, 2.0, Color::hex(0x2563EB)),
        );
        frame.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, Color::hex(0xE5E7EB)),
        );
        frame.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new("10", 2.0, 4.0, 12.0, Color::hex(0x374151), TextHAlign::Right),
        );

        let kinds: Vec<_> = frame.commands().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                CanvasLayerKind::Grid,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Series
            ]
        );
        assert_eq!(frame.lines().next().map(|line| line.y1), Some(1.0));
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        assert!(RenderFrame::new(Viewport::new(0, 10)).validate().is_err());
    }
}
