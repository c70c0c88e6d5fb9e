//! Vello-based renderer implementation.

use crate::renderer::{DrawCommand, RenderResult, Renderer};
use kurbo::{Affine, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Renderer that records draw lists into a Vello scene.
pub struct VelloRenderer {
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) -> RenderResult<()> {
        self.scene.reset();
        let transform = Affine::IDENTITY;

        for command in commands {
            match command {
                // The scene was reset above; the render target's base color shows through
                DrawCommand::Clear { .. } => {}
                DrawCommand::FillRect { rect, color } => {
                    self.scene.fill(Fill::NonZero, transform, Color::from(*color), None, rect);
                }
                DrawCommand::FillCircle { circle, color } => {
                    self.scene.fill(Fill::NonZero, transform, Color::from(*color), None, circle);
                }
                DrawCommand::StrokeRect { rect, color, width } => {
                    let stroke = Stroke::new(*width);
                    self.scene.stroke(&stroke, transform, Color::from(*color), None, rect);
                }
                DrawCommand::StrokeCircle { circle, color, width } => {
                    let stroke = Stroke::new(*width);
                    self.scene.stroke(&stroke, transform, Color::from(*color), None, circle);
                }
            }
        }

        log::trace!("Vello scene rebuilt from {} commands", commands.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Rect};
    use shapetoy_core::shapes::ShapeColor;

    #[test]
    fn test_draw_fills_scene_and_take_resets() {
        let mut renderer = VelloRenderer::new();
        let commands = [
            DrawCommand::Clear {
                area: Rect::new(0.0, 0.0, 800.0, 600.0),
            },
            DrawCommand::FillCircle {
                circle: Circle::new((50.0, 50.0), 50.0),
                color: ShapeColor::red(),
            },
            DrawCommand::StrokeCircle {
                circle: Circle::new((50.0, 50.0), 51.5),
                color: ShapeColor::blue(),
                width: 3.0,
            },
        ];
        renderer.draw(&commands).unwrap();
        assert!(!renderer.scene().encoding().is_empty());

        let _scene = renderer.take_scene();
        assert!(renderer.scene().encoding().is_empty());
    }
}
