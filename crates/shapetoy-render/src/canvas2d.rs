//! Browser 2D canvas backend.

use crate::renderer::{DrawCommand, RenderResult, Renderer, RendererError};
use kurbo::Circle;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Draws onto a `CanvasRenderingContext2d`.
pub struct Canvas2dRenderer {
    context: CanvasRenderingContext2d,
}

impl Canvas2dRenderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }

    fn circle_path(&self, circle: &Circle) -> RenderResult<()> {
        self.context.begin_path();
        self.context
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
            .map_err(render_failed)
    }
}

fn render_failed(err: JsValue) -> RendererError {
    RendererError::RenderFailed(format!("{err:?}"))
}

impl Renderer for Canvas2dRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) -> RenderResult<()> {
        let ctx = &self.context;
        for command in commands {
            match command {
                DrawCommand::Clear { area } => {
                    ctx.clear_rect(area.x0, area.y0, area.width(), area.height());
                }
                DrawCommand::FillRect { rect, color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
                }
                DrawCommand::FillCircle { circle, color } => {
                    self.circle_path(circle)?;
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill();
                }
                DrawCommand::StrokeRect { rect, color, width } => {
                    ctx.set_line_width(*width);
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
                }
                DrawCommand::StrokeCircle { circle, color, width } => {
                    self.circle_path(circle)?;
                    ctx.set_line_width(*width);
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.stroke();
                }
            }
        }
        Ok(())
    }
}
