//! Renderer trait abstraction and the backend-independent draw list.

use kurbo::{Circle, Rect};
use serde::{Deserialize, Serialize};
use shapetoy_core::shapes::{Shape, ShapeColor};
use shapetoy_core::snapshot::CanvasSnapshot;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors and stroke geometry used for fills and outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Selection outline color.
    pub selection_color: ShapeColor,
    /// Opacity of the hover outline relative to the selection color.
    pub hover_opacity: f64,
    /// Outline stroke width.
    pub outline_width: f64,
    /// Extra radius for circle outlines so they sit outside the fill.
    pub outline_inset: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            selection_color: ShapeColor::blue(),
            hover_opacity: 0.5,
            outline_width: 3.0,
            outline_inset: 1.5,
        }
    }
}

impl RenderStyle {
    pub fn hover_color(&self) -> ShapeColor {
        self.selection_color.with_opacity(self.hover_opacity)
    }
}

/// One drawing operation, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface to transparent.
    Clear { area: Rect },
    FillRect { rect: Rect, color: ShapeColor },
    FillCircle { circle: Circle, color: ShapeColor },
    StrokeRect { rect: Rect, color: ShapeColor, width: f64 },
    StrokeCircle { circle: Circle, color: ShapeColor, width: f64 },
}

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The state to draw.
    pub snapshot: &'a CanvasSnapshot,
    /// Colors and outline geometry.
    pub style: &'a RenderStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(snapshot: &'a CanvasSnapshot, style: &'a RenderStyle) -> Self {
        Self { snapshot, style }
    }

    /// Build the full draw list for this frame.
    pub fn commands(&self) -> Vec<DrawCommand> {
        scene_commands(self.snapshot, self.style)
    }
}

/// Draw list for a snapshot: clear, fills in z-order, selection outlines, hover outline.
///
/// Outlines come after every fill so later shapes never cover them, and the
/// hover outline is skipped for a shape that is already selected.
pub fn scene_commands(snapshot: &CanvasSnapshot, style: &RenderStyle) -> Vec<DrawCommand> {
    let size = snapshot.size;
    let mut commands = vec![DrawCommand::Clear {
        area: Rect::new(0.0, 0.0, size.width, size.height),
    }];

    commands.extend(
        snapshot
            .shapes
            .iter()
            .filter(|shape| shape.intersects_area(size))
            .map(fill_command),
    );

    commands.extend(
        snapshot
            .shapes
            .iter()
            .filter(|shape| snapshot.is_selected(shape.id()))
            .map(|shape| outline_command(shape, style, style.selection_color)),
    );

    let hovered = snapshot
        .hovered
        .filter(|&id| !snapshot.is_selected(id))
        .and_then(|id| snapshot.shapes.iter().find(|s| s.id() == id));
    if let Some(shape) = hovered {
        commands.push(outline_command(shape, style, style.hover_color()));
    }

    commands
}

fn fill_command(shape: &Shape) -> DrawCommand {
    match shape {
        Shape::Rectangle(r) => DrawCommand::FillRect {
            rect: r.as_rect(),
            color: r.fill_color,
        },
        Shape::Circle(c) => DrawCommand::FillCircle {
            circle: c.as_kurbo(),
            color: c.fill_color,
        },
    }
}

fn outline_command(shape: &Shape, style: &RenderStyle, color: ShapeColor) -> DrawCommand {
    match shape {
        Shape::Rectangle(r) => DrawCommand::StrokeRect {
            rect: r.as_rect(),
            color,
            width: style.outline_width,
        },
        Shape::Circle(c) => DrawCommand::StrokeCircle {
            circle: Circle::new(c.center, c.radius + style.outline_inset),
            color,
            width: style.outline_width,
        },
    }
}

/// Trait for rendering backends.
///
/// Backends only execute draw lists; what to draw is decided by [`scene_commands`].
pub trait Renderer {
    /// Execute a draw list, replacing whatever was drawn before.
    fn draw(&mut self, commands: &[DrawCommand]) -> RenderResult<()>;

    /// Build and draw the frame for a render context.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.draw(&ctx.commands())
    }
}

/// Renderer that keeps the last draw list; used for headless checks.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: usize,
    last: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) -> RenderResult<()> {
        self.frames += 1;
        self.last = commands.to_vec();
        Ok(())
    }
}
