//! Shape definitions for the editor.

mod circle;
mod rectangle;

pub use circle::Circle;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// RGBA8 fill color that round-trips through `#rrggbb` hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn red() -> Self {
        Self::rgb(255, 0, 0)
    }

    pub const fn blue() -> Self {
        Self::rgb(0, 0, 255)
    }

    /// Same color with its alpha scaled by `opacity` (0.0..=1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    rgb[i] = v * 17;
                }
                Some(Self::rgb(rgb[0], rgb[1], rgb[2]))
            }
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS color string for 2D canvas contexts.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::red()
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for ShapeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Kind of shape the palette can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            other => Err(format!("unknown shape kind: {other}")),
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the axis-aligned bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a point lies inside the shape's geometry (edges included).
    fn contains(&self, point: Point) -> bool;

    /// The point drags are measured against: top-left for rectangles, center for circles.
    fn anchor(&self) -> Point;

    /// Move the shape so that its anchor lands on `anchor`.
    fn set_anchor(&mut self, anchor: Point);

    /// Get the fill color.
    fn fill_color(&self) -> ShapeColor;
}

/// A rectangle or a circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
        }
    }

    pub(crate) fn set_id(&mut self, id: ShapeId) {
        match self {
            Shape::Rectangle(s) => s.id = id,
            Shape::Circle(s) => s.id = id,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
        }
    }

    /// Width and height of the bounding box (`2r` for circles).
    pub fn bounding_size(&self) -> Size {
        self.bounds().size()
    }

    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains(point),
            Shape::Circle(s) => s.contains(point),
        }
    }

    pub fn anchor(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.anchor(),
            Shape::Circle(s) => s.anchor(),
        }
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        match self {
            Shape::Rectangle(s) => s.set_anchor(anchor),
            Shape::Circle(s) => s.set_anchor(anchor),
        }
    }

    /// A copy of this shape moved to `anchor`; the id is kept.
    pub fn with_anchor(&self, anchor: Point) -> Shape {
        let mut shape = self.clone();
        shape.set_anchor(anchor);
        shape
    }

    pub fn fill_color(&self) -> ShapeColor {
        match self {
            Shape::Rectangle(s) => s.fill_color(),
            Shape::Circle(s) => s.fill_color(),
        }
    }

    /// Whether the bounding box touches the `width` x `height` area at the origin.
    /// Edges count as touching.
    pub fn intersects_area(&self, area: Size) -> bool {
        let b = self.bounds();
        b.x1 >= 0.0 && b.x0 <= area.width && b.y1 >= 0.0 && b.y0 <= area.height
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Shape::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}
