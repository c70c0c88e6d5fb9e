//! Circle shape.

use super::{ShapeColor, ShapeId, ShapeTrait};
use kurbo::{Circle as KurboCircle, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filled circle positioned by its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Fill color.
    pub fill_color: ShapeColor,
}

impl Circle {
    /// Create a new red circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            fill_color: ShapeColor::default(),
        }
    }

    /// Set the fill color.
    pub fn with_fill(mut self, fill_color: ShapeColor) -> Self {
        self.fill_color = fill_color;
        self
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn contains(&self, point: Point) -> bool {
        point.distance(self.center) <= self.radius
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn set_anchor(&mut self, anchor: Point) {
        self.center = anchor;
    }

    fn fill_color(&self) -> ShapeColor {
        self.fill_color
    }
}
