//! Canvas document and state management.

use crate::config::{EditorConfig, ShapeDefaults};
use crate::hit_test::hit_test;
use crate::selection::SelectionSet;
use crate::shapes::{Circle, Rectangle, Shape, ShapeId, ShapeKind};
use kurbo::{Point, Size};

/// A canvas document: the shapes in z-order (back to front).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasDocument {
    /// All shapes, later entries drawn on top.
    shapes: Vec<Shape>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Z-index of a shape.
    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Replace the whole sequence.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Replace the shape with `id` in its slot. The replacement keeps the old id.
    pub fn replace_shape(&mut self, id: ShapeId, mut replacement: Shape) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        replacement.set_id(id);
        self.shapes[index] = replacement;
        true
    }

    /// Find the topmost shape at a point.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        hit_test(point, &self.shapes).map(Shape::id)
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Runtime canvas state: the document plus selection and hover.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Currently selected shapes.
    selection: SelectionSet,
    /// Shape under the pointer, if any.
    hovered: Option<ShapeId>,
    /// Drawable area.
    size: Size,
    /// Palette defaults.
    defaults: ShapeDefaults,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            selection: SelectionSet::new(),
            hovered: None,
            size: config.canvas_size,
            defaults: config.defaults.clone(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        self.document.shapes()
    }

    /// Add a palette shape with the default geometry on top of the others.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let d = &self.defaults;
        let shape: Shape = match kind {
            ShapeKind::Rectangle => Rectangle::new(d.position, d.rect_width, d.rect_height)
                .with_fill(d.fill_color)
                .into(),
            ShapeKind::Circle => Circle::new(d.position, d.circle_radius)
                .with_fill(d.fill_color)
                .into(),
        };
        let id = self.document.add_shape(shape);
        log::info!("Added {} {}", kind.name(), id);
        id
    }

    /// Topmost shape at a canvas-local point.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.document.shape_at(point)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Apply a selection click; ids not in the document are treated as empty canvas.
    pub fn select(&mut self, shape: Option<ShapeId>, additive: bool) {
        let shape = shape.filter(|&id| self.document.get_shape(id).is_some());
        self.selection.select(shape, additive);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(id)
    }

    /// The single selected shape, `None` for zero or several.
    pub fn single_selected(&self) -> Option<&Shape> {
        self.selection
            .single()
            .and_then(|id| self.document.get_shape(id))
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    /// Set the hovered shape. Returns whether it changed.
    pub fn set_hovered(&mut self, id: Option<ShapeId>) -> bool {
        let id = id.filter(|&id| self.document.get_shape(id).is_some());
        if self.hovered == id {
            return false;
        }
        self.hovered = id;
        true
    }

    /// Replace the shape sequence, dropping selection and hover entries that vanished.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.document.set_shapes(shapes);
        self.selection.retain_existing(self.document.shapes());
        if let Some(id) = self.hovered {
            if self.document.get_shape(id).is_none() {
                self.hovered = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeColor;
    use uuid::Uuid;

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_add_rectangle_defaults() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Rectangle);

        let rect = canvas.document.get_shape(id).unwrap().as_rectangle().unwrap();
        assert!((rect.position.x - 50.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 50.0).abs() < f64::EPSILON);
        assert!((rect.width - 175.0).abs() < f64::EPSILON);
        assert!((rect.height - 100.0).abs() < f64::EPSILON);
        assert_eq!(rect.fill_color.to_hex(), "#ff0000");
    }

    #[test]
    fn test_add_circle_defaults() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Circle);

        let circle = canvas.document.get_shape(id).unwrap().as_circle().unwrap();
        assert_eq!(circle.center, Point::new(50.0, 50.0));
        assert!((circle.radius - 50.0).abs() < f64::EPSILON);
        assert_eq!(circle.fill_color, ShapeColor::red());
    }

    #[test]
    fn test_add_appends_on_top() {
        let mut canvas = Canvas::new();
        let first = canvas.add_shape(ShapeKind::Rectangle);
        let second = canvas.add_shape(ShapeKind::Circle);
        assert_eq!(canvas.document.position(first), Some(0));
        assert_eq!(canvas.document.position(second), Some(1));
        assert_eq!(canvas.shape_at(Point::new(60.0, 60.0)), Some(second));
    }

    #[test]
    fn test_canvas_selection() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Rectangle);

        assert!(!canvas.is_selected(id));
        canvas.select(Some(id), false);
        assert!(canvas.is_selected(id));
        assert_eq!(canvas.single_selected().map(Shape::id), Some(id));
        canvas.clear_selection();
        assert!(!canvas.is_selected(id));
    }

    #[test]
    fn test_unknown_id_is_not_selected() {
        let mut canvas = Canvas::new();
        canvas.add_shape(ShapeKind::Rectangle);
        canvas.select(Some(Uuid::new_v4()), true);
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_identical_shapes_select_independently() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape(ShapeKind::Rectangle);
        let b = canvas.add_shape(ShapeKind::Rectangle);
        canvas.select(Some(b), false);
        assert!(canvas.is_selected(b));
        assert!(!canvas.is_selected(a));
    }

    #[test]
    fn test_replace_shape_keeps_slot_and_id() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape(ShapeKind::Rectangle);
        canvas.add_shape(ShapeKind::Circle);

        let replacement: Shape = Rectangle::new(Point::new(1.0, 2.0), 3.0, 4.0).into();
        assert!(canvas.document.replace_shape(a, replacement));
        let shape = &canvas.shapes()[0];
        assert_eq!(shape.id(), a);
        assert_eq!(shape.anchor(), Point::new(1.0, 2.0));
        assert!(!canvas.document.replace_shape(Uuid::new_v4(), shape.clone()));
    }

    #[test]
    fn test_set_shapes_drops_dangling_state() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape(ShapeKind::Rectangle);
        let b = canvas.add_shape(ShapeKind::Circle);
        canvas.select(Some(a), false);
        canvas.select(Some(b), true);
        canvas.set_hovered(Some(a));

        let keep: Vec<Shape> = canvas.shapes()[1..].to_vec();
        canvas.set_shapes(keep);
        assert!(!canvas.is_selected(a));
        assert!(canvas.is_selected(b));
        assert_eq!(canvas.hovered(), None);
    }

    #[test]
    fn test_hover_change_detection() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape(ShapeKind::Rectangle);
        assert!(canvas.set_hovered(Some(a)));
        assert!(!canvas.set_hovered(Some(a)));
        assert!(canvas.set_hovered(None));
        assert!(!canvas.set_hovered(Some(Uuid::new_v4())));
    }
}
