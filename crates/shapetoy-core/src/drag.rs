//! Dragging the selected shapes around the canvas.

use crate::selection::SelectionSet;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;

/// State of one drag gesture, from pointer-down to pointer-up.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Pointer position minus shape anchor, per dragged shape.
    offsets: HashMap<ShapeId, Vec2>,
}

impl DragSession {
    /// Record the pointer-to-anchor offset of every selected shape.
    pub fn new(pointer: Point, selection: &SelectionSet, shapes: &[Shape]) -> Self {
        let offsets = shapes
            .iter()
            .filter(|s| selection.contains(s.id()))
            .map(|s| (s.id(), pointer - s.anchor()))
            .collect();
        Self { offsets }
    }

    /// New shape sequence with every dragged shape following `pointer`.
    ///
    /// Order is preserved and shapes without an offset are returned unchanged.
    pub fn drag_to(&self, pointer: Point, shapes: &[Shape], canvas: Size) -> Vec<Shape> {
        shapes
            .iter()
            .map(|shape| match self.offsets.get(&shape.id()) {
                Some(&offset) => clamped_move(shape, pointer - offset, canvas),
                None => shape.clone(),
            })
            .collect()
    }
}

/// Move `shape` so its anchor is at `anchor`, keeping the bounding box on the canvas.
pub fn clamped_move(shape: &Shape, anchor: Point, canvas: Size) -> Shape {
    let bounds = shape.bounds();
    // Anchor-to-box offset: zero for rectangles, the radius for circles
    let inset = shape.anchor() - bounds.origin();
    let origin = anchor - inset;

    let max_x = canvas.width - bounds.width();
    let max_y = canvas.height - bounds.height();
    // min first, then max: a shape larger than the canvas pins to 0
    let x = origin.x.min(max_x).max(0.0);
    let y = origin.y.min(max_y).max(0.0);

    shape.with_anchor(Point::new(x, y) + inset)
}

/// Idle / Dragging state machine driven by pointer events.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer-down. Starts a session when the selection is non-empty.
    ///
    /// The pointer does not need to be over a selected shape. A pointer-down
    /// during an active session restarts it from the current positions.
    pub fn begin(&mut self, pointer: Point, selection: &SelectionSet, shapes: &[Shape]) -> bool {
        if selection.is_empty() {
            return false;
        }
        let session = DragSession::new(pointer, selection, shapes);
        log::debug!("Drag started with {} shape(s)", session.offsets.len());
        self.session = Some(session);
        true
    }

    /// Pointer-move. Returns the updated sequence while dragging, `None` when idle.
    pub fn drag_to(&mut self, pointer: Point, shapes: &[Shape], canvas: Size) -> Option<Vec<Shape>> {
        let session = self.session.as_ref()?;
        Some(session.drag_to(pointer, shapes, canvas))
    }

    /// Pointer-up. Discards the session; returns whether one was active.
    pub fn end(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            log::debug!("Drag ended");
        }
        ended
    }
}
