//! Editing session: routes input events to selection, dragging and editing,
//! and publishes a snapshot after every step that changed something.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::drag::DragController;
use crate::editor::{EditError, PropertyForm};
use crate::input::{InputState, KeyEvent, PointerEvent};
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::snapshot::{CanvasSnapshot, SnapshotPublisher, SubscriptionId};
use kurbo::Point;

/// One editor instance: canvas state, input tracking and the drag state machine.
#[derive(Debug)]
pub struct Session {
    canvas: Canvas,
    input: InputState,
    drag: DragController,
    publisher: SnapshotPublisher,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Session {
    pub fn new(config: &EditorConfig) -> Self {
        let mut session = Self {
            canvas: Canvas::with_config(config),
            input: InputState::new(),
            drag: DragController::new(),
            publisher: SnapshotPublisher::new(),
        };
        session.publish();
        session
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Option<&CanvasSnapshot> {
        self.publisher.latest()
    }

    /// Subscribe to snapshot changes; called right away with the current snapshot.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CanvasSnapshot) + 'static) -> SubscriptionId {
        self.publisher.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    fn publish(&mut self) -> bool {
        self.publisher.publish(&self.canvas).is_some()
    }

    /// Handle a pointer event in canvas-local coordinates.
    ///
    /// Returns whether a new snapshot was published.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position } => {
                self.drag
                    .begin(position, self.canvas.selection(), self.canvas.shapes());
            }
            PointerEvent::Move { position } => {
                if let Some(shapes) =
                    self.drag
                        .drag_to(position, self.canvas.shapes(), self.canvas.size())
                {
                    self.canvas.set_shapes(shapes);
                }
                self.update_hover(position);
            }
            PointerEvent::Up { .. } => {
                self.drag.end();
            }
            PointerEvent::Click { position } => self.click(position),
            PointerEvent::Leave => {
                self.canvas.set_hovered(None);
            }
        }
        self.publish()
    }

    fn click(&mut self, position: Point) {
        let hit = self.canvas.shape_at(position);
        let additive = self.input.modifiers.additive();
        self.canvas.select(hit, additive);
    }

    fn update_hover(&mut self, position: Point) {
        // Window-level moves during a drag can land outside the canvas
        let size = self.canvas.size();
        let inside = (0.0..=size.width).contains(&position.x) && (0.0..=size.height).contains(&position.y);
        let hovered = if inside { self.canvas.shape_at(position) } else { None };
        self.canvas.set_hovered(hovered);
    }

    /// Track modifier keys. Key events never change what is drawn.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        self.input.handle_key_event(event);
    }

    /// Palette: append a default shape of `kind`.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let id = self.canvas.add_shape(kind);
        self.publish();
        id
    }

    /// The shape the property editor may edit: the single selected one.
    pub fn editable_shape(&self) -> Option<&Shape> {
        self.canvas.single_selected()
    }

    /// Property form for [`editable_shape`](Self::editable_shape).
    pub fn property_form(&self) -> Option<PropertyForm> {
        self.editable_shape().map(PropertyForm::from_shape)
    }

    /// Apply a property form to the single selected shape.
    ///
    /// Refused while zero or several shapes are selected.
    pub fn commit_edit(&mut self, form: &PropertyForm) -> Result<ShapeId, EditError> {
        let selection = self.canvas.selection();
        let id = selection
            .single()
            .ok_or(EditError::NotSingleSelection(selection.len()))?;
        let base = self
            .canvas
            .document
            .get_shape(id)
            .ok_or(EditError::ShapeNotFound(id))?;
        let replacement = form.commit(base);
        self.canvas.document.replace_shape(id, replacement);
        self.publish();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Field;
    use crate::shapes::{Circle, Rectangle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up { position: Point::new(x, y) }
    }

    fn click(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Click { position: Point::new(x, y) }
    }

    /// Press and release in place, as the browser reports a plain click.
    fn tap(session: &mut Session, x: f64, y: f64) {
        session.handle_pointer_event(down(x, y));
        session.handle_pointer_event(up(x, y));
        session.handle_pointer_event(click(x, y));
    }

    fn shift(session: &mut Session, pressed: bool) {
        let key = "Shift".to_string();
        session.handle_key_event(&if pressed { KeyEvent::Pressed(key) } else { KeyEvent::Released(key) });
    }

    #[test]
    fn test_click_selects_topmost() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        let circle = session.add_shape(ShapeKind::Circle);

        tap(&mut session, 60.0, 60.0);
        assert_eq!(session.canvas().selection().single(), Some(circle));

        tap(&mut session, 200.0, 120.0);
        assert_eq!(session.canvas().selection().single(), Some(rect));

        tap(&mut session, 700.0, 500.0);
        assert!(session.canvas().selection().is_empty());
    }

    #[test]
    fn test_shift_click_toggles() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        let circle = session.add_shape(ShapeKind::Circle);

        tap(&mut session, 200.0, 120.0);
        shift(&mut session, true);
        tap(&mut session, 60.0, 60.0);
        assert!(session.canvas().is_selected(rect));
        assert!(session.canvas().is_selected(circle));

        tap(&mut session, 200.0, 120.0);
        assert!(!session.canvas().is_selected(rect));
        assert!(session.canvas().is_selected(circle));

        // Shift-click on empty canvas changes nothing
        tap(&mut session, 700.0, 500.0);
        assert_eq!(session.canvas().selection().len(), 1);

        shift(&mut session, false);
        tap(&mut session, 700.0, 500.0);
        assert!(session.canvas().selection().is_empty());
    }

    #[test]
    fn test_drag_moves_selection_and_ends_on_up() {
        let mut session = Session::default();
        let circle = session.add_shape(ShapeKind::Circle);
        tap(&mut session, 50.0, 50.0);

        session.handle_pointer_event(down(50.0, 50.0));
        assert!(session.is_dragging());
        session.handle_pointer_event(moved(150.0, 250.0));
        session.handle_pointer_event(moved(900.0, 900.0));
        session.handle_pointer_event(up(900.0, 900.0));
        assert!(!session.is_dragging());

        let shape = session.canvas().document.get_shape(circle).unwrap();
        assert_eq!(shape.anchor(), Point::new(750.0, 550.0));

        // Moves after pointer-up do nothing
        session.handle_pointer_event(moved(100.0, 100.0));
        let shape = session.canvas().document.get_shape(circle).unwrap();
        assert_eq!(shape.anchor(), Point::new(750.0, 550.0));
    }

    #[test]
    fn test_drag_from_anywhere_moves_all_selected() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        let circle = session.add_shape(ShapeKind::Circle);
        tap(&mut session, 200.0, 120.0);
        shift(&mut session, true);
        tap(&mut session, 60.0, 60.0);
        shift(&mut session, false);

        // Pointer-down over empty canvas still drags the selection
        session.handle_pointer_event(down(400.0, 400.0));
        session.handle_pointer_event(moved(450.0, 420.0));
        session.handle_pointer_event(up(450.0, 420.0));

        let doc = &session.canvas().document;
        assert_eq!(doc.get_shape(rect).unwrap().anchor(), Point::new(100.0, 70.0));
        assert_eq!(doc.get_shape(circle).unwrap().anchor(), Point::new(100.0, 70.0));
        assert_eq!(session.canvas().selection().len(), 2);

        // The click that follows lands on empty canvas and clears the selection
        session.handle_pointer_event(click(450.0, 420.0));
        assert!(session.canvas().selection().is_empty());
    }

    #[test]
    fn test_click_after_drag_still_selects() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        let circle = session.add_shape(ShapeKind::Circle);
        tap(&mut session, 200.0, 120.0);

        // Drag the rectangle by an empty-canvas press, release over the circle
        session.handle_pointer_event(down(600.0, 500.0));
        session.handle_pointer_event(moved(610.0, 500.0));
        session.handle_pointer_event(up(610.0, 500.0));
        assert_eq!(
            session.canvas().document.get_shape(rect).unwrap().anchor(),
            Point::new(60.0, 50.0)
        );
        session.handle_pointer_event(click(60.0, 60.0));
        assert_eq!(session.canvas().selection().single(), Some(circle));

        // Same drag released on empty canvas clears everything
        session.handle_pointer_event(down(600.0, 500.0));
        session.handle_pointer_event(moved(610.0, 500.0));
        session.handle_pointer_event(up(610.0, 500.0));
        session.handle_pointer_event(click(610.0, 500.0));
        assert!(session.canvas().selection().is_empty());
    }

    #[test]
    fn test_no_drag_without_selection() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        session.handle_pointer_event(down(60.0, 60.0));
        assert!(!session.is_dragging());
        session.handle_pointer_event(moved(300.0, 300.0));
        assert_eq!(
            session.canvas().document.get_shape(rect).unwrap().anchor(),
            Point::new(50.0, 50.0)
        );
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        let circle = session.add_shape(ShapeKind::Circle);

        session.handle_pointer_event(moved(200.0, 120.0));
        assert_eq!(session.canvas().hovered(), Some(rect));
        session.handle_pointer_event(moved(60.0, 60.0));
        assert_eq!(session.canvas().hovered(), Some(circle));
        session.handle_pointer_event(PointerEvent::Leave);
        assert_eq!(session.canvas().hovered(), None);
        session.handle_pointer_event(moved(900.0, 120.0));
        assert_eq!(session.canvas().hovered(), None);
    }

    #[test]
    fn test_publishes_each_drag_step() {
        let mut session = Session::default();
        session.add_shape(ShapeKind::Rectangle);
        tap(&mut session, 100.0, 100.0);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |snap: &CanvasSnapshot| sink.borrow_mut().push(snap.shapes[0].anchor()));
        session.handle_pointer_event(down(100.0, 100.0));
        session.handle_pointer_event(moved(110.0, 100.0));
        session.handle_pointer_event(moved(120.0, 100.0));
        session.handle_pointer_event(up(120.0, 100.0));

        assert_eq!(
            *seen.borrow(),
            vec![Point::new(50.0, 50.0), Point::new(60.0, 50.0), Point::new(70.0, 50.0)]
        );
    }

    #[test]
    fn test_edit_single_selection() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        assert!(session.property_form().is_none());

        tap(&mut session, 100.0, 100.0);
        let mut form = session.property_form().unwrap();
        form.set(Field::Width, "50");
        form.set(Field::FillColor, "#0000ff");
        assert_eq!(session.commit_edit(&form), Ok(rect));

        let shape = session.editable_shape().unwrap();
        assert_eq!(shape.id(), rect);
        assert_eq!(shape.bounds().width(), 50.0);
        assert_eq!(shape.fill_color().to_hex(), "#0000ff");
    }

    #[test]
    fn test_edit_refused_under_multi_select() {
        let mut session = Session::default();
        let rect = session.add_shape(ShapeKind::Rectangle);
        session.add_shape(ShapeKind::Circle);
        tap(&mut session, 200.0, 120.0);
        let form = session.property_form().unwrap();

        shift(&mut session, true);
        tap(&mut session, 60.0, 60.0);
        assert!(session.editable_shape().is_none());
        assert_eq!(session.commit_edit(&form), Err(EditError::NotSingleSelection(2)));

        // Nothing was rewritten
        let shapes = session.canvas().shapes();
        assert!(matches!(shapes[0], Shape::Rectangle(Rectangle { .. })));
        assert!(matches!(shapes[1], Shape::Circle(Circle { .. })));
        assert_eq!(shapes[0].id(), rect);
    }

    #[test]
    fn test_edit_with_empty_selection() {
        let mut session = Session::default();
        session.add_shape(ShapeKind::Circle);
        assert_eq!(
            session.commit_edit(&PropertyForm::default()),
            Err(EditError::NotSingleSelection(0))
        );
    }
}
