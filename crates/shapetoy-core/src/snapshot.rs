//! Immutable canvas snapshots and the subscriber list that redraws on change.

use crate::canvas::Canvas;
use crate::selection::SelectionSet;
use crate::shapes::{Shape, ShapeId};
use kurbo::Size;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A consistent, read-only view of everything the renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot {
    /// Monotonic publication counter.
    pub revision: u64,
    /// Shapes in z-order.
    pub shapes: Arc<[Shape]>,
    /// Selected shape ids.
    pub selected: Arc<HashSet<ShapeId>>,
    /// Hovered shape id.
    pub hovered: Option<ShapeId>,
    /// Canvas size.
    pub size: Size,
}

impl CanvasSnapshot {
    /// Capture the current state of a canvas.
    pub fn capture(canvas: &Canvas, revision: u64) -> Self {
        Self {
            revision,
            shapes: canvas.shapes().into(),
            selected: Arc::new(canvas.selection().ids().clone()),
            hovered: canvas.hovered(),
            size: canvas.size(),
        }
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selection(&self) -> SelectionSet {
        self.selected.iter().copied().collect()
    }

    /// Same content, ignoring the revision number.
    pub fn same_content(&self, other: &CanvasSnapshot) -> bool {
        self.shapes == other.shapes
            && self.selected == other.selected
            && self.hovered == other.hovered
            && self.size == other.size
    }
}

/// Identifier returned by [`SnapshotPublisher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CanvasSnapshot)>;

/// Publishes snapshots to subscribers, skipping publications that change nothing.
#[derive(Default)]
pub struct SnapshotPublisher {
    latest: Option<CanvasSnapshot>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    revision: u64,
}

impl fmt::Debug for SnapshotPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotPublisher")
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. It is called immediately with the latest snapshot, if any.
    pub fn subscribe(&mut self, mut subscriber: impl FnMut(&CanvasSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        if let Some(latest) = &self.latest {
            subscriber(latest);
        }
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Option<&CanvasSnapshot> {
        self.latest.as_ref()
    }

    /// Capture `canvas` and notify subscribers if anything changed.
    ///
    /// Returns the new snapshot when one was published.
    pub fn publish(&mut self, canvas: &Canvas) -> Option<&CanvasSnapshot> {
        let candidate = CanvasSnapshot::capture(canvas, self.revision + 1);
        if self
            .latest
            .as_ref()
            .is_some_and(|latest| latest.same_content(&candidate))
        {
            return None;
        }
        self.revision = candidate.revision;
        log::debug!("Publishing snapshot r{}", candidate.revision);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&candidate);
        }
        self.latest = Some(candidate);
        self.latest.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(publisher: &mut SnapshotPublisher) -> Rc<RefCell<Vec<u64>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        publisher.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.revision));
        seen
    }

    #[test]
    fn test_publish_notifies_on_change_only() {
        let mut canvas = Canvas::new();
        let mut publisher = SnapshotPublisher::new();
        let seen = recording(&mut publisher);

        assert!(publisher.publish(&canvas).is_some());
        assert!(publisher.publish(&canvas).is_none());

        canvas.add_shape(ShapeKind::Rectangle);
        assert!(publisher.publish(&canvas).is_some());
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_snapshot_is_detached_from_canvas() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Circle);
        let mut publisher = SnapshotPublisher::new();
        publisher.publish(&canvas);
        let before = publisher.latest().unwrap().clone();

        canvas.select(Some(id), false);
        publisher.publish(&canvas);
        assert!(!before.is_selected(id));
        assert!(publisher.latest().unwrap().is_selected(id));
    }

    #[test]
    fn test_late_subscriber_gets_latest() {
        let canvas = Canvas::new();
        let mut publisher = SnapshotPublisher::new();
        publisher.publish(&canvas);
        let seen = recording(&mut publisher);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut canvas = Canvas::new();
        let mut publisher = SnapshotPublisher::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = publisher.subscribe(move |_| *sink.borrow_mut() += 1);

        publisher.publish(&canvas);
        assert!(publisher.unsubscribe(id));
        canvas.add_shape(ShapeKind::Circle);
        publisher.publish(&canvas);
        assert_eq!(*seen.borrow(), 1);
        assert!(!publisher.unsubscribe(id));
    }
}
