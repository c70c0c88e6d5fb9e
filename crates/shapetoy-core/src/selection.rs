//! Selection set management.

use crate::shapes::{Shape, ShapeId};
use std::collections::HashSet;

/// The set of currently selected shapes, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ShapeId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `shape` (or on empty canvas when `None`).
    ///
    /// Without `additive` the selection becomes exactly `{shape}`, or empty.
    /// With `additive` the shape's membership is toggled and `None` changes nothing.
    pub fn select(&mut self, shape: Option<ShapeId>, additive: bool) {
        match (shape, additive) {
            (Some(id), true) => {
                if !self.ids.remove(&id) {
                    self.ids.insert(id);
                }
            }
            (None, true) => {}
            (Some(id), false) => {
                self.ids.clear();
                self.ids.insert(id);
            }
            (None, false) => self.ids.clear(),
        }
        log::debug!("Selection now has {} shape(s)", self.ids.len());
    }

    /// Functional form of [`select`](Self::select).
    pub fn selected(&self, shape: Option<ShapeId>, additive: bool) -> SelectionSet {
        let mut next = self.clone();
        next.select(shape, additive);
        next
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected shape when exactly one is selected.
    pub fn single(&self) -> Option<ShapeId> {
        if self.ids.len() == 1 {
            self.ids.iter().next().copied()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer name a shape in `shapes`.
    pub fn retain_existing(&mut self, shapes: &[Shape]) {
        self.ids.retain(|id| shapes.iter().any(|s| s.id() == *id));
    }

    pub fn ids(&self) -> &HashSet<ShapeId> {
        &self.ids
    }
}

impl FromIterator<ShapeId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ShapeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
