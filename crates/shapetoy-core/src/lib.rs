//! ShapeToy Core Library
//!
//! Platform-agnostic shape model, hit-testing, selection, dragging and
//! property editing for the ShapeToy editor.

pub mod canvas;
pub mod config;
pub mod drag;
pub mod editor;
pub mod input;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use canvas::{Canvas, CanvasDocument};
pub use config::{ConfigError, ConfigResult, EditorConfig, ShapeDefaults};
pub use drag::{DragController, DragSession, clamped_move};
pub use editor::{EditError, Field, PropertyForm, parse_number_or_zero};
pub use hit_test::{hit_test, hit_test_index};
pub use input::{CanvasOrigin, InputState, KeyEvent, Modifiers, PointerEvent};
pub use selection::SelectionSet;
pub use session::Session;
pub use shapes::{Circle, Rectangle, Shape, ShapeColor, ShapeId, ShapeKind, ShapeTrait};
pub use snapshot::{CanvasSnapshot, SnapshotPublisher, SubscriptionId};
