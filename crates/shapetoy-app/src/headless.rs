//! Headless runner: drives a session with a scripted pointer sequence and
//! renders the final state without a browser.

use crate::config::{AppConfig, AppError};
use kurbo::Point;
use shapetoy_core::input::PointerEvent;
use shapetoy_core::session::Session;
use shapetoy_core::shapes::ShapeKind;
use shapetoy_render::{RenderContext, Renderer, RendererError};

/// One scripted user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Add(ShapeKind),
    /// Press, release and click in place.
    Click(Point),
    /// Press at `from`, move through `to`, release there.
    Drag { from: Point, to: Point },
}

/// Default demo: add a rectangle and a circle, select the circle and drag it
/// past the bottom-right corner.
pub fn demo_script() -> Vec<Step> {
    vec![
        Step::Add(ShapeKind::Rectangle),
        Step::Add(ShapeKind::Circle),
        Step::Click(Point::new(50.0, 50.0)),
        Step::Drag {
            from: Point::new(50.0, 50.0),
            to: Point::new(790.0, 590.0),
        },
    ]
}

/// Apply `steps` to a fresh session built from `config`.
pub fn replay(config: &AppConfig, steps: &[Step]) -> Session {
    let mut session = Session::new(&config.editor);
    for step in steps {
        log::debug!("Replaying {step:?}");
        match *step {
            Step::Add(kind) => {
                session.add_shape(kind);
            }
            Step::Click(position) => {
                session.handle_pointer_event(PointerEvent::Down { position });
                session.handle_pointer_event(PointerEvent::Up { position });
                session.handle_pointer_event(PointerEvent::Click { position });
            }
            Step::Drag { from, to } => {
                session.handle_pointer_event(PointerEvent::Down { position: from });
                session.handle_pointer_event(PointerEvent::Move { position: to });
                session.handle_pointer_event(PointerEvent::Up { position: to });
            }
        }
    }
    session
}

/// Draw the session's latest snapshot with `renderer`.
pub fn render(session: &Session, config: &AppConfig, renderer: &mut impl Renderer) -> Result<(), AppError> {
    let snapshot = session
        .snapshot()
        .ok_or_else(|| RendererError::RenderFailed("no snapshot published".to_string()))?;
    renderer.build_scene(&RenderContext::new(snapshot, &config.style))?;
    Ok(())
}
