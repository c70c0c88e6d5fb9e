//! WebAssembly entry point and DOM event wiring.

use crate::config::AppConfig;
use kurbo::Point;
use shapetoy_core::editor::{Field, PropertyForm};
use shapetoy_core::input::{CanvasOrigin, KeyEvent, PointerEvent};
use shapetoy_core::session::Session;
use shapetoy_core::shapes::ShapeKind;
use shapetoy_render::{Canvas2dRenderer, RenderContext, Renderer};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Window-level move/up listeners that exist only while a drag is in progress,
/// so the drag keeps tracking when the pointer leaves the canvas.
struct DragListeners {
    mousemove: MouseListener,
    mouseup: MouseListener,
    attached: Cell<bool>,
}

impl DragListeners {
    fn new(editor: Weak<WebEditor>) -> Self {
        let on_move = editor.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            if let Some(editor) = on_move.upgrade() {
                let position = editor.local(&e);
                editor.pointer(PointerEvent::Move { position });
            }
        }));
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            if let Some(editor) = editor.upgrade() {
                let position = editor.local(&e);
                editor.pointer(PointerEvent::Up { position });
                editor.detach_drag_listeners();
            }
        }));
        Self {
            mousemove,
            mouseup,
            attached: Cell::new(false),
        }
    }
}

/// Browser-side state shared by every event handler.
struct WebEditor {
    session: RefCell<Session>,
    canvas: HtmlCanvasElement,
    drag_listeners: DragListeners,
    on_change: RefCell<Option<js_sys::Function>>,
}

impl WebEditor {
    /// Pointer position relative to the canvas' top-left corner.
    fn local(&self, e: &MouseEvent) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        CanvasOrigin::new(rect.left(), rect.top())
            .to_local(Point::new(f64::from(e.client_x()), f64::from(e.client_y())))
    }

    /// Run `f` against the session and notify the page if a snapshot was published.
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (result, changed) = {
            let mut session = self.session.borrow_mut();
            let before = session.snapshot().map(|s| s.revision);
            let result = f(&mut session);
            (result, session.snapshot().map(|s| s.revision) != before)
        };
        if changed {
            self.notify_change();
        }
        result
    }

    fn pointer(&self, event: PointerEvent) {
        self.update(|session| session.handle_pointer_event(event));
    }

    fn selected_properties(&self) -> Result<Option<String>, JsValue> {
        self.session
            .borrow()
            .property_form()
            .map(|form| serde_json::to_string(&form))
            .transpose()
            .map_err(to_js)
    }

    fn notify_change(&self) {
        let Some(callback) = self.on_change.borrow().clone() else {
            return;
        };
        let arg = match self.selected_properties() {
            Ok(Some(json)) => JsValue::from_str(&json),
            Ok(None) => JsValue::NULL,
            Err(err) => {
                log::error!("Failed to serialize properties: {err:?}");
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
            log::error!("Change callback failed: {err:?}");
        }
    }

    fn attach_drag_listeners(&self) {
        let listeners = &self.drag_listeners;
        if listeners.attached.get() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let result = window
            .add_event_listener_with_callback("mousemove", listeners.mousemove.as_ref().unchecked_ref())
            .and_then(|()| {
                window.add_event_listener_with_callback("mouseup", listeners.mouseup.as_ref().unchecked_ref())
            });
        match result {
            Ok(()) => {
                listeners.attached.set(true);
                log::debug!("Drag listeners attached");
            }
            Err(err) => log::error!("Failed to attach drag listeners: {err:?}"),
        }
    }

    fn detach_drag_listeners(&self) {
        let listeners = &self.drag_listeners;
        if !listeners.attached.replace(false) {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        for (name, listener) in [("mousemove", &listeners.mousemove), ("mouseup", &listeners.mouseup)] {
            if let Err(err) = window.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref()) {
                log::error!("Failed to remove {name} listener: {err:?}");
            }
        }
        log::debug!("Drag listeners removed");
    }
}

/// Handle returned to JavaScript: the palette and property editor operations.
#[wasm_bindgen]
pub struct EditorHandle {
    editor: Rc<WebEditor>,
}

#[wasm_bindgen]
impl EditorHandle {
    /// Append a default rectangle; returns its id.
    pub fn add_rectangle(&self) -> String {
        self.editor
            .update(|session| session.add_shape(ShapeKind::Rectangle))
            .to_string()
    }

    /// Append a default circle; returns its id.
    pub fn add_circle(&self) -> String {
        self.editor
            .update(|session| session.add_shape(ShapeKind::Circle))
            .to_string()
    }

    /// Append a default shape by kind name (`"rectangle"` or `"circle"`); returns its id.
    pub fn add_shape(&self, kind: &str) -> Result<String, JsValue> {
        let kind = kind.parse::<ShapeKind>().map_err(to_js)?;
        Ok(self.editor.update(|session| session.add_shape(kind)).to_string())
    }

    /// Property form of the single selected shape as JSON, or `null`.
    pub fn selected_properties(&self) -> Result<Option<String>, JsValue> {
        self.editor.selected_properties()
    }

    /// Apply the property inputs to the single selected shape.
    pub fn update_selected(&self, width: &str, height: &str, radius: &str, fill_color: &str) -> Result<(), JsValue> {
        let mut form = self.editor.session.borrow().property_form().unwrap_or_default();
        form.set(Field::Width, width);
        form.set(Field::Height, height);
        form.set(Field::Radius, radius);
        form.set(Field::FillColor, fill_color);
        self.commit(&form)
    }

    /// Register a callback run after every visible change with the
    /// selected shape's properties (JSON string or `null`).
    pub fn on_change(&self, callback: js_sys::Function) {
        self.editor.on_change.replace(Some(callback));
        self.editor.notify_change();
    }
}

impl EditorHandle {
    fn commit(&self, form: &PropertyForm) -> Result<(), JsValue> {
        match self.editor.update(|session| session.commit_edit(form)) {
            Ok(id) => {
                log::debug!("Updated shape {id}");
                Ok(())
            }
            Err(err) => {
                log::warn!("Edit refused: {err}");
                Err(to_js(err))
            }
        }
    }
}

fn canvas_element(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element {canvas_id:?} is not a canvas")))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected 2d context type"))
}

fn install_canvas_listeners(editor: &Rc<WebEditor>) -> Result<(), JsValue> {
    let canvas = &editor.canvas;

    let ed = Rc::downgrade(editor);
    let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(editor) = ed.upgrade() else { return };
        if e.button() != 0 {
            return;
        }
        let position = editor.local(&e);
        editor.pointer(PointerEvent::Down { position });
        if editor.session.borrow().is_dragging() {
            editor.attach_drag_listeners();
        }
    }));
    canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
    mousedown.forget();

    // Drag moves arrive through the window listener
    let ed = Rc::downgrade(editor);
    let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(editor) = ed.upgrade() else { return };
        if editor.session.borrow().is_dragging() {
            return;
        }
        let position = editor.local(&e);
        editor.pointer(PointerEvent::Move { position });
    }));
    canvas.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
    mousemove.forget();

    let ed = Rc::downgrade(editor);
    let click = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(editor) = ed.upgrade() else { return };
        let position = editor.local(&e);
        editor.pointer(PointerEvent::Click { position });
    }));
    canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();

    let ed = Rc::downgrade(editor);
    let mouseleave = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
        if let Some(editor) = ed.upgrade() {
            editor.pointer(PointerEvent::Leave);
        }
    }));
    canvas.add_event_listener_with_callback("mouseleave", mouseleave.as_ref().unchecked_ref())?;
    mouseleave.forget();

    Ok(())
}

fn install_key_listeners(editor: &Rc<WebEditor>) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    for (name, pressed) in [("keydown", true), ("keyup", false)] {
        let ed = Rc::downgrade(editor);
        let listener = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
            let Some(editor) = ed.upgrade() else { return };
            let event = if pressed {
                KeyEvent::Pressed(e.key())
            } else {
                KeyEvent::Released(e.key())
            };
            editor.session.borrow_mut().handle_key_event(&event);
        }));
        document.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        listener.forget();
    }
    Ok(())
}

/// Mount the editor on the canvas with id `canvas_id`.
///
/// `config_json` is an optional [`AppConfig`] document; `canvas_id` overrides
/// its `canvas_id` when non-empty.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> Result<EditorHandle, JsValue> {
    console_error_panic_hook::set_once();

    let mut config = match config_json {
        Some(json) => AppConfig::from_json(&json).map_err(to_js)?,
        None => AppConfig::default(),
    };
    if !canvas_id.is_empty() {
        config.canvas_id = canvas_id.to_string();
    }

    let level = config.level().map_err(to_js)?;
    if let Err(err) = console_log::init_with_level(level) {
        log::warn!("Logger already initialized: {err}");
    }
    log::info!("Starting ShapeToy on #{}", config.canvas_id);

    let canvas = canvas_element(&config.canvas_id)?;
    let size = config.editor.canvas_size;
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);

    let mut renderer = Canvas2dRenderer::new(context_2d(&canvas)?);
    let style = config.style.clone();
    let mut session = Session::new(&config.editor);
    session.subscribe(move |snapshot| {
        if let Err(err) = renderer.build_scene(&RenderContext::new(snapshot, &style)) {
            log::error!("Render failed: {err}");
        }
    });

    let editor = Rc::new_cyclic(|weak| WebEditor {
        session: RefCell::new(session),
        canvas,
        drag_listeners: DragListeners::new(weak.clone()),
        on_change: RefCell::new(None),
    });
    install_canvas_listeners(&editor)?;
    install_key_listeners(&editor)?;

    Ok(EditorHandle { editor })
}
