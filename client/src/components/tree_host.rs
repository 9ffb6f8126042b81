//! Bridge component between Leptos state and the tree canvas.
//!
//! ARCHITECTURE
//! ============
//! The `Engine` lives in an app-level signal so panels and the editor can
//! read and mutate it. This host feeds it DOM input, applies the actions it
//! returns (document listeners, cursor, deferred editor open), and draws at
//! most once per animation frame. Ambient animation ticks only while the
//! scene has something to animate.

use leptos::prelude::*;

use canvas::engine::Engine;
use canvas::input::Cursor;

use crate::components::decoration_editor::DecorationEditor;
#[cfg(feature = "csr")]
use crate::state::ui::{StatusKind, UiState};

#[cfg(feature = "csr")]
use crate::components::status_bar::show_status;
#[cfg(feature = "csr")]
use crate::util::canvas_input::{
    PointerPolicy, backing_size, capture_events, first_touch, map_button, map_pointer_kind, mouse_point,
    should_prevent_default_key, tracked_touch_point,
};
#[cfg(feature = "csr")]
use crate::util::export;
#[cfg(feature = "csr")]
use crate::util::listeners::ListenerGuard;

#[cfg(feature = "csr")]
use gloo_timers::callback::{Interval, Timeout};
#[cfg(feature = "csr")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use canvas::doc::DecorationId;
#[cfg(feature = "csr")]
use canvas::engine::Action;
#[cfg(feature = "csr")]
use canvas::input::{Button, InputState, Key, PointerKind, WheelDelta};
#[cfg(feature = "csr")]
use canvas::render::{self, ImageCache, RenderOptions};
#[cfg(feature = "csr")]
use canvas::surface::{Point as CanvasPoint, Surface};
#[cfg(feature = "csr")]
use js_sys::Date;
#[cfg(feature = "csr")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

#[cfg(feature = "csr")]
const ANIMATION_TICK_MS: u32 = 33;

/// Browser-side state of the mounted tree.
#[cfg(feature = "csr")]
struct Host {
    engine: RwSignal<Engine>,
    ui: RwSignal<UiState>,
    cursor: RwSignal<Cursor>,
    raf_pending: RwSignal<bool>,
    canvas: RefCell<Option<web_sys::HtmlCanvasElement>>,
    ctx: RefCell<Option<web_sys::CanvasRenderingContext2d>>,
    images: RefCell<Option<ImageCache>>,
    on_image_load: RefCell<Option<Closure<dyn FnMut()>>>,
    /// Touch and wheel listeners on the canvas.
    canvas_listeners: RefCell<Option<ListenerGuard>>,
    /// Document listeners for the gesture in progress.
    capture: RefCell<Option<ListenerGuard>>,
    /// Identifier of the finger driving a touch gesture.
    touch_id: Cell<Option<i32>>,
    policy: RefCell<PointerPolicy>,
    tick: RefCell<Option<Interval>>,
    dpr: Cell<f64>,
}

#[cfg(feature = "csr")]
impl Host {
    fn new(engine: RwSignal<Engine>, ui: RwSignal<UiState>, cursor: RwSignal<Cursor>) -> Self {
        Self {
            engine,
            ui,
            cursor,
            raf_pending: RwSignal::new(false),
            canvas: RefCell::new(None),
            ctx: RefCell::new(None),
            images: RefCell::new(None),
            on_image_load: RefCell::new(None),
            canvas_listeners: RefCell::new(None),
            capture: RefCell::new(None),
            touch_id: Cell::new(None),
            policy: RefCell::new(PointerPolicy::new()),
            tick: RefCell::new(None),
            dpr: Cell::new(1.0),
        }
    }

    fn teardown(&self) {
        self.capture.borrow_mut().take();
        self.canvas_listeners.borrow_mut().take();
        self.tick.borrow_mut().take();
    }
}

/// What the host should do with the DOM event after dispatch.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
struct Dispatched {
    handled: bool,
    captured: bool,
    prevent_scroll: bool,
}

#[cfg(feature = "csr")]
fn render_now(host: &Host) {
    let ctx = host.ctx.borrow();
    let Some(ctx) = ctx.as_ref() else {
        return;
    };
    let mut images = host.images.borrow_mut();
    let Some(images) = images.as_mut() else {
        return;
    };
    let dpr = host.dpr.get();
    let now_ms = Date::now();
    let result = host
        .engine
        .try_with_untracked(|engine| render::draw(ctx, engine, images, now_ms, dpr, RenderOptions::SCREEN));
    if let Some(Err(err)) = result {
        log::warn!("render failed: {err:?}");
    }
}

#[cfg(feature = "csr")]
fn request_render(host: &Rc<Host>) {
    if host.raf_pending.get_untracked() {
        return;
    }
    host.raf_pending.set(true);

    let Some(window) = web_sys::window() else {
        host.raf_pending.set(false);
        render_now(host);
        return;
    };

    let host_for_cb = Rc::downgrade(host);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(host) = host_for_cb.upgrade() {
            host.raf_pending.set(false);
            render_now(&host);
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
        *holder.borrow_mut() = Some(cb);
    } else {
        host.raf_pending.set(false);
        render_now(host);
    }
}

/// Size the backing store, create the context and image cache, and attach
/// the non-passive canvas listeners.
#[cfg(feature = "csr")]
fn attach_canvas(host: &Rc<Host>, canvas: web_sys::HtmlCanvasElement) -> Result<(), JsValue> {
    let extent = host.engine.with_untracked(|e| e.config.extent);
    let dpr = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(1.0);
    let (width, height) = backing_size(extent, dpr);
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unsupported"))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()?;

    let weak = Rc::downgrade(host);
    let on_image_load = Closure::<dyn FnMut()>::new(move || {
        if let Some(host) = weak.upgrade() {
            request_render(&host);
        }
    });
    let images = ImageCache::new(on_image_load.as_ref().unchecked_ref::<js_sys::Function>().clone());

    let mut listeners = ListenerGuard::new(canvas.clone().into());
    let weak = Rc::downgrade(host);
    listeners.listen("touchstart", move |ev| {
        if let (Some(host), Some(touch)) = (weak.upgrade(), ev.dyn_ref::<web_sys::TouchEvent>()) {
            handle_touch_start(&host, touch);
        }
    })?;
    let weak = Rc::downgrade(host);
    listeners.listen("wheel", move |ev| {
        if let (Some(host), Some(wheel)) = (weak.upgrade(), ev.dyn_ref::<web_sys::WheelEvent>()) {
            handle_wheel(&host, wheel);
        }
    })?;

    host.dpr.set(dpr);
    *host.canvas.borrow_mut() = Some(canvas);
    *host.ctx.borrow_mut() = Some(ctx);
    *host.images.borrow_mut() = Some(images);
    *host.on_image_load.borrow_mut() = Some(on_image_load);
    *host.canvas_listeners.borrow_mut() = Some(listeners);
    Ok(())
}

/// Refresh the engine's view of where the canvas sits on the page.
#[cfg(feature = "csr")]
fn sync_surface(host: &Host) {
    let Some(canvas) = host.canvas.borrow().clone() else {
        return;
    };
    let rect = canvas.get_bounding_client_rect();
    let surface = Surface::new(rect.left(), rect.top(), rect.width(), rect.height());
    host.engine.try_update_untracked(|e| e.set_surface(surface));
}

/// Run an engine input handler and apply the actions it returns.
#[cfg(feature = "csr")]
fn dispatch(host: &Rc<Host>, f: impl FnOnce(&mut Engine) -> Vec<Action>) -> Dispatched {
    let actions = host.engine.try_update_untracked(f).unwrap_or_default();
    if actions.is_empty() {
        return Dispatched::default();
    }
    host.engine.notify();
    apply_actions(host, actions)
}

#[cfg(feature = "csr")]
fn apply_actions(host: &Rc<Host>, actions: Vec<Action>) -> Dispatched {
    let mut out = Dispatched { handled: true, ..Dispatched::default() };
    for action in actions {
        match action {
            Action::CaptureStarted => {
                out.captured = true;
                begin_capture(host);
            }
            Action::CaptureEnded => end_capture(host),
            Action::EditRequested { id } => schedule_editor(host, id),
            Action::OrnamentToggled { index, lit } => log::debug!("ornament {index} lit={lit}"),
            Action::PreventScroll => out.prevent_scroll = true,
            Action::SetCursor(cursor) => host.cursor.set(cursor),
            Action::RenderNeeded => request_render(host),
            Action::DecorationMoved { .. }
            | Action::DecorationUpdated { .. }
            | Action::DecorationRemoved { .. }
            | Action::EditorClosed => {}
        }
    }
    out
}

#[cfg(feature = "csr")]
fn engaged_pointer(input: &InputState) -> Option<PointerKind> {
    match input {
        InputState::Idle => None,
        InputState::Pressed { pointer, .. } | InputState::Dragging { pointer, .. } => Some(*pointer),
    }
}

#[cfg(feature = "csr")]
fn begin_capture(host: &Rc<Host>) {
    let kind = host.engine.with_untracked(|e| engaged_pointer(&e.input)).unwrap_or_default();
    match capture_listeners(host, kind, host.touch_id.get()) {
        Ok(listeners) => {
            let previous = host.capture.borrow_mut().replace(listeners);
            drop(previous);
        }
        Err(err) => {
            log::warn!("document listeners unavailable, cancelling gesture: {err:?}");
            dispatch(host, Engine::on_pointer_cancel);
        }
    }
}

#[cfg(feature = "csr")]
fn end_capture(host: &Host) {
    let guard = host.capture.borrow_mut().take();
    drop(guard);
    host.touch_id.set(None);
}

/// Move, end, and cancel listeners on the document for a gesture of `kind`.
/// Touch events only count when they carry the finger `touch_id`.
#[cfg(feature = "csr")]
fn capture_listeners(
    host: &Rc<Host>,
    kind: PointerKind,
    touch_id: Option<i32>,
) -> Result<ListenerGuard, JsValue> {
    let [move_event, end_event, cancel_event] = capture_events(kind);
    let mut listeners = ListenerGuard::on_document()?;

    let weak = Rc::downgrade(host);
    listeners.listen(move_event, move |ev| {
        let Some(host) = weak.upgrade() else {
            return;
        };
        let Some(point) = gesture_point(&ev, kind, touch_id) else {
            return;
        };
        if dispatch(&host, |e| e.on_pointer_move(point)).prevent_scroll {
            ev.prevent_default();
        }
    })?;

    let weak = Rc::downgrade(host);
    listeners.listen(end_event, move |ev| {
        let Some(host) = weak.upgrade() else {
            return;
        };
        if let Some(point) = gesture_point(&ev, kind, touch_id) {
            dispatch(&host, |e| e.on_pointer_up(point));
        }
    })?;

    let weak = Rc::downgrade(host);
    listeners.listen(cancel_event, move |ev| {
        if let Some(host) = weak.upgrade() {
            if gesture_point(&ev, kind, touch_id).is_some() {
                dispatch(&host, Engine::on_pointer_cancel);
            }
        }
    })?;

    Ok(listeners)
}

/// Client position of a document event when it belongs to the gesture.
///
/// Pointer events from another device (a touch during a mouse drag) and
/// touches from a second finger are not part of it.
#[cfg(feature = "csr")]
fn gesture_point(ev: &web_sys::Event, kind: PointerKind, touch_id: Option<i32>) -> Option<CanvasPoint> {
    if let Some(touch) = ev.dyn_ref::<web_sys::TouchEvent>() {
        return touch_id.and_then(|id| tracked_touch_point(touch, id));
    }
    let from_kind = ev
        .dyn_ref::<web_sys::PointerEvent>()
        .is_none_or(|p| map_pointer_kind(&p.pointer_type()) == kind);
    if !from_kind {
        return None;
    }
    ev.dyn_ref::<web_sys::MouseEvent>().map(mouse_point)
}

#[cfg(feature = "csr")]
fn schedule_editor(host: &Host, id: DecorationId) {
    let settle_ms = host.engine.with_untracked(|e| e.config.click_settle_ms);
    let engine = host.engine;
    Timeout::new(settle_ms, move || {
        if engine.try_update(|e| e.open_editor(&id)) == Some(false) {
            log::debug!("editor target {id} is gone");
        }
    })
    .forget();
}

#[cfg(feature = "csr")]
fn focus_canvas(host: &Host) {
    if let Some(canvas) = host.canvas.borrow().as_ref() {
        if let Err(err) = canvas.focus() {
            log::debug!("canvas focus failed: {err:?}");
        }
    }
}

#[cfg(feature = "csr")]
fn handle_pointer_down(host: &Rc<Host>, ev: &web_sys::PointerEvent) {
    let kind = map_pointer_kind(&ev.pointer_type());
    // Touch arrives through the touch listeners.
    if kind == PointerKind::Touch {
        return;
    }
    if !host.policy.borrow_mut().accept_kind(kind, Date::now()) {
        return;
    }
    let button = map_button(ev.button());
    if button == Button::Primary {
        ev.prevent_default();
    }
    focus_canvas(host);
    sync_surface(host);
    let point = mouse_point(ev);
    host.touch_id.set(None);
    dispatch(host, |e| e.on_pointer_down(point, button, kind));
}

/// Hover feedback while no gesture is in progress.
#[cfg(feature = "csr")]
fn handle_hover(host: &Rc<Host>, ev: &web_sys::PointerEvent) {
    if host.capture.borrow().is_some() || map_pointer_kind(&ev.pointer_type()) == PointerKind::Touch {
        return;
    }
    sync_surface(host);
    let point = mouse_point(ev);
    dispatch(host, |e| e.on_pointer_move(point));
}

#[cfg(feature = "csr")]
fn handle_touch_start(host: &Rc<Host>, ev: &web_sys::TouchEvent) {
    if ev.touches().length() > 1 {
        return;
    }
    if !host.policy.borrow_mut().accept_kind(PointerKind::Touch, Date::now()) {
        return;
    }
    let Some((touch_id, point)) = first_touch(ev) else {
        return;
    };
    host.touch_id.set(Some(touch_id));
    sync_surface(host);
    let out = dispatch(host, |e| e.on_pointer_down(point, Button::Primary, PointerKind::Touch));
    if out.captured {
        // Keeps the page from scrolling under a decoration being moved.
        ev.prevent_default();
    }
}

#[cfg(feature = "csr")]
fn handle_wheel(host: &Rc<Host>, ev: &web_sys::WheelEvent) {
    sync_surface(host);
    let point = mouse_point(ev);
    let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
    if dispatch(host, |e| e.on_wheel(point, delta)).handled {
        ev.prevent_default();
    }
}

#[cfg(feature = "csr")]
fn handle_double_click(host: &Rc<Host>, ev: &web_sys::MouseEvent) {
    if !host.policy.borrow().accepts_compat(Date::now()) {
        return;
    }
    sync_surface(host);
    let point = mouse_point(ev);
    if dispatch(host, |e| e.on_double_click(point)).handled {
        ev.prevent_default();
    }
}

#[cfg(feature = "csr")]
fn handle_context_menu(host: &Rc<Host>, ev: &web_sys::MouseEvent) {
    if !host.policy.borrow().accepts_compat(Date::now()) {
        return;
    }
    sync_surface(host);
    let point = mouse_point(ev);
    if dispatch(host, |e| e.on_context_menu(point)).handled {
        ev.prevent_default();
    }
}

#[cfg(feature = "csr")]
fn handle_key_down(host: &Rc<Host>, ev: &web_sys::KeyboardEvent) {
    let key = ev.key();
    let out = dispatch(host, |e| e.on_key_down(&Key(key.clone())));
    if out.handled && should_prevent_default_key(&key) {
        ev.prevent_default();
    }
}

#[cfg(feature = "csr")]
fn run_export(host: &Host) {
    let rendered = {
        let mut images = host.images.borrow_mut();
        match images.as_mut() {
            Some(images) => host
                .engine
                .with_untracked(|engine| export::render_export(engine, images, Date::now())),
            None => Err(export::ExportError::Unavailable("tree is not mounted".to_owned())),
        }
    };
    let ui = host.ui;
    leptos::task::spawn_local(async move {
        let result = match rendered {
            Ok(surface) => export::export_png(surface, &export::export_filename(Date::now())).await,
            Err(err) => Err(err),
        };
        ui.update(|u| u.exporting = false);
        match result {
            Ok(()) => show_status(ui, StatusKind::Info, "Tree exported"),
            Err(err) => {
                log::warn!("export failed: {err}");
                show_status(ui, StatusKind::Error, format!("Export failed: {err}"));
            }
        }
    });
}

/// The decorated tree: canvas, input handling, and the floating editor.
#[component]
pub fn TreeHost() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let cursor = RwSignal::new(Cursor::Default);
    let extent = engine.with_untracked(|e| e.config.extent);

    #[cfg(feature = "csr")]
    let host = Rc::new(Host::new(engine, expect_context::<RwSignal<UiState>>(), cursor));

    #[cfg(feature = "csr")]
    {
        let host = Rc::clone(&host);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if host.canvas.borrow().is_some() {
                return;
            }
            match attach_canvas(&host, canvas) {
                Ok(()) => request_render(&host),
                Err(err) => log::warn!("tree canvas unavailable: {err:?}"),
            }
        });
    }

    #[cfg(feature = "csr")]
    {
        let host = Rc::clone(&host);
        Effect::new(move || {
            engine.track();
            request_render(&host);
        });
    }

    #[cfg(feature = "csr")]
    {
        let host = Rc::clone(&host);
        let animates = Memo::new(move |_| engine.with(|e| e.scene.animates()));
        Effect::new(move || {
            if !animates.get() {
                host.tick.borrow_mut().take();
                return;
            }
            if host.tick.borrow().is_some() {
                return;
            }
            let weak = Rc::downgrade(&host);
            let tick = Interval::new(ANIMATION_TICK_MS, move || {
                if let Some(host) = weak.upgrade() {
                    request_render(&host);
                }
            });
            *host.tick.borrow_mut() = Some(tick);
        });
    }

    // Removals and resets from the side panel bypass `dispatch`.
    let idle = Memo::new(move |_| engine.with(|e| e.ui.hovered.is_none() && e.input.engaged().is_none()));
    Effect::new(move || {
        if idle.get() {
            cursor.set(Cursor::Default);
        }
    });

    #[cfg(feature = "csr")]
    {
        let host = Rc::clone(&host);
        let engaged = Memo::new(move |_| engine.with(|e| e.input.engaged().is_some()));
        Effect::new(move || {
            if !engaged.get() && host.capture.borrow().is_some() {
                log::debug!("gesture ended outside the canvas, releasing document listeners");
                end_capture(&host);
            }
        });
    }

    #[cfg(feature = "csr")]
    {
        let host = Rc::clone(&host);
        let last_export_seq = RwSignal::new(0_u64);
        Effect::new(move || {
            let seq = host.ui.with(|u| u.export_seq);
            if seq == last_export_seq.get_untracked() {
                return;
            }
            last_export_seq.set(seq);
            run_export(&host);
        });
    }

    #[cfg(feature = "csr")]
    {
        let stored = StoredValue::new_local(Rc::clone(&host));
        on_cleanup(move || {
            stored.try_with_value(|host| host.teardown());
        });
    }

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let host = Rc::clone(&host);
            move |ev: leptos::ev::PointerEvent| handle_pointer_down(&host, &ev)
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let host = Rc::clone(&host);
            move |ev: leptos::ev::PointerEvent| handle_hover(&host, &ev)
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_double_click = {
        #[cfg(feature = "csr")]
        {
            let host = Rc::clone(&host);
            move |ev: leptos::ev::MouseEvent| handle_double_click(&host, &ev)
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_context_menu = {
        #[cfg(feature = "csr")]
        {
            let host = Rc::clone(&host);
            move |ev: leptos::ev::MouseEvent| handle_context_menu(&host, &ev)
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "csr")]
        {
            let host = Rc::clone(&host);
            move |ev: leptos::ev::KeyboardEvent| handle_key_down(&host, &ev)
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    view! {
        <div class="tree-host" style:max-width=format!("{}px", extent.width)>
            <canvas
                node_ref=canvas_ref
                class="tree-host__canvas"
                tabindex="0"
                aria-label="Christmas tree"
                style:aspect-ratio=format!("{} / {}", extent.width, extent.height)
                style:cursor=move || cursor.get().css()
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:dblclick=on_double_click
                on:contextmenu=on_context_menu
                on:keydown=on_key_down
            ></canvas>
            <DecorationEditor/>
        </div>
    }
}
