//! Interaction controller: turns host input into store mutations.
//!
//! The engine is pure state. The host feeds it client-space pointer events,
//! applies the returned [`Action`]s (attach or release document listeners,
//! open the editor, request a frame), and renders with [`crate::render`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::config::EngineConfig;
use crate::doc::{Content, Decoration, DecorationId, DecorationPatch, DecorationStore, StoreError, clamp_scale};
use crate::hit::hit_test;
use crate::input::{Button, Cursor, InputState, Key, PointerKind, UiState, WheelDelta};
use crate::surface::{Point, Surface};
use crate::tree::{Scene, ornament_at};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A decoration followed the pointer to a new position.
    DecorationMoved { id: DecorationId },
    /// A decoration's rotation, scale, or content changed.
    DecorationUpdated { id: DecorationId },
    DecorationRemoved { id: DecorationId },
    /// A press resolved as a click; the host opens the editor after the settle delay.
    EditRequested { id: DecorationId },
    EditorClosed,
    OrnamentToggled { index: usize, lit: bool },
    /// A gesture engaged a decoration; attach document-level listeners.
    CaptureStarted,
    /// The gesture ended; release document-level listeners.
    CaptureEnded,
    /// Suppress the browser's default scrolling for the current touch move.
    PreventScroll,
    SetCursor(Cursor),
    RenderNeeded,
}

/// Decoration store, scene settings, and gesture state for one session.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub doc: DecorationStore,
    pub scene: Scene,
    pub ui: UiState,
    pub input: InputState,
    pub surface: Surface,
    pub config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Record the rendered surface's client rect. Call before each pointer-down.
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    // --- Store operations ---

    /// Add a decoration at `position`, or centered on the surface when `None`.
    pub fn add_decoration(&mut self, content: Content, position: Option<Point>) -> DecorationId {
        let position = position.unwrap_or_else(|| {
            let (w, h) = content.base_size();
            let c = self.config.extent.center();
            Point::new(c.x - w * 0.5, c.y - h * 0.5)
        });
        let id = self.doc.add(content, position);
        log::debug!("decoration added: {id}");
        id
    }

    /// Apply a patch to a decoration.
    ///
    /// Unknown ids produce no actions.
    ///
    /// # Errors
    ///
    /// Returns the store's [`StoreError`] when the patch is malformed.
    pub fn update(&mut self, id: &DecorationId, patch: &DecorationPatch) -> Result<Vec<Action>, StoreError> {
        if self.doc.update(id, patch)? {
            Ok(vec![Action::DecorationUpdated { id: *id }, Action::RenderNeeded])
        } else {
            Ok(Vec::new())
        }
    }

    /// Remove a decoration, closing its editor if open.
    pub fn remove(&mut self, id: &DecorationId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        log::debug!("decoration removed: {id}");
        let mut actions = vec![Action::DecorationRemoved { id: *id }];
        if self.ui.editing == Some(*id) {
            self.ui.editing = None;
            actions.push(Action::EditorClosed);
        }
        if self.ui.hovered == Some(*id) {
            self.ui.hovered = None;
            if self.input.engaged().is_none() {
                actions.push(Action::SetCursor(Cursor::Default));
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Clear every decoration, end any gesture, close the editor, and restore
    /// scene settings.
    pub fn reset(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.engaged().is_some() {
            actions.push(Action::CaptureEnded);
        }
        if self.ui.editing.is_some() {
            actions.push(Action::EditorClosed);
        }
        self.doc.reset();
        self.input = InputState::Idle;
        self.ui = UiState::default();
        self.scene = Scene::default();
        actions.push(Action::SetCursor(Cursor::Default));
        actions.push(Action::RenderNeeded);
        log::debug!("session reset");
        actions
    }

    // --- Editor ---

    /// Open the editor for `id`. Returns `false` if the decoration is gone.
    pub fn open_editor(&mut self, id: &DecorationId) -> bool {
        if !self.doc.contains(id) {
            return false;
        }
        self.ui.editing = Some(*id);
        true
    }

    pub fn close_editor(&mut self) -> Vec<Action> {
        match self.ui.editing.take() {
            Some(_) => vec![Action::EditorClosed, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NonFinite`] for a NaN or infinite angle.
    pub fn set_rotation(&mut self, id: &DecorationId, deg: f64) -> Result<Vec<Action>, StoreError> {
        self.update(id, &DecorationPatch::rotation(deg))
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NonFinite`] for a NaN or infinite delta.
    pub fn rotate_by(&mut self, id: &DecorationId, delta_deg: f64) -> Result<Vec<Action>, StoreError> {
        let Some(current) = self.doc.get(id).map(|d| d.rotation) else {
            return Ok(Vec::new());
        };
        self.set_rotation(id, current + delta_deg)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NonFinite`] for a NaN or infinite scale.
    pub fn set_scale(&mut self, id: &DecorationId, scale: f64) -> Result<Vec<Action>, StoreError> {
        self.update(id, &DecorationPatch::scale(scale))
    }

    /// Add `step` to the scale, clamped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NonFinite`] for a NaN or infinite step.
    pub fn scale_by(&mut self, id: &DecorationId, step: f64) -> Result<Vec<Action>, StoreError> {
        let Some(current) = self.doc.get(id).map(|d| d.scale) else {
            return Ok(Vec::new());
        };
        self.set_scale(id, clamp_scale(current + step))
    }

    /// Multiply the scale by `factor`, clamped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NonFinite`] for a NaN or infinite factor.
    pub fn scale_times(&mut self, id: &DecorationId, factor: f64) -> Result<Vec<Action>, StoreError> {
        let Some(current) = self.doc.get(id).map(|d| d.scale) else {
            return Ok(Vec::new());
        };
        self.set_scale(id, current * factor)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, client: Point, button: Button, pointer: PointerKind) -> Vec<Action> {
        if button != Button::Primary || self.input.engaged().is_some() {
            return Vec::new();
        }
        let pt = self.to_local(client);

        if let Some(id) = hit_test(pt, &self.doc) {
            let Some(position) = self.doc.get(&id).map(|d| d.position) else {
                return Vec::new();
            };
            let offset = Point::new(pt.x - position.x, pt.y - position.y);
            self.input = InputState::Pressed { id, pointer, start: pt, offset };
            self.ui.hovered = Some(id);
            log::debug!("pressed {id} with {pointer:?}");
            return vec![Action::CaptureStarted, Action::SetCursor(Cursor::Grabbing)];
        }

        let mut actions = self.close_editor();
        if self.scene.show_lights {
            if let Some(index) = ornament_at(pt, self.config.extent) {
                let lit = self.scene.toggle_ornament(index);
                actions.push(Action::OrnamentToggled { index, lit });
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
        let pt = self.to_local(client);
        match self.input.clone() {
            InputState::Idle => self.update_hover(pt),
            InputState::Pressed { id, pointer, start, offset } => {
                if !self.doc.contains(&id) {
                    return self.abandon_gesture();
                }
                if pt.distance(start) <= self.config.drag_threshold_px {
                    return Vec::new();
                }
                log::debug!("drag started on {id}");
                self.input = InputState::Dragging { id, pointer, offset, last: pt };
                self.drag_to(id, pointer, offset, pt)
            }
            InputState::Dragging { id, pointer, offset, .. } => {
                if !self.doc.contains(&id) {
                    return self.abandon_gesture();
                }
                self.input = InputState::Dragging { id, pointer, offset, last: pt };
                self.drag_to(id, pointer, offset, pt)
            }
        }
    }

    pub fn on_pointer_up(&mut self, client: Point) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Pressed { id, .. } => {
                if !self.doc.contains(&id) {
                    self.ui.hovered = None;
                    return vec![Action::CaptureEnded, Action::SetCursor(Cursor::Default)];
                }
                log::debug!("click resolved on {id}");
                vec![Action::CaptureEnded, Action::EditRequested { id }, Action::SetCursor(Cursor::Grab)]
            }
            InputState::Dragging { id, .. } => {
                log::debug!("drag ended on {id}");
                let mut actions = vec![Action::CaptureEnded];
                let pt = self.to_local(client);
                self.ui.hovered = hit_test(pt, &self.doc);
                actions.push(Action::SetCursor(self.idle_cursor()));
                actions
            }
        }
    }

    /// Pointer cancel or leave: end the gesture without resolving a click.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if self.input.engaged().is_none() {
            return Vec::new();
        }
        self.abandon_gesture()
    }

    /// Wheel over a decoration scales it by one step; wheel down shrinks.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta) -> Vec<Action> {
        let Some(id) = hit_test(self.to_local(client), &self.doc) else {
            return Vec::new();
        };
        let step = if delta.dy > 0.0 {
            -self.config.scale_step
        } else if delta.dy < 0.0 {
            self.config.scale_step
        } else {
            return Vec::new();
        };
        logged(self.scale_by(&id, step))
    }

    /// Double-click on a decoration rotates it by one step.
    pub fn on_double_click(&mut self, client: Point) -> Vec<Action> {
        let Some(id) = hit_test(self.to_local(client), &self.doc) else {
            return Vec::new();
        };
        let step = self.config.rotate_step_deg;
        logged(self.rotate_by(&id, step))
    }

    /// Context action on a decoration removes it.
    pub fn on_context_menu(&mut self, client: Point) -> Vec<Action> {
        match hit_test(self.to_local(client), &self.doc) {
            Some(id) => self.remove(&id),
            None => Vec::new(),
        }
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => match self.ui.editing {
                Some(id) => self.remove(&id),
                None => Vec::new(),
            },
            "Escape" => self.close_editor(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn decoration(&self, id: &DecorationId) -> Option<&Decoration> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn decorations(&self) -> &[Decoration] {
        self.doc.list()
    }

    /// The decoration whose editor is open, if it still exists.
    #[must_use]
    pub fn editing(&self) -> Option<&Decoration> {
        self.ui.editing.and_then(|id| self.doc.get(&id))
    }

    // --- Internals ---

    fn to_local(&self, client: Point) -> Point {
        self.surface.to_local(client, self.config.extent)
    }

    fn drag_to(&mut self, id: DecorationId, pointer: PointerKind, offset: Point, pt: Point) -> Vec<Action> {
        let position = Point::new(pt.x - offset.x, pt.y - offset.y);
        match self.doc.update(&id, &DecorationPatch::position(position)) {
            Ok(true) => {
                let mut actions = vec![Action::DecorationMoved { id }, Action::RenderNeeded];
                if pointer == PointerKind::Touch {
                    actions.push(Action::PreventScroll);
                }
                actions
            }
            Ok(false) => self.abandon_gesture(),
            Err(err) => {
                log::warn!("drag of {id} rejected: {err}");
                Vec::new()
            }
        }
    }

    fn abandon_gesture(&mut self) -> Vec<Action> {
        if let Some(id) = self.input.engaged() {
            log::debug!("gesture on {id} abandoned");
        }
        self.input = InputState::Idle;
        if self.ui.hovered.is_some_and(|id| !self.doc.contains(&id)) {
            self.ui.hovered = None;
        }
        vec![Action::CaptureEnded, Action::SetCursor(self.idle_cursor())]
    }

    fn update_hover(&mut self, pt: Point) -> Vec<Action> {
        let hovered = hit_test(pt, &self.doc);
        if hovered == self.ui.hovered {
            return Vec::new();
        }
        self.ui.hovered = hovered;
        vec![Action::SetCursor(self.idle_cursor())]
    }

    fn idle_cursor(&self) -> Cursor {
        if self.ui.hovered.is_some() { Cursor::Grab } else { Cursor::Default }
    }
}

fn logged(result: Result<Vec<Action>, StoreError>) -> Vec<Action> {
    result.unwrap_or_else(|err| {
        log::warn!("gesture update rejected: {err}");
        Vec::new()
    })
}
