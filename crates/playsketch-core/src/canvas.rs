//! The interactive canvas: pointer and keyboard handling over the playbook.
//!
//! All gestures run through one [`Interaction`] value. Every completed user
//! action replaces the active play's element list and registers exactly one
//! history entry.

use crate::config::EditorConfig;
use crate::document::{Play, PlayId, Playbook};
use crate::elements::{Element, ElementId, ElementPatch};
use crate::history::History;
use crate::input::{KeyCommand, KeyPress, PointerEvent};
use crate::snap::{find_snap_point, snap_to_yard_line};
use crate::tools::{Draft, ToolKind, ToolManager};
use crate::view::ViewTransform;
use kurbo::{Point, Vec2};

/// An element being moved by the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub id: ElementId,
    /// Pointer position minus the element's anchor at grab time.
    pub offset: Vec2,
    /// The element as it was before the drag, restored on cancel.
    pub original: Element,
    pub moved: bool,
}

/// Transient gesture state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Drafting(Draft),
    Dragging(DragState),
}

/// Editing session over a playbook.
#[derive(Debug, Clone)]
pub struct Canvas {
    playbook: Playbook,
    history: History<Playbook>,
    view: Option<ViewTransform>,
    /// Tool manager.
    pub tool_manager: ToolManager,
    selection: Option<ElementId>,
    interaction: Interaction,
    players_locked: bool,
    config: EditorConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Playbook::default())
    }
}

impl Canvas {
    pub fn new(playbook: Playbook) -> Self {
        Self::with_config(playbook, EditorConfig::default())
    }

    pub fn with_config(mut playbook: Playbook, config: EditorConfig) -> Self {
        playbook.repair();
        let mut tool_manager = ToolManager::new();
        tool_manager.current_style = config.style.clone();
        let mut canvas = Self {
            history: History::new(config.history_capacity),
            playbook,
            view: None,
            tool_manager,
            selection: None,
            interaction: Interaction::Idle,
            players_locked: false,
            config,
        };
        canvas.reset_history();
        canvas
    }

    pub fn playbook(&self) -> &Playbook {
        &self.playbook
    }

    pub fn active_play(&self) -> Option<&Play> {
        self.playbook.active_play()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn history(&self) -> &History<Playbook> {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // --- lifecycle ---------------------------------------------------------

    /// Attach the canvas to a view. Pointer and key events are ignored
    /// until a view is mounted. Mounting again replaces the transform.
    pub fn mount(&mut self, view: ViewTransform) {
        self.view = Some(view);
    }

    /// Detach from the view, abandoning any gesture in progress.
    pub fn unmount(&mut self) {
        self.cancel_interaction();
        self.view = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.view.is_some()
    }

    // --- tools & selection -------------------------------------------------

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Switch tools. A draft in progress is discarded.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if matches!(self.interaction, Interaction::Drafting(_)) {
            self.interaction = Interaction::Idle;
        }
        self.tool_manager.set_tool(tool);
    }

    pub fn players_locked(&self) -> bool {
        self.players_locked
    }

    pub fn set_players_locked(&mut self, locked: bool) {
        self.players_locked = locked;
    }

    /// Select an element of the active play, or clear the selection.
    /// Returns false if `id` is not in the active play.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        match id {
            Some(id) if self.find_element(id).is_none() => false,
            _ => {
                self.selection = id;
                true
            }
        }
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.find_element(self.selection?)
    }

    /// Apply an inspector edit to the selected element.
    pub fn update_selected(&mut self, patch: &ElementPatch) -> bool {
        let Some(element) = self.selected_element() else {
            return false;
        };
        let updated = patch.apply(element);
        if &updated == element {
            return false;
        }
        let id = updated.id();
        self.replace_element(id, updated);
        self.commit();
        true
    }

    /// Remove the selected element and clear the selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.take() else {
            return false;
        };
        if matches!(&self.interaction, Interaction::Dragging(drag) if drag.id == id) {
            self.interaction = Interaction::Idle;
        }
        let Some(play) = self.playbook.active_play_mut() else {
            return false;
        };
        if play.element(id).is_none() {
            return false;
        }
        let remaining = play.without(id);
        play.set_elements(remaining);
        self.commit();
        true
    }

    /// Remove every element of the active play.
    pub fn clear_active_play(&mut self) -> bool {
        self.interaction = Interaction::Idle;
        self.selection = None;
        let Some(play) = self.playbook.active_play_mut() else {
            return false;
        };
        if play.elements().is_empty() {
            return false;
        }
        play.set_elements(Vec::new());
        self.commit();
        true
    }

    // --- plays & field ----------------------------------------------------

    pub fn add_play(&mut self) -> PlayId {
        self.leave_play();
        let id = self.playbook.add_play();
        self.commit();
        id
    }

    pub fn duplicate_play(&mut self, id: PlayId) -> Option<PlayId> {
        self.leave_play();
        let copy = self.playbook.duplicate_play(id)?;
        self.commit();
        Some(copy)
    }

    /// Delete a play. The last remaining play is kept.
    pub fn delete_play(&mut self, id: PlayId) -> bool {
        if self.playbook.len() <= 1 || self.playbook.play(id).is_none() {
            return false;
        }
        if self.playbook.active_play_id() == Some(id) {
            self.leave_play();
        }
        let deleted = self.playbook.delete_play(id);
        if deleted {
            self.commit();
        }
        deleted
    }

    pub fn select_play(&mut self, id: PlayId) -> bool {
        if self.playbook.active_play_id() == Some(id) || self.playbook.play(id).is_none() {
            return false;
        }
        self.leave_play();
        self.playbook.select_play(id);
        self.commit();
        true
    }

    pub fn rename_play(&mut self, id: PlayId, name: &str) -> bool {
        match self.playbook.play(id) {
            Some(play) if play.name != name => {
                self.playbook.rename_play(id, name);
                self.commit();
                true
            }
            _ => false,
        }
    }

    pub fn set_field_width(&mut self, yards: f64) -> bool {
        self.edit_active_play(|play| play.set_field_width(yards))
    }

    pub fn set_field_length(&mut self, yards: f64) -> bool {
        self.edit_active_play(|play| play.set_field_length(yards))
    }

    /// Show the line of scrimmage at `row` (clamped to the field), or hide it.
    pub fn set_line_of_scrimmage(&mut self, row: Option<i64>) -> bool {
        self.edit_active_play(|play| play.set_line_of_scrimmage(row))
    }

    fn edit_active_play(&mut self, edit: impl FnOnce(&mut Play)) -> bool {
        let Some(play) = self.playbook.active_play_mut() else {
            return false;
        };
        let before = play.clone();
        edit(play);
        if *play == before {
            return false;
        }
        self.commit();
        true
    }

    /// Replace the whole document. History starts over from the new plays.
    pub fn import_plays(&mut self, plays: Vec<Play>) {
        log::info!("Importing {} plays", plays.len());
        self.playbook = Playbook::from_plays(plays);
        self.selection = None;
        self.interaction = Interaction::Idle;
        self.reset_history();
    }

    // --- history -----------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self) {
        self.history.register(self.playbook.clone());
    }

    fn reset_history(&mut self) {
        self.history.reset(self.playbook.clone());
        // Consume the skip armed by reset; the loaded state is the baseline.
        self.commit();
    }

    fn apply_snapshot(&mut self, snapshot: Playbook) {
        self.playbook = snapshot;
        self.interaction = Interaction::Idle;
        if self.selected_element().is_none() {
            self.selection = None;
        }
        self.commit();
    }

    fn leave_play(&mut self) {
        self.interaction = Interaction::Idle;
        self.selection = None;
    }

    // --- element helpers ---------------------------------------------------

    fn elements(&self) -> &[Element] {
        self.playbook.active_play().map(Play::elements).unwrap_or(&[])
    }

    fn find_element(&self, id: ElementId) -> Option<&Element> {
        self.playbook.active_play()?.element(id)
    }

    fn replace_element(&mut self, id: ElementId, element: Element) {
        if let Some(play) = self.playbook.active_play_mut() {
            let elements = play.with_replaced(id, element);
            play.set_elements(elements);
        }
    }

    fn append_element(&mut self, element: Element) {
        if let Some(play) = self.playbook.active_play_mut() {
            let elements = play.with_element(element);
            play.set_elements(elements);
        }
    }

    /// Topmost element under `point`.
    fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements()
            .iter()
            .rev()
            .find(|e| e.hit_test(point, self.config.hit_tolerance))
    }

    fn snap_to_row(&self, y: f64) -> f64 {
        match self.playbook.active_play() {
            Some(play) => snap_to_yard_line(y, play.size(), play.field_length_yards()),
            None => y,
        }
    }

    /// Endpoint snap, falling back to the point itself.
    fn snap_endpoint(&self, point: Point, exclude: Option<Point>) -> Point {
        find_snap_point(
            point,
            self.elements(),
            self.players_locked,
            exclude,
            self.config.snap_radius,
        )
        .map_or(point, |target| target.point)
    }

    // --- input -------------------------------------------------------------

    /// Feed a pointer event in screen coordinates. No-op while unmounted, and
    /// for events that do not map to a finite field point.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(view) = self.view.filter(ViewTransform::is_invertible) else {
            return;
        };
        let point = view.screen_to_field(event.position());
        if !point.is_finite() {
            log::debug!("Ignoring pointer event off the field transform: {event:?}");
            return;
        }
        match event {
            PointerEvent::Down { .. } => self.pointer_down(point),
            PointerEvent::Move { .. } => self.pointer_move(point),
            PointerEvent::Up { .. } => self.pointer_up(point),
        }
    }

    /// Feed a key press. No-op while unmounted.
    pub fn handle_key(&mut self, key: &KeyPress) -> bool {
        if self.view.is_none() {
            return false;
        }
        match key.command() {
            Some(KeyCommand::DeleteSelected) => self.delete_selected(),
            Some(KeyCommand::Cancel) => self.cancel_interaction(),
            Some(KeyCommand::Undo) => self.undo(),
            Some(KeyCommand::Redo) => self.redo(),
            None => false,
        }
    }

    /// Abandon the current draft, or put a dragged element back.
    pub fn cancel_interaction(&mut self) -> bool {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => false,
            Interaction::Drafting(_) => {
                log::debug!("Draft cancelled");
                true
            }
            Interaction::Dragging(drag) => {
                if drag.moved {
                    self.replace_element(drag.id, drag.original);
                }
                true
            }
        }
    }

    /// The element the current draft would commit, for live preview.
    pub fn draft_preview(&self) -> Option<Element> {
        match &self.interaction {
            Interaction::Drafting(draft) => Some(self.tool_manager.create_element(draft)),
            _ => None,
        }
    }

    fn pointer_down(&mut self, point: Point) {
        if self.interaction != Interaction::Idle {
            return;
        }
        let tool = self.tool();

        if let Some(element) = self.element_at(point) {
            // Locked players let drawing tools through so routes can start on them.
            let falls_through = self.players_locked && tool.is_drawing() && element.is_player();
            if !falls_through {
                let drag = DragState {
                    id: element.id(),
                    offset: point - element.anchor(),
                    original: element.clone(),
                    moved: false,
                };
                self.selection = Some(drag.id);
                self.interaction = Interaction::Dragging(drag);
                return;
            }
        }

        match tool {
            ToolKind::Player => {
                let placed = Point::new(point.x, self.snap_to_row(point.y));
                if let Some(element) = self.tool_manager.place(placed) {
                    self.append_element(element);
                    self.commit();
                }
            }
            ToolKind::Ball => {
                if let Some(element) = self.tool_manager.place(point) {
                    self.append_element(element);
                    self.commit();
                }
            }
            ToolKind::Arrow | ToolKind::Line | ToolKind::Perpendicular => {
                let start = self.snap_endpoint(point, None);
                if let Some(draft) = self.tool_manager.begin_draft(start) {
                    self.interaction = Interaction::Drafting(draft);
                }
            }
            ToolKind::Rect | ToolKind::Zone => {
                if let Some(draft) = self.tool_manager.begin_draft(point) {
                    self.interaction = Interaction::Drafting(draft);
                }
            }
            ToolKind::Select => self.selection = None,
        }
    }

    fn pointer_move(&mut self, point: Point) {
        match &self.interaction {
            Interaction::Idle => {}
            Interaction::Drafting(draft) => {
                let draft = self.track_draft(*draft, point);
                self.interaction = Interaction::Drafting(draft);
            }
            Interaction::Dragging(drag) => {
                let (id, offset) = (drag.id, drag.offset);
                let Some(element) = self.find_element(id) else {
                    return;
                };
                if element.is_player() && self.players_locked {
                    return;
                }
                let mut target = point - offset;
                if element.is_player() {
                    target.y = self.snap_to_row(target.y);
                }
                let mut moved = element.clone();
                moved.move_anchor_to(target);
                if &moved == element {
                    return;
                }
                self.replace_element(id, moved);
                if let Interaction::Dragging(drag) = &mut self.interaction {
                    drag.moved = true;
                }
            }
        }
    }

    fn pointer_up(&mut self, point: Point) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => {}
            Interaction::Drafting(draft) => {
                let draft = self.track_draft(draft, point);
                if draft.is_degenerate(self.config.min_line_length, self.config.min_area_size) {
                    log::debug!("Discarding degenerate {:?} draft", draft.kind());
                    return;
                }
                let element = self.tool_manager.create_element(&draft);
                log::debug!("Committing {:?} {}", draft.kind(), element.id());
                self.append_element(element);
                self.commit();
            }
            Interaction::Dragging(drag) => {
                if drag.moved {
                    self.commit();
                }
            }
        }
    }

    /// Follow the pointer with the free end of a draft.
    fn track_draft(&self, draft: Draft, point: Point) -> Draft {
        match draft {
            Draft::Line { kind, start, .. } => Draft::Line {
                kind,
                start,
                end: self.snap_endpoint(point, Some(start)),
            },
            Draft::Area { kind, anchor, .. } => Draft::Area {
                kind,
                anchor,
                current: point,
            },
        }
    }
}
