//! Host-facing adapter: map-widget pointer and keyboard primitives in,
//! preview snapshots and boundary events out.
//!
//! The host owns rendering. It reads `preview_state()` after each call,
//! rebuilds its markers and polylines from that snapshot, and drains
//! `take_events()` to notify the rest of the application.

use crate::algorithms::picking::{pick, pick_vertex, Pick};
use crate::algorithms::propagate::parse_field;
use crate::boundary::EditableBoundary;
use crate::config::EditorConfig;
use crate::draft::{DraftSession, EscapeOutcome};
use crate::error::{DraftError, EditError, InputError, ValidationError};
use crate::geometry::geodesic::{bearing, distance};
use crate::geometry::polygon::validate;
use crate::log::{debug, warn};
use crate::model::{BoundaryDescriptor, DraftMode, LatLng, Measurements, Ring};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Backspace,
    Enter,
    Escape,
    Shift,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Key {
        match key {
            "." | "Decimal" => Key::Decimal,
            "Backspace" => Key::Backspace,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Shift" => Key::Shift,
            k if k.len() == 1 && k.as_bytes()[0].is_ascii_digit() => Key::Digit(k.as_bytes()[0] - b'0'),
            _ => Key::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    BoundaryFinalized { descriptor: BoundaryDescriptor },
    BoundaryEdited { descriptor: BoundaryDescriptor },
    BoundaryCleared,
}

/// Everything an overlay needs to draw the current state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewState {
    pub mode: DraftMode,
    pub vertices: Vec<LatLng>,
    pub preview_vertex: Option<LatLng>,
    pub preview_segment: Option<[LatLng; 2]>,
    pub preview_distance_meters: Option<f64>,
    pub preview_bearing_degrees: Option<f64>,
    pub pending_distance_text: String,
    pub orthogonal_snap: bool,
    pub measurements: Measurements,
    pub control_points: Vec<LatLng>,
    pub dragging: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Detection {
    Open,
    Pending(u64),
    Closed,
}

pub struct BoundaryEditor {
    config: EditorConfig,
    session: DraftSession,
    boundary: Option<EditableBoundary>,
    drag: Option<(usize, bool)>, // (control point, moved since pointer down)
    detection: Detection,
    next_ticket: u64,
    events: Vec<EditorEvent>,
}

impl Default for BoundaryEditor {
    fn default() -> Self {
        BoundaryEditor::new(EditorConfig::default())
    }
}

impl BoundaryEditor {
    pub fn new(config: EditorConfig) -> BoundaryEditor {
        BoundaryEditor {
            session: DraftSession::new(&config),
            config,
            boundary: None,
            drag: None,
            detection: Detection::Open,
            next_ticket: 1,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig { &self.config }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.session.apply_config(&config);
        self.config = config;
    }

    pub fn mode(&self) -> DraftMode { self.session.mode() }
    pub fn session(&self) -> &DraftSession { &self.session }
    pub fn boundary(&self) -> Option<&EditableBoundary> { self.boundary.as_ref() }

    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // Pointer

    /// Free vertex while drawing; in Finalized mode, grabs the control point
    /// under the pointer if there is one.
    pub fn pointer_down(&mut self, p: LatLng) -> bool {
        if let Some(b) = &self.boundary {
            return match pick_vertex(b.control_points(), p, self.config.pick_tolerance_meters) {
                Some(Pick::Vertex { index, .. }) => {
                    self.drag = Some((index, false));
                    true
                }
                _ => false,
            };
        }
        if !self.session.pointer_down(p) {
            return false;
        }
        // Manual drawing rules out detection for the rest of the session.
        if let Detection::Pending(ticket) = self.detection {
            debug!(ticket, "manual drawing started, pending detection will be discarded");
        }
        self.detection = Detection::Closed;
        true
    }

    pub fn pointer_move(&mut self, p: LatLng, now_ms: f64) -> bool {
        if let (Some((index, _)), Some(b)) = (self.drag, self.boundary.as_mut()) {
            return match b.drag_control_point(index, p) {
                Ok(()) => {
                    self.drag = Some((index, true));
                    true
                }
                Err(_) => false,
            };
        }
        self.session.pointer_move(p, now_ms)
    }

    /// Ends a drag (reporting the edit) or flushes the draft preview.
    pub fn pointer_up(&mut self, now_ms: f64) -> bool {
        if let Some((_, moved)) = self.drag.take() {
            if moved {
                self.emit_edited(now_ms);
            }
            return true;
        }
        self.session.pointer_up()
    }

    pub fn right_click(&mut self, now_ms: f64) -> Result<BoundaryDescriptor, DraftError> {
        self.finish(now_ms)
    }

    // Keyboard

    pub fn key_down(&mut self, key: Key, now_ms: f64) -> bool {
        match key {
            Key::Digit(d) => self.session.type_digit(char::from(b'0' + d.min(9))),
            Key::Decimal => self.session.type_decimal(),
            Key::Backspace => self.session.backspace(),
            Key::Enter => self.commit_distance().is_ok(),
            Key::Escape => match self.session.escape(now_ms) {
                EscapeOutcome::Ignored => false,
                EscapeOutcome::Undo => true,
                EscapeOutcome::Cleared => {
                    self.events.push(EditorEvent::BoundaryCleared);
                    true
                }
            },
            Key::Shift => {
                self.session.set_orthogonal_snap(true);
                true
            }
            Key::Other => false,
        }
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        if key == Key::Shift {
            self.session.set_orthogonal_snap(false);
            return true;
        }
        false
    }

    pub fn commit_distance(&mut self) -> Result<LatLng, InputError> {
        self.session.commit_distance().map_err(|e| {
            warn!(error = %e, text = self.session.pending_text(), "typed distance not committed");
            e
        })
    }

    // Lifecycle

    /// Closes the draft. With `require_valid_boundary` set, a draft that
    /// fails validation stays open.
    pub fn finish(&mut self, now_ms: f64) -> Result<BoundaryDescriptor, DraftError> {
        if self.config.require_valid_boundary && self.session.vertices().len() >= 3 {
            let errors = validate(self.session.vertices(), self.config.area_bounds());
            if !errors.is_empty() {
                warn!(problems = errors.len(), "finish refused, boundary invalid");
                return Err(DraftError::Invalid(errors));
            }
        }
        let ring = self.session.finish()?;
        Ok(self.install(ring, now_ms))
    }

    fn install(&mut self, ring: Ring, now_ms: f64) -> BoundaryDescriptor {
        let b = EditableBoundary::from_ring(ring);
        let descriptor = b.descriptor(now_ms);
        self.boundary = Some(b);
        self.drag = None;
        self.events.push(EditorEvent::BoundaryFinalized { descriptor: descriptor.clone() });
        descriptor
    }

    /// Drops the draft or boundary and returns to Idle. A detection still in
    /// flight is invalidated.
    pub fn clear(&mut self) {
        self.session.clear();
        self.boundary = None;
        self.drag = None;
        self.detection = Detection::Open;
        self.events.push(EditorEvent::BoundaryCleared);
    }

    // Field edits

    fn boundary_mut(&mut self) -> Result<&mut EditableBoundary, EditError> {
        self.boundary.as_mut().ok_or(EditError::NotFinalized)
    }

    fn emit_edited(&mut self, now_ms: f64) -> Option<BoundaryDescriptor> {
        let descriptor = self.boundary.as_ref()?.descriptor(now_ms);
        self.events.push(EditorEvent::BoundaryEdited { descriptor: descriptor.clone() });
        Some(descriptor)
    }

    fn finish_edit(&mut self, result: Result<(), EditError>, now_ms: f64) -> Result<BoundaryDescriptor, EditError> {
        result?;
        self.emit_edited(now_ms).ok_or(EditError::NotFinalized)
    }

    pub fn set_edge_length(&mut self, index: usize, length_m: f64, now_ms: f64) -> Result<BoundaryDescriptor, EditError> {
        let result = self.boundary_mut().and_then(|b| b.set_edge_length(index, length_m).map(|_| ()));
        self.finish_edit(result, now_ms)
    }

    pub fn set_vertex_angle(&mut self, index: usize, angle_deg: f64, now_ms: f64) -> Result<BoundaryDescriptor, EditError> {
        let result = self.boundary_mut().and_then(|b| b.set_vertex_angle(index, angle_deg).map(|_| ()));
        self.finish_edit(result, now_ms)
    }

    pub fn set_edge_length_text(&mut self, index: usize, text: &str, now_ms: f64) -> Result<BoundaryDescriptor, EditError> {
        let v = parse_field(text).map_err(|e| {
            warn!(index, text, "edge length field is not a number");
            e
        })?;
        self.set_edge_length(index, v, now_ms)
    }

    pub fn set_vertex_angle_text(&mut self, index: usize, text: &str, now_ms: f64) -> Result<BoundaryDescriptor, EditError> {
        let v = parse_field(text).map_err(|e| {
            warn!(index, text, "vertex angle field is not a number");
            e
        })?;
        self.set_vertex_angle(index, v, now_ms)
    }

    /// Moves one control point directly, as a completed drag.
    pub fn move_vertex(&mut self, index: usize, p: LatLng, now_ms: f64) -> Result<BoundaryDescriptor, EditError> {
        let result = self.boundary_mut().and_then(|b| b.drag_control_point(index, p));
        self.finish_edit(result, now_ms)
    }

    // Detection

    /// Starts an auto-detection request for the initial boundary. Only one
    /// per session, and only before anything has been drawn.
    pub fn begin_detection(&mut self) -> Option<u64> {
        if self.detection != Detection::Open || self.boundary.is_some() || self.session.mode() != DraftMode::Idle {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.detection = Detection::Pending(ticket);
        Some(ticket)
    }

    /// Installs a detected ring as the finalized boundary if `ticket` is still
    /// the pending one and the user has not started drawing. Returns whether
    /// the ring was adopted.
    pub fn resolve_detection(&mut self, ticket: u64, ring: Option<Ring>, now_ms: f64) -> bool {
        if self.detection != Detection::Pending(ticket) {
            warn!(ticket, "stale detection result discarded");
            return false;
        }
        self.detection = Detection::Closed;
        let ring = match ring {
            Some(r) => r,
            None => return false,
        };
        if self.boundary.is_some() || self.session.mode() != DraftMode::Idle {
            warn!(ticket, "detection result arrived after manual drawing, discarded");
            return false;
        }
        self.session.adopt_finalized();
        self.install(ring, now_ms);
        true
    }

    // Output

    pub fn descriptor(&self, now_ms: f64) -> Option<BoundaryDescriptor> {
        self.boundary.as_ref().map(|b| b.descriptor(now_ms))
    }

    /// Control point or edge of the finalized boundary under `p`, for hover
    /// feedback. Vertices win over edges.
    pub fn hit_test(&self, p: LatLng) -> Option<Pick> {
        let b = self.boundary.as_ref()?;
        pick(b.control_points(), p, self.config.pick_tolerance_meters)
    }

    /// Problems with the boundary, or with the draft if nothing is finalized.
    pub fn validate(&self) -> Vec<ValidationError> {
        match &self.boundary {
            Some(b) => b.validate(self.config.area_bounds()),
            None => validate(self.session.vertices(), self.config.area_bounds()),
        }
    }

    pub fn preview_state(&self) -> PreviewState {
        if let Some(b) = &self.boundary {
            return PreviewState {
                mode: DraftMode::Finalized,
                vertices: b.ring().vertices().to_vec(),
                preview_vertex: None,
                preview_segment: None,
                preview_distance_meters: None,
                preview_bearing_degrees: None,
                pending_distance_text: String::new(),
                orthogonal_snap: self.session.orthogonal_snap(),
                measurements: b.measurements().clone(),
                control_points: b.control_points().to_vec(),
                dragging: self.drag.map(|(i, _)| i),
            };
        }
        let s = &self.session;
        let segment = match (s.last_vertex(), s.preview()) {
            (Some(a), Some(b)) => Some([a, b]),
            _ => None,
        };
        PreviewState {
            mode: s.mode(),
            vertices: s.vertices().to_vec(),
            preview_vertex: s.preview(),
            preview_segment: segment,
            preview_distance_meters: segment.map(|[a, b]| distance(a, b)),
            preview_bearing_degrees: segment.map(|[a, b]| bearing(a, b)),
            pending_distance_text: s.pending_text().to_string(),
            orthogonal_snap: s.orthogonal_snap(),
            measurements: s.measurements().clone(),
            control_points: Vec::new(),
            dragging: None,
        }
    }
}
