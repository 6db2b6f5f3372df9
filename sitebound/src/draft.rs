//! Drawing state machine: Idle → Drawing → Finalized.
//!
//! Every method that changes the vertex list re-measures before returning,
//! so `measurements()` always matches `vertices()`.

use crate::algorithms::measure::measure;
use crate::config::EditorConfig;
use crate::error::{DraftError, InputError, ValidationError};
use crate::geometry::geodesic::{bearing, snap_to_right_angle};
use crate::geometry::limits::{in_coord_bounds, MAX_VERTICES};
use crate::geometry::tolerance::same_point;
use crate::input::InputBuffer;
use crate::log::debug;
use crate::model::{DraftMode, LatLng, Measurements, Ring};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeOutcome {
    Ignored,
    /// Last vertex removed; the session may have dropped back to Idle.
    Undo,
    Cleared,
}

#[derive(Clone, Debug)]
pub struct DraftSession {
    mode: DraftMode,
    vertices: Vec<LatLng>,
    cursor: Option<LatLng>,  // raw pointer position, never throttled
    preview: Option<LatLng>, // what the overlay shows, possibly snapped
    buffer: InputBuffer,
    orthogonal_snap: bool,
    last_escape_ms: Option<f64>,
    last_preview_ms: Option<f64>,
    preview_interval_ms: f64,
    double_escape_window_ms: f64,
    geom_ver: u64,
    measurements: Measurements,
}

impl Default for DraftSession {
    fn default() -> Self {
        DraftSession::new(&EditorConfig::default())
    }
}

impl DraftSession {
    pub fn new(config: &EditorConfig) -> DraftSession {
        DraftSession {
            mode: DraftMode::Idle,
            vertices: Vec::new(),
            cursor: None,
            preview: None,
            buffer: InputBuffer::new(),
            orthogonal_snap: false,
            last_escape_ms: None,
            last_preview_ms: None,
            preview_interval_ms: config.preview_interval_ms,
            double_escape_window_ms: config.double_escape_window_ms,
            geom_ver: 1,
            measurements: Measurements { version: 1, ..Default::default() },
        }
    }

    pub fn apply_config(&mut self, config: &EditorConfig) {
        self.preview_interval_ms = config.preview_interval_ms;
        self.double_escape_window_ms = config.double_escape_window_ms;
    }

    pub fn mode(&self) -> DraftMode { self.mode }
    pub fn vertices(&self) -> &[LatLng] { &self.vertices }
    pub fn preview(&self) -> Option<LatLng> { self.preview }
    pub fn cursor(&self) -> Option<LatLng> { self.cursor }
    pub fn pending_text(&self) -> &str { self.buffer.text() }
    pub fn orthogonal_snap(&self) -> bool { self.orthogonal_snap }
    pub fn measurements(&self) -> &Measurements { &self.measurements }
    pub fn geom_version(&self) -> u64 { self.geom_ver }
    pub fn last_vertex(&self) -> Option<LatLng> { self.vertices.last().copied() }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
        self.measurements = measure(&self.vertices, self.geom_ver);
    }

    fn refresh_preview(&mut self) {
        self.preview = match (self.cursor, self.last_vertex()) {
            (Some(c), Some(last)) if self.orthogonal_snap => Some(snap_to_right_angle(last, c)),
            (c, _) => c,
        };
    }

    fn reset(&mut self, mode: DraftMode) {
        self.mode = mode;
        self.vertices.clear();
        self.cursor = None;
        self.preview = None;
        self.buffer.discard();
        self.last_escape_ms = None;
        self.last_preview_ms = None;
        self.bump();
    }

    fn push_vertex(&mut self, p: LatLng) {
        self.vertices.push(p);
        self.last_escape_ms = None;
        self.bump();
    }

    /// Places a free vertex at `p`. Any typed distance is discarded: a click
    /// never consumes the precision buffer.
    pub fn pointer_down(&mut self, p: LatLng) -> bool {
        if self.mode == DraftMode::Finalized || !in_coord_bounds(p) || self.vertices.len() >= MAX_VERTICES {
            return false;
        }
        // A second click on the same spot (double-click) adds nothing.
        if self.last_vertex().map_or(false, |last| same_point(last, p)) {
            return false;
        }
        if self.mode == DraftMode::Idle {
            debug!("draft started");
            self.mode = DraftMode::Drawing;
        }
        self.buffer.discard();
        self.cursor = Some(p);
        self.push_vertex(p);
        self.preview = None;
        true
    }

    /// Records the cursor and refreshes the preview unless the last refresh
    /// was less than the configured interval ago. Returns whether the
    /// preview changed.
    pub fn pointer_move(&mut self, p: LatLng, now_ms: f64) -> bool {
        if self.mode != DraftMode::Drawing || !in_coord_bounds(p) {
            return false;
        }
        self.cursor = Some(p);
        if let Some(t) = self.last_preview_ms {
            if now_ms - t < self.preview_interval_ms {
                return false;
            }
        }
        self.last_preview_ms = Some(now_ms);
        self.refresh_preview();
        true
    }

    /// Flushes the latest cursor into the preview, throttled or not.
    pub fn pointer_up(&mut self) -> bool {
        if self.mode != DraftMode::Drawing {
            return false;
        }
        self.refresh_preview();
        true
    }

    pub fn set_orthogonal_snap(&mut self, on: bool) {
        if self.orthogonal_snap == on {
            return;
        }
        self.orthogonal_snap = on;
        if self.mode == DraftMode::Drawing {
            self.refresh_preview();
        }
    }

    /// First press undoes the last vertex; a second press inside the
    /// double-escape window clears the draft.
    pub fn escape(&mut self, now_ms: f64) -> EscapeOutcome {
        if self.mode != DraftMode::Drawing {
            return EscapeOutcome::Ignored;
        }
        if let Some(t) = self.last_escape_ms {
            if now_ms - t <= self.double_escape_window_ms {
                debug!(vertices = self.vertices.len(), "draft cleared by double escape");
                self.reset(DraftMode::Idle);
                return EscapeOutcome::Cleared;
            }
        }
        self.vertices.pop();
        self.bump();
        self.last_escape_ms = Some(now_ms);
        if self.vertices.is_empty() {
            self.reset(DraftMode::Idle);
        } else {
            self.refresh_preview();
        }
        EscapeOutcome::Undo
    }

    pub fn type_digit(&mut self, c: char) -> bool {
        self.mode == DraftMode::Drawing && self.buffer.append_digit(c)
    }

    pub fn type_decimal(&mut self) -> bool {
        self.mode == DraftMode::Drawing && self.buffer.append_decimal()
    }

    pub fn backspace(&mut self) -> bool {
        self.mode == DraftMode::Drawing && self.buffer.backspace()
    }

    /// Places the next vertex at the typed distance from the last one, aimed
    /// at the live cursor (snapped to a right angle when snap is on).
    pub fn commit_distance(&mut self) -> Result<LatLng, InputError> {
        if self.mode != DraftMode::Drawing {
            return Err(InputError::NotDrawing);
        }
        self.buffer.value()?;
        let last = self.last_vertex().ok_or(InputError::NotDrawing)?;
        let cursor = self.cursor.ok_or(InputError::NoDirection)?;
        if cursor == last {
            return Err(InputError::NoDirection);
        }
        let p = self.buffer.commit(last, bearing(last, cursor), self.orthogonal_snap)?;
        self.push_vertex(p);
        self.refresh_preview();
        debug!(lat = p.lat, lng = p.lng, "precision vertex placed");
        Ok(p)
    }

    /// Closes the draft into a ring and enters Finalized.
    pub fn finish(&mut self) -> Result<Ring, DraftError> {
        if self.mode != DraftMode::Drawing {
            return Err(DraftError::NotDrawing);
        }
        let ring = Ring::new(self.vertices.clone()).map_err(|e| match e {
            ValidationError::TooFewVertices(k) => DraftError::TooFewVertices(k),
            other => DraftError::Invalid(vec![other]),
        })?;
        debug!(vertices = ring.len(), "draft finished");
        self.reset(DraftMode::Finalized);
        Ok(ring)
    }

    /// Enters Finalized without a draft, for a boundary supplied from elsewhere.
    pub fn adopt_finalized(&mut self) {
        self.reset(DraftMode::Finalized);
    }

    pub fn clear(&mut self) {
        self.reset(DraftMode::Idle);
    }
}
