use crate::interop::{arr_f64, to_js};
use crate::BoundaryEditor;
use js_sys::Float64Array;
use sitebound::json::ring_from_json_value;
use sitebound::{EditorConfig, EditorEvent, Key, LatLng};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn now() -> f64 {
    js_sys::Date::now()
}

fn config_from_js(v: JsValue) -> Result<EditorConfig, JsValue> {
    if v.is_undefined() || v.is_null() {
        return Ok(EditorConfig::default());
    }
    let val = serde_wasm_bindgen::from_value::<serde_json::Value>(v).map_err(error::json_parse)?;
    EditorConfig::from_json_value(val).map_err(|e| error::from_core(&e))
}

#[wasm_bindgen]
impl BoundaryEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BoundaryEditor {
        BoundaryEditor::rs_new(EditorConfig::default())
    }

    /// Accepts a partial camelCase config object; unknown keys are rejected.
    pub fn with_config(config: JsValue) -> Result<BoundaryEditor, JsValue> {
        config_from_js(config).map(BoundaryEditor::rs_new)
    }
    pub fn set_config_res(&mut self, config: JsValue) -> JsValue {
        match config_from_js(config) {
            Ok(cfg) => {
                self.inner.set_config(cfg);
                error::ok(JsValue::TRUE)
            }
            Err(e) => e,
        }
    }
    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }

    pub fn mode(&self) -> String {
        match self.inner.mode() {
            sitebound::DraftMode::Idle => "idle",
            sitebound::DraftMode::Drawing => "drawing",
            sitebound::DraftMode::Finalized => "finalized",
        }
        .to_string()
    }

    // Pointer and keyboard
    pub fn pointer_down(&mut self, lat: f64, lng: f64) -> bool {
        let changed = self.inner.pointer_down(LatLng::new(lat, lng));
        self.dispatch_events();
        changed
    }
    pub fn pointer_move(&mut self, lat: f64, lng: f64) -> bool {
        self.inner.pointer_move(LatLng::new(lat, lng), now())
    }
    pub fn pointer_up(&mut self) -> bool {
        let changed = self.inner.pointer_up(now());
        self.dispatch_events();
        changed
    }
    pub fn right_click_res(&mut self) -> JsValue {
        let out = match self.inner.right_click(now()) {
            Ok(d) => error::ok(to_js(&d)),
            Err(e) => error::draft(&e),
        };
        self.dispatch_events();
        out
    }
    /// `key` is a DOM `KeyboardEvent.key` value.
    pub fn key_down(&mut self, key: &str) -> bool {
        let handled = self.inner.key_down(Key::from_dom(key), now());
        self.dispatch_events();
        handled
    }
    pub fn key_up(&mut self, key: &str) -> bool {
        self.inner.key_up(Key::from_dom(key))
    }
    pub fn commit_distance_res(&mut self) -> JsValue {
        match self.inner.commit_distance() {
            Ok(p) => error::ok(to_js(&p)),
            Err(e) => error::from_core(&e),
        }
    }
    pub fn finish_res(&mut self) -> JsValue {
        let out = match self.inner.finish(now()) {
            Ok(d) => error::ok(to_js(&d)),
            Err(e) => error::draft(&e),
        };
        self.dispatch_events();
        out
    }
    pub fn clear(&mut self) {
        self.inner.clear();
        self.dispatch_events();
    }

    // Finalized edits
    pub fn set_edge_length_res(&mut self, index: u32, text: &str) -> JsValue {
        let r = self.inner.set_edge_length_text(index as usize, text, now());
        self.edit_result(r)
    }
    pub fn set_vertex_angle_res(&mut self, index: u32, text: &str) -> JsValue {
        let r = self.inner.set_vertex_angle_text(index as usize, text, now());
        self.edit_result(r)
    }
    pub fn move_vertex_res(&mut self, index: u32, lat: f64, lng: f64) -> JsValue {
        if !lat.is_finite() {
            return error::non_finite("lat");
        }
        if !lng.is_finite() {
            return error::non_finite("lng");
        }
        let r = self.inner.move_vertex(index as usize, LatLng::new(lat, lng), now());
        self.edit_result(r)
    }

    // Detection
    pub fn begin_detection(&mut self) -> Option<f64> {
        self.inner.begin_detection().map(|t| t as f64)
    }
    /// `ring` is a vertex array (or `{vertices}`), or null/undefined when
    /// detection found nothing.
    pub fn resolve_detection_res(&mut self, ticket: f64, ring: JsValue) -> JsValue {
        let parsed = if ring.is_null() || ring.is_undefined() {
            None
        } else {
            let val = match serde_wasm_bindgen::from_value::<serde_json::Value>(ring) {
                Ok(v) => v,
                Err(e) => return error::json_parse(e),
            };
            match ring_from_json_value(val) {
                Ok(r) => Some(r),
                Err(e) => return error::from_core(&e),
            }
        };
        let applied = self.inner.resolve_detection(ticket as u64, parsed, now());
        self.dispatch_events();
        error::ok(JsValue::from_bool(applied))
    }

    // Output
    pub fn preview_state(&self) -> JsValue {
        to_js(&self.inner.preview_state())
    }
    pub fn descriptor(&self) -> JsValue {
        match self.inner.descriptor(now()) {
            Some(d) => to_js(&d),
            None => JsValue::NULL,
        }
    }
    pub fn descriptor_json(&self) -> Option<String> {
        let d = self.inner.descriptor(now())?;
        sitebound::json::descriptor_to_json(&d).ok()
    }
    /// `{vertex: {index, dist}}`, `{edge: {index, t, dist}}` or null.
    pub fn hit_test(&self, lat: f64, lng: f64) -> JsValue {
        match self.inner.hit_test(LatLng::new(lat, lng)) {
            Some(hit) => to_js(&hit),
            None => JsValue::NULL,
        }
    }
    pub fn validate(&self) -> JsValue {
        let problems = self.inner.validate();
        if problems.is_empty() {
            error::ok(JsValue::TRUE)
        } else {
            error::invalid_boundary(&problems)
        }
    }
    /// Flat `[lat0, lng0, lat1, lng1, ...]` of the draft or finalized ring.
    pub fn vertex_positions(&self) -> Float64Array {
        let state = self.inner.preview_state();
        let src = if state.control_points.is_empty() { &state.vertices } else { &state.control_points };
        let flat: Vec<f64> = src.iter().flat_map(|p| [p.lat, p.lng]).collect();
        arr_f64(&flat)
    }
    pub fn geom_version(&self) -> f64 {
        match self.inner.boundary() {
            Some(b) => b.geom_version() as f64,
            None => self.inner.session().geom_version() as f64,
        }
    }

    // Callbacks receive the descriptor object (none for cleared).
    pub fn on_finalized(&mut self, f: Option<js_sys::Function>) {
        self.on_finalized = f;
    }
    pub fn on_edited(&mut self, f: Option<js_sys::Function>) {
        self.on_edited = f;
    }
    pub fn on_cleared(&mut self, f: Option<js_sys::Function>) {
        self.on_cleared = f;
    }
}

impl BoundaryEditor {
    fn edit_result(&mut self, r: Result<sitebound::BoundaryDescriptor, sitebound::EditError>) -> JsValue {
        let out = match r {
            Ok(d) => error::ok(to_js(&d)),
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("edit rejected: {}", e)));
                error::from_core(&e)
            }
        };
        self.dispatch_events();
        out
    }

    fn dispatch_events(&mut self) {
        for ev in self.inner.take_events() {
            let (cb, payload) = match &ev {
                EditorEvent::BoundaryFinalized { descriptor } => (&self.on_finalized, to_js(descriptor)),
                EditorEvent::BoundaryEdited { descriptor } => (&self.on_edited, to_js(descriptor)),
                EditorEvent::BoundaryCleared => (&self.on_cleared, JsValue::UNDEFINED),
            };
            if let Some(f) = cb {
                let _ = f.call1(&JsValue::NULL, &payload);
            }
        }
    }
}

impl Default for BoundaryEditor {
    fn default() -> Self {
        BoundaryEditor::new()
    }
}
