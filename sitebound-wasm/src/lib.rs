use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct BoundaryEditor {
    pub(crate) inner: sitebound::BoundaryEditor,
    pub(crate) on_finalized: Option<js_sys::Function>,
    pub(crate) on_edited: Option<js_sys::Function>,
    pub(crate) on_cleared: Option<js_sys::Function>,
}

impl BoundaryEditor {
    pub fn rs_new(config: sitebound::EditorConfig) -> BoundaryEditor {
        BoundaryEditor {
            inner: sitebound::BoundaryEditor::new(config),
            on_finalized: None,
            on_edited: None,
            on_cleared: None,
        }
    }
    pub fn rs_inner(&self) -> &sitebound::BoundaryEditor { &self.inner }
}
