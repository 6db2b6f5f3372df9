//! Geodesic site-boundary editor core.
//!
//! Draw a closed polygon on a map by clicking or by typing exact distances,
//! then edit edge lengths and interior angles with the rest of the shape
//! following along. All math is on a mean-radius sphere and targets
//! site-scale shapes. Rendering belongs to the host; see `controller`.

pub mod model;
pub mod config;
pub mod error;
mod log;
pub mod geometry {
    pub mod geodesic;
    pub mod limits;
    pub mod polygon;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod measure;
    pub mod picking;
    pub mod propagate;
}
pub mod input;
pub mod draft;
pub mod boundary;
pub mod controller;
pub mod json;

pub use boundary::EditableBoundary;
pub use config::EditorConfig;
pub use controller::{BoundaryEditor, EditorEvent, Key, PreviewState};
pub use draft::DraftSession;
pub use error::{ConfigError, DraftError, EditError, InputError, JsonError, ValidationError};
pub use input::InputBuffer;
pub use model::{BoundaryDescriptor, BoundingBox, DraftMode, Edge, InteriorAngle, LatLng, Measurements, Ring};
