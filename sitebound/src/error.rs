//! Typed errors for every fallible editor operation.
//!
//! Each enum exposes a stable snake_case `code()` so adapters can hand the
//! host an error object without matching on Rust types.

use thiserror::Error;

/// Problems found by `validate()`. These flag a ring, they never repair it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("a boundary needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("vertex {index} has an out-of-range coordinate ({lat}, {lng})")]
    CoordinateOutOfRange { index: usize, lat: f64, lng: f64 },
    #[error("vertex {index} repeats the previous vertex")]
    DuplicateVertex { index: usize },
    #[error("area {area:.1} m² is outside [{min}, {max}] m²")]
    AreaOutOfRange { area: f64, min: f64, max: f64 },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::TooFewVertices(_) => "too_few_vertices",
            ValidationError::CoordinateOutOfRange { .. } => "coordinate_out_of_range",
            ValidationError::DuplicateVertex { .. } => "duplicate_vertex",
            ValidationError::AreaOutOfRange { .. } => "area_out_of_range",
        }
    }
}

/// Rejected length/angle/drag edits. The ring is untouched whenever one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("'{0}' is not a number")]
    NotNumeric(String),
    #[error("value must be finite")]
    NonFinite,
    #[error("edge length must be greater than zero, got {0}")]
    NonPositiveLength(f64),
    #[error("interior angle must be strictly between 0 and 180 degrees, got {0}")]
    AngleOutOfRange(f64),
    #[error("vertex 0 has no incoming edge to measure an angle against")]
    AngleAtFirstVertex,
    #[error("index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("coordinate ({lat}, {lng}) is out of range")]
    CoordinateOutOfRange { lat: f64, lng: f64 },
    #[error("no finalized boundary to edit")]
    NotFinalized,
    #[error("edge {index} has zero length")]
    DegenerateEdge { index: usize },
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::NotNumeric(_) => "not_numeric",
            EditError::NonFinite => "non_finite",
            EditError::NonPositiveLength(_) => "non_positive_length",
            EditError::AngleOutOfRange(_) => "angle_out_of_range",
            EditError::AngleAtFirstVertex => "angle_at_first_vertex",
            EditError::IndexOutOfRange { .. } => "out_of_range",
            EditError::CoordinateOutOfRange { .. } => "coordinate_out_of_range",
            EditError::NotFinalized => "not_finalized",
            EditError::DegenerateEdge { .. } => "degenerate_edge",
        }
    }
}

/// Precision buffer failures. The buffer text is kept on every one of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("nothing typed")]
    Empty,
    #[error("'{0}' is not a distance")]
    NotNumeric(String),
    #[error("distance must be greater than zero, got {0}")]
    NonPositive(f64),
    #[error("no cursor position to take a direction from")]
    NoDirection,
    #[error("not drawing")]
    NotDrawing,
}

impl InputError {
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Empty => "empty",
            InputError::NotNumeric(_) => "not_numeric",
            InputError::NonPositive(_) => "non_positive_length",
            InputError::NoDirection => "no_direction",
            InputError::NotDrawing => "not_drawing",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("not drawing")]
    NotDrawing,
    #[error("a boundary needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("boundary failed validation with {} problem(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

impl DraftError {
    pub fn code(&self) -> &'static str {
        match self {
            DraftError::NotDrawing => "not_drawing",
            DraftError::TooFewVertices(_) => "too_few_vertices",
            DraftError::Invalid(_) => "invalid_boundary",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config field '{field}' is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Json(_) => "invalid_json",
            ConfigError::Invalid { .. } => "invalid_config",
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("invalid ring json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("ring has {got} vertices, limit is {max}")]
    TooManyVertices { got: usize, max: usize },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl JsonError {
    pub fn code(&self) -> &'static str {
        match self {
            JsonError::Parse(_) => "invalid_json",
            JsonError::TooManyVertices { .. } => "too_many_vertices",
            JsonError::Invalid(e) => e.code(),
        }
    }
}
