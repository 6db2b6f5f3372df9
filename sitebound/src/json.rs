use crate::error::{JsonError, ValidationError};
use crate::geometry::limits::{in_coord_bounds, MAX_VERTICES};
use crate::model::{BoundaryDescriptor, LatLng, Ring};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum RingDoc {
    Bare(Vec<LatLng>),
    Wrapped { vertices: Vec<LatLng> },
}

/// Reads a ring from `[{lat,lng},...]` or `{"vertices":[...]}`, as produced by
/// boundary detection or a saved descriptor. A repeated closing vertex is
/// dropped so the result is always in open form.
pub fn ring_from_json_value(v: Value) -> Result<Ring, JsonError> {
    let doc: RingDoc = serde_json::from_value(v)?;
    let mut vertices = match doc {
        RingDoc::Bare(vs) => vs,
        RingDoc::Wrapped { vertices } => vertices,
    };
    if vertices.len() > MAX_VERTICES {
        return Err(JsonError::TooManyVertices { got: vertices.len(), max: MAX_VERTICES });
    }
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    for (index, p) in vertices.iter().enumerate() {
        if !in_coord_bounds(*p) {
            return Err(ValidationError::CoordinateOutOfRange { index, lat: p.lat, lng: p.lng }.into());
        }
    }
    Ok(Ring::new(vertices)?)
}

pub fn ring_from_json(text: &str) -> Result<Ring, JsonError> {
    ring_from_json_value(serde_json::from_str(text)?)
}

pub fn descriptor_to_json_value(d: &BoundaryDescriptor) -> Value {
    serde_json::to_value(d).unwrap_or(Value::Null)
}

pub fn descriptor_to_json(d: &BoundaryDescriptor) -> Result<String, JsonError> {
    Ok(serde_json::to_string(d)?)
}
