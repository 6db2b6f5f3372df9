use crate::error::ValidationError;
use crate::geometry::tolerance::same_point;
use serde::{Deserialize, Serialize};

/// A point on the sphere in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from_index: usize,
    pub to_index: usize,
    pub length_meters: f64,
    pub bearing_degrees: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteriorAngle {
    pub vertex_index: usize,
    pub angle_degrees: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Closed polygon in open representation: edge `i` runs from `vertices[i]`
/// to `vertices[(i + 1) % n]`, the first vertex is never repeated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ring {
    vertices: Vec<LatLng>,
}

// Number of distinct positions, counting no further than `cap`.
fn distinct_count(vertices: &[LatLng], cap: usize) -> usize {
    let mut seen: Vec<LatLng> = Vec::with_capacity(cap);
    for v in vertices {
        if !seen.iter().any(|s| same_point(*s, *v)) {
            seen.push(*v);
            if seen.len() == cap {
                break;
            }
        }
    }
    seen.len()
}

impl Ring {
    /// Needs at least 3 distinct positions; repeats beyond that are kept.
    pub fn new(vertices: Vec<LatLng>) -> Result<Ring, ValidationError> {
        let distinct = distinct_count(&vertices, 3);
        if distinct < 3 {
            return Err(ValidationError::TooFewVertices(distinct));
        }
        Ok(Ring { vertices })
    }

    pub fn vertices(&self) -> &[LatLng] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<LatLng> {
        self.vertices.get(index).copied()
    }

    /// Index of the vertex after `index`, wrapping at the end.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.vertices.len()
    }

    #[inline]
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.vertices.len() - 1) % self.vertices.len()
    }

    pub fn into_vertices(self) -> Vec<LatLng> {
        self.vertices
    }

    // Callers guarantee the vertex count is unchanged.
    pub(crate) fn replace_vertex(&mut self, index: usize, p: LatLng) {
        self.vertices[index] = p;
    }
}

/// Everything derived from a vertex sequence, stamped with the geometry
/// version it was computed from.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub edges: Vec<Edge>,
    pub angles: Vec<InteriorAngle>,
    pub perimeter_meters: f64,
    pub area_sq_meters: f64,
    pub version: u64,
}

/// Canonical export handed to downstream consumers once a boundary exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryDescriptor {
    pub vertices: Vec<LatLng>,
    pub edges: Vec<Edge>,
    pub angles: Vec<InteriorAngle>,
    pub area_sq_meters: f64,
    pub perimeter_meters: f64,
    pub centroid: LatLng,
    pub bounding_box: BoundingBox,
    pub approx_width_meters: f64,
    pub approx_length_meters: f64,
    /// Milliseconds since the Unix epoch, supplied by the host.
    pub timestamp: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftMode {
    Idle,
    Drawing,
    Finalized,
}
