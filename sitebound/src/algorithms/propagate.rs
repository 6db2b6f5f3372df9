//! Length and angle edits on a finished ring.
//!
//! An edit walks the ring in drawing order from the vertex after the edited
//! one and re-places each vertex from its already moved predecessor, reusing
//! the original edge length and bearing (rotated by a common amount for angle
//! edits). The walk stops once vertex 0, the end of the drawing order, has
//! been placed, or earlier if it would reach a vertex the edit holds fixed.
//! When the edited edge is the closing edge the walk starts at vertex 0 and
//! continues around the ring. The edge from the last moved vertex back to the
//! fixed part of the ring (the closure edge) is the only other edge that
//! changes.

use crate::error::EditError;
use crate::geometry::geodesic::{bearing, destination, distance, signed_turn};
use crate::geometry::tolerance::{near_zero, EPS_LEN_M};
use crate::log::debug;
use crate::model::Ring;

use super::measure::interior_angle;

#[derive(Clone, Debug, PartialEq)]
pub struct Propagation {
    pub ring: Ring,
    /// Vertices that were re-placed, in placement order.
    pub moved: Vec<usize>,
    /// Edge joining the last moved vertex to the fixed part of the ring.
    pub closure_edge: usize,
}

/// Parses a length or angle typed into an inspection field.
pub fn parse_field(text: &str) -> Result<f64, EditError> {
    let t = text.trim();
    let v: f64 = t.parse().map_err(|_| EditError::NotNumeric(text.to_string()))?;
    if !v.is_finite() {
        return Err(EditError::NonFinite);
    }
    Ok(v)
}

/// Vertices re-placed by an edit starting at edge `edge`, given the vertices
/// the edit pins in place.
pub fn downstream_chain(n: usize, edge: usize, fixed: &[usize]) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let closing = edge == n - 1;
    let mut chain = Vec::new();
    let mut k = (edge + 1) % n;
    while !fixed.contains(&k) && chain.len() < n {
        chain.push(k);
        if k == 0 && !closing {
            break;
        }
        k = (k + 1) % n;
    }
    chain
}

// Re-places `chain` from `anchor`, the first step at `first_length`, all steps
// with original bearings turned by `rotation` degrees.
fn place_chain(ring: &Ring, anchor: usize, chain: &[usize], first_length: f64, rotation: f64) -> Ring {
    let src = ring.vertices();
    let n = src.len();
    let mut out = ring.clone();
    let mut prev = src[anchor];
    for (step, &k) in chain.iter().enumerate() {
        let j = (k + n - 1) % n;
        let length = if step == 0 { first_length } else { distance(src[j], src[k]) };
        let p = destination(prev, length, bearing(src[j], src[k]) + rotation);
        out.replace_vertex(k, p);
        prev = p;
    }
    out
}

fn check_index(ring: &Ring, index: usize) -> Result<(), EditError> {
    if index >= ring.len() {
        return Err(EditError::IndexOutOfRange { index, len: ring.len() });
    }
    Ok(())
}

/// Sets edge `index` to `length_m`, keeping its start vertex and bearing and
/// translating the downstream chain.
pub fn with_edge_length(ring: &Ring, index: usize, length_m: f64) -> Result<Propagation, EditError> {
    check_index(ring, index)?;
    if !length_m.is_finite() {
        return Err(EditError::NonFinite);
    }
    if length_m <= 0.0 {
        return Err(EditError::NonPositiveLength(length_m));
    }
    let n = ring.len();
    let chain = downstream_chain(n, index, &[index]);
    let new_ring = place_chain(ring, index, &chain, length_m, 0.0);
    let closure_edge = *chain.last().unwrap_or(&index);
    debug!(edge = index, length_m, moved = chain.len(), closure_edge, "edge length propagated");
    Ok(Propagation { ring: new_ring, moved: chain, closure_edge })
}

/// Sets the interior angle at `index` to `angle_deg`, rotating the outgoing
/// edge and the downstream chain rigidly about that vertex.
pub fn with_vertex_angle(ring: &Ring, index: usize, angle_deg: f64) -> Result<Propagation, EditError> {
    check_index(ring, index)?;
    if index == 0 {
        return Err(EditError::AngleAtFirstVertex);
    }
    if !angle_deg.is_finite() {
        return Err(EditError::NonFinite);
    }
    if angle_deg <= 0.0 || angle_deg >= 180.0 {
        return Err(EditError::AngleOutOfRange(angle_deg));
    }
    let v = ring.vertices();
    let n = v.len();
    let next = ring.next_index(index);
    let prev = ring.prev_index(index);
    // A zero-length arm has no direction to turn.
    if near_zero(distance(v[prev], v[index]), EPS_LEN_M) {
        return Err(EditError::DegenerateEdge { index: prev });
    }
    if near_zero(distance(v[index], v[next]), EPS_LEN_M) {
        return Err(EditError::DegenerateEdge { index });
    }
    let current = interior_angle(v, index);
    let delta = angle_deg - current;
    // Which way the incoming edge lies from the outgoing one decides whether
    // widening the angle means turning the outgoing edge left or right.
    let side = signed_turn(bearing(v[index], v[next]), bearing(v[index], v[prev]));
    let rotation = if side >= 0.0 { -delta } else { delta };
    let chain = downstream_chain(n, index, &[prev, index]);
    let new_ring = place_chain(ring, index, &chain, distance(v[index], v[next]), rotation);
    let closure_edge = *chain.last().unwrap_or(&index);
    debug!(vertex = index, angle_deg, delta, moved = chain.len(), closure_edge, "vertex angle propagated");
    Ok(Propagation { ring: new_ring, moved: chain, closure_edge })
}
