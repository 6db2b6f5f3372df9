use crate::geometry::geodesic::{angle_between_bearings, bearing, distance};
use crate::geometry::polygon::planar_area;
use crate::model::{Edge, InteriorAngle, LatLng, Measurements};

pub fn edge_between(vertices: &[LatLng], from_index: usize, to_index: usize) -> Edge {
    let a = vertices[from_index];
    let b = vertices[to_index];
    Edge { from_index, to_index, length_meters: distance(a, b), bearing_degrees: bearing(a, b) }
}

/// Angle at `index` between the edge back to the previous vertex and the edge
/// out to the next one, in [0, 180]. Needs at least 3 vertices.
pub fn interior_angle(vertices: &[LatLng], index: usize) -> f64 {
    let n = vertices.len();
    let p = vertices[index];
    let back = bearing(p, vertices[(index + n - 1) % n]);
    let out = bearing(p, vertices[(index + 1) % n]);
    angle_between_bearings(back, out)
}

/// Derives edges, angles, perimeter and area from scratch.
///
/// Three or more vertices are measured as a closed ring. Two vertices give a
/// single edge and no area; fewer give nothing.
pub fn measure(vertices: &[LatLng], version: u64) -> Measurements {
    let n = vertices.len();
    let edges: Vec<Edge> = match n {
        0 | 1 => Vec::new(),
        2 => vec![edge_between(vertices, 0, 1)],
        _ => (0..n).map(|i| edge_between(vertices, i, (i + 1) % n)).collect(),
    };
    let angles = if n >= 3 {
        (0..n)
            .map(|i| InteriorAngle { vertex_index: i, angle_degrees: interior_angle(vertices, i) })
            .collect()
    } else {
        Vec::new()
    };
    let perimeter_meters = edges.iter().map(|e| e.length_meters).sum();
    Measurements { edges, angles, perimeter_meters, area_sq_meters: planar_area(vertices), version }
}
