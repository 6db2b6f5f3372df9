use crate::geometry::geodesic::{bearing, distance};
use crate::model::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "vertex")]
    Vertex { index: usize, dist: f64 },
    #[serde(rename = "edge")]
    Edge { index: usize, t: f64, dist: f64 },
}

/// Closest vertex within `tol_m` meters of `p`.
pub fn pick_vertex(vertices: &[LatLng], p: LatLng, tol_m: f64) -> Option<Pick> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in vertices.iter().enumerate() {
        let d = distance(*v, p);
        if d <= tol_m && best.map_or(true, |(_, bd)| d < bd) { best = Some((i, d)); }
    }
    best.map(|(index, dist)| Pick::Vertex { index, dist })
}

// Cross-track distance and clamped along-track fraction on a short segment,
// flat-earth around `a`.
fn seg_distance(p: LatLng, a: LatLng, b: LatLng) -> (f64, f64) {
    let len = distance(a, b);
    if len == 0.0 { return (distance(a, p), 0.0); }
    let dp = distance(a, p);
    let theta = (bearing(a, p) - bearing(a, b)).to_radians();
    let along = dp * theta.cos();
    let t = (along / len).clamp(0.0, 1.0);
    let ax = along.clamp(0.0, len);
    let dx = dp * theta.cos() - ax;
    let dy = dp * theta.sin();
    ((dx * dx + dy * dy).sqrt(), t)
}

/// Vertices first, then edges of the closed ring, like a map-widget hit test.
pub fn pick(vertices: &[LatLng], p: LatLng, tol_m: f64) -> Option<Pick> {
    if let Some(hit) = pick_vertex(vertices, p, tol_m) { return Some(hit); }
    let n = vertices.len();
    if n < 2 { return None; }
    let edge_count = if n == 2 { 1 } else { n };
    let mut best: Option<(usize, f64, f64)> = None;
    for i in 0..edge_count {
        let (d, t) = seg_distance(p, vertices[i], vertices[(i + 1) % n]);
        if d <= tol_m && best.map_or(true, |(_, bd, _)| d < bd) { best = Some((i, d, t)); }
    }
    best.map(|(index, dist, t)| Pick::Edge { index, t, dist })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geodesic::destination;

    #[test]
    fn test_pick_prefers_vertices() {
        let a = LatLng::new(0.0, 0.0);
        let b = destination(a, 20.0, 90.0);
        let c = destination(b, 20.0, 0.0);
        let ring = [a, b, c];
        let near_b = destination(b, 1.0, 200.0);
        assert!(matches!(pick(&ring, near_b, 3.0), Some(Pick::Vertex { index: 1, .. })));
        let mid_ab = destination(destination(a, 10.0, 90.0), 1.0, 180.0);
        match pick(&ring, mid_ab, 3.0) {
            Some(Pick::Edge { index, t, dist }) => {
                assert_eq!(index, 0);
                assert!((t - 0.5).abs() < 0.01);
                assert!((dist - 1.0).abs() < 0.01);
            }
            other => panic!("unexpected pick {:?}", other),
        }
        assert_eq!(pick(&ring, destination(a, 100.0, 180.0), 3.0), None);
    }
}
