use super::geodesic::distance;
use super::limits::{in_coord_bounds, MAX_AREA_SQ_M, MIN_AREA_SQ_M};
use super::tolerance::{same_point, EARTH_RADIUS_M};
use crate::error::ValidationError;
use crate::model::{BoundingBox, LatLng};

/// Area accepted by `validate`, in square meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for AreaBounds {
    fn default() -> Self {
        AreaBounds { min: MIN_AREA_SQ_M, max: MAX_AREA_SQ_M }
    }
}

/// Coordinate mean of the vertices. Not the area centroid; it is only used as
/// a projection reference and a label anchor.
pub fn centroid(vertices: &[LatLng]) -> LatLng {
    if vertices.is_empty() {
        return LatLng::new(0.0, 0.0);
    }
    let n = vertices.len() as f64;
    let (slat, slng) = vertices
        .iter()
        .fold((0.0, 0.0), |(a, b), p| (a + p.lat, b + p.lng));
    LatLng::new(slat / n, slng / n)
}

/// Shoelace area on an equirectangular tangent plane centred on the coordinate
/// mean. Fine for site-scale rings; drifts for large or high-latitude ones.
pub fn planar_area(vertices: &[LatLng]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let origin = centroid(vertices);
    let kx = origin.lat.to_radians().cos() * EARTH_RADIUS_M;
    let project = |p: &LatLng| {
        (
            (p.lng - origin.lng).to_radians() * kx,
            (p.lat - origin.lat).to_radians() * EARTH_RADIUS_M,
        )
    };
    let mut acc = 0.0;
    for i in 0..n {
        let (x1, y1) = project(&vertices[i]);
        let (x2, y2) = project(&vertices[(i + 1) % n]);
        acc += x1 * y2 - x2 * y1;
    }
    (acc * 0.5).abs()
}

/// Sum of edge lengths around the closed ring, closing edge included.
pub fn perimeter(vertices: &[LatLng]) -> f64 {
    let n = vertices.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| distance(vertices[i], vertices[(i + 1) % n])).sum()
}

pub fn bounding_box(vertices: &[LatLng]) -> BoundingBox {
    let mut bb = BoundingBox {
        north: f64::NEG_INFINITY,
        south: f64::INFINITY,
        east: f64::NEG_INFINITY,
        west: f64::INFINITY,
    };
    for p in vertices {
        bb.north = bb.north.max(p.lat);
        bb.south = bb.south.min(p.lat);
        bb.east = bb.east.max(p.lng);
        bb.west = bb.west.min(p.lng);
    }
    if vertices.is_empty() {
        return BoundingBox { north: 0.0, south: 0.0, east: 0.0, west: 0.0 };
    }
    bb
}

/// East-west and north-south extents of the bounding box in meters,
/// measured through its middle.
pub fn extents(bb: &BoundingBox) -> (f64, f64) {
    let mid_lat = 0.5 * (bb.north + bb.south);
    let mid_lng = 0.5 * (bb.east + bb.west);
    let width = distance(LatLng::new(mid_lat, bb.west), LatLng::new(mid_lat, bb.east));
    let length = distance(LatLng::new(bb.south, mid_lng), LatLng::new(bb.north, mid_lng));
    (width, length)
}

/// Every problem with the ring; empty means valid. Nothing is corrected.
pub fn validate(vertices: &[LatLng], bounds: AreaBounds) -> Vec<ValidationError> {
    let n = vertices.len();
    if n < 3 {
        return vec![ValidationError::TooFewVertices(n)];
    }
    let mut errors = Vec::new();
    for (index, p) in vertices.iter().enumerate() {
        if !in_coord_bounds(*p) {
            errors.push(ValidationError::CoordinateOutOfRange { index, lat: p.lat, lng: p.lng });
        }
    }
    for index in 0..n {
        if same_point(vertices[(index + n - 1) % n], vertices[index]) {
            errors.push(ValidationError::DuplicateVertex { index });
        }
    }
    if errors.is_empty() {
        let area = planar_area(vertices);
        if !(bounds.min..=bounds.max).contains(&area) {
            errors.push(ValidationError::AreaOutOfRange { area, min: bounds.min, max: bounds.max });
        }
    }
    errors
}
