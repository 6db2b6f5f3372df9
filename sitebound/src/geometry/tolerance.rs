// Centralized tolerances for spherical geometry

pub const EARTH_RADIUS_M: f64 = 6_371_000.0; // mean radius, the only earth model in this crate

pub const EPS_COORD: f64 = 1e-12;         // degree coincidence threshold
pub const EPS_LEN_M: f64 = 1e-9;          // zero-length edge threshold (m)
pub const EPS_ANGLE_DEG: f64 = 1e-9;      // bearing compare slack (degrees)

// Test/invariant slack for site-scale shapes
pub const EPS_CONSTRAINT_M: f64 = 1e-3;
pub const EPS_CONSTRAINT_DEG: f64 = 1e-2;

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }
#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }
#[inline] pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 { x.max(lo).min(hi) }

#[inline]
pub fn same_point(a: crate::model::LatLng, b: crate::model::LatLng) -> bool {
    approx_eq(a.lat, b.lat, EPS_COORD) && approx_eq(a.lng, b.lng, EPS_COORD)
}
