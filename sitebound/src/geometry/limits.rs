// Centralized input limits for pointer, keyboard and imported geometry

// Coordinate bounds (degrees)
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LNG_MIN: f64 = -180.0;
pub const LNG_MAX: f64 = 180.0;

// Validation defaults for site-scale boundaries (m^2)
pub const MIN_AREA_SQ_M: f64 = 10.0;
pub const MAX_AREA_SQ_M: f64 = 100_000.0;

// Ingestion caps
pub const MAX_VERTICES: usize = 10_000;
pub const MAX_INPUT_CHARS: usize = 16; // precision buffer text

#[inline]
pub fn in_lat_bounds(lat: f64) -> bool { lat.is_finite() && (LAT_MIN..=LAT_MAX).contains(&lat) }

#[inline]
pub fn in_lng_bounds(lng: f64) -> bool { lng.is_finite() && (LNG_MIN..=LNG_MAX).contains(&lng) }

#[inline]
pub fn in_coord_bounds(p: crate::model::LatLng) -> bool { in_lat_bounds(p.lat) && in_lng_bounds(p.lng) }
