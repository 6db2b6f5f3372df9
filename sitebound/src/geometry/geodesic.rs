//! Spherical-earth distance, bearing and forward solutions.
//!
//! Everything here uses the mean-radius sphere from `tolerance::EARTH_RADIUS_M`.
//! Site-scale shapes are the target; no ellipsoid corrections are applied.

use super::tolerance::EARTH_RADIUS_M;
use crate::model::LatLng;

/// Great-circle distance in meters (haversine).
pub fn distance(a: LatLng, b: LatLng) -> f64 {
    if a == b {
        return 0.0;
    }
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();
    let s1 = (dphi * 0.5).sin();
    let s2 = (dlambda * 0.5).sin();
    let h = s1 * s1 + phi1.cos() * phi2.cos() * s2 * s2;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial bearing from `a` towards `b`, degrees clockwise from north in [0, 360).
/// Coincident points have bearing 0.
pub fn bearing(a: LatLng, b: LatLng) -> f64 {
    if a == b {
        return 0.0;
    }
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dlambda = (b.lng - a.lng).to_radians();
    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}

/// Point reached by travelling `distance_m` from `origin` along the great
/// circle with initial bearing `bearing_deg`.
pub fn destination(origin: LatLng, distance_m: f64, bearing_deg: f64) -> LatLng {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lng.to_radians();
    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * sin_phi2;
    let lambda2 = lambda1 + y.atan2(x);
    LatLng {
        lat: phi2.to_degrees(),
        lng: normalize_longitude(lambda2.to_degrees()),
    }
}

/// Wrap any bearing into [0, 360).
#[inline]
pub fn normalize_bearing(b: f64) -> f64 {
    let r = b.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

#[inline]
pub fn normalize_longitude(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Smallest turn between two bearings, in [0, 180].
pub fn angle_between_bearings(b1: f64, b2: f64) -> f64 {
    let d = (normalize_bearing(b1) - normalize_bearing(b2)).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Signed turn from `from` to `to` in (-180, 180]; positive is clockwise.
pub fn signed_turn(from: f64, to: f64) -> f64 {
    let d = normalize_bearing(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Nearest of 0, 90, 180 and 270 degrees.
pub fn nearest_right_angle(b: f64) -> f64 {
    normalize_bearing((normalize_bearing(b) / 90.0).round() * 90.0)
}

/// Re-aim `p` from `origin` along the nearest right-angle bearing, keeping its distance.
pub fn snap_to_right_angle(origin: LatLng, p: LatLng) -> LatLng {
    let d = distance(origin, p);
    if d == 0.0 {
        return origin;
    }
    destination(origin, d, nearest_right_angle(bearing(origin, p)))
}
