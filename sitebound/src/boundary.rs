//! A finished ring open for editing.
//!
//! Field edits go through constraint propagation; control-point drags move a
//! single vertex and nothing else. Either way the ring is replaced whole and
//! re-measured before the call returns.

use crate::algorithms::measure::measure;
use crate::algorithms::propagate::{with_edge_length, with_vertex_angle, Propagation};
use crate::error::{EditError, ValidationError};
use crate::geometry::limits::in_coord_bounds;
use crate::geometry::polygon::{bounding_box, centroid, extents, validate, AreaBounds};
use crate::log::{debug, warn};
use crate::model::{BoundaryDescriptor, LatLng, Measurements, Ring};

#[derive(Clone, Debug)]
pub struct EditableBoundary {
    ring: Ring,
    geom_ver: u64,
    measurements: Measurements,
}

impl EditableBoundary {
    /// Promotes draft vertices to an editable ring; needs at least 3.
    pub fn finalize(vertices: Vec<LatLng>) -> Result<EditableBoundary, ValidationError> {
        Ok(EditableBoundary::from_ring(Ring::new(vertices)?))
    }

    pub fn from_ring(ring: Ring) -> EditableBoundary {
        let measurements = measure(ring.vertices(), 1);
        EditableBoundary { ring, geom_ver: 1, measurements }
    }

    pub fn ring(&self) -> &Ring { &self.ring }
    pub fn measurements(&self) -> &Measurements { &self.measurements }
    pub fn geom_version(&self) -> u64 { self.geom_ver }

    /// One draggable handle per vertex, in ring order.
    pub fn control_points(&self) -> &[LatLng] {
        self.ring.vertices()
    }

    fn replace(&mut self, ring: Ring) {
        self.ring = ring;
        self.geom_ver = self.geom_ver.wrapping_add(1);
        self.measurements = measure(self.ring.vertices(), self.geom_ver);
    }

    /// Moves control point `index` to `p`. No propagation: every other vertex
    /// keeps its exact position.
    pub fn drag_control_point(&mut self, index: usize, p: LatLng) -> Result<(), EditError> {
        if index >= self.ring.len() {
            return Err(EditError::IndexOutOfRange { index, len: self.ring.len() });
        }
        if !p.lat.is_finite() || !p.lng.is_finite() {
            return Err(EditError::NonFinite);
        }
        if !in_coord_bounds(p) {
            return Err(EditError::CoordinateOutOfRange { lat: p.lat, lng: p.lng });
        }
        let mut ring = self.ring.clone();
        ring.replace_vertex(index, p);
        self.replace(ring);
        Ok(())
    }

    fn apply(&mut self, result: Result<Propagation, EditError>, what: &str, index: usize) -> Result<Propagation, EditError> {
        match result {
            Ok(prop) => {
                self.replace(prop.ring.clone());
                debug!(what, index, closure_edge = prop.closure_edge, "boundary edited");
                Ok(prop)
            }
            Err(e) => {
                warn!(what, index, error = %e, "edit rejected, boundary unchanged");
                Err(e)
            }
        }
    }

    pub fn set_edge_length(&mut self, index: usize, length_m: f64) -> Result<Propagation, EditError> {
        let result = with_edge_length(&self.ring, index, length_m);
        self.apply(result, "edge_length", index)
    }

    pub fn set_vertex_angle(&mut self, index: usize, angle_deg: f64) -> Result<Propagation, EditError> {
        let result = with_vertex_angle(&self.ring, index, angle_deg);
        self.apply(result, "vertex_angle", index)
    }

    pub fn validate(&self, bounds: AreaBounds) -> Vec<ValidationError> {
        validate(self.ring.vertices(), bounds)
    }

    /// Canonical export. `timestamp` is milliseconds since the Unix epoch.
    pub fn descriptor(&self, timestamp: f64) -> BoundaryDescriptor {
        let vertices = self.ring.vertices();
        let bb = bounding_box(vertices);
        let (approx_width_meters, approx_length_meters) = extents(&bb);
        BoundaryDescriptor {
            vertices: vertices.to_vec(),
            edges: self.measurements.edges.clone(),
            angles: self.measurements.angles.clone(),
            area_sq_meters: self.measurements.area_sq_meters,
            perimeter_meters: self.measurements.perimeter_meters,
            centroid: centroid(vertices),
            bounding_box: bb,
            approx_width_meters,
            approx_length_meters,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geodesic::destination;

    fn rect(w: f64, h: f64) -> EditableBoundary {
        let a = LatLng::new(52.0, 13.0);
        let b = destination(a, w, 90.0);
        let c = destination(b, h, 0.0);
        let d = destination(a, h, 0.0);
        EditableBoundary::finalize(vec![a, b, c, d]).unwrap()
    }

    #[test]
    fn test_finalize_needs_three() {
        let err = EditableBoundary::finalize(vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)]).unwrap_err();
        assert_eq!(err, ValidationError::TooFewVertices(2));
    }

    #[test]
    fn test_rejected_edit_leaves_version() {
        let mut b = rect(20.0, 10.0);
        let ver = b.geom_version();
        let before = b.ring().clone();
        assert_eq!(b.set_edge_length(1, -3.0).unwrap_err(), EditError::NonPositiveLength(-3.0));
        assert_eq!(b.set_vertex_angle(0, 90.0).unwrap_err(), EditError::AngleAtFirstVertex);
        assert_eq!(b.set_vertex_angle(2, 180.0).unwrap_err(), EditError::AngleOutOfRange(180.0));
        assert!(matches!(b.set_edge_length(9, 3.0), Err(EditError::IndexOutOfRange { index: 9, len: 4 })));
        assert!(matches!(b.drag_control_point(1, LatLng::new(0.0, 200.0)), Err(EditError::CoordinateOutOfRange { .. })));
        assert_eq!(b.geom_version(), ver);
        assert_eq!(b.ring(), &before);
    }

    #[test]
    fn test_descriptor_fields() {
        let b = rect(20.0, 10.0);
        let d = b.descriptor(1_700_000_000_000.0);
        assert_eq!(d.vertices.len(), 4);
        assert_eq!(d.edges.len(), 4);
        assert_eq!(d.angles.len(), 4);
        assert!((d.area_sq_meters - 200.0).abs() < 0.1);
        assert!((d.perimeter_meters - 60.0).abs() < 0.01);
        assert!((d.approx_width_meters - 20.0).abs() < 0.01);
        assert!((d.approx_length_meters - 10.0).abs() < 0.01);
        assert!(d.bounding_box.north > d.bounding_box.south);
        assert!(d.bounding_box.east > d.bounding_box.west);
        assert_eq!(d.timestamp, 1_700_000_000_000.0);
    }
}
