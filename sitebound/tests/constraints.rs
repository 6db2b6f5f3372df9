use sitebound::algorithms::measure::{interior_angle, measure};
use sitebound::algorithms::propagate::{with_edge_length, with_vertex_angle};
use sitebound::geometry::geodesic::{angle_between_bearings, bearing, destination, distance};
use sitebound::{EditError, LatLng, Ring};

// Convex pentagon, clockwise, edge 2 is 8 m long.
fn pentagon() -> Ring {
    let v0 = LatLng::new(51.5, -0.1);
    let v1 = destination(v0, 12.0, 80.0);
    let v2 = destination(v1, 10.0, 170.0);
    let v3 = destination(v2, 8.0, 240.0);
    let v4 = destination(v3, 9.0, 300.0);
    Ring::new(vec![v0, v1, v2, v3, v4]).unwrap()
}

fn edge(r: &Ring, i: usize) -> (f64, f64) {
    let v = r.vertices();
    let a = v[i];
    let b = v[(i + 1) % v.len()];
    (distance(a, b), bearing(a, b))
}

fn assert_same_edge(before: &Ring, after: &Ring, i: usize) {
    let (l0, b0) = edge(before, i);
    let (l1, b1) = edge(after, i);
    assert!((l0 - l1).abs() < 1e-6, "edge {} length {} -> {}", i, l0, l1);
    assert!(angle_between_bearings(b0, b1) < 1e-5, "edge {} bearing {} -> {}", i, b0, b1);
}

#[test]
fn length_edit_translates_downstream_chain() {
    let r = pentagon();
    assert!((edge(&r, 2).0 - 8.0).abs() < 1e-6);
    let prop = with_edge_length(&r, 2, 15.0).unwrap();
    let out = &prop.ring;
    assert_eq!(prop.moved, vec![3, 4, 0]);
    assert_eq!(prop.closure_edge, 0);

    let (l2, b2) = edge(out, 2);
    assert!((l2 - 15.0).abs() < 1e-6);
    assert!(angle_between_bearings(b2, edge(&r, 2).1) < 1e-5);
    for i in [1, 3, 4] {
        assert_same_edge(&r, out, i);
    }
    // Upstream vertices are untouched.
    assert_eq!(out.vertices()[1], r.vertices()[1]);
    assert_eq!(out.vertices()[2], r.vertices()[2]);

    // 3, 4 and 0 move together: 7 m along the edited edge's bearing.
    for k in [3, 4, 0] {
        let shift = distance(r.vertices()[k], out.vertices()[k]);
        let dir = bearing(r.vertices()[k], out.vertices()[k]);
        assert!((shift - 7.0).abs() < 1e-4, "vertex {} moved {}", k, shift);
        assert!(angle_between_bearings(dir, 240.0) < 1e-3, "vertex {} moved towards {}", k, dir);
    }
}

#[test]
fn length_edit_on_first_edge_closes_on_last() {
    let r = pentagon();
    let prop = with_edge_length(&r, 0, 20.0).unwrap();
    assert_eq!(prop.moved, vec![1, 2, 3, 4]);
    assert_eq!(prop.closure_edge, 4);
    assert_eq!(prop.ring.vertices()[0], r.vertices()[0]);
    for i in 1..4 {
        assert_same_edge(&r, &prop.ring, i);
    }
    assert!((edge(&prop.ring, 0).0 - 20.0).abs() < 1e-6);
}

#[test]
fn length_edit_on_closing_edge_walks_the_ring() {
    let r = pentagon();
    let prop = with_edge_length(&r, 4, 5.0).unwrap();
    assert_eq!(prop.moved, vec![0, 1, 2, 3]);
    assert_eq!(prop.closure_edge, 3);
    assert_eq!(prop.ring.vertices()[4], r.vertices()[4]);
    assert!((edge(&prop.ring, 4).0 - 5.0).abs() < 1e-6);
    for i in 0..3 {
        assert_same_edge(&r, &prop.ring, i);
    }
}

#[test]
fn length_edit_preserves_angles_away_from_closure() {
    let r = pentagon();
    let prop = with_edge_length(&r, 2, 15.0).unwrap();
    // Closure edge 0 touches vertices 0 and 1; everything else keeps its angle.
    for k in [2, 3, 4] {
        let a0 = interior_angle(r.vertices(), k);
        let a1 = interior_angle(prop.ring.vertices(), k);
        assert!((a0 - a1).abs() < 1e-3, "angle {} changed {} -> {}", k, a0, a1);
    }
}

#[test]
fn angle_edit_hits_target_and_rotates_chain() {
    let r = pentagon();
    let before = measure(r.vertices(), 0);
    let current = before.angles[2].angle_degrees;
    let target = current + 12.0;
    let prop = with_vertex_angle(&r, 2, target).unwrap();
    assert_eq!(prop.moved, vec![3, 4, 0]);
    assert_eq!(prop.closure_edge, 0);
    let after = measure(prop.ring.vertices(), 1);
    assert!((after.angles[2].angle_degrees - target).abs() < 1e-6);
    for k in [3, 4] {
        assert!(
            (after.angles[k].angle_degrees - before.angles[k].angle_degrees).abs() < 1e-3,
            "angle {} changed", k
        );
    }
    for i in [1, 2, 3, 4] {
        assert!((after.edges[i].length_meters - before.edges[i].length_meters).abs() < 1e-6);
    }
    assert_eq!(prop.ring.vertices()[1], r.vertices()[1]);
    assert_eq!(prop.ring.vertices()[2], r.vertices()[2]);
}

#[test]
fn angle_edit_can_narrow() {
    let r = pentagon();
    let current = interior_angle(r.vertices(), 3);
    let prop = with_vertex_angle(&r, 3, current - 20.0).unwrap();
    assert!((interior_angle(prop.ring.vertices(), 3) - (current - 20.0)).abs() < 1e-6);
}

#[test]
fn angle_edit_next_to_first_vertex_keeps_it_fixed() {
    let r = pentagon();
    let prop = with_vertex_angle(&r, 1, 80.0).unwrap();
    assert_eq!(prop.moved, vec![2, 3, 4]);
    assert_eq!(prop.closure_edge, 4);
    assert_eq!(prop.ring.vertices()[0], r.vertices()[0]);
    assert!((interior_angle(prop.ring.vertices(), 1) - 80.0).abs() < 1e-6);
}

#[test]
fn angle_edit_on_last_vertex_moves_only_first() {
    let r = pentagon();
    let prop = with_vertex_angle(&r, 4, 95.0).unwrap();
    assert_eq!(prop.moved, vec![0, 1, 2]);
    assert_eq!(prop.closure_edge, 2);
    assert!((interior_angle(prop.ring.vertices(), 4) - 95.0).abs() < 1e-6);
    assert_eq!(prop.ring.vertices()[3], r.vertices()[3]);
}

#[test]
fn rejected_edits_return_errors() {
    let r = pentagon();
    assert_eq!(with_edge_length(&r, 1, 0.0).unwrap_err(), EditError::NonPositiveLength(0.0));
    assert_eq!(with_edge_length(&r, 1, f64::NAN).unwrap_err(), EditError::NonFinite);
    assert_eq!(with_vertex_angle(&r, 0, 90.0).unwrap_err(), EditError::AngleAtFirstVertex);
    assert_eq!(with_vertex_angle(&r, 2, 0.0).unwrap_err(), EditError::AngleOutOfRange(0.0));
    assert_eq!(with_vertex_angle(&r, 2, 200.0).unwrap_err(), EditError::AngleOutOfRange(200.0));
    assert_eq!(
        with_vertex_angle(&r, 5, 90.0).unwrap_err(),
        EditError::IndexOutOfRange { index: 5, len: 5 }
    );
}
