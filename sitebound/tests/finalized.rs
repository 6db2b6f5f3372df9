use sitebound::geometry::geodesic::destination;
use sitebound::{BoundaryEditor, DraftMode, EditError, EditorConfig, EditorEvent, LatLng, Ring};

fn square_at(o: LatLng, side: f64) -> Vec<LatLng> {
    let b = destination(o, side, 90.0);
    let c = destination(b, side, 0.0);
    let d = destination(o, side, 0.0);
    vec![o, b, c, d]
}

fn finalized_square(side: f64) -> BoundaryEditor {
    let mut ed = BoundaryEditor::default();
    for p in square_at(LatLng::new(0.0, 0.0), side) {
        assert!(ed.pointer_down(p));
    }
    ed.finish(0.0).unwrap();
    ed.take_events();
    ed
}

#[test]
fn equator_square_descriptor() {
    let ed = finalized_square(10.0);
    let d = ed.descriptor(42.0).unwrap();
    assert!((d.perimeter_meters - 40.0).abs() < 1e-3);
    assert!((d.area_sq_meters - 100.0).abs() < 0.01);
    for a in &d.angles {
        assert!((a.angle_degrees - 90.0).abs() < 1e-3);
    }
    assert!((d.approx_width_meters - 10.0).abs() < 1e-3);
    assert!((d.approx_length_meters - 10.0).abs() < 1e-3);
    assert_eq!(d.timestamp, 42.0);
}

#[test]
fn drag_moves_only_the_grabbed_vertex() {
    let mut ed = finalized_square(30.0);
    let before = ed.boundary().unwrap().ring().clone();
    let before_edges = ed.boundary().unwrap().measurements().edges.clone();
    // Grab vertex 2 from a metre away, then drag it outwards.
    let grab = destination(before.vertices()[2], 1.0, 45.0);
    assert!(ed.pointer_down(grab));
    assert_eq!(ed.preview_state().dragging, Some(2));
    let target = destination(before.vertices()[2], 5.0, 45.0);
    assert!(ed.pointer_move(target, 10.0));
    assert!(ed.pointer_up(20.0));

    let after = ed.boundary().unwrap();
    assert_eq!(after.ring().vertices()[2], target);
    for k in [0, 1, 3] {
        assert_eq!(after.ring().vertices()[k], before.vertices()[k]);
    }
    let edges = &after.measurements().edges;
    assert_eq!(edges[0], before_edges[0]);
    assert_eq!(edges[3], before_edges[3]);
    assert_ne!(edges[1], before_edges[1]);
    assert_ne!(edges[2], before_edges[2]);
    assert!(after.measurements().area_sq_meters > 900.0);
    assert!(matches!(ed.take_events().as_slice(), [EditorEvent::BoundaryEdited { .. }]));
}

#[test]
fn pointer_down_away_from_vertices_does_nothing() {
    let mut ed = finalized_square(30.0);
    let middle = destination(LatLng::new(0.0, 0.0), 21.0, 45.0);
    assert!(!ed.pointer_down(middle));
    assert!(!ed.pointer_up(0.0));
    assert_eq!(ed.boundary().unwrap().ring().len(), 4);
    assert!(ed.take_events().is_empty());
}

#[test]
fn field_edits_emit_descriptors() {
    let mut ed = finalized_square(20.0);
    let d = ed.set_edge_length_text(1, "35", 7.0).unwrap();
    assert!((d.edges[1].length_meters - 35.0).abs() < 1e-6);
    let d = ed.set_vertex_angle(2, 100.0, 8.0).unwrap();
    assert!((d.angles[2].angle_degrees - 100.0).abs() < 1e-6);
    let events = ed.take_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| matches!(e, EditorEvent::BoundaryEdited { .. })));
}

#[test]
fn rejected_field_edits_change_nothing() {
    let mut ed = finalized_square(20.0);
    let ver = ed.boundary().unwrap().geom_version();
    assert_eq!(ed.set_edge_length_text(1, "ten", 0.0), Err(EditError::NotNumeric("ten".into())));
    assert_eq!(ed.set_edge_length_text(1, "-4", 0.0), Err(EditError::NonPositiveLength(-4.0)));
    assert_eq!(ed.set_vertex_angle_text(0, "90", 0.0), Err(EditError::AngleAtFirstVertex));
    assert_eq!(ed.set_vertex_angle_text(2, "180", 0.0), Err(EditError::AngleOutOfRange(180.0)));
    assert_eq!(ed.boundary().unwrap().geom_version(), ver);
    assert!(ed.take_events().is_empty());
}

#[test]
fn clear_returns_to_idle() {
    let mut ed = finalized_square(20.0);
    ed.clear();
    assert_eq!(ed.mode(), DraftMode::Idle);
    assert!(ed.boundary().is_none());
    assert_eq!(ed.descriptor(0.0), None);
    assert_eq!(ed.take_events(), vec![EditorEvent::BoundaryCleared]);
    // Drawing works again after a clear.
    assert!(ed.pointer_down(LatLng::new(1.0, 1.0)));
    assert_eq!(ed.mode(), DraftMode::Drawing);
}

#[test]
fn validation_gate_blocks_tiny_boundaries() {
    let cfg = EditorConfig { require_valid_boundary: true, ..EditorConfig::default() };
    let mut ed = BoundaryEditor::new(cfg);
    for p in square_at(LatLng::new(0.0, 0.0), 2.0) {
        ed.pointer_down(p);
    }
    let err = ed.finish(0.0).unwrap_err();
    assert_eq!(err.code(), "invalid_boundary");
    assert_eq!(ed.mode(), DraftMode::Drawing);
    assert_eq!(ed.validate()[0].code(), "area_out_of_range");
}

#[test]
fn detection_result_installs_boundary() {
    let mut ed = BoundaryEditor::default();
    let ticket = ed.begin_detection().unwrap();
    assert_eq!(ed.begin_detection(), None);
    let ring = Ring::new(square_at(LatLng::new(10.0, 10.0), 25.0)).unwrap();
    assert!(ed.resolve_detection(ticket, Some(ring), 3.0));
    assert_eq!(ed.mode(), DraftMode::Finalized);
    assert!(matches!(ed.take_events().as_slice(), [EditorEvent::BoundaryFinalized { .. }]));
    // Only once per session.
    assert!(!ed.resolve_detection(ticket, None, 4.0));
}

#[test]
fn manual_drawing_beats_late_detection() {
    let mut ed = BoundaryEditor::default();
    let ticket = ed.begin_detection().unwrap();
    ed.pointer_down(LatLng::new(0.0, 0.0));
    let ring = Ring::new(square_at(LatLng::new(10.0, 10.0), 25.0)).unwrap();
    assert!(!ed.resolve_detection(ticket, Some(ring), 1.0));
    assert_eq!(ed.mode(), DraftMode::Drawing);
    assert_eq!(ed.session().vertices().len(), 1);
    assert!(ed.take_events().is_empty());
}

#[test]
fn clear_invalidates_pending_detection() {
    let mut ed = BoundaryEditor::default();
    let old = ed.begin_detection().unwrap();
    ed.clear();
    let ring = Ring::new(square_at(LatLng::new(10.0, 10.0), 25.0)).unwrap();
    assert!(!ed.resolve_detection(old, Some(ring.clone()), 1.0));
    let fresh = ed.begin_detection().unwrap();
    assert_ne!(fresh, old);
    assert!(ed.resolve_detection(fresh, Some(ring), 2.0));
}

#[test]
fn hit_test_reports_vertices_then_edges() {
    use sitebound::algorithms::picking::Pick;
    let ed = finalized_square(30.0);
    let v = ed.boundary().unwrap().ring().vertices().to_vec();
    assert!(matches!(ed.hit_test(destination(v[1], 1.0, 0.0)), Some(Pick::Vertex { index: 1, .. })));
    match ed.hit_test(destination(v[0], 15.0, 90.0)) {
        Some(Pick::Edge { index, t, .. }) => {
            assert_eq!(index, 0);
            assert!((t - 0.5).abs() < 1e-3);
        }
        other => panic!("expected edge hit, got {:?}", other),
    }
    assert_eq!(ed.hit_test(destination(v[0], 15.0, 45.0)), None);
    assert_eq!(BoundaryEditor::default().hit_test(v[0]), None);
}

#[test]
fn drawing_then_undoing_still_rules_out_detection() {
    let mut ed = BoundaryEditor::default();
    assert!(ed.pointer_down(LatLng::new(0.0, 0.0)));
    assert!(ed.key_down(sitebound::Key::Escape, 0.0));
    assert_eq!(ed.mode(), DraftMode::Idle);
    assert_eq!(ed.begin_detection(), None);
    // A clear starts a fresh session.
    ed.clear();
    assert!(ed.begin_detection().is_some());
}
