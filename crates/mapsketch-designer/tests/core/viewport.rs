use mapsketch_designer::model::{Bounds, Point, Vector};
use mapsketch_designer::viewport::{canvas_to_map, map_to_canvas, Viewport};
use proptest::prelude::*;

#[test]
fn test_visible_bounds_follow_zoom_and_pan() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.0).unwrap();
    vp.set_pan(Vector::new(-100.0, -50.0));
    assert_eq!(vp.canvas_to_map(Point::ZERO), Point::new(100.0, 50.0));
    assert_eq!(vp.visible_map_bounds(), Bounds::new(100.0, 50.0, 300.0, 250.0));
    assert_eq!(vp.canvas_length_to_map(10.0), 5.0);
}

#[test]
fn test_rejects_non_positive_zoom() {
    let mut vp = Viewport::default();
    assert!(vp.set_zoom(0.0).is_err());
    assert!(vp.set_zoom(f64::NAN).is_err());
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_display() {
    let vp = Viewport::default();
    assert_eq!(vp.to_string(), "Viewport(zoom: 1.00, pan: (0.00, 0.00), size: 800x600)");
}

proptest! {
    #[test]
    fn map_canvas_round_trip(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        zoom in 0.25f64..4.0,
        px in -1000.0f64..1000.0,
        py in -1000.0f64..1000.0,
    ) {
        let pan = Vector::new(px, py);
        let p = Point::new(x, y);
        let back = canvas_to_map(map_to_canvas(p, zoom, pan), zoom, pan);
        prop_assert!((back.x - x).abs() < 1e-6);
        prop_assert!((back.y - y).abs() < 1e-6);
    }
}
