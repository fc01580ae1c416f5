use mapsketch_designer::model::{
    get_path_bounds, Bounds, Path, Point, Radii, ShapeGroup, ShapeId, SweepFlag, Transit, Vector,
};
use mapsketch_designer::tools::{ArcShape, DragShape, EllipseShape};

fn approx(a: Bounds, b: Bounds) -> bool {
    (a.x - b.x).abs() < 1e-9
        && (a.y - b.y).abs() < 1e-9
        && (a.width - b.width).abs() < 1e-9
        && (a.height - b.height).abs() < 1e-9
}

#[test]
fn test_half_circle_bounds_include_arc_extremum() {
    let transits = [Transit::arc(
        Vector::new(20.0, 0.0),
        Vector::new(10.0, 0.0),
        Radii::new(10.0, 10.0),
        SweepFlag::Positive,
    )];
    let bounds = get_path_bounds(Point::new(0.0, 50.0), &transits);
    assert!(approx(bounds, Bounds::new(0.0, 40.0, 20.0, 10.0)));
}

#[test]
fn test_ellipse_fills_drag_rectangle_in_every_direction() {
    let corners = [
        (Point::new(10.0, 10.0), Point::new(50.0, 40.0)),
        (Point::new(50.0, 40.0), Point::new(10.0, 10.0)),
        (Point::new(50.0, 10.0), Point::new(10.0, 40.0)),
        (Point::new(10.0, 40.0), Point::new(50.0, 10.0)),
    ];
    for (anchor, current) in corners {
        let path = EllipseShape::path_from_drag(anchor, current);
        assert!(path.is_closed());
        assert!(approx(path.bounds(), Bounds::new(10.0, 10.0, 40.0, 30.0)));
        assert!(path.contains_point(Point::new(30.0, 25.0), 0.0));
        assert!(!path.contains_point(Point::new(11.0, 11.0), 0.5));
    }
}

#[test]
fn test_arc_bounds_equal_drag_rectangle() {
    let path = ArcShape::path_from_drag(Point::new(0.0, 0.0), Point::new(30.0, -20.0));
    assert!(!path.is_closed());
    assert!(approx(path.bounds(), Bounds::new(0.0, -20.0, 30.0, 20.0)));
}

#[test]
fn test_open_arc_hits_only_near_outline() {
    let path = ArcShape::path_from_drag(Point::new(0.0, 0.0), Point::new(30.0, 30.0));
    let group = ShapeGroup::new(ShapeId(1), "Default", vec![path]);
    assert!(group.contains_point(Point::new(30.0, 30.0), 1.0));
    assert!(!group.contains_point(Point::new(25.0, 5.0), 1.0));
    assert!(group.intersects_rect(&Bounds::new(28.0, 28.0, 5.0, 5.0)));
    assert!(!group.intersects_rect(&Bounds::new(100.0, 100.0, 5.0, 5.0)));
}

#[test]
fn test_rotated_group_bounds_cover_turned_corners() {
    let rect = Path::rectangle(Point::new(0.0, 0.0), Point::new(40.0, 20.0));
    let group = ShapeGroup::new(ShapeId(1), "Default", vec![rect]).rotated_about(Point::new(20.0, 10.0), 90.0);
    assert_eq!(group.rotation, 90.0);
    assert!(approx(group.bounds(), Bounds::new(10.0, -10.0, 20.0, 40.0)));
}
