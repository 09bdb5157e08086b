use reveda_editor::geometry::{point_in_polygon, rotate_about, Point, Rect, Segment};

#[test]
fn test_rect_from_corners_normalises() {
    let r = Rect::from_corners(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
    assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
    assert_eq!(r.center(), Point::new(30.0, 50.0));
}

#[test]
fn test_rect_containment_and_intersection() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
    let straddling = Rect::new(90.0, 90.0, 20.0, 20.0);
    assert!(outer.contains_rect(&inner));
    assert!(!outer.contains_rect(&straddling));
    assert!(outer.intersects(&straddling));
    assert!(!inner.intersects(&straddling));
}

#[test]
fn test_quarter_turns_are_exact() {
    let pivot = Point::new(3.0, 7.0);
    let mut p = Point::new(17.0, -4.0);
    for _ in 0..4 {
        p = rotate_about(p, pivot, 90);
    }
    assert_eq!(p, Point::new(17.0, -4.0));
    assert_eq!(rotate_about(Point::new(10.0, 0.0), Point::ORIGIN, 180), Point::new(-10.0, 0.0));
}

#[test]
fn test_segment_rect_intersection() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let through = Segment::new(Point::new(-5.0, 5.0), Point::new(15.0, 5.0));
    let outside = Segment::new(Point::new(-5.0, 20.0), Point::new(15.0, 20.0));
    assert!(through.intersects_rect(&rect));
    assert!(!outside.intersects_rect(&rect));
    assert_eq!(through.distance_to_point(Point::new(0.0, 8.0)), 3.0);
}

#[test]
fn test_point_in_polygon() {
    let triangle = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(0.0, 100.0),
    ];
    assert!(point_in_polygon(Point::new(10.0, 10.0), &triangle));
    assert!(!point_in_polygon(Point::new(80.0, 80.0), &triangle));
}
