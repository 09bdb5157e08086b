use reveda_editor::geometry::Point;
use reveda_editor::snap::{snap_to_base, GridConfig};

#[test]
fn test_snap_rounds_to_nearest_step() {
    let grid = GridConfig::new(10.0, 10.0);
    assert_eq!(grid.snap_to_grid(Point::new(13.0, 24.0)), Point::new(10.0, 20.0));
    assert_eq!(grid.snap_to_grid(Point::new(47.0, 81.0)), Point::new(50.0, 80.0));
    assert_eq!(grid.snap_to_grid(Point::new(-13.0, -26.0)), Point::new(-10.0, -30.0));
}

#[test]
fn test_per_axis_snap_steps() {
    let grid = GridConfig::new(10.0, 10.0).with_snap_tuple(5.0, 20.0);
    assert_eq!(grid.snap_to_grid(Point::new(12.0, 12.0)), Point::new(10.0, 20.0));
    assert_eq!(grid.snap_distance(), 5.0);
}

#[test]
fn test_snap_to_base_ignores_bad_base() {
    assert_eq!(snap_to_base(7.3, 0.0), 7.3);
    assert_eq!(snap_to_base(7.3, -1.0), 7.3);
    assert_eq!(snap_to_base(7.3, 2.0), 8.0);
}
