use approx::assert_relative_eq;
use reveda_editor::geometry::{Point, Rect};
use reveda_editor::viewport::Viewport;

#[test]
fn test_pixel_scene_round_trip() {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom(2.5);
    viewport.set_pan(-130.0, 45.0);
    let p = viewport.pixel_to_scene(321.0, 123.0);
    let (x, y) = viewport.scene_to_pixel(p);
    assert_relative_eq!(x, 321.0, epsilon = 1e-9);
    assert_relative_eq!(y, 123.0, epsilon = 1e-9);
}

#[test]
fn test_fit_to_rect_uses_limiting_axis() {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.fit_to_rect(&Rect::new(100.0, 100.0, 400.0, 100.0));
    assert_relative_eq!(viewport.zoom(), 2.0);
    let visible = viewport.visible_rect();
    assert_relative_eq!(visible.center().x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(visible.center().y, 150.0, epsilon = 1e-9);
    assert!(visible.padded(1e-9).contains_rect(&Rect::new(100.0, 100.0, 400.0, 100.0)));
}

#[test]
fn test_zoom_to_point_keeps_anchor() {
    let mut viewport = Viewport::new(800.0, 600.0);
    let anchor = Point::new(150.0, 75.0);
    let before = viewport.scene_to_pixel(anchor);
    viewport.zoom_to_point(anchor, 4.0);
    let after = viewport.scene_to_pixel(anchor);
    assert_relative_eq!(before.0, after.0, epsilon = 1e-9);
    assert_relative_eq!(before.1, after.1, epsilon = 1e-9);
    assert_relative_eq!(viewport.zoom(), 4.0);
}

#[test]
fn test_zoom_is_clamped() {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom_limits(0.5, 8.0);
    viewport.set_zoom(100.0);
    assert_relative_eq!(viewport.zoom(), 8.0);
    viewport.set_zoom(0.01);
    assert_relative_eq!(viewport.zoom(), 0.5);
    viewport.set_zoom(f64::NAN);
    assert_relative_eq!(viewport.zoom(), 0.5);
}
