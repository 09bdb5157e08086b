use reveda_editor::edit_mode::{ModeKind, SceneKind};
use reveda_editor::geometry::{Point, Rect};
use reveda_editor::input::{Modifiers, PointerEvent};
use reveda_editor::model::{ItemId, Shape};
use reveda_editor::scene::EditorScene;
use reveda_editor::session::SessionContext;

fn scene(kind: SceneKind) -> EditorScene {
    EditorScene::new(kind, &SessionContext::default())
}

fn draw_rect(scene: &mut EditorScene, x0: f64, y0: f64, x1: f64, y1: f64) -> ItemId {
    scene.set_mode(ModeKind::DrawRect).unwrap();
    scene.handle_pointer(PointerEvent::press(x0, y0));
    scene.handle_pointer(PointerEvent::moved(x1, y1));
    scene.handle_pointer(PointerEvent::release(x1, y1));
    scene.items().ids().max().unwrap()
}

fn click(scene: &mut EditorScene, x: f64, y: f64) {
    scene.handle_pointer(PointerEvent::press(x, y));
    scene.handle_pointer(PointerEvent::release(x, y));
}

fn drag(scene: &mut EditorScene, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    scene.handle_pointer(PointerEvent::press(from.0, from.1).with_modifiers(modifiers));
    scene.handle_pointer(PointerEvent::moved(to.0, to.1));
    scene.handle_pointer(PointerEvent::release(to.0, to.1).with_modifiers(modifiers));
}

#[test]
fn test_draw_rect_snaps_and_undoes() {
    let mut scene = scene(SceneKind::Symbol);
    let id = draw_rect(&mut scene, 13.0, 24.0, 47.0, 81.0);

    let rect = scene.item(id).unwrap().bounding_rect();
    assert_eq!(rect, Rect::from_corners(Point::new(10.0, 20.0), Point::new(50.0, 80.0)));
    assert_eq!(scene.undo_stack().undo_text().as_deref(), Some("Add Item"));
    assert_eq!(scene.mode_kind(), ModeKind::SelectItem);
    assert!(scene.is_modified());

    assert!(scene.undo().unwrap());
    assert!(scene.items().is_empty());
    assert!(!scene.is_modified());

    assert!(scene.redo().unwrap());
    assert_eq!(scene.item(id).unwrap().bounding_rect(), rect);
}

#[test]
fn test_zero_area_rect_is_rejected() {
    let mut scene = scene(SceneKind::Symbol);
    scene.set_mode(ModeKind::DrawRect).unwrap();
    scene.handle_pointer(PointerEvent::press(10.0, 10.0));
    scene.handle_pointer(PointerEvent::release(12.0, 80.0));
    assert!(scene.items().is_empty());
    assert!(!scene.undo_stack().can_undo());
    assert!(scene.message_text().contains("rect"));
}

#[test]
fn test_rubber_band_contains_versus_intersects() {
    let mut scene = scene(SceneKind::Symbol);
    let inside = draw_rect(&mut scene, 10.0, 10.0, 30.0, 30.0);
    let straddling = draw_rect(&mut scene, 80.0, 80.0, 150.0, 150.0);

    drag(&mut scene, (0.0, 0.0), (100.0, 100.0), Modifiers::NONE);
    assert_eq!(scene.selection().to_vec(), vec![inside]);

    scene.set_partial_selection(true);
    drag(&mut scene, (0.0, 0.0), (100.0, 100.0), Modifiers::NONE);
    assert_eq!(scene.selection().to_vec(), vec![inside, straddling]);
    assert_eq!(scene.message_text(), "2 items selected");

    drag(&mut scene, (70.0, 70.0), (200.0, 200.0), Modifiers::CTRL);
    assert_eq!(scene.selection().to_vec(), vec![inside]);
}

#[test]
fn test_click_selection_modifiers() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    let b = draw_rect(&mut scene, 50.0, 0.0, 70.0, 20.0);

    click(&mut scene, 10.0, 10.0);
    assert_eq!(scene.selection().to_vec(), vec![a]);

    scene.handle_pointer(PointerEvent::press(60.0, 10.0).with_modifiers(Modifiers::SHIFT));
    scene.handle_pointer(PointerEvent::release(60.0, 10.0));
    assert_eq!(scene.selection().to_vec(), vec![a, b]);

    scene.handle_pointer(PointerEvent::press(10.0, 10.0).with_modifiers(Modifiers::CTRL));
    scene.handle_pointer(PointerEvent::release(10.0, 10.0));
    assert_eq!(scene.selection().to_vec(), vec![b]);
    assert_eq!(scene.highlighted_items(), vec![b]);
}

#[test]
fn test_cycle_walks_stacked_items() {
    let mut scene = scene(SceneKind::Symbol);
    let lower = draw_rect(&mut scene, 0.0, 0.0, 40.0, 40.0);
    let upper = draw_rect(&mut scene, 10.0, 10.0, 30.0, 30.0);

    click(&mut scene, 20.0, 20.0);
    let first = scene.selection().to_vec();
    assert_eq!(first.len(), 1);
    let next = scene.cycle_selection(Modifiers::NONE).unwrap();
    assert_ne!(vec![next], first);
    assert!(next == lower || next == upper);
    assert_eq!(scene.selection().to_vec(), vec![next]);
}

#[test]
fn test_escape_discards_draft() {
    let mut scene = scene(SceneKind::Symbol);
    scene.set_mode(ModeKind::DrawRect).unwrap();
    scene.handle_pointer(PointerEvent::press(0.0, 0.0));
    scene.handle_pointer(PointerEvent::moved(40.0, 40.0));
    assert_eq!(scene.draft_items().len(), 1);

    scene.cancel();
    assert!(scene.draft_items().is_empty());
    assert_eq!(scene.mode_kind(), ModeKind::SelectItem);
    scene.handle_pointer(PointerEvent::release(40.0, 40.0));
    assert!(scene.items().is_empty());
    assert!(!scene.undo_stack().can_undo());
}

#[test]
fn test_escape_discards_polygon_points() {
    let mut scene = scene(SceneKind::Symbol);
    draw_rect(&mut scene, 200.0, 200.0, 240.0, 240.0);
    let entries = scene.undo_stack().count();

    scene.set_mode(ModeKind::DrawPolygon).unwrap();
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        click(&mut scene, x, y);
    }
    assert!(!scene.draft_items().is_empty());

    scene.cancel();
    assert!(scene.draft_items().is_empty());
    assert_eq!(scene.mode_kind(), ModeKind::SelectItem);
    scene.handle_pointer(PointerEvent::double_click(0.0, 100.0));
    scene.finish_draft();
    assert_eq!(scene.items().len(), 1);
    assert_eq!(scene.undo_stack().count(), entries);
}

#[test]
fn test_escape_discards_wire_draft() {
    let mut scene = scene(SceneKind::Schematic);
    scene.set_mode(ModeKind::DrawWire).unwrap();
    scene.handle_pointer(PointerEvent::press(0.0, 0.0));
    scene.handle_pointer(PointerEvent::moved(100.0, 0.0));
    assert_eq!(scene.draft_items().len(), 1);

    scene.cancel();
    assert!(scene.draft_items().is_empty());
    scene.handle_pointer(PointerEvent::release(100.0, 0.0));
    assert!(scene.items().is_empty());
    assert!(!scene.undo_stack().can_undo());
}

#[test]
fn test_macro_of_five_draws_undoes_at_once() {
    let mut scene = scene(SceneKind::Symbol);
    scene.begin_macro("Draw Row");
    for i in 0..5 {
        let x = i as f64 * 30.0;
        draw_rect(&mut scene, x, 0.0, x + 20.0, 20.0);
    }
    scene.end_macro();

    assert_eq!(scene.items().len(), 5);
    assert_eq!(scene.undo_stack().count(), 1);
    assert_eq!(scene.undo_stack().undo_text().as_deref(), Some("Draw Row"));
    scene.undo().unwrap();
    assert!(scene.items().is_empty());
    scene.redo().unwrap();
    assert_eq!(scene.items().len(), 5);
}

#[test]
fn test_selection_survives_delete_and_undo() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    let b = draw_rect(&mut scene, 50.0, 0.0, 70.0, 20.0);
    scene.select_all();

    scene.delete_selected().unwrap();
    assert!(scene.items().is_empty());
    assert!(scene.selection().is_empty());
    assert_eq!(scene.undo_stack().undo_text().as_deref(), Some("Delete 2 Items"));

    scene.undo().unwrap();
    assert_eq!(scene.selection().to_vec(), vec![a, b]);
    for id in scene.selection().iter() {
        assert!(scene.item(id).is_some());
    }
}

#[test]
fn test_delete_mode_stays_active() {
    let mut scene = scene(SceneKind::Symbol);
    draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    draw_rect(&mut scene, 50.0, 0.0, 70.0, 20.0);
    scene.set_mode(ModeKind::DeleteItem).unwrap();

    click(&mut scene, 10.0, 10.0);
    click(&mut scene, 200.0, 200.0);
    assert_eq!(scene.message_text(), "No item under the cursor");
    click(&mut scene, 60.0, 10.0);
    assert!(scene.items().is_empty());
    assert_eq!(scene.mode_kind(), ModeKind::DeleteItem);
    assert_eq!(scene.undo_stack().count(), 4);
}

#[test]
fn test_move_gesture_offsets_selection() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    let b = draw_rect(&mut scene, 40.0, 0.0, 60.0, 20.0);
    scene.select_all();

    scene.set_mode(ModeKind::MoveItem).unwrap();
    drag(&mut scene, (10.0, 10.0), (40.0, 60.0), Modifiers::NONE);
    assert_eq!(scene.item(a).unwrap().pos, Point::new(30.0, 50.0));
    assert_eq!(scene.item(b).unwrap().pos, Point::new(70.0, 50.0));
    assert!(scene.selection().is_empty());
    assert_eq!(scene.undo_stack().undo_text().as_deref(), Some("Move 2 Items"));

    scene.undo().unwrap();
    assert_eq!(scene.item(a).unwrap().pos, Point::new(0.0, 0.0));
    assert_eq!(scene.item(b).unwrap().pos, Point::new(40.0, 0.0));
}

#[test]
fn test_move_preview_follows_pointer() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    scene.set_mode(ModeKind::MoveItem).unwrap();
    scene.handle_pointer(PointerEvent::press(10.0, 10.0));
    scene.handle_pointer(PointerEvent::moved(30.0, 10.0));

    let preview = scene.draft_items();
    assert_eq!(preview.len(), 1);
    assert_eq!(preview[0].id, a);
    assert_eq!(preview[0].pos, Point::new(20.0, 0.0));
    assert_eq!(scene.item(a).unwrap().pos, Point::ORIGIN);
}

#[test]
fn test_copy_gesture_selects_copies() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    scene.select_items([a], reveda_editor::selection::SelectionOp::Replace);

    scene.set_mode(ModeKind::CopyItem).unwrap();
    drag(&mut scene, (10.0, 10.0), (110.0, 10.0), Modifiers::NONE);
    assert_eq!(scene.items().len(), 2);
    let copies = scene.selection().to_vec();
    assert_eq!(copies.len(), 1);
    assert_ne!(copies[0], a);
    assert_eq!(scene.item(copies[0]).unwrap().pos, Point::new(100.0, 0.0));

    scene.undo().unwrap();
    assert_eq!(scene.items().len(), 1);
    assert!(scene.selection().is_empty());
}

#[test]
fn test_rotate_mode_turns_selection() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 40.0, 20.0);
    click(&mut scene, 10.0, 10.0);

    scene.set_mode(ModeKind::RotateItem).unwrap();
    click(&mut scene, 0.0, 0.0);
    let item = scene.item(a).unwrap();
    assert_eq!(item.angle, 90);
    let bounds = item.bounding_rect();
    assert_eq!(bounds.width(), 20.0);
    assert_eq!(bounds.height(), 40.0);

    scene.undo().unwrap();
    let item = scene.item(a).unwrap();
    assert_eq!(item.angle, 0);
    assert_eq!(item.bounding_rect(), Rect::new(0.0, 0.0, 40.0, 20.0));
}

#[test]
fn test_stretch_rect_corner() {
    let mut scene = scene(SceneKind::Symbol);
    let a = draw_rect(&mut scene, 0.0, 0.0, 40.0, 20.0);
    click(&mut scene, 10.0, 10.0);

    scene.set_mode(ModeKind::StretchItem).unwrap();
    drag(&mut scene, (40.0, 20.0), (60.0, 50.0), Modifiers::NONE);
    assert_eq!(scene.item(a).unwrap().bounding_rect(), Rect::new(0.0, 0.0, 60.0, 50.0));
    assert_eq!(scene.undo_stack().undo_text().as_deref(), Some("Stretch Item"));

    scene.undo().unwrap();
    assert_eq!(scene.item(a).unwrap().bounding_rect(), Rect::new(0.0, 0.0, 40.0, 20.0));
}

#[test]
fn test_change_origin_is_undoable() {
    let mut scene = scene(SceneKind::Symbol);
    scene.set_mode(ModeKind::ChangeOrigin).unwrap();
    click(&mut scene, 31.0, 42.0);
    assert_eq!(scene.origin(), Point::new(30.0, 40.0));
    scene.undo().unwrap();
    assert_eq!(scene.origin(), Point::ORIGIN);
}

#[test]
fn test_polygon_finishes_on_double_click() {
    let mut scene = scene(SceneKind::Symbol);
    scene.set_mode(ModeKind::DrawPolygon).unwrap();
    click(&mut scene, 10.0, 10.0);
    click(&mut scene, 60.0, 10.0);
    scene.handle_pointer(PointerEvent::moved(60.0, 60.0));
    assert_eq!(scene.draft_items().len(), 2);
    scene.handle_pointer(PointerEvent::double_click(60.0, 60.0));

    assert_eq!(scene.items().len(), 1);
    let item = scene.items().iter().next().unwrap();
    assert!(matches!(item.shape, Shape::Polygon(_)));
    assert_eq!(item.pos, Point::new(10.0, 10.0));
    assert_eq!(item.bounding_rect(), Rect::new(10.0, 10.0, 50.0, 50.0));
    assert_eq!(scene.undo_stack().count(), 1);
}

#[test]
fn test_wire_is_manhattan() {
    let mut scene = scene(SceneKind::Schematic);
    scene.set_mode(ModeKind::DrawWire).unwrap();
    drag(&mut scene, (0.0, 0.0), (80.0, 20.0), Modifiers::NONE);

    let item = scene.items().iter().next().unwrap();
    let segment = item.net_segment().unwrap();
    assert!(segment.is_horizontal());
    assert_eq!(segment.end, Point::new(80.0, 0.0));
}

#[test]
fn test_read_only_scene_ignores_pointer() {
    let mut scene = scene(SceneKind::Symbol);
    draw_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
    scene.set_read_only(true);
    scene.handle_pointer(PointerEvent::press(10.0, 10.0));
    scene.handle_pointer(PointerEvent::release(10.0, 10.0));
    assert!(scene.selection().is_empty());
    assert_eq!(scene.undo_stack().count(), 1);
}
