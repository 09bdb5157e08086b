use reveda_editor::commands::EditCommand;
use reveda_editor::geometry::{Point, Rect};
use reveda_editor::model::{Item, SceneModel, Shape};
use reveda_editor::undo::UndoStack;

fn new_rect(model: &mut SceneModel, x: f64, y: f64) -> Item {
    let id = model.items.allocate_id();
    Item::new(id, Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0))).with_pos(Point::new(x, y))
}

#[test]
fn test_history_is_capped_at_default_limit() {
    let mut model = SceneModel::new();
    let mut stack = UndoStack::new();
    for i in 0..150 {
        let item = new_rect(&mut model, i as f64, 0.0);
        stack.push(EditCommand::add(vec![item]), &mut model);
    }
    assert_eq!(stack.count(), 99);
    assert_eq!(stack.index(), 99);
    assert_eq!(model.items.len(), 150);

    while stack.undo(&mut model).unwrap() {}
    // The first 51 additions fell off the bottom and stay applied.
    assert_eq!(model.items.len(), 51);
}

#[test]
fn test_undo_redo_restores_positions() {
    let mut model = SceneModel::new();
    let mut stack = UndoStack::new();
    let item = new_rect(&mut model, 5.0, 5.0);
    let id = item.id;
    stack.push(EditCommand::add(vec![item]), &mut model);
    stack.push(
        EditCommand::group_move(vec![id], vec![Point::new(5.0, 5.0)], Point::new(20.0, -5.0)),
        &mut model,
    );
    stack.push(EditCommand::rotate(id, Point::new(0.0, 0.0), 90), &mut model);

    let rotated = model.items.get(id).unwrap().clone();
    assert_eq!(rotated.angle, 90);

    stack.undo(&mut model).unwrap();
    let moved = model.items.get(id).unwrap();
    assert_eq!(moved.pos, Point::new(25.0, 0.0));
    assert_eq!(moved.angle, 0);

    stack.undo(&mut model).unwrap();
    assert_eq!(model.items.get(id).unwrap().pos, Point::new(5.0, 5.0));

    stack.redo(&mut model).unwrap();
    stack.redo(&mut model).unwrap();
    assert_eq!(model.items.get(id).unwrap(), &rotated);
    assert!(!stack.redo(&mut model).unwrap());
}

#[test]
fn test_delete_undo_restores_selection() {
    let mut model = SceneModel::new();
    let mut stack = UndoStack::new();
    let a = new_rect(&mut model, 0.0, 0.0);
    let b = new_rect(&mut model, 20.0, 0.0);
    let (a_id, b_id) = (a.id, b.id);
    stack.push(EditCommand::add(vec![a, b]), &mut model);
    model.selection.add(a_id);

    stack.push(EditCommand::delete(vec![a_id, b_id]), &mut model);
    assert!(model.items.is_empty());
    assert!(model.selection.is_empty());
    assert_eq!(stack.undo_text().as_deref(), Some("Delete 2 Items"));

    stack.undo(&mut model).unwrap();
    assert_eq!(model.items.len(), 2);
    assert!(model.selection.contains(a_id));
    assert!(!model.selection.contains(b_id));
}

#[test]
fn test_unnamed_macro_takes_first_command_text() {
    let mut model = SceneModel::new();
    let mut stack = UndoStack::new();
    stack.begin_macro("");
    for i in 0..5 {
        let item = new_rect(&mut model, i as f64 * 20.0, 0.0);
        stack.push(EditCommand::add(vec![item]), &mut model);
    }
    stack.end_macro();

    assert_eq!(stack.count(), 1);
    assert_eq!(stack.undo_text().as_deref(), Some("Add Item"));
    stack.undo(&mut model).unwrap();
    assert!(model.items.is_empty());
    stack.redo(&mut model).unwrap();
    assert_eq!(model.items.len(), 5);
}

#[test]
fn test_clean_state_lost_when_tail_discarded() {
    let mut model = SceneModel::new();
    let mut stack = UndoStack::new();
    let item = new_rect(&mut model, 0.0, 0.0);
    stack.push(EditCommand::add(vec![item]), &mut model);
    stack.set_clean();
    stack.undo(&mut model).unwrap();
    assert!(!stack.is_clean());

    let other = new_rect(&mut model, 50.0, 0.0);
    stack.push(EditCommand::add(vec![other]), &mut model);
    assert!(!stack.is_clean());
    stack.undo(&mut model).unwrap();
    assert!(!stack.is_clean());
}
