//! Reversible scene mutations.
//!
//! Every change to the item set, item geometry or scene origin goes through
//! an [`EditCommand`]. Move, rotate and stretch keep only the delta they need
//! to restore the previous state exactly.

use tracing::warn;

use crate::geometry::{normalize_angle, rotate_about, Point};
use crate::model::{Item, ItemId, SceneModel};

#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    AddItems(AddItems),
    DeleteItems(DeleteItems),
    MoveItems(MoveItems),
    Reposition(Reposition),
    Rotate(RotateItem),
    Stretch(StretchItem),
    Rename(RenameItem),
    ChangeOrigin(ChangeOrigin),
    Composite(CompositeCommand),
}

/// An atomic group of commands; the recorded form of a macro.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeCommand {
    pub name: String,
    pub commands: Vec<EditCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddItems {
    pub ids: Vec<ItemId>,
    /// Holds the items while they are not in the scene.
    stash: Vec<Item>,
}

impl AddItems {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            ids: items.iter().map(|item| item.id).collect(),
            stash: items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteItems {
    pub ids: Vec<ItemId>,
    stash: Vec<Item>,
    was_selected: Vec<ItemId>,
}

impl DeleteItems {
    pub fn new(ids: Vec<ItemId>) -> Self {
        Self {
            ids,
            stash: Vec::new(),
            was_selected: Vec::new(),
        }
    }
}

/// Group move: every item ends at its own start position plus one offset.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveItems {
    pub ids: Vec<ItemId>,
    pub starts: Vec<Point>,
    pub offset: Point,
}

/// Per-item position change.
#[derive(Debug, Clone, PartialEq)]
pub struct Reposition {
    pub ids: Vec<ItemId>,
    pub from: Vec<Point>,
    pub to: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotateItem {
    pub id: ItemId,
    pub pivot: Point,
    pub angle: i32,
    /// Position before the last apply; restored verbatim on undo.
    origin_pos: Option<Point>,
}

impl RotateItem {
    pub fn new(id: ItemId, pivot: Point, angle: i32) -> Self {
        Self {
            id,
            pivot,
            angle,
            origin_pos: None,
        }
    }
}

/// Defining points before and after a stretch, in item-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchItem {
    pub id: ItemId,
    pub before: Vec<Point>,
    pub after: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenameItem {
    pub id: ItemId,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeOrigin {
    pub before: Point,
    pub after: Point,
}

fn missing(id: ItemId, action: &str) {
    warn!(item = %id, action, "command target is not in the scene");
}

impl EditCommand {
    pub fn add(items: Vec<Item>) -> Self {
        EditCommand::AddItems(AddItems::new(items))
    }

    pub fn delete(ids: Vec<ItemId>) -> Self {
        EditCommand::DeleteItems(DeleteItems::new(ids))
    }

    pub fn group_move(ids: Vec<ItemId>, starts: Vec<Point>, offset: Point) -> Self {
        EditCommand::MoveItems(MoveItems {
            ids,
            starts,
            offset,
        })
    }

    pub fn rotate(id: ItemId, pivot: Point, angle: i32) -> Self {
        EditCommand::Rotate(RotateItem::new(id, pivot, angle))
    }

    /// Display name used for undo/redo menu text.
    pub fn text(&self) -> String {
        match self {
            EditCommand::AddItems(cmd) => plural("Add", cmd.ids.len()),
            EditCommand::DeleteItems(cmd) => plural("Delete", cmd.ids.len()),
            EditCommand::MoveItems(cmd) => plural("Move", cmd.ids.len()),
            EditCommand::Reposition(cmd) => plural("Move", cmd.ids.len()),
            EditCommand::Rotate(_) => "Rotate Item".to_string(),
            EditCommand::Stretch(_) => "Stretch Item".to_string(),
            EditCommand::Rename(cmd) => format!("Rename {}", cmd.after),
            EditCommand::ChangeOrigin(_) => "Change Origin".to_string(),
            EditCommand::Composite(cmd) => cmd.name.clone(),
        }
    }

    pub fn apply(&mut self, model: &mut SceneModel) {
        match self {
            EditCommand::AddItems(cmd) => {
                for item in cmd.stash.drain(..) {
                    model.items.insert(item);
                }
            }
            EditCommand::DeleteItems(cmd) => {
                cmd.was_selected = cmd
                    .ids
                    .iter()
                    .copied()
                    .filter(|id| model.selection.contains(*id))
                    .collect();
                cmd.stash.clear();
                for id in &cmd.ids {
                    match model.take_item(*id) {
                        Some(item) => cmd.stash.push(item),
                        None => missing(*id, "delete"),
                    }
                }
            }
            EditCommand::MoveItems(cmd) => {
                for (id, start) in cmd.ids.iter().zip(&cmd.starts) {
                    match model.items.get_mut(*id) {
                        Some(item) => item.pos = *start + cmd.offset,
                        None => missing(*id, "move"),
                    }
                }
            }
            EditCommand::Reposition(cmd) => {
                for (id, to) in cmd.ids.iter().zip(&cmd.to) {
                    match model.items.get_mut(*id) {
                        Some(item) => item.pos = *to,
                        None => missing(*id, "reposition"),
                    }
                }
            }
            EditCommand::Rotate(cmd) => match model.items.get_mut(cmd.id) {
                Some(item) => {
                    cmd.origin_pos = Some(item.pos);
                    item.rotate_about(cmd.pivot, cmd.angle);
                }
                None => missing(cmd.id, "rotate"),
            },
            EditCommand::Stretch(cmd) => match model.items.get_mut(cmd.id) {
                Some(item) => {
                    item.shape.set_defining_points(&cmd.after);
                }
                None => missing(cmd.id, "stretch"),
            },
            EditCommand::Rename(cmd) => match model.items.get_mut(cmd.id) {
                Some(item) => {
                    item.shape.set_text(&cmd.after);
                }
                None => missing(cmd.id, "rename"),
            },
            EditCommand::ChangeOrigin(cmd) => model.origin = cmd.after,
            EditCommand::Composite(cmd) => {
                for sub_cmd in &mut cmd.commands {
                    sub_cmd.apply(model);
                }
            }
        }
    }

    pub fn undo(&mut self, model: &mut SceneModel) {
        match self {
            EditCommand::AddItems(cmd) => {
                cmd.stash.clear();
                for id in &cmd.ids {
                    match model.take_item(*id) {
                        Some(item) => cmd.stash.push(item),
                        None => missing(*id, "undo add"),
                    }
                }
            }
            EditCommand::DeleteItems(cmd) => {
                for item in cmd.stash.drain(..) {
                    model.items.insert(item);
                }
                for id in &cmd.was_selected {
                    model.selection.add(*id);
                }
            }
            EditCommand::MoveItems(cmd) => {
                for (id, start) in cmd.ids.iter().zip(&cmd.starts) {
                    match model.items.get_mut(*id) {
                        Some(item) => item.pos = *start,
                        None => missing(*id, "undo move"),
                    }
                }
            }
            EditCommand::Reposition(cmd) => {
                for (id, from) in cmd.ids.iter().zip(&cmd.from) {
                    match model.items.get_mut(*id) {
                        Some(item) => item.pos = *from,
                        None => missing(*id, "undo reposition"),
                    }
                }
            }
            EditCommand::Rotate(cmd) => match model.items.get_mut(cmd.id) {
                Some(item) => {
                    match cmd.origin_pos.take() {
                        Some(pos) => item.pos = pos,
                        None => {
                            item.pos = rotate_about(item.pos, cmd.pivot, -cmd.angle)
                        }
                    }
                    item.angle = normalize_angle(item.angle - cmd.angle);
                }
                None => missing(cmd.id, "undo rotate"),
            },
            EditCommand::Stretch(cmd) => match model.items.get_mut(cmd.id) {
                Some(item) => {
                    item.shape.set_defining_points(&cmd.before);
                }
                None => missing(cmd.id, "undo stretch"),
            },
            EditCommand::Rename(cmd) => match model.items.get_mut(cmd.id) {
                Some(item) => {
                    item.shape.set_text(&cmd.before);
                }
                None => missing(cmd.id, "undo rename"),
            },
            EditCommand::ChangeOrigin(cmd) => model.origin = cmd.before,
            EditCommand::Composite(cmd) => {
                for sub_cmd in cmd.commands.iter_mut().rev() {
                    sub_cmd.undo(model);
                }
            }
        }
    }
}

fn plural(verb: &str, count: usize) -> String {
    if count == 1 {
        format!("{} Item", verb)
    } else {
        format!("{} {} Items", verb, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::Shape;

    fn model_with_rect() -> (SceneModel, ItemId) {
        let mut model = SceneModel::new();
        let id = model.items.allocate_id();
        let item = Item::new(id, Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .with_pos(Point::new(5.0, 5.0));
        model.items.insert(item);
        (model, id)
    }

    #[test]
    fn test_delete_restores_selection() {
        let (mut model, id) = model_with_rect();
        model.selection.add(id);

        let mut cmd = EditCommand::delete(vec![id]);
        cmd.apply(&mut model);
        assert!(model.items.is_empty());
        assert!(model.selection.is_empty());

        cmd.undo(&mut model);
        assert!(model.items.contains(id));
        assert!(model.selection.contains(id));
    }

    #[test]
    fn test_group_move_undo_uses_start_positions() {
        let (mut model, id) = model_with_rect();
        let mut cmd =
            EditCommand::group_move(vec![id], vec![Point::new(5.0, 5.0)], Point::new(0.1, 0.2));
        cmd.apply(&mut model);
        cmd.undo(&mut model);
        assert_eq!(model.items.get(id).unwrap().pos, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_rotate_round_trip() {
        let (mut model, id) = model_with_rect();
        let mut cmd = EditCommand::rotate(id, Point::new(0.3, 0.7), 90);
        cmd.apply(&mut model);
        assert_eq!(model.items.get(id).unwrap().angle, 90);
        cmd.undo(&mut model);
        let item = model.items.get(id).unwrap();
        assert_eq!(item.pos, Point::new(5.0, 5.0));
        assert_eq!(item.angle, 0);
    }

    #[test]
    fn test_composite_undoes_in_reverse() {
        let (mut model, id) = model_with_rect();
        let mut cmd = EditCommand::Composite(CompositeCommand {
            name: "Shuffle".to_string(),
            commands: vec![
                EditCommand::group_move(
                    vec![id],
                    vec![Point::new(5.0, 5.0)],
                    Point::new(10.0, 0.0),
                ),
                EditCommand::group_move(
                    vec![id],
                    vec![Point::new(15.0, 5.0)],
                    Point::new(0.0, 10.0),
                ),
            ],
        });
        cmd.apply(&mut model);
        assert_eq!(model.items.get(id).unwrap().pos, Point::new(15.0, 15.0));
        cmd.undo(&mut model);
        assert_eq!(model.items.get(id).unwrap().pos, Point::new(5.0, 5.0));
        assert_eq!(cmd.text(), "Shuffle");
    }

    #[test]
    fn test_command_text() {
        assert_eq!(EditCommand::delete(vec![ItemId(1)]).text(), "Delete Item");
        assert_eq!(EditCommand::delete(vec![ItemId(1), ItemId(2)]).text(), "Delete 2 Items");
    }
}
