//! Move, copy, rotate, stretch and delete.

use reveda_core::EditError;
use tracing::{debug, warn};

use super::EditorScene;
use crate::commands::{ChangeOrigin, EditCommand, Reposition, StretchItem};
use crate::edit_mode::{EditMode, GroupDrag, ModeKind, StretchGrab};
use crate::geometry::{is_quarter_turn, normalize_angle, Point};
use crate::model::{ItemId, Shape};
use crate::snap::snap_to_base;

impl EditorScene {
    pub(super) fn delete_at(&mut self, p: Point) {
        match self.items_at(p).first() {
            Some(&id) => self.push(EditCommand::delete(vec![id])),
            None => self.message("No item under the cursor"),
        }
    }

    /// Delete the whole selection as one undo entry.
    pub fn delete_selected(&mut self) -> Result<(), EditError> {
        let _span = self.enter_span();
        if self.model.selection.is_empty() {
            return Err(EditError::NothingSelected);
        }
        let ids = self.model.selection.to_vec();
        debug!(count = ids.len(), "deleting selection");
        self.push(EditCommand::delete(ids));
        Ok(())
    }

    /// Ids and current positions of the selected items, in selection order.
    fn selected_positions(&self) -> (Vec<ItemId>, Vec<Point>) {
        self.model
            .selection
            .iter()
            .filter_map(|id| self.model.items.get(id).map(|item| (id, item.pos)))
            .unzip()
    }

    pub(super) fn drag_press(&mut self, p: Point) {
        if self.model.selection.is_empty() {
            match self.items_at(p).first() {
                Some(&top) => self.model.selection.replace([top]),
                None => {
                    self.report(&EditError::NothingSelected);
                    return;
                }
            }
        }
        let (ids, starts) = self.selected_positions();
        let drag = GroupDrag {
            ids,
            starts,
            anchor: p,
            offset: Point::ORIGIN,
        };
        if let EditMode::MoveItem(slot) | EditMode::CopyItem(slot) = &mut self.mode {
            *slot = Some(drag);
        }
    }

    pub(super) fn move_release(&mut self, p: Point) {
        let EditMode::MoveItem(slot) = &mut self.mode else {
            return;
        };
        let Some(drag) = slot.take() else {
            return;
        };
        let offset = p - drag.anchor;
        if !offset.is_zero() {
            let count = drag.ids.len();
            self.push(EditCommand::group_move(drag.ids, drag.starts, offset));
            self.message(format!("Moved {} items", count));
        }
        self.model.selection.clear();
        self.finish_gesture();
    }

    pub(super) fn copy_release(&mut self, p: Point) {
        let EditMode::CopyItem(slot) = &mut self.mode else {
            return;
        };
        let Some(drag) = slot.take() else {
            return;
        };
        let offset = p - drag.anchor;
        if offset.is_zero() {
            self.finish_gesture();
            return;
        }
        let mut copies: Vec<_> = drag
            .ids
            .iter()
            .zip(&drag.starts)
            .filter_map(|(id, start)| {
                let item = self.model.items.get(*id)?;
                Some(item.clone().with_pos(*start + offset))
            })
            .collect();
        let mut instance_index = self.next_instance_index();
        for copy in &mut copies {
            copy.id = self.model.items.allocate_id();
            if let Shape::Instance(instance) = &mut copy.shape {
                instance.name = format!("I{}", instance_index);
                instance_index += 1;
            }
        }
        let new_ids: Vec<ItemId> = copies.iter().map(|item| item.id).collect();
        self.push(EditCommand::add(copies));
        self.message(format!("Copied {} items", new_ids.len()));
        self.model.selection.replace(new_ids);
        self.finish_gesture();
    }

    /// Rotate every selected item 90 degrees about `pivot`, as one entry.
    pub fn rotate_selected(&mut self, pivot: Point) -> Result<(), EditError> {
        let _span = self.enter_span();
        if self.model.selection.is_empty() {
            return Err(EditError::NothingSelected);
        }
        let ids = self.model.selection.to_vec();
        let name = if ids.len() == 1 {
            String::new()
        } else {
            format!("Rotate {} Items", ids.len())
        };
        self.undo.begin_macro(name);
        for id in ids {
            self.push(EditCommand::rotate(id, pivot, 90));
        }
        self.undo.end_macro();
        Ok(())
    }

    /// Rotate one item about `pivot` by a multiple of 90 degrees.
    pub fn rotate_item(&mut self, id: ItemId, pivot: Point, degrees: i32) -> Result<(), EditError> {
        if !is_quarter_turn(degrees) {
            return Err(EditError::UnsupportedAngle { degrees });
        }
        if !self.model.items.contains(id) {
            warn!(item = %id, "rotate requested for a missing item");
            return Ok(());
        }
        if normalize_angle(degrees) != 0 {
            self.push(EditCommand::rotate(id, pivot, degrees));
        }
        Ok(())
    }

    /// Move the selection by an offset rounded to the snap steps.
    pub fn move_selected_by(&mut self, dx: f64, dy: f64) -> Result<(), EditError> {
        let _span = self.enter_span();
        if self.model.selection.is_empty() {
            return Err(EditError::NothingSelected);
        }
        let (step_x, step_y) = self.context.grid.snap_tuple;
        let offset = Point::new(snap_to_base(dx, step_x), snap_to_base(dy, step_y));
        if offset.is_zero() {
            return Ok(());
        }
        let (ids, from) = self.selected_positions();
        let to = from.iter().map(|p| *p + offset).collect();
        self.push(EditCommand::Reposition(Reposition { ids, from, to }));
        Ok(())
    }

    pub(super) fn change_origin(&mut self, p: Point) {
        let before = self.model.origin;
        if before != p {
            self.push(EditCommand::ChangeOrigin(ChangeOrigin { before, after: p }));
            self.message(format!("Origin moved to ({}, {})", p.x, p.y));
        }
        self.finish_gesture();
    }

    pub(super) fn stretch_press(&mut self, p: Point) {
        let tolerance = self.hit_tolerance;
        let grab = self
            .model
            .selection
            .iter()
            .filter_map(|id| self.model.items.get(id))
            .find_map(|item| {
                let index = item
                    .world_points()
                    .iter()
                    .position(|wp| wp.distance_to(&p) <= tolerance)?;
                Some(StretchGrab {
                    id: item.id,
                    index,
                    before: item.shape.defining_points().to_vec(),
                    preview: item.clone(),
                })
            });
        match grab {
            Some(grab) => {
                if let EditMode::StretchItem(slot) = &mut self.mode {
                    *slot = Some(grab);
                }
            }
            None => self.message(ModeKind::StretchItem.status_text()),
        }
    }

    /// Rebuild the preview from the unchanged scene item so a corner that
    /// crosses its opposite keeps tracking the pointer.
    pub(super) fn stretch_move(&mut self, p: Point) {
        let EditMode::StretchItem(Some(grab)) = &mut self.mode else {
            return;
        };
        let Some(item) = self.model.items.get(grab.id) else {
            return;
        };
        let mut points = item.world_points();
        if let Some(slot) = points.get_mut(grab.index) {
            *slot = p;
        }
        let mut preview = item.clone();
        preview.set_world_points(&points);
        grab.preview = preview;
    }

    pub(super) fn stretch_release(&mut self, p: Point) {
        self.stretch_move(p);
        let EditMode::StretchItem(slot) = &mut self.mode else {
            return;
        };
        let Some(grab) = slot.take() else {
            return;
        };
        if grab.preview.is_degenerate() {
            self.report(&EditError::DegenerateGeometry {
                what: grab.preview.shape.kind_name().to_string(),
            });
        } else {
            let after = grab.preview.shape.defining_points().to_vec();
            if after != grab.before {
                self.push(EditCommand::Stretch(StretchItem {
                    id: grab.id,
                    before: grab.before,
                    after,
                }));
            }
        }
        self.finish_gesture();
    }
}
