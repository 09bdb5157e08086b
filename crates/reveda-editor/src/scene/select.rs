//! Click, cycle and rubber-band selection.

use tracing::debug;

use super::EditorScene;
use crate::edit_mode::{DragRect, EditMode};
use crate::geometry::Point;
use crate::input::Modifiers;
use crate::model::ItemId;
use crate::selection::{ItemCycler, SelectionOp};

impl EditorScene {
    pub(super) fn select_press(&mut self, p: Point, modifiers: Modifiers) {
        let hits = self.items_at(p);
        let EditMode::SelectItem(state) = &mut self.mode else {
            return;
        };
        let Some(&top) = hits.first() else {
            state.cycler = None;
            state.rubber_band =
                SelectionOp::for_rubber_band(modifiers).map(|op| (DragRect::new(p), op));
            return;
        };
        state.cycler = Some(ItemCycler::new(hits));
        if let Some(op) = SelectionOp::for_click(modifiers) {
            self.model.selection.apply(op, [top]);
        }
    }

    pub(super) fn select_release(&mut self, p: Point, _modifiers: Modifiers) {
        let EditMode::SelectItem(state) = &mut self.mode else {
            return;
        };
        let Some((mut band, op)) = state.rubber_band.take() else {
            return;
        };
        band.current = p;
        let rect = band.rect();
        let partial = self.partial_selection;
        let ids: Vec<ItemId> = self
            .model
            .items
            .iter()
            .filter(|item| self.is_pickable(item))
            .filter(|item| {
                if partial {
                    item.intersects(&rect)
                } else {
                    item.contained_in(&rect)
                }
            })
            .map(|item| item.id)
            .collect();
        debug!(?op, partial, hits = ids.len(), "rubber band selection");
        self.model.selection.apply(op, ids);
        if !self.model.selection.is_empty() {
            self.message(format!("{} items selected", self.model.selection.len()));
        }
    }

    /// Step to the next item stacked under the last press point.
    ///
    /// The modifiers combine with the selection the same way a click does.
    pub fn cycle_selection(&mut self, modifiers: Modifiers) -> Option<ItemId> {
        let EditMode::SelectItem(state) = &mut self.mode else {
            return None;
        };
        let cycler = state.cycler.as_mut()?;
        let items = &self.model.items;
        cycler.retain(|id| items.contains(id));
        let next = cycler.advance()?;
        if let Some(op) = SelectionOp::for_click(modifiers) {
            self.model.selection.apply(op, [next]);
        }
        Some(next)
    }

    /// Combine `ids` with the selection. Unknown ids are ignored.
    pub fn select_items<I: IntoIterator<Item = ItemId>>(&mut self, ids: I, op: SelectionOp) {
        let items = &self.model.items;
        let ids: Vec<ItemId> = ids.into_iter().filter(|id| items.contains(*id)).collect();
        self.model.selection.apply(op, ids);
    }

    pub fn select_all(&mut self) {
        let ids: Vec<ItemId> = self
            .model
            .items
            .iter()
            .filter(|item| self.is_pickable(item))
            .map(|item| item.id)
            .collect();
        self.model.selection.replace(ids);
    }

    pub fn deselect_all(&mut self) {
        self.model.selection.clear();
    }
}
