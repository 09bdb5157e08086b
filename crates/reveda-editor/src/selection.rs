//! Selection state.
//!
//! The scene keeps exactly one selection set. Highlighting is derived from
//! it, so there is no second copy of selection state to keep in sync.

use indexmap::IndexSet;

use crate::input::Modifiers;
use crate::model::ItemId;

/// How a click, cycle or rubber band combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOp {
    Replace,
    Add,
    Toggle,
    Remove,
}

impl SelectionOp {
    /// Plain replaces, Shift adds, Ctrl toggles.
    pub fn for_click(modifiers: Modifiers) -> Option<Self> {
        match (modifiers.shift, modifiers.ctrl) {
            (false, false) => Some(Self::Replace),
            (true, false) => Some(Self::Add),
            (false, true) => Some(Self::Toggle),
            (true, true) => None,
        }
    }

    /// Plain replaces, Shift adds, Ctrl removes.
    pub fn for_rubber_band(modifiers: Modifiers) -> Option<Self> {
        match (modifiers.shift, modifiers.ctrl) {
            (false, false) => Some(Self::Replace),
            (true, false) => Some(Self::Add),
            (false, true) => Some(Self::Remove),
            (true, true) => None,
        }
    }
}

/// Ordered set of selected item ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    ids: IndexSet<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in selection order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<ItemId> {
        self.iter().collect()
    }

    pub fn add(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        self.ids.shift_remove(&id)
    }

    pub fn toggle(&mut self, id: ItemId) {
        if !self.remove(id) {
            self.add(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn replace<I: IntoIterator<Item = ItemId>>(&mut self, ids: I) {
        self.ids.clear();
        self.ids.extend(ids);
    }

    /// Combine `ids` with the current selection.
    pub fn apply<I: IntoIterator<Item = ItemId>>(&mut self, op: SelectionOp, ids: I) {
        match op {
            SelectionOp::Replace => self.replace(ids),
            SelectionOp::Add => self.ids.extend(ids),
            SelectionOp::Toggle => ids.into_iter().for_each(|id| self.toggle(id)),
            SelectionOp::Remove => ids.into_iter().for_each(|id| {
                self.remove(id);
            }),
        }
    }

    pub fn retain<F: FnMut(ItemId) -> bool>(&mut self, mut keep: F) {
        self.ids.retain(|id| keep(*id));
    }
}

/// Resumable cycle over the items stacked under one press point.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCycler {
    items: Vec<ItemId>,
    cursor: usize,
}

impl ItemCycler {
    /// `items` must already be ordered topmost first.
    pub fn new(items: Vec<ItemId>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn current(&self) -> Option<ItemId> {
        self.items.get(self.cursor).copied()
    }

    /// Step to the next item, wrapping around.
    pub fn advance(&mut self) -> Option<ItemId> {
        if self.items.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.items.len();
        self.current()
    }

    /// Drop ids that no longer exist, keeping the cursor on a valid entry.
    pub fn retain<F: FnMut(ItemId) -> bool>(&mut self, mut keep: F) {
        let current = self.current();
        self.items.retain(|id| keep(*id));
        self.cursor = current
            .and_then(|c| self.items.iter().position(|id| *id == c))
            .unwrap_or(0);
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
