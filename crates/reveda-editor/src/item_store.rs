//! Storage for scene items.

use std::collections::BTreeMap;

use crate::geometry::{Point, Rect};
use crate::model::{Item, ItemId};

/// Items keyed by id. Iteration is in id order, which is insertion order.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: BTreeMap<ItemId, Item>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh id. Ids are never reused within a store.
    pub fn allocate_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    /// Insert an item under its own id, replacing any item with that id.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.next_id = self.next_id.max(item.id.0);
        self.items.insert(item.id, item)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Union of all item bounds.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.iter()
            .map(|item| item.bounding_rect())
            .reduce(|acc, r| acc.united(&r))
    }

    /// Items under `p`, topmost first: higher z, then later insertion.
    pub fn items_at<F>(&self, p: Point, tolerance: f64, filter: F) -> Vec<ItemId>
    where
        F: Fn(&Item) -> bool,
    {
        let mut hits: Vec<&Item> = self
            .iter()
            .filter(|item| filter(item) && item.hit(p, tolerance))
            .collect();
        hits.sort_by(|a, b| b.z.cmp(&a.z).then(b.id.cmp(&a.id)));
        hits.into_iter().map(|item| item.id).collect()
    }
}
