//! Layer visibility and selectability.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::LayerKey;

fn default_true() -> bool {
    true
}

/// A process layer as shown in the layer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub purpose: String,
    pub gds_layer: u16,
    pub datatype: u16,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Stacking order given to items drawn on this layer.
    #[serde(default)]
    pub z: i32,
}

impl Layer {
    pub fn new(
        name: impl Into<String>,
        purpose: impl Into<String>,
        gds_layer: u16,
        datatype: u16,
    ) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            gds_layer,
            datatype,
            visible: true,
            selectable: true,
            z: 0,
        }
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn key(&self) -> LayerKey {
        LayerKey::new(&self.name, &self.purpose)
    }

    /// Whether items on this layer can be picked.
    pub fn is_pickable(&self) -> bool {
        self.visible && self.selectable
    }
}

/// Ordered set of layers keyed by name and purpose.
///
/// Items with no layer, or with a layer the table does not know, are always
/// visible and selectable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerTable {
    layers: IndexMap<LayerKey, Layer>,
}

impl LayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, layer: Layer) {
        self.layers.insert(layer.key(), layer);
    }

    pub fn get(&self, key: &LayerKey) -> Option<&Layer> {
        self.layers.get(key)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Returns false when the layer is unknown.
    pub fn set_visible(&mut self, key: &LayerKey, visible: bool) -> bool {
        match self.layers.get_mut(key) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Returns false when the layer is unknown.
    pub fn set_selectable(&mut self, key: &LayerKey, selectable: bool) -> bool {
        match self.layers.get_mut(key) {
            Some(layer) => {
                layer.selectable = selectable;
                true
            }
            None => false,
        }
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        self.layers.values_mut().for_each(|l| l.visible = visible);
    }

    pub fn set_all_selectable(&mut self, selectable: bool) {
        self.layers.values_mut().for_each(|l| l.selectable = selectable);
    }

    pub fn is_visible(&self, key: Option<&LayerKey>) -> bool {
        key.and_then(|k| self.layers.get(k))
            .is_none_or(|layer| layer.visible)
    }

    pub fn is_pickable(&self, key: Option<&LayerKey>) -> bool {
        key.and_then(|k| self.layers.get(k))
            .is_none_or(Layer::is_pickable)
    }

    /// Z value for items drawn on `key`; unknown layers draw at zero.
    pub fn z_of(&self, key: &LayerKey) -> i32 {
        self.layers.get(key).map_or(0, |layer| layer.z)
    }
}

impl FromIterator<Layer> for LayerTable {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut table = LayerTable::new();
        for layer in iter {
            table.insert(layer);
        }
        table
    }
}
