//! Persistence boundary for editor views.
//!
//! The scene only produces and consumes [`DesignData`]. Where and how it is
//! stored belongs to a [`DesignStore`] collaborator.

use chrono::{DateTime, Utc};
use reveda_core::CollaboratorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::geometry::Point;
use crate::model::{Item, ItemId, LayerKey, Shape};
use crate::session::ViewTuple;

/// Design file format version
pub const FORMAT_VERSION: u32 = 1;

/// Serialized item. Ids are not persisted; a scene allocates fresh ones on
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub shape: Shape,
    #[serde(default)]
    pub pos: Point,
    #[serde(default)]
    pub angle: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerKey>,
    #[serde(default)]
    pub z: i32,
}

impl ItemData {
    pub fn from_item(item: &Item) -> Self {
        Self {
            shape: item.shape.clone(),
            pos: item.pos,
            angle: item.angle,
            layer: item.layer.clone(),
            z: item.z,
        }
    }

    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            shape: self.shape,
            pos: self.pos,
            angle: self.angle,
            layer: self.layer,
            z: self.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub modified: DateTime<Utc>,
}

impl Default for DesignMetadata {
    fn default() -> Self {
        Self {
            modified: Utc::now(),
        }
    }
}

/// Complete contents of one editor view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignData {
    pub version: u32,
    #[serde(default)]
    pub metadata: DesignMetadata,
    #[serde(default)]
    pub origin: Point,
    #[serde(default)]
    pub items: Vec<ItemData>,
}

impl Default for DesignData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: DesignMetadata::default(),
            origin: Point::ORIGIN,
            items: Vec::new(),
        }
    }
}

impl DesignData {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Loads and saves view contents for the editor.
pub trait DesignStore {
    fn load(&self, view: &ViewTuple) -> Result<DesignData, CollaboratorError>;

    fn save(&self, view: &ViewTuple, design: &DesignData) -> Result<(), CollaboratorError>;
}

/// One pretty-printed JSON file per view at
/// `<root>/<library>/<cell>/<view>.json`.
#[derive(Debug, Clone)]
pub struct JsonDesignStore {
    root: PathBuf,
}

impl JsonDesignStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, view: &ViewTuple) -> PathBuf {
        self.root
            .join(&view.library)
            .join(&view.cell)
            .join(format!("{}.json", view.view))
    }

    /// Read a design file directly.
    pub fn read_file(path: &Path) -> Result<DesignData, CollaboratorError> {
        let load_failed = |reason: String| CollaboratorError::LoadFailed {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| load_failed(e.to_string()))
    }
}

impl DesignStore for JsonDesignStore {
    /// A view that has never been saved loads as an empty design.
    fn load(&self, view: &ViewTuple) -> Result<DesignData, CollaboratorError> {
        let path = self.path_for(view);
        if !path.exists() {
            debug!(path = %path.display(), "no design file, starting empty");
            return Ok(DesignData::default());
        }
        let design = Self::read_file(&path)?;
        info!(view = %view, items = design.items.len(), "loaded design");
        Ok(design)
    }

    fn save(&self, view: &ViewTuple, design: &DesignData) -> Result<(), CollaboratorError> {
        let path = self.path_for(view);
        let save_failed = |reason: String| CollaboratorError::SaveFailed {
            path: path.display().to_string(),
            reason,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        let mut design = design.clone();
        design.metadata.modified = Utc::now();
        let json = serde_json::to_string_pretty(&design).map_err(|e| save_failed(e.to_string()))?;
        fs::write(&path, json).map_err(|e| save_failed(e.to_string()))?;
        info!(view = %view, items = design.items.len(), "saved design");
        Ok(())
    }
}
