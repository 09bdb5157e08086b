//! Process rules supplied by the PDK collaborator.
//!
//! The editor only looks definitions up by name. A missing definition is a
//! collaborator error; callers log it and skip the dependent action.

use std::fs;
use std::path::Path;

use reveda_core::{CollaboratorError, DatabaseUnits};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layers::{Layer, LayerTable};
use crate::model::LayerKey;

/// A named path style with an allowed width range in user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDefinition {
    pub name: String,
    pub layer: LayerKey,
    pub min_width: f64,
    pub max_width: f64,
}

impl PathDefinition {
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.clamp(self.min_width, self.max_width.max(self.min_width))
    }
}

/// A named via cut with its minimum size and spacing in user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViaDefinition {
    pub name: String,
    pub layer: LayerKey,
    pub min_width: f64,
    pub min_height: f64,
    pub min_spacing: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessRules {
    pub units: DatabaseUnits,
    pub layers: Vec<Layer>,
    pub paths: Vec<PathDefinition>,
    pub vias: Vec<ViaDefinition>,
}

impl ProcessRules {
    /// Read process rules from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CollaboratorError> {
        let load_failed = |reason: String| CollaboratorError::LoadFailed {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let rules: ProcessRules =
            serde_json::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        debug!(
            path = %path.display(),
            layers = rules.layers.len(),
            paths = rules.paths.len(),
            vias = rules.vias.len(),
            "loaded process rules"
        );
        Ok(rules)
    }

    pub fn dbu(&self) -> f64 {
        self.units.dbu()
    }

    pub fn layer_table(&self) -> LayerTable {
        self.layers.iter().cloned().collect()
    }

    pub fn layer(&self, key: &LayerKey) -> Result<&Layer, CollaboratorError> {
        self.layers
            .iter()
            .find(|layer| layer.name == key.name && layer.purpose == key.purpose)
            .ok_or_else(|| CollaboratorError::MissingLayer {
                name: key.name.clone(),
                purpose: key.purpose.clone(),
            })
    }

    pub fn path(&self, name: &str) -> Result<&PathDefinition, CollaboratorError> {
        self.paths
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CollaboratorError::MissingPathDefinition {
                name: name.to_string(),
            })
    }

    pub fn via(&self, name: &str) -> Result<&ViaDefinition, CollaboratorError> {
        self.vias
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| CollaboratorError::MissingViaDefinition {
                name: name.to_string(),
            })
    }

    /// Clamp a user-unit width into the named path's range.
    pub fn clamp_path_width(&self, name: &str, width: f64) -> Result<f64, CollaboratorError> {
        Ok(self.path(name)?.clamp_width(width))
    }
}
