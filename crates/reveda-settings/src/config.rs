//! Editor configuration for Revolution EDA
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Grid settings (major grid, snap steps, drawing style)
//! - Selection settings (partial selection, hit tolerance)
//! - History settings (undo depth)
//! - View settings (wheel zoom, fit padding, zoom limits)

use reveda_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_MAJOR_GRID, DEFAULT_SNAP_GRID,
    DEFAULT_UNDO_LIMIT, FIT_PADDING, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_FACTOR,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Background grid drawing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    /// A dot at every grid intersection
    #[default]
    Dots,
    /// Full horizontal and vertical lines
    Lines,
    /// No background grid
    None,
}

impl std::fmt::Display for GridStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dots => write!(f, "Dots"),
            Self::Lines => write!(f, "Lines"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Grid and snap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Spacing of the drawn background grid
    pub major_grid: f64,
    /// Default snap step for both axes
    pub snap_grid: f64,
    /// Horizontal snap override
    pub snap_x: Option<f64>,
    /// Vertical snap override
    pub snap_y: Option<f64>,
    /// Background grid style
    pub style: GridStyle,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            major_grid: DEFAULT_MAJOR_GRID,
            snap_grid: DEFAULT_SNAP_GRID,
            snap_x: None,
            snap_y: None,
            style: GridStyle::default(),
        }
    }
}

impl GridSettings {
    /// Per-axis snap steps, falling back to `snap_grid`.
    pub fn snap_tuple(&self) -> (f64, f64) {
        (
            self.snap_x.unwrap_or(self.snap_grid),
            self.snap_y.unwrap_or(self.snap_grid),
        )
    }
}

/// Selection behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionSettings {
    /// Rubber band selects intersecting items instead of contained ones
    pub partial_selection: bool,
    /// Pick distance for thin shapes; half the smaller snap step when unset
    pub hit_tolerance: Option<f64>,
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of top-level undo entries
    pub undo_limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

/// View navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Scale applied per wheel notch
    pub wheel_zoom_factor: f64,
    /// Padding in scene units around fitted content
    pub fit_padding: f64,
    /// Minimum viewport zoom
    pub min_zoom: f64,
    /// Maximum viewport zoom
    pub max_zoom: f64,
    /// Initial viewport width in pixels
    pub canvas_width: f64,
    /// Initial viewport height in pixels
    pub canvas_height: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            wheel_zoom_factor: WHEEL_ZOOM_FACTOR,
            fit_padding: FIT_PADDING,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid and snap settings
    pub grid: GridSettings,
    /// Selection settings
    pub selection: SelectionSettings,
    /// Undo history settings
    pub history: HistorySettings,
    /// View settings
    pub view: ViewSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Load the config at `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(path = %path.display(), "no editor config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |key: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
        };

        positive("grid.major_grid", self.grid.major_grid)?;
        positive("grid.snap_grid", self.grid.snap_grid)?;
        let (snap_x, snap_y) = self.grid.snap_tuple();
        positive("grid.snap_x", snap_x)?;
        positive("grid.snap_y", snap_y)?;

        if let Some(tolerance) = self.selection.hit_tolerance {
            positive("selection.hit_tolerance", tolerance)?;
        }

        if self.history.undo_limit == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "history.undo_limit".to_string(),
                value: "0".to_string(),
            });
        }

        if self.view.wheel_zoom_factor.is_nan() || self.view.wheel_zoom_factor <= 1.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.wheel_zoom_factor".to_string(),
                value: self.view.wheel_zoom_factor.to_string(),
            });
        }
        if self.view.fit_padding < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.fit_padding".to_string(),
                value: self.view.fit_padding.to_string(),
            });
        }
        positive("view.min_zoom", self.view.min_zoom)?;
        if self.view.min_zoom >= self.view.max_zoom {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.max_zoom".to_string(),
                value: self.view.max_zoom.to_string(),
            });
        }
        positive("view.canvas_width", self.view.canvas_width)?;
        positive("view.canvas_height", self.view.canvas_height)?;

        Ok(())
    }

    /// Pick distance used for hit-testing thin shapes.
    pub fn hit_tolerance(&self) -> f64 {
        let (snap_x, snap_y) = self.grid.snap_tuple();
        self.selection
            .hit_tolerance
            .unwrap_or(snap_x.min(snap_y) / 2.0)
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Default location of the editor config file.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no platform config directory".to_string())
    })?;
    Ok(dir.join("reveda").join("editor.toml"))
}
