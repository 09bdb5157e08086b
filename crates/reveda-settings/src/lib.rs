//! Revolution EDA Settings Crate
//!
//! Handles editor configuration: grid and snap steps, selection behaviour,
//! undo history depth and view navigation limits.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, EditorConfig, GridSettings, GridStyle, HistorySettings,
    SelectionSettings, ViewSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
