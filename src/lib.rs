//! # Revolution EDA
//!
//! Interactive editing engine for schematics, symbols and layouts:
//! - One selection set, mode machine and undo history per open design
//! - Grid snapping and Manhattan wire and path drawing
//! - Schematic net clean-up with junction detection
//! - Layout layers, process rules, via arrays and DRC markers
//!
//! ## Architecture
//!
//! The workspace is split into three crates:
//!
//! 1. **reveda-core** - Error types, units, the shared message line
//! 2. **reveda-settings** - Editor configuration loaded from TOML
//! 3. **reveda-editor** - Scenes, edit modes, commands, undo and views
//!
//! This crate re-exports the public surface of all three and provides
//! logging set-up for front ends.

pub use reveda_core::{
    format_quantity, parse_quantity, CollaboratorError, DatabaseUnits, EditError, Error,
    MessageLine, Result,
};

pub use reveda_settings::{
    default_config_path, ConfigError, EditorConfig, GridSettings, GridStyle, HistorySettings,
    SelectionSettings, SettingsError, ViewSettings,
};

pub use reveda_editor::{
    AlignEdge, AlignRequest, DesignData, DesignStore, DrcReport, EditCommand, EditMode,
    EditorScene, EditorSession, EditorView, Item, ItemId, JsonDesignStore, Key, LayerKey,
    Modifiers, ModeKind, Point, PointerEvent, ProcessRules, Rect, SceneKind, SessionContext,
    Shape, UndoStack, ViewTuple, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with pretty formatting, filtered by `RUST_LOG` on top of
/// an INFO default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
