//! Error handling for Revolution EDA
//!
//! Errors are split by who caused them:
//! - Edit errors (user input and invalid geometry within one gesture)
//! - Collaborator errors (persistence, process and layer lookups)
//!
//! Neither kind is fatal. Edit errors end up on the message line; collaborator
//! errors are logged and the dependent operation becomes a no-op.

use thiserror::Error;

/// Edit error type
///
/// Raised while interpreting a user gesture. The gesture is aborted with no
/// partial mutation and no undo entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Operation needs a minimum number of selected items
    #[error("Select at least {required} items (currently {found})")]
    TooFewSelected {
        /// Minimum number of items required.
        required: usize,
        /// Number of items actually selected.
        found: usize,
    },

    /// Operation needs a selection
    #[error("Nothing selected")]
    NothingSelected,

    /// Gesture produced zero-size geometry
    #[error("Degenerate {what} discarded")]
    DegenerateGeometry {
        /// The kind of geometry that collapsed.
        what: String,
    },

    /// Mode is not available for this kind of editor
    #[error("{mode} is not available in a {kind} editor")]
    ModeNotSupported {
        /// The requested mode name.
        mode: String,
        /// The editor kind.
        kind: String,
    },

    /// Only quarter turns are supported
    #[error("Rotation by {degrees} degrees is not supported")]
    UnsupportedAngle {
        /// The rejected angle in degrees.
        degrees: i32,
    },

    /// Undo or redo was requested while a macro is being recorded
    #[error("Cannot undo or redo while a macro is open")]
    MacroOpen,

    /// Scene does not accept edits
    #[error("Editor is read-only")]
    ReadOnly,

    /// Cut line crossed a shape that cannot be split
    #[error("{what} cannot be cut")]
    NotCuttable {
        /// The kind of shape that was crossed.
        what: String,
    },
}

/// Collaborator error type
///
/// Failures of the persistence layer or the process/PDK lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    /// Design file could not be read or decoded
    #[error("Failed to load {path}: {reason}")]
    LoadFailed {
        /// The file that failed to load.
        path: String,
        /// The underlying reason.
        reason: String,
    },

    /// Design file could not be written
    #[error("Failed to save {path}: {reason}")]
    SaveFailed {
        /// The file that failed to save.
        path: String,
        /// The underlying reason.
        reason: String,
    },

    /// Layer is not defined by the process
    #[error("Layer {name}.{purpose} is not defined")]
    MissingLayer {
        /// Layer name.
        name: String,
        /// Layer purpose.
        purpose: String,
    },

    /// Path definition is not provided by the process
    #[error("Path definition '{name}' is not defined")]
    MissingPathDefinition {
        /// Path definition name.
        name: String,
    },

    /// Via definition is not provided by the process
    #[error("Via definition '{name}' is not defined")]
    MissingViaDefinition {
        /// Via definition name.
        name: String,
    },

    /// Quantity string could not be parsed
    #[error("Invalid quantity '{input}'")]
    InvalidQuantity {
        /// The rejected text.
        input: String,
    },
}

/// Main error type for Revolution EDA
#[derive(Error, Debug)]
pub enum Error {
    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Collaborator error
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error belongs on the message line
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }

    /// Check if this error came from a collaborator
    pub fn is_collaborator_error(&self) -> bool {
        matches!(
            self,
            Error::Collaborator(_) | Error::Io(_) | Error::Json(_)
        )
    }
}

/// Result type for Revolution EDA operations
pub type Result<T> = std::result::Result<T, Error>;
