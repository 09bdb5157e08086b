//! # Revolution EDA Core
//!
//! Core types and utilities shared by the editor crates.
//! Provides the error taxonomy, editor-wide constants, SI quantity and
//! database-unit conversions, and the status message line written to by
//! editor scenes.

pub mod constants;
pub mod error;
pub mod message;
pub mod types;
pub mod units;

pub use error::{CollaboratorError, EditError, Error, Result};

pub use message::MessageLine;

// Re-export type aliases for convenience
pub use types::{shared, MessageListener, Shared};

pub use units::{format_quantity, parse_quantity, DatabaseUnits};
