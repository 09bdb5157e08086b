//! Layout editing collaborators: layers, process rules and DRC results.

pub mod drc;
pub mod layers;
pub mod process;

pub use drc::{DrcReport, DrcViolation};
pub use layers::{Layer, LayerTable};
pub use process::{PathDefinition, ProcessRules, ViaDefinition};
