//! # Revolution EDA Editor
//!
//! The interactive editing engine shared by the schematic, symbol and layout
//! editors. It is toolkit neutral: a front end feeds pointer and key events
//! to an [`EditorView`] and paints what the scene and view report back.
//!
//! ## Core Components
//!
//! - **Scene**: items, the single selection set, the edit mode and the undo
//!   stack of one open design
//! - **Edit modes**: a tagged union holding exactly the draft state of the
//!   active gesture
//! - **Commands / undo**: reversible edits with named macros and a bounded
//!   history
//! - **View**: pixel/scene mapping, wheel zoom, key bindings and the
//!   background grid
//! - **Domain rules**: schematic net clean-up, layout layers, process rules,
//!   DRC markers
//!
//! ## Architecture
//!
//! ```text
//! EditorSession (open views, shared context)
//!   └── EditorView (viewport, keys)
//!         └── EditorScene (mode dispatch)
//!               ├── SceneModel (items, selection, origin)
//!               └── UndoStack (EditCommand history)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reveda_editor::{EditorScene, ModeKind, PointerEvent, SceneKind, SessionContext};
//!
//! let context = SessionContext::default();
//! let mut scene = EditorScene::new(SceneKind::Symbol, &context);
//! scene.set_mode(ModeKind::DrawRect)?;
//! scene.handle_pointer(PointerEvent::press(13.0, 24.0));
//! scene.handle_pointer(PointerEvent::release(47.0, 81.0));
//! scene.undo()?;
//! ```

pub mod commands;
pub mod edit_mode;
pub mod geometry;
pub mod input;
pub mod item_store;
pub mod layout;
pub mod model;
pub mod scene;
pub mod schematic;
pub mod selection;
pub mod serialization;
pub mod session;
pub mod snap;
pub mod undo;
pub mod view;
pub mod viewport;

pub use commands::{CompositeCommand, EditCommand};
pub use edit_mode::{
    AlignEdge, AlignSettings, EditMode, InstanceTemplate, LabelTemplate, ModeKind, PathMode,
    PinTemplate, SceneKind, DRAFT_ID,
};
pub use geometry::{Point, Rect, Segment};
pub use input::{Key, Modifiers, MouseButton, PointerEvent, PointerKind};
pub use item_store::ItemStore;
pub use layout::{DrcReport, DrcViolation, Layer, LayerTable, ProcessRules};
pub use model::{Item, ItemId, LayerKey, SceneModel, Shape};
pub use scene::{AlignReference, AlignRequest, EditorScene, ViewRequest};
pub use selection::{ItemCycler, SelectionOp, SelectionSet};
pub use serialization::{DesignData, DesignStore, JsonDesignStore};
pub use session::{EditorSession, OpenViews, SessionContext, ViewTuple};
pub use snap::GridConfig;
pub use undo::UndoStack;
pub use view::{EditorView, GridPlan};
pub use viewport::Viewport;
