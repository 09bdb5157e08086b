//! Editor session: the explicit context handed to every scene and view,
//! plus the registry of open views.

use indexmap::IndexMap;
use reveda_core::{shared, CollaboratorError, MessageLine, Shared};
use reveda_settings::EditorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::{error, info, warn};

use crate::edit_mode::SceneKind;
use crate::layout::ProcessRules;
use crate::scene::EditorScene;
use crate::serialization::DesignStore;
use crate::snap::GridConfig;
use crate::view::EditorView;

/// Identity of one cell view: library, cell and view name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewTuple {
    pub library: String,
    pub cell: String,
    pub view: String,
}

impl ViewTuple {
    pub fn new(
        library: impl Into<String>,
        cell: impl Into<String>,
        view: impl Into<String>,
    ) -> Self {
        Self {
            library: library.into(),
            cell: cell.into(),
            view: view.into(),
        }
    }
}

impl fmt::Display for ViewTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.library, self.cell, self.view)
    }
}

/// Registry of the views currently open in the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenViews {
    views: IndexMap<ViewTuple, SceneKind>,
}

impl OpenViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, view: ViewTuple, kind: SceneKind) {
        self.views.insert(view, kind);
    }

    pub fn unregister(&mut self, view: &ViewTuple) -> Option<SceneKind> {
        self.views.shift_remove(view)
    }

    pub fn contains(&self, view: &ViewTuple) -> bool {
        self.views.contains_key(view)
    }

    pub fn kind_of(&self, view: &ViewTuple) -> Option<SceneKind> {
        self.views.get(view).copied()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ViewTuple, SceneKind)> {
        self.views.iter().map(|(tuple, kind)| (tuple, *kind))
    }
}

/// Everything a scene needs from its host.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub config: Rc<EditorConfig>,
    pub grid: Rc<GridConfig>,
    pub messages: Shared<MessageLine>,
    pub process: Option<Rc<ProcessRules>>,
    pub open_views: Shared<OpenViews>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl SessionContext {
    pub fn new(config: EditorConfig) -> Self {
        let grid = GridConfig::from_settings(&config.grid);
        Self {
            config: Rc::new(config),
            grid: Rc::new(grid),
            messages: shared(MessageLine::new()),
            process: None,
            open_views: shared(OpenViews::new()),
        }
    }

    pub fn with_process(mut self, process: ProcessRules) -> Self {
        self.process = Some(Rc::new(process));
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = Rc::new(grid);
        self
    }

    /// Write user-facing text to the message line.
    pub fn message(&self, text: impl Into<String>) {
        self.messages.borrow_mut().set_text(text);
    }
}

/// Open editor views keyed by cell view.
pub struct EditorSession {
    context: SessionContext,
    views: IndexMap<ViewTuple, EditorView>,
}

impl EditorSession {
    pub fn new(context: SessionContext) -> Self {
        Self {
            context,
            views: IndexMap::new(),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Open a view, or return it if it is already open.
    ///
    /// A load failure is logged and the view opens empty.
    pub fn open_view(
        &mut self,
        tuple: ViewTuple,
        kind: SceneKind,
        store: &dyn DesignStore,
    ) -> &mut EditorView {
        let context = &self.context;
        self.views.entry(tuple.clone()).or_insert_with(|| {
            let mut scene = EditorScene::new(kind, context);
            scene.set_view_identity(&tuple);
            match store.load(&tuple) {
                Ok(design) => scene.load_design(design),
                Err(e) => {
                    error!(view = %tuple, error = %e, "failed to load view");
                    context.message(e.to_string());
                }
            }
            context.open_views.borrow_mut().register(tuple.clone(), kind);
            info!(view = %tuple, kind = %kind, "opened view");
            EditorView::new(scene, &context.config.view)
        })
    }

    pub fn view(&self, tuple: &ViewTuple) -> Option<&EditorView> {
        self.views.get(tuple)
    }

    pub fn view_mut(&mut self, tuple: &ViewTuple) -> Option<&mut EditorView> {
        self.views.get_mut(tuple)
    }

    pub fn open_view_count(&self) -> usize {
        self.views.len()
    }

    /// Save a view and mark it clean.
    pub fn save_view(
        &mut self,
        tuple: &ViewTuple,
        store: &dyn DesignStore,
    ) -> Result<(), CollaboratorError> {
        let Some(view) = self.views.get_mut(tuple) else {
            warn!(view = %tuple, "save requested for a view that is not open");
            return Ok(());
        };
        store.save(tuple, &view.scene().design_data())?;
        view.scene_mut().set_clean();
        Ok(())
    }

    /// Close a view, saving it first when it has unsaved changes.
    ///
    /// A save failure is logged; the view is closed regardless.
    pub fn close_view(&mut self, tuple: &ViewTuple, store: &dyn DesignStore) -> bool {
        let Some(view) = self.views.shift_remove(tuple) else {
            return false;
        };
        if view.scene().is_modified() {
            if let Err(e) = store.save(tuple, &view.scene().design_data()) {
                error!(view = %tuple, error = %e, "failed to save view on close");
                self.context.message(e.to_string());
            }
        }
        self.context.open_views.borrow_mut().unregister(tuple);
        info!(view = %tuple, "closed view");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_views_registry() {
        let mut views = OpenViews::new();
        let tuple = ViewTuple::new("lib", "cell", "layout");
        views.register(tuple.clone(), SceneKind::Layout);
        assert!(views.contains(&tuple));
        assert_eq!(views.kind_of(&tuple), Some(SceneKind::Layout));
        assert_eq!(views.unregister(&tuple), Some(SceneKind::Layout));
        assert!(views.is_empty());
    }

    #[test]
    fn test_context_grid_follows_config() {
        let mut config = EditorConfig::default();
        config.grid.snap_grid = 5.0;
        config.grid.snap_x = None;
        config.grid.snap_y = None;
        let context = SessionContext::new(config);
        assert_eq!(context.grid.snap_grid, 5.0);
    }

    #[test]
    fn test_view_tuple_display() {
        assert_eq!(ViewTuple::new("a", "b", "c").to_string(), "a/b/c");
    }
}
