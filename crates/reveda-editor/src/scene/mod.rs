//! The editor scene: items, selection, history and the active edit mode.
//!
//! All pointer input reaches the scene already in scene coordinates. The
//! scene snaps it, interprets it according to the current [`EditMode`] and
//! turns completed gestures into commands on its [`UndoStack`].

mod align;
mod draw;
mod layout_ops;
mod navigate;
mod nets;
mod pointer;
mod select;
mod transform;

pub use align::{AlignReference, AlignRequest};
pub use navigate::ViewRequest;

use reveda_core::{CollaboratorError, EditError};
use tracing::span::EnteredSpan;
use tracing::{debug, field, info, info_span, warn, Span};

use crate::commands::EditCommand;
use crate::edit_mode::{AlignDraft, EditMode, ModeKind, SceneKind, DRAFT_ID};
use crate::geometry::{Point, Rect};
use crate::item_store::ItemStore;
use crate::layout::{LayerTable, ProcessRules};
use crate::model::{Item, ItemId, LayerKey, SceneModel, Shape};
use crate::selection::SelectionSet;
use crate::serialization::{DesignData, DesignMetadata, ItemData, FORMAT_VERSION};
use crate::session::{SessionContext, ViewTuple};
use crate::snap::GridConfig;
use crate::undo::UndoStack;

pub struct EditorScene {
    kind: SceneKind,
    model: SceneModel,
    undo: UndoStack,
    mode: EditMode,
    context: SessionContext,
    hit_tolerance: f64,
    fit_padding: f64,
    partial_selection: bool,
    read_only: bool,
    scene_rect: Rect,
    layers: LayerTable,
    current_layer: Option<LayerKey>,
    drc_markers: Vec<Vec<Point>>,
    view_requests: Vec<ViewRequest>,
    last_pointer: Option<Point>,
    span: Span,
}

impl EditorScene {
    pub fn new(kind: SceneKind, context: &SessionContext) -> Self {
        let config = &context.config;
        let hit_tolerance = config
            .selection
            .hit_tolerance
            .unwrap_or(context.grid.snap_distance() / 2.0);
        let layers = match (&context.process, kind) {
            (Some(process), SceneKind::Layout) => process.layer_table(),
            _ => LayerTable::new(),
        };
        let canvas = Rect::new(0.0, 0.0, config.view.canvas_width, config.view.canvas_height);
        Self {
            kind,
            model: SceneModel::new(),
            undo: UndoStack::with_limit(config.history.undo_limit),
            mode: EditMode::default(),
            context: context.clone(),
            hit_tolerance,
            fit_padding: config.view.fit_padding,
            partial_selection: config.selection.partial_selection,
            read_only: false,
            scene_rect: canvas,
            layers,
            current_layer: None,
            drc_markers: Vec::new(),
            view_requests: Vec::new(),
            last_pointer: None,
            span: info_span!("scene", kind = %kind, view = field::Empty),
        }
    }

    /// Tag this scene's log output with the cell view it edits.
    pub fn set_view_identity(&mut self, view: &ViewTuple) {
        self.span.record("view", field::display(view));
    }

    fn enter_span(&self) -> EnteredSpan {
        self.span.clone().entered()
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn model(&self) -> &SceneModel {
        &self.model
    }

    pub fn items(&self) -> &ItemStore {
        &self.model.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.model.items.get(id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.model.selection
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.model.selection.contains(id)
    }

    /// Items to draw highlighted, in selection order.
    pub fn highlighted_items(&self) -> Vec<ItemId> {
        self.model.selection.to_vec()
    }

    pub fn origin(&self) -> Point {
        self.model.origin
    }

    pub fn grid(&self) -> &GridConfig {
        &self.context.grid
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn process(&self) -> Option<&ProcessRules> {
        self.context.process.as_deref()
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance
    }

    pub fn partial_selection(&self) -> bool {
        self.partial_selection
    }

    /// Rubber band selects intersecting items when on, contained items when
    /// off.
    pub fn set_partial_selection(&mut self, partial: bool) {
        self.partial_selection = partial;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// A read-only scene ignores all pointer input.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.mode = EditMode::default();
        }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub fn message_text(&self) -> String {
        self.context.messages.borrow().text().to_string()
    }

    fn message(&self, text: impl Into<String>) {
        self.context.message(text);
    }

    /// Report a rejected gesture on the message line.
    pub(crate) fn report(&self, err: &EditError) {
        debug!(error = %err, "gesture rejected");
        self.message(err.to_string());
    }

    /// Log a collaborator failure; the dependent action is skipped.
    fn report_collaborator(&self, err: &CollaboratorError) {
        warn!(error = %err, "collaborator lookup failed");
        self.message(err.to_string());
    }

    /// Whether an item can be picked by clicks and rubber bands.
    fn is_pickable(&self, item: &Item) -> bool {
        self.layers.is_pickable(item.layer.as_ref())
    }

    fn items_at(&self, p: Point) -> Vec<ItemId> {
        self.model
            .items
            .items_at(p, self.hit_tolerance, |item| self.is_pickable(item))
    }

    /// Apply a command and record it.
    fn push(&mut self, cmd: EditCommand) {
        self.undo.push(cmd, &mut self.model);
    }

    /// Switch edit mode, discarding any gesture in progress.
    ///
    /// This is the only way the mode changes.
    pub fn set_mode(&mut self, kind: ModeKind) -> Result<(), EditError> {
        let _span = self.enter_span();
        self.check_supported(kind)?;
        self.install_mode(EditMode::from(kind));
        Ok(())
    }

    fn check_supported(&self, kind: ModeKind) -> Result<(), EditError> {
        if self.kind.supports(kind) {
            return Ok(());
        }
        let err = EditError::ModeNotSupported {
            mode: kind.name().to_string(),
            kind: self.kind.name().to_string(),
        };
        warn!(mode = %kind, scene = %self.kind, "unsupported edit mode");
        self.report(&err);
        Err(err)
    }

    fn install_mode(&mut self, mode: EditMode) {
        let previous = self.mode.kind();
        if self.mode.has_draft() {
            debug!(mode = %previous, "discarding gesture in progress");
        }
        let kind = mode.kind();
        self.mode = mode;
        debug!(from = %previous, to = %kind, "edit mode changed");
        self.message(kind.status_text());
    }

    /// Return to item selection after a completed gesture.
    fn finish_gesture(&mut self) {
        self.mode = EditMode::default();
    }

    /// Escape: drop the gesture in progress and return to selection.
    pub fn cancel(&mut self) {
        self.install_mode(EditMode::default());
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn undo(&mut self) -> Result<bool, EditError> {
        let _span = self.enter_span();
        let done = self.undo.undo(&mut self.model)?;
        if !done {
            self.message("Nothing to undo");
        }
        Ok(done)
    }

    pub fn redo(&mut self) -> Result<bool, EditError> {
        let _span = self.enter_span();
        let done = self.undo.redo(&mut self.model)?;
        if !done {
            self.message("Nothing to redo");
        }
        Ok(done)
    }

    pub fn begin_macro(&mut self, name: impl Into<String>) {
        self.undo.begin_macro(name);
    }

    pub fn end_macro(&mut self) {
        self.undo.end_macro();
    }

    /// Unsaved changes exist.
    pub fn is_modified(&self) -> bool {
        !self.undo.is_clean()
    }

    pub fn set_clean(&mut self) {
        self.undo.set_clean();
    }

    /// Replace the scene contents with a loaded design.
    ///
    /// The loaded state is the new baseline: history, selection and mode are
    /// reset and the view is fitted to the items.
    pub fn load_design(&mut self, design: DesignData) {
        let _span = self.enter_span();
        self.mode = EditMode::default();
        self.model.selection.clear();
        self.model.items.clear();
        self.model.origin = design.origin;
        for data in design.items {
            let id = self.model.items.allocate_id();
            self.model.items.insert(data.into_item(id));
        }
        self.undo.clear();
        self.undo.set_clean();
        self.drc_markers.clear();
        info!(scene = %self.kind, items = self.model.items.len(), "design loaded");
        self.fit_items_in_view();
    }

    pub fn design_data(&self) -> DesignData {
        DesignData {
            version: FORMAT_VERSION,
            metadata: DesignMetadata::default(),
            origin: self.model.origin,
            items: self.model.items.iter().map(ItemData::from_item).collect(),
        }
    }

    /// Preview items for the gesture in progress.
    ///
    /// Move and copy previews carry the ids of the items they stand for;
    /// new geometry carries [`DRAFT_ID`].
    pub fn draft_items(&self) -> Vec<Item> {
        match &self.mode {
            EditMode::MoveItem(Some(drag)) | EditMode::CopyItem(Some(drag)) => drag
                .ids
                .iter()
                .zip(&drag.starts)
                .filter_map(|(id, start)| {
                    let item = self.model.items.get(*id)?;
                    Some(item.clone().with_pos(*start + drag.offset))
                })
                .collect(),
            EditMode::StretchItem(Some(grab)) => vec![grab.preview.clone()],
            EditMode::DrawRect(Some(band)) => {
                vec![self.draft_item(Shape::rect(band.rect()))]
            }
            EditMode::DrawPin(pin) => pin
                .band
                .map(|band| vec![self.draft_item(Shape::rect(band.rect()))])
                .unwrap_or_default(),
            EditMode::DrawLine(Some(line))
            | EditMode::CutShape(Some(line))
            | EditMode::AlignItems(AlignDraft {
                line: Some(line), ..
            }) => vec![self.draft_item(Shape::line(line.start, line.end))],
            EditMode::DrawWire(Some(line)) => {
                vec![self.draft_item(Shape::net(line.start, line.end))]
            }
            EditMode::DrawPath(path) => {
                let mut points = path.draft.points.clone();
                points.extend(path.draft.current);
                polyline_preview(&points)
                    .into_iter()
                    .map(|shape| self.draft_item(shape))
                    .collect()
            }
            EditMode::DrawPolygon(draft) => {
                let mut points = draft.points.clone();
                points.extend(draft.current);
                polyline_preview(&points)
                    .into_iter()
                    .map(|shape| self.draft_item(shape))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn draft_item(&self, shape: Shape) -> Item {
        Item::new(DRAFT_ID, shape)
    }

    /// Rectangle of a rubber-band selection or zoom in progress.
    pub fn rubber_band_rect(&self) -> Option<Rect> {
        match &self.mode {
            EditMode::SelectItem(state) => state.rubber_band.map(|(band, _)| band.rect()),
            EditMode::ZoomView(Some(band)) => Some(band.rect()),
            _ => None,
        }
    }

    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    pub fn current_layer(&self) -> Option<&LayerKey> {
        self.current_layer.as_ref()
    }

    /// Items on visible layers, in drawing order.
    pub fn visible_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self
            .model
            .items
            .iter()
            .filter(|item| self.layers.is_visible(item.layer.as_ref()))
            .collect();
        items.sort_by_key(|item| item.z);
        items
    }

    pub fn drc_markers(&self) -> &[Vec<Point>] {
        &self.drc_markers
    }
}

fn polyline_preview(points: &[Point]) -> Vec<Shape> {
    points
        .windows(2)
        .map(|w| Shape::line(w[0], w[1]))
        .collect()
}
