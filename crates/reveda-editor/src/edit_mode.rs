//! Edit modes and the transient state each one carries.
//!
//! [`ModeKind`] is the plain enumeration used by key bindings and menus.
//! [`EditMode`] is the active mode together with exactly the in-progress
//! draft that mode needs, so a draft can never outlive its mode.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Point, Rect, Segment};
use crate::model::{Item, ItemId, LayerKey, PinDirection};
use crate::selection::{ItemCycler, SelectionOp};

/// Placeholder id carried by draft previews that are not in the scene yet.
pub const DRAFT_ID: ItemId = ItemId(u64::MAX);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    SelectItem,
    DeleteItem,
    MoveItem,
    CopyItem,
    RotateItem,
    ChangeOrigin,
    ZoomView,
    PanView,
    StretchItem,
    AlignItems,
    DrawRect,
    DrawLine,
    DrawWire,
    DrawPath,
    DrawPin,
    DrawLabel,
    DrawPolygon,
    DrawVia,
    AddInstance,
    CutShape,
}

impl ModeKind {
    pub const ALL: [ModeKind; 20] = [
        ModeKind::SelectItem,
        ModeKind::DeleteItem,
        ModeKind::MoveItem,
        ModeKind::CopyItem,
        ModeKind::RotateItem,
        ModeKind::ChangeOrigin,
        ModeKind::ZoomView,
        ModeKind::PanView,
        ModeKind::StretchItem,
        ModeKind::AlignItems,
        ModeKind::DrawRect,
        ModeKind::DrawLine,
        ModeKind::DrawWire,
        ModeKind::DrawPath,
        ModeKind::DrawPin,
        ModeKind::DrawLabel,
        ModeKind::DrawPolygon,
        ModeKind::DrawVia,
        ModeKind::AddInstance,
        ModeKind::CutShape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModeKind::SelectItem => "Select Item",
            ModeKind::DeleteItem => "Delete Item",
            ModeKind::MoveItem => "Move Item",
            ModeKind::CopyItem => "Copy Item",
            ModeKind::RotateItem => "Rotate Item",
            ModeKind::ChangeOrigin => "Change Origin",
            ModeKind::ZoomView => "Zoom View",
            ModeKind::PanView => "Pan View",
            ModeKind::StretchItem => "Stretch Item",
            ModeKind::AlignItems => "Align Items",
            ModeKind::DrawRect => "Draw Rectangle",
            ModeKind::DrawLine => "Draw Line",
            ModeKind::DrawWire => "Draw Wire",
            ModeKind::DrawPath => "Draw Path",
            ModeKind::DrawPin => "Draw Pin",
            ModeKind::DrawLabel => "Draw Label",
            ModeKind::DrawPolygon => "Draw Polygon",
            ModeKind::DrawVia => "Draw Via",
            ModeKind::AddInstance => "Add Instance",
            ModeKind::CutShape => "Cut Shape",
        }
    }

    /// Message line text shown while the mode is active.
    pub fn status_text(self) -> &'static str {
        match self {
            ModeKind::SelectItem => "Select Item",
            ModeKind::DeleteItem => "Click on an item to delete it",
            ModeKind::MoveItem => "Press on the selection and drag to move it",
            ModeKind::CopyItem => "Press on the selection and drag to copy it",
            ModeKind::RotateItem => "Click on the rotation centre",
            ModeKind::ChangeOrigin => "Click on the new origin",
            ModeKind::ZoomView => "Drag a rectangle to zoom into",
            ModeKind::PanView => "Click on the new view centre or drag to pan",
            ModeKind::StretchItem => "Drag a corner or end point of a selected item",
            ModeKind::AlignItems => "Draw the alignment reference line",
            ModeKind::DrawRect => "Press and drag to draw a rectangle",
            ModeKind::DrawLine => "Press and drag to draw a line",
            ModeKind::DrawWire => "Press and drag to draw a wire",
            ModeKind::DrawPath => "Click path points, double-click or Enter to finish",
            ModeKind::DrawPin => "Press and drag to draw a pin",
            ModeKind::DrawLabel => "Click to place the label",
            ModeKind::DrawPolygon => "Click polygon points, double-click or Enter to finish",
            ModeKind::DrawVia => "Click to place the via",
            ModeKind::AddInstance => "Click to place the instance",
            ModeKind::CutShape => "Draw a horizontal or vertical cut line",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The editor flavour a scene belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Schematic,
    Symbol,
    Layout,
}

impl SceneKind {
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Schematic => "schematic",
            SceneKind::Symbol => "symbol",
            SceneKind::Layout => "layout",
        }
    }

    pub fn supports(self, mode: ModeKind) -> bool {
        use ModeKind::*;
        match mode {
            SelectItem | DeleteItem | MoveItem | CopyItem | RotateItem | ZoomView | PanView
            | StretchItem | AlignItems | DrawPin | DrawLabel => true,
            DrawWire => self == SceneKind::Schematic,
            DrawLine => self == SceneKind::Symbol,
            ChangeOrigin | DrawRect | DrawPolygon => self != SceneKind::Schematic,
            AddInstance => self != SceneKind::Symbol,
            DrawPath | DrawVia | CutShape => self == SceneKind::Layout,
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rectangle spanned by a press point and the current pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub origin: Point,
    pub current: Point,
}

impl DragRect {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            current: origin,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.current)
    }
}

/// A two-point draft: wires, lines, cut lines and alignment references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDraft {
    pub start: Point,
    pub end: Point,
}

impl LineDraft {
    pub fn new(start: Point) -> Self {
        Self { start, end: start }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectState {
    pub rubber_band: Option<(DragRect, SelectionOp)>,
    pub cycler: Option<ItemCycler>,
}

/// Items being dragged by a move or copy. Scene items stay untouched until
/// release; previews are derived from the start positions and the offset.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDrag {
    pub ids: Vec<ItemId>,
    pub starts: Vec<Point>,
    pub anchor: Point,
    pub offset: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StretchGrab {
    pub id: ItemId,
    /// Index into the item's defining points.
    pub index: usize,
    /// Defining points before the drag, in item-local coordinates.
    pub before: Vec<Point>,
    pub preview: Item,
}

/// Alignment axis and edge used by reference-line and edge alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignEdge {
    #[default]
    Top,
    HCenter,
    Bottom,
    Left,
    VCenter,
    Right,
}

impl AlignEdge {
    /// Top, horizontal centre and bottom line items up along a horizontal
    /// line.
    pub fn is_horizontal(self) -> bool {
        matches!(self, AlignEdge::Top | AlignEdge::HCenter | AlignEdge::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignSettings {
    pub edge: AlignEdge,
    /// Distribute the items with this gap between neighbours.
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignDraft {
    pub settings: AlignSettings,
    pub line: Option<LineDraft>,
}

/// Direction constraint applied to each new path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// Horizontal or vertical, whichever is closer.
    #[default]
    Manhattan,
    /// Manhattan or 45 degrees.
    Diagonal,
    Any,
    Horizontal,
    Vertical,
}

impl PathMode {
    /// The allowed end point closest to `p` for a segment starting at `from`.
    pub fn constrain(self, from: Point, p: Point) -> Point {
        let d = p - from;
        match self {
            PathMode::Any => p,
            PathMode::Horizontal => Point::new(p.x, from.y),
            PathMode::Vertical => Point::new(from.x, p.y),
            PathMode::Manhattan => {
                if d.x.abs() >= d.y.abs() {
                    Point::new(p.x, from.y)
                } else {
                    Point::new(from.x, p.y)
                }
            }
            PathMode::Diagonal => {
                let (ax, ay) = (d.x.abs(), d.y.abs());
                if ay <= ax / 2.0 {
                    Point::new(p.x, from.y)
                } else if ax <= ay / 2.0 {
                    Point::new(from.x, p.y)
                } else {
                    let run = ax.min(ay);
                    Point::new(from.x + run.copysign(d.x), from.y + run.copysign(d.y))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
    pub mode: PathMode,
    pub width: f64,
    pub definition: Option<String>,
    pub layer: Option<LayerKey>,
    pub start_extend: f64,
    pub end_extend: f64,
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self {
            mode: PathMode::Manhattan,
            width: 1.0,
            definition: None,
            layer: None,
            start_extend: 0.0,
            end_extend: 0.0,
        }
    }
}

/// Point-list drafts for paths and polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointListDraft {
    pub points: Vec<Point>,
    /// Rubber segment end following the pointer.
    pub current: Option<Point>,
}

impl PointListDraft {
    /// Add a vertex, ignoring a repeat of the last one.
    pub fn push(&mut self, p: Point) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDraft {
    pub template: PathTemplate,
    pub draft: PointListDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinTemplate {
    pub name: String,
    pub direction: PinDirection,
    pub layer: Option<LayerKey>,
}

impl Default for PinTemplate {
    fn default() -> Self {
        Self {
            name: "pin".to_string(),
            direction: PinDirection::Input,
            layer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PinDraft {
    pub template: PinTemplate,
    pub band: Option<DragRect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelTemplate {
    pub text: String,
    pub height: f64,
    pub layer: Option<LayerKey>,
}

impl Default for LabelTemplate {
    fn default() -> Self {
        Self {
            text: "label".to_string(),
            height: 10.0,
            layer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelDraft {
    pub template: LabelTemplate,
    pub at: Option<Point>,
}

/// A resolved via definition ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ViaTemplate {
    pub definition: String,
    pub layer: Option<LayerKey>,
    pub width: f64,
    pub height: f64,
    pub rows: u32,
    pub cols: u32,
    pub x_spacing: f64,
    pub y_spacing: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViaDraft {
    pub template: Option<ViaTemplate>,
    pub at: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTemplate {
    pub library: String,
    pub cell: String,
    pub view: String,
    /// Cell extent relative to the placement point.
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceDraft {
    pub template: Option<InstanceTemplate>,
    pub at: Option<Point>,
}

/// The active edit mode and its in-progress state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    SelectItem(SelectState),
    DeleteItem,
    MoveItem(Option<GroupDrag>),
    CopyItem(Option<GroupDrag>),
    RotateItem,
    ChangeOrigin,
    ZoomView(Option<DragRect>),
    PanView(Option<Point>),
    StretchItem(Option<StretchGrab>),
    AlignItems(AlignDraft),
    DrawRect(Option<DragRect>),
    DrawLine(Option<LineDraft>),
    DrawWire(Option<LineDraft>),
    DrawPath(PathDraft),
    DrawPin(PinDraft),
    DrawLabel(LabelDraft),
    DrawPolygon(PointListDraft),
    DrawVia(ViaDraft),
    AddInstance(InstanceDraft),
    CutShape(Option<LineDraft>),
}

impl Default for EditMode {
    fn default() -> Self {
        EditMode::SelectItem(SelectState::default())
    }
}

impl From<ModeKind> for EditMode {
    fn from(kind: ModeKind) -> Self {
        match kind {
            ModeKind::SelectItem => EditMode::SelectItem(SelectState::default()),
            ModeKind::DeleteItem => EditMode::DeleteItem,
            ModeKind::MoveItem => EditMode::MoveItem(None),
            ModeKind::CopyItem => EditMode::CopyItem(None),
            ModeKind::RotateItem => EditMode::RotateItem,
            ModeKind::ChangeOrigin => EditMode::ChangeOrigin,
            ModeKind::ZoomView => EditMode::ZoomView(None),
            ModeKind::PanView => EditMode::PanView(None),
            ModeKind::StretchItem => EditMode::StretchItem(None),
            ModeKind::AlignItems => EditMode::AlignItems(AlignDraft::default()),
            ModeKind::DrawRect => EditMode::DrawRect(None),
            ModeKind::DrawLine => EditMode::DrawLine(None),
            ModeKind::DrawWire => EditMode::DrawWire(None),
            ModeKind::DrawPath => EditMode::DrawPath(PathDraft::default()),
            ModeKind::DrawPin => EditMode::DrawPin(PinDraft::default()),
            ModeKind::DrawLabel => EditMode::DrawLabel(LabelDraft::default()),
            ModeKind::DrawPolygon => EditMode::DrawPolygon(PointListDraft::default()),
            ModeKind::DrawVia => EditMode::DrawVia(ViaDraft::default()),
            ModeKind::AddInstance => EditMode::AddInstance(InstanceDraft::default()),
            ModeKind::CutShape => EditMode::CutShape(None),
        }
    }
}

impl EditMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            EditMode::SelectItem(_) => ModeKind::SelectItem,
            EditMode::DeleteItem => ModeKind::DeleteItem,
            EditMode::MoveItem(_) => ModeKind::MoveItem,
            EditMode::CopyItem(_) => ModeKind::CopyItem,
            EditMode::RotateItem => ModeKind::RotateItem,
            EditMode::ChangeOrigin => ModeKind::ChangeOrigin,
            EditMode::ZoomView(_) => ModeKind::ZoomView,
            EditMode::PanView(_) => ModeKind::PanView,
            EditMode::StretchItem(_) => ModeKind::StretchItem,
            EditMode::AlignItems(_) => ModeKind::AlignItems,
            EditMode::DrawRect(_) => ModeKind::DrawRect,
            EditMode::DrawLine(_) => ModeKind::DrawLine,
            EditMode::DrawWire(_) => ModeKind::DrawWire,
            EditMode::DrawPath(_) => ModeKind::DrawPath,
            EditMode::DrawPin(_) => ModeKind::DrawPin,
            EditMode::DrawLabel(_) => ModeKind::DrawLabel,
            EditMode::DrawPolygon(_) => ModeKind::DrawPolygon,
            EditMode::DrawVia(_) => ModeKind::DrawVia,
            EditMode::AddInstance(_) => ModeKind::AddInstance,
            EditMode::CutShape(_) => ModeKind::CutShape,
        }
    }

    /// Whether a gesture is in progress.
    pub fn has_draft(&self) -> bool {
        match self {
            EditMode::SelectItem(state) => state.rubber_band.is_some(),
            EditMode::DeleteItem
            | EditMode::RotateItem
            | EditMode::ChangeOrigin => false,
            EditMode::MoveItem(drag) | EditMode::CopyItem(drag) => drag.is_some(),
            EditMode::ZoomView(band) | EditMode::DrawRect(band) => band.is_some(),
            EditMode::PanView(anchor) => anchor.is_some(),
            EditMode::StretchItem(grab) => grab.is_some(),
            EditMode::AlignItems(draft) => draft.line.is_some(),
            EditMode::DrawLine(line) | EditMode::DrawWire(line) | EditMode::CutShape(line) => {
                line.is_some()
            }
            EditMode::DrawPath(path) => !path.draft.points.is_empty(),
            EditMode::DrawPolygon(draft) => !draft.points.is_empty(),
            EditMode::DrawPin(pin) => pin.band.is_some(),
            EditMode::DrawLabel(label) => label.at.is_some(),
            EditMode::DrawVia(via) => via.at.is_some(),
            EditMode::AddInstance(instance) => instance.at.is_some(),
        }
    }
}
