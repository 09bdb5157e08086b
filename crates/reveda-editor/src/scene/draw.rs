//! Drawing modes. A draft becomes an item only when the gesture completes,
//! as exactly one undo entry.

use reveda_core::{CollaboratorError, EditError};
use tracing::debug;

use super::EditorScene;
use crate::commands::EditCommand;
use crate::edit_mode::{
    EditMode, InstanceDraft, InstanceTemplate, LabelDraft, LabelTemplate, ModeKind, PathDraft,
    PathMode, PathTemplate, PinDraft, PinTemplate, SceneKind, ViaDraft, ViaTemplate,
};
use crate::geometry::{Point, Rect};
use crate::model::{
    InstanceShape, Item, LabelShape, LayerKey, PathShape, PinShape, Shape, ViaShape,
};

impl EditorScene {
    /// Commit a finished draft with its geometry relative to `pos`.
    fn commit_item(&mut self, shape: Shape, pos: Point, layer: Option<LayerKey>) {
        if shape.is_degenerate() {
            self.report(&EditError::DegenerateGeometry {
                what: shape.kind_name().to_string(),
            });
            self.finish_gesture();
            return;
        }
        let id = self.model.items.allocate_id();
        let mut item = Item::new(id, shape).with_pos(pos);
        if let Some(layer) = layer {
            let z = self.layers.z_of(&layer);
            item = item.with_layer(layer, z);
        }
        let kind = item.shape.kind_name();
        debug!(item = %id, kind, "committing draft");
        self.push(EditCommand::add(vec![item]));
        self.message(format!("Added {}", kind));
        self.finish_gesture();
    }

    /// Layer for new layout geometry: the template's, else the current one.
    fn drawing_layer(&self, template: Option<&LayerKey>) -> Option<LayerKey> {
        if self.kind != SceneKind::Layout {
            return None;
        }
        template.or(self.current_layer.as_ref()).cloned()
    }

    pub(super) fn draw_rect_release(&mut self, p: Point) {
        let EditMode::DrawRect(slot) = &mut self.mode else {
            return;
        };
        let Some(mut band) = slot.take() else {
            return;
        };
        band.current = p;
        let rect = band.rect();
        let layer = self.drawing_layer(None);
        let local = Rect::new(0.0, 0.0, rect.width(), rect.height());
        self.commit_item(Shape::rect(local), rect.min, layer);
    }

    pub(super) fn draw_line_release(&mut self, p: Point) {
        let (line, wire) = match &mut self.mode {
            EditMode::DrawLine(slot) => (slot.take(), false),
            EditMode::DrawWire(slot) => (slot.take(), true),
            _ => return,
        };
        let Some(mut line) = line else {
            return;
        };
        line.end = if wire {
            PathMode::Manhattan.constrain(line.start, p)
        } else {
            p
        };
        let delta = line.end - line.start;
        let shape = if wire {
            Shape::net(Point::ORIGIN, delta)
        } else {
            Shape::line(Point::ORIGIN, delta)
        };
        self.commit_item(shape, line.start, None);
    }

    pub(super) fn draw_pin_release(&mut self, p: Point) {
        let EditMode::DrawPin(pin) = &mut self.mode else {
            return;
        };
        let Some(mut band) = pin.band.take() else {
            return;
        };
        band.current = p;
        let template = pin.template.clone();
        let rect = band.rect();
        let shape = Shape::Pin(PinShape {
            rect: Rect::new(0.0, 0.0, rect.width(), rect.height()),
            name: template.name,
            direction: template.direction,
        });
        let layer = self.drawing_layer(template.layer.as_ref());
        self.commit_item(shape, rect.min, layer);
    }

    pub(super) fn place_label(&mut self, p: Point) {
        let EditMode::DrawLabel(label) = &mut self.mode else {
            return;
        };
        label.at = None;
        let template = label.template.clone();
        let shape = Shape::Label(LabelShape {
            anchor: Point::ORIGIN,
            text: template.text,
            height: template.height,
        });
        let layer = self.drawing_layer(template.layer.as_ref());
        self.commit_item(shape, p, layer);
    }

    pub(super) fn place_via(&mut self, p: Point) {
        let EditMode::DrawVia(via) = &mut self.mode else {
            return;
        };
        via.at = None;
        let Some(template) = via.template.clone() else {
            self.message("Choose a via definition before placing a via");
            self.finish_gesture();
            return;
        };
        let shape = Shape::Via(ViaShape {
            rect: Rect::from_center(Point::ORIGIN, template.width, template.height),
            definition: template.definition,
            rows: template.rows,
            cols: template.cols,
            x_spacing: template.x_spacing,
            y_spacing: template.y_spacing,
        });
        let layer = self.drawing_layer(template.layer.as_ref());
        self.commit_item(shape, p, layer);
    }

    pub(super) fn place_instance(&mut self, p: Point) {
        let EditMode::AddInstance(instance) = &mut self.mode else {
            return;
        };
        instance.at = None;
        let Some(template) = instance.template.clone() else {
            self.message("Choose a cell view to instantiate");
            self.finish_gesture();
            return;
        };
        let shape = Shape::Instance(InstanceShape {
            library: template.library,
            cell: template.cell,
            view: template.view,
            name: format!("I{}", self.next_instance_index()),
            bounds: template.bounds,
        });
        self.commit_item(shape, p, None);
    }

    /// Complete a path or polygon draft (Enter or double-click).
    pub fn finish_draft(&mut self) {
        let _span = self.enter_span();
        match &mut self.mode {
            EditMode::DrawPath(path) => {
                let points = std::mem::take(&mut path.draft.points);
                path.draft.current = None;
                let template = path.template.clone();
                let Some(&first) = points.first() else {
                    return;
                };
                let shape = Shape::Path(PathShape {
                    points: points.iter().map(|p| *p - first).collect(),
                    width: template.width,
                    start_extend: template.start_extend,
                    end_extend: template.end_extend,
                    definition: template.definition,
                });
                let layer = self.drawing_layer(template.layer.as_ref());
                self.commit_item(shape, first, layer);
            }
            EditMode::DrawPolygon(draft) => {
                let points = std::mem::take(&mut draft.points);
                draft.current = None;
                let Some(&first) = points.first() else {
                    return;
                };
                let shape = Shape::polygon(points.iter().map(|p| *p - first).collect());
                let layer = self.drawing_layer(None);
                self.commit_item(shape, first, layer);
            }
            _ => {}
        }
    }

    /// Next free `I<n>` instance number.
    pub(super) fn next_instance_index(&self) -> usize {
        self.model
            .items
            .iter()
            .filter_map(|item| match &item.shape {
                Shape::Instance(s) => s.name.strip_prefix('I')?.parse::<usize>().ok(),
                _ => None,
            })
            .max()
            .map_or(0, |n| n + 1)
    }

    /// Enter path drawing with a process path definition.
    ///
    /// `width` is in user units and is clamped to the definition's range;
    /// the definition's minimum width is used when it is not given.
    pub fn start_path(
        &mut self,
        definition: &str,
        width: Option<f64>,
        mode: PathMode,
    ) -> reveda_core::Result<()> {
        let _span = self.enter_span();
        self.check_supported(ModeKind::DrawPath)?;
        let lookup = match self.process() {
            Some(process) => process.path(definition).map(|path| {
                let units = process.units;
                let width = path.clamp_width(width.unwrap_or(path.min_width));
                let extend = units.to_dbu(path.min_width / 2.0) as f64;
                PathTemplate {
                    mode,
                    width: units.to_dbu(width) as f64,
                    definition: Some(path.name.clone()),
                    layer: Some(path.layer.clone()),
                    start_extend: extend,
                    end_extend: extend,
                }
            }),
            None => Err(CollaboratorError::MissingPathDefinition {
                name: definition.to_string(),
            }),
        };
        let template = match lookup {
            Ok(template) => template,
            Err(e) => {
                self.report_collaborator(&e);
                return Err(e.into());
            }
        };
        self.install_mode(EditMode::DrawPath(PathDraft {
            template,
            draft: Default::default(),
        }));
        Ok(())
    }

    /// Enter via placement with a `rows` x `cols` array of a process via at
    /// its minimum size and spacing.
    pub fn start_via(&mut self, definition: &str, rows: u32, cols: u32) -> reveda_core::Result<()> {
        let _span = self.enter_span();
        self.check_supported(ModeKind::DrawVia)?;
        let lookup = match self.process() {
            Some(process) => process.via(definition).map(|via| {
                let units = process.units;
                let spacing = units.to_dbu(via.min_spacing) as f64;
                ViaTemplate {
                    definition: via.name.clone(),
                    layer: Some(via.layer.clone()),
                    width: units.to_dbu(via.min_width) as f64,
                    height: units.to_dbu(via.min_height) as f64,
                    rows: rows.max(1),
                    cols: cols.max(1),
                    x_spacing: spacing,
                    y_spacing: spacing,
                }
            }),
            None => Err(CollaboratorError::MissingViaDefinition {
                name: definition.to_string(),
            }),
        };
        let template = match lookup {
            Ok(template) => template,
            Err(e) => {
                self.report_collaborator(&e);
                return Err(e.into());
            }
        };
        self.install_mode(EditMode::DrawVia(ViaDraft {
            template: Some(template),
            at: None,
        }));
        Ok(())
    }

    pub fn start_pin(&mut self, template: PinTemplate) -> Result<(), EditError> {
        self.check_supported(ModeKind::DrawPin)?;
        self.install_mode(EditMode::DrawPin(PinDraft {
            template,
            band: None,
        }));
        Ok(())
    }

    pub fn start_label(&mut self, template: LabelTemplate) -> Result<(), EditError> {
        self.check_supported(ModeKind::DrawLabel)?;
        self.install_mode(EditMode::DrawLabel(LabelDraft { template, at: None }));
        Ok(())
    }

    pub fn start_instance(&mut self, template: InstanceTemplate) -> Result<(), EditError> {
        self.check_supported(ModeKind::AddInstance)?;
        self.install_mode(EditMode::AddInstance(InstanceDraft {
            template: Some(template),
            at: None,
        }));
        Ok(())
    }
}
