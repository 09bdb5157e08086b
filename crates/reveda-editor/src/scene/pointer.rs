//! Pointer event dispatch.

use tracing::trace;

use super::EditorScene;
use crate::edit_mode::{DragRect, EditMode, LineDraft, PathMode};
use crate::geometry::Point;
use crate::input::{Modifiers, MouseButton, PointerEvent, PointerKind};

impl EditorScene {
    /// Interpret one pointer event in scene coordinates.
    ///
    /// The position is snapped to the grid before any mode sees it.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let _span = self.enter_span();
        if self.read_only {
            return;
        }
        let p = self.context.grid.snap_to_grid(event.pos);
        self.last_pointer = Some(p);
        trace!(kind = ?event.kind, x = p.x, y = p.y, mode = %self.mode.kind(), "pointer");
        match event.kind {
            PointerKind::Press if event.button == MouseButton::Left => {
                self.on_press(p, event.modifiers)
            }
            PointerKind::Move => self.on_move(p),
            PointerKind::Release if event.button == MouseButton::Left => {
                self.on_release(p, event.modifiers)
            }
            PointerKind::DoubleClick if event.button == MouseButton::Left => {
                self.on_double_click(p)
            }
            _ => {}
        }
    }

    fn on_press(&mut self, p: Point, modifiers: Modifiers) {
        match &mut self.mode {
            EditMode::SelectItem(_) => self.select_press(p, modifiers),
            EditMode::DeleteItem => self.delete_at(p),
            EditMode::MoveItem(_) | EditMode::CopyItem(_) => self.drag_press(p),
            EditMode::RotateItem => {
                if let Err(e) = self.rotate_selected(p) {
                    self.report(&e);
                }
                self.finish_gesture();
            }
            EditMode::ChangeOrigin => self.change_origin(p),
            EditMode::ZoomView(band) | EditMode::DrawRect(band) => *band = Some(DragRect::new(p)),
            EditMode::PanView(anchor) => *anchor = Some(p),
            EditMode::StretchItem(_) => self.stretch_press(p),
            EditMode::AlignItems(draft) => draft.line = Some(LineDraft::new(p)),
            EditMode::DrawLine(line) | EditMode::DrawWire(line) | EditMode::CutShape(line) => {
                *line = Some(LineDraft::new(p))
            }
            EditMode::DrawPath(path) => {
                let p = match path.draft.points.last() {
                    Some(last) => path.template.mode.constrain(*last, p),
                    None => p,
                };
                path.draft.push(p);
                path.draft.current = None;
            }
            EditMode::DrawPolygon(draft) => {
                draft.push(p);
                draft.current = None;
            }
            EditMode::DrawPin(pin) => pin.band = Some(DragRect::new(p)),
            EditMode::DrawLabel(label) => label.at = Some(p),
            EditMode::DrawVia(via) => via.at = Some(p),
            EditMode::AddInstance(instance) => instance.at = Some(p),
        }
    }

    fn on_move(&mut self, p: Point) {
        match &mut self.mode {
            EditMode::SelectItem(state) => {
                if let Some((band, _)) = state.rubber_band.as_mut() {
                    band.current = p;
                }
            }
            EditMode::MoveItem(Some(drag)) | EditMode::CopyItem(Some(drag)) => {
                drag.offset = p - drag.anchor;
            }
            EditMode::ZoomView(Some(band)) | EditMode::DrawRect(Some(band)) => band.current = p,
            EditMode::StretchItem(Some(_)) => self.stretch_move(p),
            EditMode::AlignItems(draft) => {
                if let Some(line) = draft.line.as_mut() {
                    line.end = p;
                }
            }
            EditMode::DrawLine(Some(line)) | EditMode::CutShape(Some(line)) => line.end = p,
            EditMode::DrawWire(Some(line)) => {
                line.end = PathMode::Manhattan.constrain(line.start, p)
            }
            EditMode::DrawPath(path) => {
                if let Some(last) = path.draft.points.last() {
                    path.draft.current = Some(path.template.mode.constrain(*last, p));
                }
            }
            EditMode::DrawPolygon(draft) => {
                if !draft.points.is_empty() {
                    draft.current = Some(p);
                }
            }
            EditMode::DrawPin(pin) => {
                if let Some(band) = pin.band.as_mut() {
                    band.current = p;
                }
            }
            _ => {}
        }
    }

    fn on_release(&mut self, p: Point, modifiers: Modifiers) {
        match &self.mode {
            EditMode::SelectItem(_) => self.select_release(p, modifiers),
            EditMode::MoveItem(Some(_)) => self.move_release(p),
            EditMode::CopyItem(Some(_)) => self.copy_release(p),
            EditMode::ZoomView(Some(_)) => self.zoom_release(p),
            EditMode::PanView(Some(_)) => self.pan_release(p),
            EditMode::StretchItem(Some(_)) => self.stretch_release(p),
            EditMode::AlignItems(draft) if draft.line.is_some() => self.align_release(p),
            EditMode::DrawRect(Some(_)) => self.draw_rect_release(p),
            EditMode::DrawLine(Some(_)) | EditMode::DrawWire(Some(_)) => self.draw_line_release(p),
            EditMode::DrawPin(pin) if pin.band.is_some() => self.draw_pin_release(p),
            EditMode::DrawLabel(label) if label.at.is_some() => self.place_label(p),
            EditMode::DrawVia(via) if via.at.is_some() => self.place_via(p),
            EditMode::AddInstance(instance) if instance.at.is_some() => self.place_instance(p),
            EditMode::CutShape(Some(_)) => self.cut_release(p),
            _ => {}
        }
    }

    fn on_double_click(&mut self, p: Point) {
        match &mut self.mode {
            EditMode::DrawPath(path) => {
                if let Some(last) = path.draft.points.last() {
                    let p = path.template.mode.constrain(*last, p);
                    path.draft.push(p);
                }
                self.finish_draft();
            }
            EditMode::DrawPolygon(draft) => {
                draft.push(p);
                self.finish_draft();
            }
            _ => {}
        }
    }
}
