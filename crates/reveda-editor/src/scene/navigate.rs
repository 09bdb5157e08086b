//! Navigation. The scene tracks the visible rectangle and queues requests
//! that the owning view turns into viewport changes.

use tracing::debug;

use super::EditorScene;
use crate::edit_mode::EditMode;
use crate::geometry::{Point, Rect};

/// A viewport change requested by the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// Show the whole rectangle, keeping the aspect ratio.
    Fit(Rect),
    /// Keep the zoom and centre on the point.
    Center(Point),
}

impl EditorScene {
    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    /// Record the rectangle the view actually shows.
    pub fn set_scene_rect(&mut self, rect: Rect) {
        self.scene_rect = rect;
    }

    /// Drain the queued view requests, oldest first.
    pub fn take_view_requests(&mut self) -> Vec<ViewRequest> {
        std::mem::take(&mut self.view_requests)
    }

    pub(super) fn request_fit(&mut self, rect: Rect) {
        debug!(
            x = rect.left(),
            y = rect.top(),
            width = rect.width(),
            height = rect.height(),
            "fit view"
        );
        self.scene_rect = rect;
        self.view_requests.push(ViewRequest::Fit(rect));
    }

    /// Fit the view to all items plus padding. An empty scene is left alone.
    pub fn fit_items_in_view(&mut self) {
        if let Some(bounds) = self.model.items.bounding_rect() {
            self.request_fit(bounds.padded(self.fit_padding));
        }
    }

    pub fn zoom_to_rect(&mut self, rect: Rect) {
        if rect.is_null() {
            return;
        }
        self.request_fit(rect.padded(self.fit_padding));
    }

    /// Centre used by the by-2 zooms: last pointer, else the view centre.
    fn zoom_center(&self) -> Point {
        self.last_pointer.unwrap_or_else(|| self.scene_rect.center())
    }

    pub fn zoom_in_by_2(&mut self) {
        let center = self.zoom_center();
        let rect = Rect::from_center(
            center,
            self.scene_rect.width() / 2.0,
            self.scene_rect.height() / 2.0,
        );
        self.request_fit(rect);
    }

    pub fn zoom_out_by_2(&mut self) {
        let center = self.zoom_center();
        let rect = Rect::from_center(
            center,
            self.scene_rect.width() * 2.0,
            self.scene_rect.height() * 2.0,
        );
        self.request_fit(rect);
    }

    fn shift_view(&mut self, offset: Point) {
        self.center_view_on_point(self.scene_rect.center() + offset);
    }

    pub fn move_scene_left(&mut self) {
        self.shift_view(Point::new(-self.scene_rect.width() / 2.0, 0.0));
    }

    pub fn move_scene_right(&mut self) {
        self.shift_view(Point::new(self.scene_rect.width() / 2.0, 0.0));
    }

    pub fn move_scene_up(&mut self) {
        self.shift_view(Point::new(0.0, -self.scene_rect.height() / 2.0));
    }

    pub fn move_scene_down(&mut self) {
        self.shift_view(Point::new(0.0, self.scene_rect.height() / 2.0));
    }

    /// Keep the current extent and centre it on `p`.
    pub fn center_view_on_point(&mut self, p: Point) {
        self.scene_rect = Rect::from_center(p, self.scene_rect.width(), self.scene_rect.height());
        self.view_requests.push(ViewRequest::Center(p));
    }

    pub(super) fn zoom_release(&mut self, p: Point) {
        let EditMode::ZoomView(slot) = &mut self.mode else {
            return;
        };
        let Some(mut band) = slot.take() else {
            return;
        };
        band.current = p;
        let rect = band.rect();
        if rect.is_null() {
            self.center_view_on_point(p);
        } else {
            self.zoom_to_rect(rect);
        }
        self.finish_gesture();
    }

    /// A click centres the view; a drag shifts it by the drag distance.
    /// The mode stays active for further pans.
    pub(super) fn pan_release(&mut self, p: Point) {
        let EditMode::PanView(slot) = &mut self.mode else {
            return;
        };
        let Some(anchor) = slot.take() else {
            return;
        };
        let delta = anchor - p;
        if delta.is_zero() {
            self.center_view_on_point(p);
        } else {
            self.shift_view(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_mode::{ModeKind, SceneKind};
    use crate::input::PointerEvent;
    use crate::session::SessionContext;

    fn scene() -> EditorScene {
        let mut scene = EditorScene::new(SceneKind::Schematic, &SessionContext::default());
        scene.set_scene_rect(Rect::new(0.0, 0.0, 400.0, 200.0));
        scene
    }

    #[test]
    fn test_zoom_in_centres_on_last_pointer() {
        let mut scene = scene();
        scene.handle_pointer(PointerEvent::moved(100.0, 100.0));
        scene.zoom_in_by_2();
        assert_eq!(scene.scene_rect(), Rect::new(0.0, 50.0, 200.0, 100.0));
        assert_eq!(
            scene.take_view_requests(),
            vec![ViewRequest::Fit(Rect::new(0.0, 50.0, 200.0, 100.0))]
        );
        assert!(scene.take_view_requests().is_empty());
    }

    #[test]
    fn test_zoom_out_without_pointer_uses_view_centre() {
        let mut scene = scene();
        scene.zoom_out_by_2();
        assert_eq!(scene.scene_rect(), Rect::new(-200.0, -100.0, 800.0, 400.0));
    }

    #[test]
    fn test_moves_shift_by_half_extent() {
        let mut scene = scene();
        scene.move_scene_left();
        assert_eq!(scene.scene_rect(), Rect::new(-200.0, 0.0, 400.0, 200.0));
        scene.move_scene_down();
        assert_eq!(scene.scene_rect(), Rect::new(-200.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn test_fit_on_empty_scene_is_noop() {
        let mut scene = scene();
        scene.fit_items_in_view();
        assert!(scene.take_view_requests().is_empty());
    }

    #[test]
    fn test_pan_drag_shifts_view() {
        let mut scene = scene();
        scene.set_mode(ModeKind::PanView).unwrap();
        scene.handle_pointer(PointerEvent::press(100.0, 100.0));
        scene.handle_pointer(PointerEvent::release(150.0, 100.0));
        assert_eq!(scene.scene_rect(), Rect::new(-50.0, 0.0, 400.0, 200.0));
        assert_eq!(scene.mode_kind(), ModeKind::PanView);
    }

    #[test]
    fn test_zoom_band_fits_padded_rect() {
        let mut scene = scene();
        scene.set_mode(ModeKind::ZoomView).unwrap();
        scene.handle_pointer(PointerEvent::press(0.0, 0.0));
        scene.handle_pointer(PointerEvent::release(100.0, 50.0));
        assert_eq!(scene.scene_rect(), Rect::new(-40.0, -40.0, 180.0, 130.0));
        assert_eq!(scene.mode_kind(), ModeKind::SelectItem);
    }
}
