//! The editor view: one scene seen through a zoomable, pannable viewport.
//!
//! Pointer events arrive in pixel coordinates and are mapped to scene
//! coordinates here. Navigation requests queued by the scene are applied to
//! the viewport after every delegated call, and the resulting visible
//! rectangle is handed back to the scene.

pub mod grid;
mod keys;

pub use grid::{background_grid, GridPlan};

use reveda_settings::ViewSettings;
use tracing::trace;

use crate::edit_mode::SceneKind;
use crate::geometry::Rect;
use crate::input::{PointerEvent, PointerKind};
use crate::scene::{EditorScene, ViewRequest};
use crate::viewport::Viewport;

pub struct EditorView {
    scene: EditorScene,
    viewport: Viewport,
    wheel_zoom_factor: f64,
}

impl EditorView {
    pub fn new(scene: EditorScene, settings: &ViewSettings) -> Self {
        let mut view = Self {
            scene,
            viewport: Viewport::from_settings(settings),
            wheel_zoom_factor: settings.wheel_zoom_factor,
        };
        view.sync();
        view
    }

    pub fn scene(&self) -> &EditorScene {
        &self.scene
    }

    /// Direct scene access. Call [`EditorView::sync`] afterwards if the scene
    /// may have queued navigation.
    pub fn scene_mut(&mut self) -> &mut EditorScene {
        &mut self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn visible_rect(&self) -> Rect {
        self.viewport.visible_rect()
    }

    /// Apply queued scene requests to the viewport and report the visible
    /// rectangle back to the scene.
    pub fn sync(&mut self) {
        for request in self.scene.take_view_requests() {
            trace!(?request, "view request");
            match request {
                ViewRequest::Fit(rect) => self.viewport.fit_to_rect(&rect),
                ViewRequest::Center(p) => self.viewport.center_on(p),
            }
        }
        self.scene.set_scene_rect(self.viewport.visible_rect());
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
        self.sync();
    }

    /// Forward a pixel-space pointer event to the scene.
    ///
    /// In a schematic, a release and the net clean-up it triggers share one
    /// undo entry.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let pos = self.viewport.pixel_to_scene(event.pos.x, event.pos.y);
        let scene_event = PointerEvent { pos, ..event };
        let normalize =
            event.kind == PointerKind::Release && self.scene.kind() == SceneKind::Schematic;
        if normalize && !self.scene.is_read_only() {
            self.scene.begin_macro("");
            self.scene.handle_pointer(scene_event);
            self.scene.normalize_nets(self.viewport.visible_rect());
            self.scene.end_macro();
        } else {
            self.scene.handle_pointer(scene_event);
        }
        self.sync();
    }

    /// Zoom about the pixel under the cursor, one factor per wheel notch.
    /// Positive notches zoom in.
    pub fn wheel(&mut self, pixel_x: f64, pixel_y: f64, notches: f64) {
        let anchor = self.viewport.pixel_to_scene(pixel_x, pixel_y);
        let zoom = self.viewport.zoom() * self.wheel_zoom_factor.powf(notches);
        self.viewport.zoom_to_point(anchor, zoom);
        self.sync();
    }

    /// Background grid for the visible area.
    pub fn background_grid(&self) -> GridPlan {
        background_grid(
            &self.viewport.visible_rect(),
            self.scene.grid().major_grid,
            self.scene.context().config.grid.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_mode::ModeKind;
    use crate::geometry::Point;
    use crate::session::SessionContext;
    use approx::assert_relative_eq;

    fn view(kind: SceneKind) -> EditorView {
        let context = SessionContext::default();
        let scene = EditorScene::new(kind, &context);
        EditorView::new(scene, &context.config.view)
    }

    #[test]
    fn test_pixel_events_reach_scene_in_scene_units() {
        let mut view = view(SceneKind::Symbol);
        view.viewport.set_zoom(2.0);
        view.sync();
        view.scene_mut().set_mode(ModeKind::DrawRect).unwrap();
        view.handle_pointer(PointerEvent::press(20.0, 40.0));
        view.handle_pointer(PointerEvent::release(120.0, 140.0));
        let item = view.scene().items().iter().next().unwrap();
        assert_eq!(item.bounding_rect(), Rect::new(10.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn test_wheel_keeps_cursor_point_fixed() {
        let mut view = view(SceneKind::Layout);
        let before = view.viewport().pixel_to_scene(300.0, 200.0);
        view.wheel(300.0, 200.0, 2.0);
        assert_relative_eq!(view.viewport().zoom(), 1.44, epsilon = 1e-9);
        let after = view.viewport().pixel_to_scene(300.0, 200.0);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
    }

    #[test]
    fn test_scene_rect_follows_viewport() {
        let mut view = view(SceneKind::Layout);
        view.scene_mut().center_view_on_point(Point::new(1000.0, 1000.0));
        view.sync();
        let rect = view.scene().scene_rect();
        assert_relative_eq!(rect.center().x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(rect.center().y, 1000.0, epsilon = 1e-9);
        assert_eq!(rect, view.visible_rect());
    }

    #[test]
    fn test_schematic_release_and_cleanup_share_undo_entry() {
        let mut view = view(SceneKind::Schematic);
        view.scene_mut().set_mode(ModeKind::DrawWire).unwrap();
        view.handle_pointer(PointerEvent::press(100.0, 100.0));
        view.handle_pointer(PointerEvent::release(200.0, 100.0));
        view.scene_mut().set_mode(ModeKind::DrawWire).unwrap();
        view.handle_pointer(PointerEvent::press(200.0, 100.0));
        view.handle_pointer(PointerEvent::release(300.0, 100.0));
        assert_eq!(view.scene().items().len(), 1);
        assert_eq!(view.scene().undo_stack().count(), 2);

        view.scene_mut().undo().unwrap();
        assert_eq!(view.scene().items().len(), 1);
        let net = view.scene().items().iter().next().unwrap();
        assert_eq!(net.bounding_rect(), Rect::new(100.0, 100.0, 100.0, 0.0));
    }
}
