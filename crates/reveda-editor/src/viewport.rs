//! Viewport and coordinate transformation for the editor view.
//!
//! Converts between pixel coordinates (screen space) and scene coordinates.
//! Both spaces grow downward in Y, so the transform is a uniform scale plus
//! a translation.

use std::fmt;

use reveda_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_ZOOM, MIN_ZOOM,
};
use reveda_settings::ViewSettings;

use crate::geometry::{Point, Rect};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport with the scene origin at the top-left pixel.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn from_settings(settings: &ViewSettings) -> Self {
        let mut viewport = Self::new(settings.canvas_width, settings.canvas_height);
        viewport.set_zoom_limits(settings.min_zoom, settings.max_zoom);
        viewport
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (pixels per scene unit).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.clamp_zoom(self.zoom);
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom level, clamped to the configured limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = self.clamp_zoom(zoom);
        }
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Converts pixel coordinates to scene coordinates.
    ///
    /// ```text
    /// scene_x = (pixel_x - pan_x) / zoom
    /// scene_y = (pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_scene(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.pan_x) / self.zoom,
            (pixel_y - self.pan_y) / self.zoom,
        )
    }

    pub fn scene_to_pixel(&self, p: Point) -> (f64, f64) {
        (p.x * self.zoom + self.pan_x, p.y * self.zoom + self.pan_y)
    }

    /// The scene rectangle currently covered by the canvas.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_corners(
            self.pixel_to_scene(0.0, 0.0),
            self.pixel_to_scene(self.canvas_width, self.canvas_height),
        )
    }

    /// Fits `rect` into the canvas, keeping the aspect ratio and centring it.
    ///
    /// A rectangle with no extent only recentres the view.
    pub fn fit_to_rect(&mut self, rect: &Rect) {
        let width = rect.width();
        let height = rect.height();
        if width > 0.0 || height > 0.0 {
            let zoom_x = if width > 0.0 {
                self.canvas_width / width
            } else {
                f64::INFINITY
            };
            let zoom_y = if height > 0.0 {
                self.canvas_height / height
            } else {
                f64::INFINITY
            };
            self.zoom = self.clamp_zoom(zoom_x.min(zoom_y));
        }
        self.center_on(rect.center());
    }

    /// Zooms while keeping `scene_point` at the same pixel position.
    pub fn zoom_to_point(&mut self, scene_point: Point, new_zoom: f64) {
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            return;
        }
        let (pixel_x, pixel_y) = self.scene_to_pixel(scene_point);
        self.zoom = self.clamp_zoom(new_zoom);
        self.pan_x = pixel_x - scene_point.x * self.zoom;
        self.pan_y = pixel_y - scene_point.y * self.zoom;
    }

    /// Centres the canvas on a scene point.
    pub fn center_on(&mut self, p: Point) {
        self.pan_x = self.canvas_width / 2.0 - p.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - p.y * self.zoom;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
