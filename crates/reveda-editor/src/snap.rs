//! Grid snapping.
//!
//! Every pointer position is quantised here before a mode handler sees it.

use reveda_settings::GridSettings;

use crate::geometry::Point;

/// Grid configuration shared read-only by a scene and its view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Spacing of the drawn background grid.
    pub major_grid: f64,
    /// Nominal snap step.
    pub snap_grid: f64,
    /// Per-axis snap steps.
    pub snap_tuple: (f64, f64),
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from_settings(&GridSettings::default())
    }
}

impl GridConfig {
    pub fn new(major_grid: f64, snap_grid: f64) -> Self {
        Self {
            major_grid,
            snap_grid,
            snap_tuple: (snap_grid, snap_grid),
        }
    }

    pub fn with_snap_tuple(mut self, x_step: f64, y_step: f64) -> Self {
        self.snap_tuple = (x_step, y_step);
        self
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            major_grid: settings.major_grid,
            snap_grid: settings.snap_grid,
            snap_tuple: settings.snap_tuple(),
        }
    }

    /// Round each coordinate to the nearest multiple of its snap step.
    pub fn snap_to_grid(&self, p: Point) -> Point {
        Point::new(
            snap_to_base(p.x, self.snap_tuple.0),
            snap_to_base(p.y, self.snap_tuple.1),
        )
    }

    /// Shortest snap step; nets shorter than this are pruned.
    pub fn snap_distance(&self) -> f64 {
        self.snap_tuple.0.min(self.snap_tuple.1)
    }
}

/// Restrict `value` to the multiples of `base`.
pub fn snap_to_base(value: f64, base: f64) -> f64 {
    if base <= 0.0 || !base.is_finite() {
        return value;
    }
    (value / base).round() * base
}
