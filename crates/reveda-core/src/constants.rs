//! Editor-wide constants.

/// Maximum number of top-level undo entries kept by a scene.
pub const DEFAULT_UNDO_LIMIT: usize = 99;

/// Scale applied per mouse-wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.2;

/// Scene-unit padding added around item bounds when fitting the view.
pub const FIT_PADDING: f64 = 40.0;

/// Default major grid spacing in scene units.
pub const DEFAULT_MAJOR_GRID: f64 = 10.0;

/// Default snap step in scene units.
pub const DEFAULT_SNAP_GRID: f64 = 10.0;

/// Grid line count thresholds and the spacing multiplier applied above each.
///
/// Ordered from the densest threshold down so the first match wins.
pub const GRID_THINNING: [(usize, f64); 4] = [(960, 16.0), (480, 8.0), (240, 4.0), (120, 2.0)];

/// At or above this many grid lines on screen the grid is not drawn.
pub const GRID_SUPPRESS_LINES: usize = 1920;

/// Lower zoom bound for the viewport.
pub const MIN_ZOOM: f64 = 0.001;

/// Upper zoom bound for the viewport.
pub const MAX_ZOOM: f64 = 1000.0;

/// Default viewport size in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Net endpoints at one point needed to draw a junction dot.
pub const JUNCTION_MIN_NETS: usize = 3;
