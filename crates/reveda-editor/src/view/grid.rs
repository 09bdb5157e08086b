//! Background grid planning.
//!
//! The view decides which grid coordinates to draw; a toolkit front end only
//! paints the plan. Spacing is thinned as the view zooms out so the number of
//! lines across the view stays bounded, and the grid disappears entirely when
//! even the thinned grid would be too dense.

use reveda_core::constants::{GRID_SUPPRESS_LINES, GRID_THINNING};
use reveda_settings::GridStyle;

use crate::geometry::{Point, Rect, Segment};

/// Grid coordinates to draw for one visible rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub style: GridStyle,
    pub spacing: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    bounds: Rect,
}

impl GridPlan {
    fn empty(style: GridStyle, bounds: Rect) -> Self {
        Self {
            style,
            spacing: 0.0,
            xs: Vec::new(),
            ys: Vec::new(),
            bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() || self.ys.is_empty()
    }

    /// Dot positions; empty unless the style is dots.
    pub fn dots(&self) -> Vec<Point> {
        if self.style != GridStyle::Dots {
            return Vec::new();
        }
        self.xs
            .iter()
            .flat_map(|&x| self.ys.iter().map(move |&y| Point::new(x, y)))
            .collect()
    }

    /// Full-height and full-width lines; empty unless the style is lines.
    pub fn lines(&self) -> Vec<Segment> {
        if self.style != GridStyle::Lines {
            return Vec::new();
        }
        let b = &self.bounds;
        let vertical = self
            .xs
            .iter()
            .map(|&x| Segment::new(Point::new(x, b.top()), Point::new(x, b.bottom())));
        let horizontal = self
            .ys
            .iter()
            .map(|&y| Segment::new(Point::new(b.left(), y), Point::new(b.right(), y)));
        vertical.chain(horizontal).collect()
    }
}

/// Multiplier applied to the major grid for `lines` grid lines across the
/// view, or `None` when the grid should not be drawn.
pub fn thinning_factor(lines: usize) -> Option<f64> {
    if lines >= GRID_SUPPRESS_LINES {
        return None;
    }
    Some(
        GRID_THINNING
            .iter()
            .find(|(threshold, _)| lines >= *threshold)
            .map_or(1.0, |(_, factor)| *factor),
    )
}

fn coords(from: f64, to: f64, spacing: f64) -> Vec<f64> {
    let start = (from / spacing).floor() * spacing;
    let count = ((to - start) / spacing).ceil().max(0.0) as usize;
    (0..count).map(|i| start + i as f64 * spacing).collect()
}

/// Plan the background grid for the visible scene rectangle.
pub fn background_grid(visible: &Rect, major_grid: f64, style: GridStyle) -> GridPlan {
    if style == GridStyle::None || major_grid <= 0.0 || visible.is_empty() {
        return GridPlan::empty(style, *visible);
    }
    let columns = ((visible.right() - (visible.left() / major_grid).floor() * major_grid)
        / major_grid)
        .ceil() as usize;
    let Some(factor) = thinning_factor(columns) else {
        return GridPlan::empty(style, *visible);
    };
    let spacing = major_grid * factor;
    GridPlan {
        style,
        spacing,
        xs: coords(visible.left(), visible.right(), spacing),
        ys: coords(visible.top(), visible.bottom(), spacing),
        bounds: *visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thinning_thresholds() {
        assert_eq!(thinning_factor(50), Some(1.0));
        assert_eq!(thinning_factor(119), Some(1.0));
        assert_eq!(thinning_factor(120), Some(2.0));
        assert_eq!(thinning_factor(240), Some(4.0));
        assert_eq!(thinning_factor(479), Some(4.0));
        assert_eq!(thinning_factor(480), Some(8.0));
        assert_eq!(thinning_factor(960), Some(16.0));
        assert_eq!(thinning_factor(1919), Some(16.0));
        assert_eq!(thinning_factor(1920), None);
    }

    #[test]
    fn test_small_view_uses_major_grid() {
        let plan = background_grid(&Rect::new(5.0, 0.0, 100.0, 50.0), 10.0, GridStyle::Dots);
        assert_eq!(plan.spacing, 10.0);
        assert_eq!(plan.xs.first(), Some(&0.0));
        assert_eq!(plan.xs.len(), 11);
        assert_eq!(plan.ys.len(), 5);
        assert_eq!(plan.dots().len(), 55);
        assert!(plan.lines().is_empty());
    }

    #[test]
    fn test_wide_view_is_thinned() {
        let plan = background_grid(&Rect::new(0.0, 0.0, 3000.0, 100.0), 10.0, GridStyle::Lines);
        assert_eq!(plan.spacing, 40.0);
        assert_eq!(plan.lines().len(), plan.xs.len() + plan.ys.len());
    }

    #[test]
    fn test_dense_view_is_suppressed() {
        let plan = background_grid(&Rect::new(0.0, 0.0, 20000.0, 100.0), 10.0, GridStyle::Dots);
        assert!(plan.is_empty());
        let plan = background_grid(&Rect::new(0.0, 0.0, 100.0, 100.0), 10.0, GridStyle::None);
        assert!(plan.is_empty());
    }
}
