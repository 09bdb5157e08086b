//! Shape primitives in item-local coordinates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::{polygon_area, Point, Rect};

/// Points a user can grab and stretch.
pub type DefiningPoints = SmallVec<[Point; 4]>;

/// Approximate glyph advance as a fraction of label height.
const LABEL_CHAR_WIDTH: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub width: f64,
}

/// Schematic wire segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetShape {
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    pub points: Vec<Point>,
}

/// Layout path: a centreline with a drawn width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub points: Vec<Point>,
    pub width: f64,
    #[serde(default)]
    pub start_extend: f64,
    #[serde(default)]
    pub end_extend: f64,
    /// Process path definition the width was taken from.
    #[serde(default)]
    pub definition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    #[default]
    Input,
    Output,
    Inout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinShape {
    pub rect: Rect,
    pub name: String,
    #[serde(default)]
    pub direction: PinDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShape {
    /// Left end of the text baseline.
    pub anchor: Point,
    pub text: String,
    pub height: f64,
}

/// A via or a rows x cols via array. `rect` is the first cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViaShape {
    pub rect: Rect,
    pub definition: String,
    pub rows: u32,
    pub cols: u32,
    #[serde(default)]
    pub x_spacing: f64,
    #[serde(default)]
    pub y_spacing: f64,
}

/// Placed cell view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceShape {
    pub library: String,
    pub cell: String,
    pub view: String,
    pub name: String,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect(RectShape),
    Line(LineShape),
    Net(NetShape),
    Polygon(PolygonShape),
    Path(PathShape),
    Pin(PinShape),
    Label(LabelShape),
    Via(ViaShape),
    Instance(InstanceShape),
}

impl Shape {
    pub fn rect(rect: Rect) -> Self {
        Shape::Rect(RectShape { rect })
    }

    pub fn line(start: Point, end: Point) -> Self {
        Shape::Line(LineShape {
            start,
            end,
            width: 0.0,
        })
    }

    pub fn net(start: Point, end: Point) -> Self {
        Shape::Net(NetShape {
            start,
            end,
            name: None,
        })
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Shape::Polygon(PolygonShape { points })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rect(_) => "rectangle",
            Shape::Line(_) => "line",
            Shape::Net(_) => "net",
            Shape::Polygon(_) => "polygon",
            Shape::Path(_) => "path",
            Shape::Pin(_) => "pin",
            Shape::Label(_) => "label",
            Shape::Via(_) => "via",
            Shape::Instance(_) => "instance",
        }
    }

    /// Points that stretching can move.
    pub fn defining_points(&self) -> DefiningPoints {
        match self {
            Shape::Rect(s) => [s.rect.min, s.rect.max].into_iter().collect(),
            Shape::Line(s) => [s.start, s.end].into_iter().collect(),
            Shape::Net(s) => [s.start, s.end].into_iter().collect(),
            Shape::Polygon(s) => s.points.iter().copied().collect(),
            Shape::Path(s) => s.points.iter().copied().collect(),
            Shape::Pin(s) => [s.rect.min, s.rect.max].into_iter().collect(),
            Shape::Via(_) | Shape::Label(_) | Shape::Instance(_) => DefiningPoints::new(),
        }
    }

    /// Replace the defining points; false if the count does not match.
    pub fn set_defining_points(&mut self, points: &[Point]) -> bool {
        match self {
            Shape::Rect(s) if points.len() == 2 => {
                s.rect = Rect::from_corners(points[0], points[1]);
            }
            Shape::Pin(s) if points.len() == 2 => {
                s.rect = Rect::from_corners(points[0], points[1]);
            }
            Shape::Line(s) if points.len() == 2 => {
                s.start = points[0];
                s.end = points[1];
            }
            Shape::Net(s) if points.len() == 2 => {
                s.start = points[0];
                s.end = points[1];
            }
            Shape::Polygon(s) if points.len() == s.points.len() => {
                s.points = points.to_vec();
            }
            Shape::Path(s) if points.len() == s.points.len() => {
                s.points = points.to_vec();
            }
            _ => return false,
        }
        true
    }

    pub fn local_bounds(&self) -> Rect {
        match self {
            Shape::Rect(s) => s.rect,
            Shape::Line(s) => Rect::from_corners(s.start, s.end).padded(s.width / 2.0),
            Shape::Net(s) => Rect::from_corners(s.start, s.end),
            Shape::Polygon(s) => Rect::bounding(s.points.iter().copied()).unwrap_or_default(),
            Shape::Path(s) => {
                let extend = s.start_extend.max(s.end_extend);
                Rect::bounding(s.points.iter().copied())
                    .unwrap_or_default()
                    .padded(s.width / 2.0 + extend)
            }
            Shape::Pin(s) => s.rect,
            Shape::Label(s) => {
                let chars = s.text.chars().count().max(1) as f64;
                Rect::new(
                    s.anchor.x,
                    s.anchor.y - s.height,
                    chars * s.height * LABEL_CHAR_WIDTH,
                    s.height,
                )
            }
            Shape::Via(s) => {
                let cols = s.cols.max(1) as f64;
                let rows = s.rows.max(1) as f64;
                Rect::new(
                    s.rect.min.x,
                    s.rect.min.y,
                    cols * s.rect.width() + (cols - 1.0) * s.x_spacing,
                    rows * s.rect.height() + (rows - 1.0) * s.y_spacing,
                )
            }
            Shape::Instance(s) => s.bounds,
        }
    }

    /// Zero-size geometry that must never be committed.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::Rect(s) => s.rect.is_empty(),
            Shape::Pin(s) => s.rect.is_empty(),
            Shape::Via(s) => s.rect.is_empty() || s.rows == 0 || s.cols == 0,
            Shape::Line(s) => s.start == s.end,
            Shape::Net(s) => s.start == s.end,
            Shape::Polygon(s) => s.points.len() < 3 || polygon_area(&s.points) == 0.0,
            Shape::Path(s) => {
                s.width <= 0.0
                    || s.points.len() < 2
                    || s.points.windows(2).all(|w| w[0] == w[1])
            }
            Shape::Label(s) => s.text.trim().is_empty() || s.height <= 0.0,
            Shape::Instance(_) => false,
        }
    }

    /// Editable name or text, if the shape carries one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Net(s) => s.name.as_deref(),
            Shape::Pin(s) => Some(&s.name),
            Shape::Label(s) => Some(&s.text),
            Shape::Instance(s) => Some(&s.name),
            _ => None,
        }
    }

    /// Replace the name or text; false if the shape has none.
    pub fn set_text(&mut self, text: &str) -> bool {
        match self {
            Shape::Net(s) => s.name = Some(text.to_string()),
            Shape::Pin(s) => s.name = text.to_string(),
            Shape::Label(s) => s.text = text.to_string(),
            Shape::Instance(s) => s.name = text.to_string(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_stretch_renormalises() {
        let mut shape = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(shape.set_defining_points(&[Point::new(20.0, 20.0), Point::new(0.0, 0.0)]));
        assert_eq!(shape.local_bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
        assert!(!shape.set_defining_points(&[Point::ORIGIN]));
    }

    #[test]
    fn test_degenerate_shapes() {
        assert!(Shape::rect(Rect::new(0.0, 0.0, 10.0, 0.0)).is_degenerate());
        assert!(Shape::net(Point::ORIGIN, Point::ORIGIN).is_degenerate());
        assert!(Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ])
        .is_degenerate());
        assert!(!Shape::line(Point::ORIGIN, Point::new(0.0, 10.0)).is_degenerate());
    }

    #[test]
    fn test_via_array_bounds() {
        let via = Shape::Via(ViaShape {
            rect: Rect::new(0.0, 0.0, 2.0, 2.0),
            definition: "via1".to_string(),
            rows: 2,
            cols: 3,
            x_spacing: 1.0,
            y_spacing: 1.0,
        });
        assert_eq!(via.local_bounds(), Rect::new(0.0, 0.0, 8.0, 5.0));
    }

    #[test]
    fn test_shape_serde_tagging() {
        let shape = Shape::net(Point::ORIGIN, Point::new(10.0, 0.0));
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"net\""));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }
}
