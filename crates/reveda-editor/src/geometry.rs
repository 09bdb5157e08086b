//! Planar geometry used by items, hit-testing and selection.
//!
//! Scene coordinates grow rightwards in x and downwards in y. Rotations are
//! restricted to quarter turns, which are computed by swapping and negating
//! coordinates so that rotating integer-valued points is exact.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A point (or vector) in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Key usable for exact-equality hashing of snapped coordinates.
    pub fn bits(&self) -> (u64, u64) {
        // +0.0 and -0.0 compare equal, so they must hash equal too
        let norm = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        (norm(self.x), norm(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Normalise an angle in degrees to `0..360`.
pub fn normalize_angle(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Whether `degrees` is a whole number of quarter turns.
pub fn is_quarter_turn(degrees: i32) -> bool {
    degrees % 90 == 0
}

/// Rotate a vector about the origin by a multiple of 90 degrees.
///
/// Positive angles turn clockwise on screen (x towards +y).
pub fn rotate_vector(v: Point, degrees: i32) -> Point {
    match normalize_angle(degrees) {
        0 => v,
        90 => Point::new(-v.y, v.x),
        180 => Point::new(-v.x, -v.y),
        270 => Point::new(v.y, -v.x),
        other => {
            let radians = (other as f64).to_radians();
            let (sin, cos) = radians.sin_cos();
            Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
        }
    }
}

/// Rotate `p` about `pivot`.
pub fn rotate_about(p: Point, pivot: Point, degrees: i32) -> Point {
    pivot + rotate_vector(p - pivot, degrees)
}

/// Axis-aligned rectangle; `min` is always the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x + width, y + height))
    }

    /// Build a rectangle from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Rect {
            min: first,
            max: first,
        };
        for p in iter {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn left(&self) -> f64 {
        self.min.x
    }

    pub fn right(&self) -> f64 {
        self.max.x
    }

    pub fn top(&self) -> f64 {
        self.min.y
    }

    pub fn bottom(&self) -> f64 {
        self.max.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// True when both dimensions are zero, as for a click without a drag.
    pub fn is_null(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [
            Segment::new(a, b),
            Segment::new(b, c),
            Segment::new(c, d),
            Segment::new(d, a),
        ]
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Closed-set overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn united(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Move each edge outwards by the given amounts (negative shrinks).
    pub fn adjusted(&self, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect::from_corners(
            Point::new(self.min.x + left, self.min.y + top),
            Point::new(self.max.x + right, self.max.y + bottom),
        )
    }

    pub fn padded(&self, amount: f64) -> Rect {
        self.adjusted(-amount, -amount, amount, amount)
    }

    pub fn translated(&self, offset: Point) -> Rect {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y && self.start.x != self.end.x
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x && self.start.y != self.end.y
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        let d = self.end - self.start;
        let len_sq = d.x * d.x + d.y * d.y;
        if len_sq == 0.0 {
            return self.start.distance_to(&p);
        }
        let t = ((p.x - self.start.x) * d.x + (p.y - self.start.y) * d.y) / len_sq;
        let t = t.clamp(0.0, 1.0);
        let proj = Point::new(self.start.x + t * d.x, self.start.y + t * d.y);
        proj.distance_to(&p)
    }

    pub fn intersects_segment(&self, other: &Segment) -> bool {
        let (p1, p2, q1, q2) = (self.start, self.end, other.start, other.end);
        let o1 = orientation(p1, p2, q1);
        let o2 = orientation(p1, p2, q2);
        let o3 = orientation(q1, q2, p1);
        let o4 = orientation(q1, q2, p2);

        if o1 != o2 && o3 != o4 {
            return true;
        }
        (o1 == 0 && on_segment(p1, q1, p2))
            || (o2 == 0 && on_segment(p1, q2, p2))
            || (o3 == 0 && on_segment(q1, p1, q2))
            || (o4 == 0 && on_segment(q1, p2, q2))
    }

    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if rect.contains_point(self.start) || rect.contains_point(self.end) {
            return true;
        }
        rect.edges().iter().any(|edge| self.intersects_segment(edge))
    }
}

fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let cross = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

fn on_segment(a: Point, p: Point, b: Point) -> bool {
    p.x <= a.x.max(b.x) && p.x >= a.x.min(b.x) && p.y <= a.y.max(b.y) && p.y >= a.y.min(b.y)
}

/// Even-odd point in polygon test.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Iterate the closing edges of a polygon.
pub fn polygon_edges(polygon: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| Segment::new(polygon[i], polygon[(i + 1) % n]))
}

pub fn polygon_intersects_rect(polygon: &[Point], rect: &Rect) -> bool {
    if polygon.iter().any(|p| rect.contains_point(*p)) {
        return true;
    }
    if rect.corners().iter().any(|c| point_in_polygon(*c, polygon)) {
        return true;
    }
    polygon_edges(polygon).any(|edge| edge.intersects_rect(rect))
}

/// Unsigned shoelace area.
pub fn polygon_area(polygon: &[Point]) -> f64 {
    let twice: f64 = polygon_edges(polygon)
        .map(|e| e.start.x * e.end.y - e.end.x * e.start.y)
        .sum();
    twice.abs() / 2.0
}
