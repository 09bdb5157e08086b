//! Scene items and the mutable scene model that commands operate on.

pub mod shapes;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::geometry::{
    normalize_angle, point_in_polygon, polygon_edges, polygon_intersects_rect, rotate_vector,
    Point, Rect, Segment,
};
use crate::item_store::ItemStore;
use crate::selection::SelectionSet;

pub use shapes::{
    DefiningPoints, InstanceShape, LabelShape, LineShape, NetShape, PathShape, PinDirection,
    PinShape, PolygonShape, RectShape, Shape, ViaShape,
};

/// Stable identity of an item within one scene.
///
/// Ids are allocated in increasing order, so id order is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout layer identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerKey {
    pub name: String,
    pub purpose: String,
}

impl LayerKey {
    pub fn new(name: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
        }
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.purpose)
    }
}

/// A drawable, selectable scene item.
///
/// World coordinates are `pos + rotate(local, angle)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub shape: Shape,
    pub pos: Point,
    /// Rotation in degrees, always a multiple of 90.
    pub angle: i32,
    pub layer: Option<LayerKey>,
    /// Stacking order; higher is drawn on top.
    pub z: i32,
}

impl Item {
    pub fn new(id: ItemId, shape: Shape) -> Self {
        Self {
            id,
            shape,
            pos: Point::ORIGIN,
            angle: 0,
            layer: None,
            z: 0,
        }
    }

    pub fn with_pos(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_layer(mut self, layer: LayerKey, z: i32) -> Self {
        self.layer = Some(layer);
        self.z = z;
        self
    }

    pub fn to_world(&self, local: Point) -> Point {
        self.pos + rotate_vector(local, self.angle)
    }

    pub fn to_local(&self, world: Point) -> Point {
        rotate_vector(world - self.pos, -self.angle)
    }

    /// Rotate the item in place by a multiple of 90 degrees about `pivot`.
    pub fn rotate_about(&mut self, pivot: Point, degrees: i32) {
        self.pos = crate::geometry::rotate_about(self.pos, pivot, degrees);
        self.angle = normalize_angle(self.angle + degrees);
    }

    pub fn world_points(&self) -> DefiningPoints {
        self.shape
            .defining_points()
            .into_iter()
            .map(|p| self.to_world(p))
            .collect()
    }

    /// Set defining points given in world coordinates.
    pub fn set_world_points(&mut self, points: &[Point]) -> bool {
        let local: SmallVec<[Point; 4]> = points.iter().map(|p| self.to_local(*p)).collect();
        self.shape.set_defining_points(&local)
    }

    pub fn bounding_rect(&self) -> Rect {
        let local = self.shape.local_bounds();
        Rect::bounding(local.corners().into_iter().map(|c| self.to_world(c))).unwrap_or(local)
    }

    fn world_polyline(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.to_world(*p)).collect()
    }

    /// Whether `p` picks this item.
    pub fn hit(&self, p: Point, tolerance: f64) -> bool {
        match &self.shape {
            Shape::Line(s) => {
                let seg = Segment::new(self.to_world(s.start), self.to_world(s.end));
                seg.distance_to_point(p) <= tolerance.max(s.width / 2.0)
            }
            Shape::Net(s) => {
                let seg = Segment::new(self.to_world(s.start), self.to_world(s.end));
                seg.distance_to_point(p) <= tolerance
            }
            Shape::Polygon(s) => {
                let pts = self.world_polyline(&s.points);
                point_in_polygon(p, &pts)
                    || polygon_edges(&pts).any(|e| e.distance_to_point(p) <= tolerance)
            }
            Shape::Path(s) => {
                let pts = self.world_polyline(&s.points);
                let reach = tolerance.max(s.width / 2.0);
                pts.windows(2)
                    .any(|w| Segment::new(w[0], w[1]).distance_to_point(p) <= reach)
            }
            Shape::Rect(_)
            | Shape::Pin(_)
            | Shape::Label(_)
            | Shape::Via(_)
            | Shape::Instance(_) => {
                self.bounding_rect().contains_point(p)
            }
        }
    }

    pub fn contained_in(&self, rect: &Rect) -> bool {
        rect.contains_rect(&self.bounding_rect())
    }

    pub fn intersects(&self, rect: &Rect) -> bool {
        match &self.shape {
            Shape::Line(s) => {
                Segment::new(self.to_world(s.start), self.to_world(s.end)).intersects_rect(rect)
            }
            Shape::Net(s) => {
                Segment::new(self.to_world(s.start), self.to_world(s.end)).intersects_rect(rect)
            }
            Shape::Polygon(s) => polygon_intersects_rect(&self.world_polyline(&s.points), rect),
            Shape::Path(s) => {
                let grown = rect.padded(s.width / 2.0);
                self.world_polyline(&s.points)
                    .windows(2)
                    .any(|w| Segment::new(w[0], w[1]).intersects_rect(&grown))
            }
            Shape::Rect(_)
            | Shape::Pin(_)
            | Shape::Label(_)
            | Shape::Via(_)
            | Shape::Instance(_) => {
                self.bounding_rect().intersects(rect)
            }
        }
    }

    /// World-space segment of a net, if this item is one.
    pub fn net_segment(&self) -> Option<Segment> {
        match &self.shape {
            Shape::Net(s) => Some(Segment::new(self.to_world(s.start), self.to_world(s.end))),
            _ => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.shape.is_degenerate()
    }
}

/// Everything a command may mutate.
#[derive(Debug, Default)]
pub struct SceneModel {
    pub items: ItemStore,
    pub selection: SelectionSet,
    pub origin: Point,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an item, dropping it from the selection as well.
    pub fn take_item(&mut self, id: ItemId) -> Option<Item> {
        self.selection.remove(id);
        self.items.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_item() -> Item {
        Item::new(ItemId(1), Shape::rect(Rect::new(0.0, 0.0, 20.0, 10.0)))
            .with_pos(Point::new(100.0, 100.0))
    }

    #[test]
    fn test_world_bounds_follow_rotation() {
        let mut item = rect_item();
        assert_eq!(item.bounding_rect(), Rect::new(100.0, 100.0, 20.0, 10.0));

        item.rotate_about(Point::new(100.0, 100.0), 90);
        assert_eq!(item.angle, 90);
        assert_eq!(item.bounding_rect(), Rect::new(90.0, 100.0, 10.0, 20.0));
    }

    #[test]
    fn test_world_points_round_trip() {
        let mut item = rect_item();
        item.rotate_about(Point::ORIGIN, 270);
        let points = item.world_points();
        let mut copy = item.clone();
        assert!(copy.set_world_points(&points));
        assert_eq!(copy.shape, item.shape);
    }

    #[test]
    fn test_net_hit_uses_tolerance() {
        let item = Item::new(
            ItemId(2),
            Shape::net(Point::new(0.0, 0.0), Point::new(50.0, 0.0)),
        );
        assert!(item.hit(Point::new(25.0, 4.0), 5.0));
        assert!(!item.hit(Point::new(25.0, 6.0), 5.0));
    }

    #[test]
    fn test_take_item_clears_selection() {
        let mut model = SceneModel::new();
        let id = model.items.allocate_id();
        model.items.insert(Item::new(id, Shape::rect(Rect::new(0.0, 0.0, 1.0, 1.0))));
        model.selection.add(id);

        assert!(model.take_item(id).is_some());
        assert!(!model.selection.contains(id));
        assert!(model.items.is_empty());
    }
}
