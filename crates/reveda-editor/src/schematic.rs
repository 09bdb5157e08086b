//! Schematic net normalisation.
//!
//! After every gesture a schematic view cleans up the wires in the visible
//! area: nets shorter than one snap step are removed, colinear nets that
//! overlap or meet end to end are merged, and nets are split at every
//! connection point. Junction dots are drawn where three or more nets end
//! at one point.
//!
//! The functions here only plan the change; the scene applies it as
//! commands so it shares the gesture's undo entry.

use std::collections::HashMap;

use indexmap::IndexMap;
use reveda_core::constants::JUNCTION_MIN_NETS;

use crate::geometry::{Point, Rect, Segment};
use crate::item_store::ItemStore;
use crate::model::{Item, ItemId, Shape};

/// A net to create, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNet {
    pub segment: Segment,
    pub name: Option<String>,
    pub z: i32,
}

impl NewNet {
    pub fn into_item(self, id: ItemId) -> Item {
        let mut item = Item::new(
            id,
            Shape::net(Point::ORIGIN, self.segment.end - self.segment.start),
        )
        .with_pos(self.segment.start);
        if let Shape::Net(net) = &mut item.shape {
            net.name = self.name;
        }
        item.z = self.z;
        item
    }
}

/// Nets to replace. Both lists are empty when nothing changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetRewrite {
    pub removed: Vec<ItemId>,
    pub added: Vec<NewNet>,
}

impl NetRewrite {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

struct NetInfo<'a> {
    id: ItemId,
    segment: Segment,
    item: &'a Item,
}

fn nets_in<'a>(items: &'a ItemStore, rect: &Rect) -> Vec<NetInfo<'a>> {
    items
        .iter()
        .filter_map(|item| {
            let segment = item.net_segment()?;
            segment.intersects_rect(rect).then_some(NetInfo {
                id: item.id,
                segment,
                item,
            })
        })
        .collect()
}

/// Nets in `rect` shorter than `min_length`.
pub fn prune_short_nets(items: &ItemStore, rect: &Rect, min_length: f64) -> Vec<ItemId> {
    nets_in(items, rect)
        .into_iter()
        .filter(|net| net.segment.length() < min_length)
        .map(|net| net.id)
        .collect()
}

/// How many nets in `rect` end at each point.
fn endpoint_counts(nets: &[NetInfo<'_>]) -> HashMap<(u64, u64), usize> {
    let mut counts = HashMap::new();
    for net in nets {
        for p in [net.segment.start, net.segment.end] {
            *counts.entry(p.bits()).or_insert(0) += 1;
        }
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Axis {
    /// Horizontal, keyed by y.
    Row(u64),
    /// Vertical, keyed by x.
    Column(u64),
}

/// A span along one axis line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    lo: f64,
    hi: f64,
}

fn axis_of(segment: &Segment) -> Option<(Axis, Span)> {
    let (s, e) = (segment.start, segment.end);
    if segment.length() == 0.0 {
        return None;
    }
    if segment.is_horizontal() {
        let span = Span {
            lo: s.x.min(e.x),
            hi: s.x.max(e.x),
        };
        Some((Axis::Row(s.bits().1), span))
    } else if segment.is_vertical() {
        let span = Span {
            lo: s.y.min(e.y),
            hi: s.y.max(e.y),
        };
        Some((Axis::Column(s.bits().0), span))
    } else {
        None
    }
}

fn span_point(axis: Axis, at: f64, fixed: f64) -> Point {
    match axis {
        Axis::Row(_) => Point::new(at, fixed),
        Axis::Column(_) => Point::new(fixed, at),
    }
}

/// All colinear nets on one horizontal or vertical line.
struct NetLine<'n, 'a> {
    axis: Axis,
    fixed: f64,
    members: Vec<(Span, &'n NetInfo<'a>)>,
    /// Union of the member spans, touching spans joined.
    union: Vec<Span>,
}

impl NetLine<'_, '_> {
    /// Position of `p` along the line, if `p` lies on it.
    fn along(&self, p: Point) -> Option<f64> {
        let at = match self.axis {
            Axis::Row(y) if p.bits().1 == y => p.x,
            Axis::Column(x) if p.bits().0 == x => p.y,
            _ => return None,
        };
        self.union
            .iter()
            .any(|span| span.lo <= at && at <= span.hi)
            .then_some(at)
    }
}

/// Plan merging and splitting of colinear nets in `rect`.
///
/// The wire geometry on each line is kept and re-cut at connection points:
/// points where some net ends and at least two different lines (or
/// diagonal nets) pass. Nets on one line that overlap or touch anywhere
/// else become a single net, and a net crossing another without either
/// ending there is left alone. Applying the plan and planning again yields
/// nothing.
pub fn merge_split_nets(items: &ItemStore, rect: &Rect) -> NetRewrite {
    let nets = nets_in(items, rect);

    let mut groups: IndexMap<Axis, Vec<(Span, &NetInfo<'_>)>> = IndexMap::new();
    let mut diagonals: Vec<Segment> = Vec::new();
    for net in &nets {
        match axis_of(&net.segment) {
            Some((axis, span)) => groups.entry(axis).or_default().push((span, net)),
            None if net.segment.length() > 0.0 => diagonals.push(net.segment),
            None => {}
        }
    }

    let lines: Vec<NetLine<'_, '_>> = groups
        .into_iter()
        .map(|(axis, mut members)| {
            members.sort_by(|a, b| a.0.lo.total_cmp(&b.0.lo).then(a.0.hi.total_cmp(&b.0.hi)));
            let fixed = match axis {
                Axis::Row(_) => members[0].1.segment.start.y,
                Axis::Column(_) => members[0].1.segment.start.x,
            };
            let mut union: Vec<Span> = Vec::new();
            for (span, _) in &members {
                match union.last_mut() {
                    Some(last) if span.lo <= last.hi => last.hi = last.hi.max(span.hi),
                    _ => union.push(*span),
                }
            }
            NetLine {
                axis,
                fixed,
                members,
                union,
            }
        })
        .collect();

    let lines_through = |p: Point| {
        let on_lines = lines.iter().filter(|line| line.along(p).is_some()).count();
        let on_diagonals = diagonals
            .iter()
            .filter(|segment| segment.distance_to_point(p) < 1e-9)
            .count();
        on_lines + on_diagonals
    };
    let mut connections: Vec<Point> = Vec::new();
    for net in &nets {
        for p in [net.segment.start, net.segment.end] {
            if !connections.iter().any(|q| q.bits() == p.bits()) && lines_through(p) >= 2 {
                connections.push(p);
            }
        }
    }

    let mut rewrite = NetRewrite::default();
    for line in &lines {
        let mut cuts: Vec<f64> = connections.iter().filter_map(|&p| line.along(p)).collect();
        cuts.sort_by(f64::total_cmp);

        let mut result: Vec<Span> = Vec::new();
        for span in &line.union {
            let mut lo = span.lo;
            for &c in cuts.iter().filter(|&&c| c > span.lo && c < span.hi) {
                result.push(Span { lo, hi: c });
                lo = c;
            }
            result.push(Span { lo, hi: span.hi });
        }

        let original: Vec<Span> = line.members.iter().map(|(span, _)| *span).collect();
        if original == result {
            continue;
        }
        let name = line
            .members
            .iter()
            .find_map(|(_, net)| net.item.shape.text().map(str::to_string));
        let z = line.members.iter().map(|(_, net)| net.item.z).max().unwrap_or(0);
        rewrite.removed.extend(line.members.iter().map(|(_, net)| net.id));
        rewrite.added.extend(result.into_iter().map(|span| NewNet {
            segment: Segment::new(
                span_point(line.axis, span.lo, line.fixed),
                span_point(line.axis, span.hi, line.fixed),
            ),
            name: name.clone(),
            z,
        }));
    }
    rewrite
}

/// Points in `rect` where at least three nets end.
pub fn junction_points(items: &ItemStore, rect: &Rect) -> Vec<Point> {
    let nets = nets_in(items, rect);
    let counts = endpoint_counts(&nets);
    let mut points: Vec<Point> = Vec::new();
    for net in &nets {
        for p in [net.segment.start, net.segment.end] {
            let shared = counts.get(&p.bits()).copied().unwrap_or(0);
            if shared >= JUNCTION_MIN_NETS
                && rect.contains_point(p)
                && !points.iter().any(|q| q.bits() == p.bits())
            {
                points.push(p);
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(segments: &[((f64, f64), (f64, f64))]) -> ItemStore {
        let mut store = ItemStore::new();
        for &((x0, y0), (x1, y1)) in segments {
            let id = store.allocate_id();
            let net = NewNet {
                segment: Segment::new(Point::new(x0, y0), Point::new(x1, y1)),
                name: None,
                z: 0,
            };
            store.insert(net.into_item(id));
        }
        store
    }

    fn area() -> Rect {
        Rect::new(-100.0, -100.0, 400.0, 400.0)
    }

    fn added_spans(rewrite: &NetRewrite) -> Vec<(Point, Point)> {
        rewrite
            .added
            .iter()
            .map(|n| (n.segment.start, n.segment.end))
            .collect()
    }

    #[test]
    fn test_prune_short_nets() {
        let store = store(&[((0.0, 0.0), (5.0, 0.0)), ((0.0, 10.0), (50.0, 10.0))]);
        assert_eq!(prune_short_nets(&store, &area(), 10.0), vec![ItemId(1)]);
    }

    #[test]
    fn test_overlapping_nets_merge() {
        let store = store(&[((0.0, 0.0), (50.0, 0.0)), ((30.0, 0.0), (100.0, 0.0))]);
        let rewrite = merge_split_nets(&store, &area());
        assert_eq!(rewrite.removed.len(), 2);
        assert_eq!(
            added_spans(&rewrite),
            vec![(Point::new(0.0, 0.0), Point::new(100.0, 0.0))]
        );
    }

    #[test]
    fn test_abutting_nets_merge_unless_third_net_ends_there() {
        let store1 = store(&[((0.0, 0.0), (50.0, 0.0)), ((50.0, 0.0), (100.0, 0.0))]);
        assert_eq!(merge_split_nets(&store1, &area()).added.len(), 1);

        let store2 = store(&[
            ((0.0, 0.0), (50.0, 0.0)),
            ((50.0, 0.0), (100.0, 0.0)),
            ((50.0, 0.0), (50.0, 50.0)),
        ]);
        assert!(merge_split_nets(&store2, &area()).is_empty());
        assert_eq!(junction_points(&store2, &area()), vec![Point::new(50.0, 0.0)]);
    }

    #[test]
    fn test_tee_splits_through_net() {
        let store = store(&[((0.0, 0.0), (100.0, 0.0)), ((40.0, 0.0), (40.0, 60.0))]);
        let rewrite = merge_split_nets(&store, &area());
        assert_eq!(rewrite.removed, vec![ItemId(1)]);
        assert_eq!(
            added_spans(&rewrite),
            vec![
                (Point::new(0.0, 0.0), Point::new(40.0, 0.0)),
                (Point::new(40.0, 0.0), Point::new(100.0, 0.0)),
            ]
        );
    }

    fn apply(store: &mut ItemStore, rewrite: NetRewrite) {
        for id in rewrite.removed {
            store.remove(id);
        }
        for net in rewrite.added {
            let id = store.allocate_id();
            store.insert(net.into_item(id));
        }
    }

    #[test]
    fn test_abutting_pair_on_through_net_settles() {
        let mut store = store(&[
            ((0.0, 100.0), (50.0, 100.0)),
            ((50.0, 100.0), (100.0, 100.0)),
            ((50.0, 0.0), (50.0, 200.0)),
        ]);
        let rewrite = merge_split_nets(&store, &area());
        assert_eq!(rewrite.removed, vec![ItemId(3)]);
        assert_eq!(
            added_spans(&rewrite),
            vec![
                (Point::new(50.0, 0.0), Point::new(50.0, 100.0)),
                (Point::new(50.0, 100.0), Point::new(50.0, 200.0)),
            ]
        );
        apply(&mut store, rewrite);

        assert!(merge_split_nets(&store, &area()).is_empty());
        assert_eq!(junction_points(&store, &area()), vec![Point::new(50.0, 100.0)]);
    }

    #[test]
    fn test_plain_crossing_is_not_connected() {
        let store = store(&[((0.0, 50.0), (100.0, 50.0)), ((50.0, 0.0), (50.0, 100.0))]);
        assert!(merge_split_nets(&store, &area()).is_empty());
        assert!(junction_points(&store, &area()).is_empty());
    }

    #[test]
    fn test_clean_nets_are_left_alone() {
        let store = store(&[((0.0, 0.0), (100.0, 0.0)), ((0.0, 20.0), (100.0, 20.0))]);
        assert!(merge_split_nets(&store, &area()).is_empty());
        assert!(junction_points(&store, &area()).is_empty());
    }

    #[test]
    fn test_nets_outside_rect_are_ignored() {
        let store = store(&[((0.0, 0.0), (50.0, 0.0)), ((30.0, 0.0), (100.0, 0.0))]);
        let far = Rect::new(1000.0, 1000.0, 10.0, 10.0);
        assert!(merge_split_nets(&store, &far).is_empty());
    }
}
