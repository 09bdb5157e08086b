//! Edge and reference-line alignment with optional spacing distribution.

use reveda_core::EditError;
use tracing::debug;

use super::EditorScene;
use crate::commands::{EditCommand, Reposition};
use crate::edit_mode::{AlignDraft, AlignEdge, AlignSettings, EditMode, ModeKind};
use crate::geometry::{Point, Rect};
use crate::model::ItemId;

/// What the selected items line up against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AlignReference {
    /// The extreme (or mean, for centres) edge of the selection itself.
    #[default]
    Edges,
    /// A drawn reference line through this point.
    Line(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignRequest {
    pub settings: AlignSettings,
    pub reference: AlignReference,
}

impl AlignRequest {
    pub fn edges(edge: AlignEdge) -> Self {
        Self {
            settings: AlignSettings {
                edge,
                spacing: None,
            },
            reference: AlignReference::Edges,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.settings.spacing = Some(spacing);
        self
    }

    pub fn to_line(mut self, through: Point) -> Self {
        self.reference = AlignReference::Line(through);
        self
    }
}

/// Coordinate of `rect` that an edge aligns.
fn edge_value(rect: &Rect, edge: AlignEdge) -> f64 {
    match edge {
        AlignEdge::Top => rect.top(),
        AlignEdge::HCenter => rect.center().y,
        AlignEdge::Bottom => rect.bottom(),
        AlignEdge::Left => rect.left(),
        AlignEdge::VCenter => rect.center().x,
        AlignEdge::Right => rect.right(),
    }
}

/// Target coordinate for edge alignment: outermost edge, or mean centre.
fn edge_target(rects: &[Rect], edge: AlignEdge) -> f64 {
    let values = rects.iter().map(|r| edge_value(r, edge));
    match edge {
        AlignEdge::Top | AlignEdge::Left => values.fold(f64::INFINITY, f64::min),
        AlignEdge::Bottom | AlignEdge::Right => values.fold(f64::NEG_INFINITY, f64::max),
        AlignEdge::HCenter | AlignEdge::VCenter => values.sum::<f64>() / rects.len() as f64,
    }
}

/// Per-item offsets that align `rects` and then optionally distribute them.
///
/// Horizontal alignments distribute left to right by left edge, vertical ones
/// top to bottom by top edge; each neighbour starts `spacing` after the
/// previous one ends.
pub(crate) fn alignment_offsets(rects: &[Rect], request: &AlignRequest) -> Vec<Point> {
    let edge = request.settings.edge;
    let horizontal = edge.is_horizontal();
    let target = match request.reference {
        AlignReference::Edges => edge_target(rects, edge),
        AlignReference::Line(p) => {
            if horizontal {
                p.y
            } else {
                p.x
            }
        }
    };
    let mut offsets: Vec<Point> = rects
        .iter()
        .map(|r| {
            let shift = target - edge_value(r, edge);
            if horizontal {
                Point::new(0.0, shift)
            } else {
                Point::new(shift, 0.0)
            }
        })
        .collect();

    let Some(spacing) = request.settings.spacing else {
        return offsets;
    };
    let mut order: Vec<usize> = (0..rects.len()).collect();
    if horizontal {
        order.sort_by(|&a, &b| rects[a].left().total_cmp(&rects[b].left()));
    } else {
        order.sort_by(|&a, &b| rects[a].top().total_cmp(&rects[b].top()));
    }
    let mut cursor = None;
    for i in order {
        let rect = rects[i].translated(offsets[i]);
        let (start, extent) = if horizontal {
            (rect.left(), rect.width())
        } else {
            (rect.top(), rect.height())
        };
        let next = match cursor {
            None => start,
            Some(pos) => pos,
        };
        let shift = next - start;
        if horizontal {
            offsets[i].x += shift;
        } else {
            offsets[i].y += shift;
        }
        cursor = Some(next + extent + spacing);
    }
    offsets
}

impl EditorScene {
    /// Align the selection as one undo entry.
    pub fn align_selected(&mut self, request: AlignRequest) -> Result<(), EditError> {
        let _span = self.enter_span();
        let found = self.model.selection.len();
        if found < 2 {
            return Err(EditError::TooFewSelected { required: 2, found });
        }
        let (ids, rects): (Vec<ItemId>, Vec<Rect>) = self
            .model
            .selection
            .iter()
            .filter_map(|id| self.model.items.get(id).map(|item| (id, item.bounding_rect())))
            .unzip();
        let offsets = alignment_offsets(&rects, &request);

        let mut moved = Reposition {
            ids: Vec::new(),
            from: Vec::new(),
            to: Vec::new(),
        };
        for (id, offset) in ids.into_iter().zip(offsets) {
            let Some(item) = self.model.items.get(id) else {
                continue;
            };
            if offset.is_zero() {
                continue;
            }
            moved.ids.push(id);
            moved.from.push(item.pos);
            moved.to.push(item.pos + offset);
        }
        debug!(edge = ?request.settings.edge, moved = moved.ids.len(), "aligning selection");
        if moved.ids.is_empty() {
            self.message("Items are already aligned");
            return Ok(());
        }
        self.undo.begin_macro(format!("Align {} Items", found));
        self.push(EditCommand::Reposition(moved));
        self.undo.end_macro();
        Ok(())
    }

    /// Enter reference-line alignment with the given settings.
    ///
    /// Releasing without dragging aligns to the selection's own edges.
    pub fn start_align(&mut self, settings: AlignSettings) -> Result<(), EditError> {
        self.check_supported(ModeKind::AlignItems)?;
        self.install_mode(EditMode::AlignItems(AlignDraft {
            settings,
            line: None,
        }));
        Ok(())
    }

    pub(super) fn align_release(&mut self, p: Point) {
        let EditMode::AlignItems(draft) = &mut self.mode else {
            return;
        };
        let Some(mut line) = draft.line.take() else {
            return;
        };
        line.end = p;
        let reference = if line.start == line.end {
            AlignReference::Edges
        } else {
            AlignReference::Line(line.start)
        };
        let request = AlignRequest {
            settings: draft.settings,
            reference,
        };
        if let Err(e) = self.align_selected(request) {
            self.report(&e);
        }
        self.finish_gesture();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> Vec<Rect> {
        vec![
            Rect::new(0.0, 10.0, 20.0, 10.0),
            Rect::new(50.0, 30.0, 10.0, 30.0),
        ]
    }

    #[test]
    fn test_top_alignment_uses_highest_top() {
        let offsets = alignment_offsets(&rects(), &AlignRequest::edges(AlignEdge::Top));
        assert_eq!(offsets, vec![Point::ORIGIN, Point::new(0.0, -20.0)]);
    }

    #[test]
    fn test_right_alignment_uses_right_edge() {
        let offsets = alignment_offsets(&rects(), &AlignRequest::edges(AlignEdge::Right));
        assert_eq!(offsets, vec![Point::new(40.0, 0.0), Point::ORIGIN]);
    }

    #[test]
    fn test_centre_alignment_uses_mean() {
        let offsets = alignment_offsets(&rects(), &AlignRequest::edges(AlignEdge::HCenter));
        // centres at 15 and 45, mean 30
        assert_eq!(offsets, vec![Point::new(0.0, 15.0), Point::new(0.0, -15.0)]);
    }

    #[test]
    fn test_line_alignment_targets_line() {
        let request = AlignRequest::edges(AlignEdge::Left).to_line(Point::new(100.0, 0.0));
        let offsets = alignment_offsets(&rects(), &request);
        assert_eq!(offsets, vec![Point::new(100.0, 0.0), Point::new(50.0, 0.0)]);
    }

    #[test]
    fn test_spacing_distribution() {
        let request = AlignRequest::edges(AlignEdge::Top).with_spacing(5.0);
        let offsets = alignment_offsets(&rects(), &request);
        // second item starts 5 after the first one's right edge at 20
        assert_eq!(offsets[0], Point::ORIGIN);
        assert_eq!(offsets[1], Point::new(-25.0, -20.0));
    }

    #[test]
    fn test_vertical_spacing_sorts_by_top() {
        let rects = vec![
            Rect::new(0.0, 100.0, 10.0, 10.0),
            Rect::new(40.0, 0.0, 10.0, 20.0),
        ];
        let request = AlignRequest::edges(AlignEdge::Left).with_spacing(0.0);
        let offsets = alignment_offsets(&rects, &request);
        assert_eq!(offsets[1], Point::new(-40.0, 0.0));
        assert_eq!(offsets[0], Point::new(0.0, -80.0));
    }
}
