//! Layout-only scene operations: layer state, DRC markers, instance
//! renumbering and the cut tool.

use reveda_core::{CollaboratorError, EditError};
use tracing::{debug, info};

use super::EditorScene;
use crate::commands::{EditCommand, RenameItem};
use crate::edit_mode::EditMode;
use crate::geometry::{Point, Rect, Segment};
use crate::model::{Item, ItemId, LayerKey, Shape};

impl EditorScene {
    /// Drop selected items that can no longer be picked.
    fn prune_unpickable_selection(&mut self) {
        let items = &self.model.items;
        let layers = &self.layers;
        self.model.selection.retain(|id| {
            items
                .get(id)
                .is_some_and(|item| layers.is_pickable(item.layer.as_ref()))
        });
    }

    /// Returns false when the layer is not in the table.
    pub fn set_layer_visible(&mut self, key: &LayerKey, visible: bool) -> bool {
        let found = self.layers.set_visible(key, visible);
        if found && !visible {
            self.prune_unpickable_selection();
        }
        found
    }

    pub fn set_layer_selectable(&mut self, key: &LayerKey, selectable: bool) -> bool {
        let found = self.layers.set_selectable(key, selectable);
        if found && !selectable {
            self.prune_unpickable_selection();
        }
        found
    }

    pub fn set_all_layers_visible(&mut self, visible: bool) {
        self.layers.set_all_visible(visible);
        if !visible {
            self.prune_unpickable_selection();
        }
    }

    pub fn set_all_layers_selectable(&mut self, selectable: bool) {
        self.layers.set_all_selectable(selectable);
        if !selectable {
            self.prune_unpickable_selection();
        }
    }

    /// Layer used for new rectangles and polygons.
    pub fn set_current_layer(&mut self, key: LayerKey) -> Result<(), CollaboratorError> {
        let _span = self.enter_span();
        if self.layers.get(&key).is_none() {
            let err = CollaboratorError::MissingLayer {
                name: key.name,
                purpose: key.purpose,
            };
            self.report_collaborator(&err);
            return Err(err);
        }
        debug!(layer = %key, "current layer");
        self.current_layer = Some(key);
        Ok(())
    }

    /// Replace the DRC overlay and fit the view to it.
    pub fn highlight_drc_polygons(&mut self, polygons: &[Vec<Point>]) {
        self.drc_markers = polygons.to_vec();
        if let Some(bounds) = Rect::bounding(polygons.iter().flatten().copied()) {
            self.request_fit(bounds.padded(self.fit_padding));
        }
    }

    pub fn clear_drc_markers(&mut self) {
        self.drc_markers.clear();
    }

    /// Rename every instance `I0..In` in insertion order, as one entry.
    ///
    /// Returns the number of instances whose name changed.
    pub fn renumber_instances(&mut self) -> usize {
        let _span = self.enter_span();
        let renames: Vec<RenameItem> = self
            .model
            .items
            .iter()
            .filter_map(|item| match &item.shape {
                Shape::Instance(s) => Some((item.id, s.name.clone())),
                _ => None,
            })
            .enumerate()
            .filter_map(|(index, (id, before))| {
                let after = format!("I{}", index);
                (after != before).then_some(RenameItem { id, before, after })
            })
            .collect();
        let count = renames.len();
        if count == 0 {
            return 0;
        }
        self.undo.begin_macro("Renumber Instances");
        for rename in renames {
            self.push(EditCommand::Rename(rename));
        }
        self.undo.end_macro();
        info!(count, "renumbered instances");
        self.message(format!("Renumbered {} instances", count));
        count
    }

    pub(super) fn cut_release(&mut self, p: Point) {
        let EditMode::CutShape(slot) = &mut self.mode else {
            return;
        };
        let Some(mut line) = slot.take() else {
            return;
        };
        line.end = p;
        if let Err(e) = self.cut_with_line(line.segment()) {
            self.report(&e);
        }
        self.finish_gesture();
    }

    /// Split every rectangle `cut` fully crosses into two, as one entry.
    pub fn cut_with_line(&mut self, cut: Segment) -> Result<usize, EditError> {
        let _span = self.enter_span();
        let degenerate = || EditError::DegenerateGeometry {
            what: "cut line".to_string(),
        };
        if cut.length() == 0.0 || !(cut.is_horizontal() || cut.is_vertical()) {
            return Err(degenerate());
        }
        let mut pieces: Vec<(ItemId, [Item; 2])> = Vec::new();
        let mut refused = None;
        for item in self.model.items.iter().filter(|item| self.is_pickable(item)) {
            let bounds = item.bounding_rect();
            if !cut.intersects_rect(&bounds) {
                continue;
            }
            match &item.shape {
                Shape::Rect(_) => {
                    if let Some(split) = split_rect(item, &bounds, &cut) {
                        pieces.push((item.id, split));
                    }
                }
                other => {
                    refused.get_or_insert_with(|| other.kind_name());
                }
            }
        }

        if pieces.is_empty() {
            return match refused {
                Some(what) => Err(EditError::NotCuttable {
                    what: what.to_string(),
                }),
                None => {
                    self.message("Cut line does not cross a rectangle");
                    Ok(0)
                }
            };
        }

        let count = pieces.len();
        self.undo.begin_macro(format!("Cut {} Items", count));
        for (id, [mut first, mut second]) in pieces {
            self.push(EditCommand::delete(vec![id]));
            first.id = self.model.items.allocate_id();
            second.id = self.model.items.allocate_id();
            self.push(EditCommand::add(vec![first, second]));
        }
        self.undo.end_macro();
        debug!(count, "cut rectangles");
        if let Some(what) = refused {
            self.report(&EditError::NotCuttable {
                what: what.to_string(),
            });
        } else {
            self.message(format!("Cut {} rectangles", count));
        }
        Ok(count)
    }
}

/// Two halves of a rectangle item, or `None` unless the cut strictly crosses
/// it and spans its whole extent.
fn split_rect(item: &Item, bounds: &Rect, cut: &Segment) -> Option<[Item; 2]> {
    let span = cut.bounds();
    let (first, second) = if cut.is_vertical() {
        let x = cut.start.x;
        if x <= bounds.left() || x >= bounds.right() {
            return None;
        }
        if span.top() > bounds.top() || span.bottom() < bounds.bottom() {
            return None;
        }
        (
            Rect::new(bounds.left(), bounds.top(), x - bounds.left(), bounds.height()),
            Rect::new(x, bounds.top(), bounds.right() - x, bounds.height()),
        )
    } else {
        let y = cut.start.y;
        if y <= bounds.top() || y >= bounds.bottom() {
            return None;
        }
        if span.left() > bounds.left() || span.right() < bounds.right() {
            return None;
        }
        (
            Rect::new(bounds.left(), bounds.top(), bounds.width(), y - bounds.top()),
            Rect::new(bounds.left(), y, bounds.width(), bounds.bottom() - y),
        )
    };
    let piece = |rect: Rect| {
        let mut piece = item.clone();
        piece.shape = Shape::rect(Rect::new(0.0, 0.0, rect.width(), rect.height()));
        piece.pos = rect.min;
        piece.angle = 0;
        piece
    };
    Some([piece(first), piece(second)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_mode::{ModeKind, SceneKind};
    use crate::input::PointerEvent;
    use crate::layout::{Layer, ProcessRules};
    use crate::model::InstanceShape;
    use crate::session::SessionContext;

    fn layout_scene() -> EditorScene {
        let rules = ProcessRules {
            layers: vec![
                Layer::new("metal1", "drawing", 8, 0).with_z(1),
                Layer::new("poly", "drawing", 5, 0).with_z(0),
            ],
            ..ProcessRules::default()
        };
        let context = SessionContext::default().with_process(rules);
        EditorScene::new(SceneKind::Layout, &context)
    }

    fn draw_rect(scene: &mut EditorScene, x0: f64, y0: f64, x1: f64, y1: f64) {
        scene.set_mode(ModeKind::DrawRect).unwrap();
        scene.handle_pointer(PointerEvent::press(x0, y0));
        scene.handle_pointer(PointerEvent::release(x1, y1));
    }

    #[test]
    fn test_hidden_layer_leaves_selection() {
        let mut scene = layout_scene();
        let metal1 = LayerKey::new("metal1", "drawing");
        scene.set_current_layer(metal1.clone()).unwrap();
        draw_rect(&mut scene, 0.0, 0.0, 50.0, 50.0);
        scene.select_all();
        assert_eq!(scene.selection().len(), 1);

        assert!(scene.set_layer_visible(&metal1, false));
        assert!(scene.selection().is_empty());
        scene.select_all();
        assert!(scene.selection().is_empty());
    }

    #[test]
    fn test_unknown_current_layer_is_rejected() {
        let mut scene = layout_scene();
        let err = scene
            .set_current_layer(LayerKey::new("metal9", "drawing"))
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::MissingLayer { .. }));
        assert!(scene.current_layer().is_none());
    }

    #[test]
    fn test_drc_markers_replace_and_fit() {
        let mut scene = layout_scene();
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        scene.highlight_drc_polygons(&[square.clone(), square]);
        assert_eq!(scene.drc_markers().len(), 2);
        scene.highlight_drc_polygons(&[]);
        assert!(scene.drc_markers().is_empty());
        assert!(!scene.undo_stack().can_undo());
    }

    #[test]
    fn test_vertical_cut_splits_rect() {
        let mut scene = layout_scene();
        draw_rect(&mut scene, 0.0, 0.0, 100.0, 40.0);
        let cut = Segment::new(Point::new(30.0, -10.0), Point::new(30.0, 50.0));
        assert_eq!(scene.cut_with_line(cut), Ok(1));

        let mut bounds: Vec<Rect> = scene.items().iter().map(|i| i.bounding_rect()).collect();
        bounds.sort_by(|a, b| a.left().total_cmp(&b.left()));
        assert_eq!(
            bounds,
            vec![Rect::new(0.0, 0.0, 30.0, 40.0), Rect::new(30.0, 0.0, 70.0, 40.0)]
        );

        scene.undo().unwrap();
        assert_eq!(scene.items().len(), 1);
    }

    #[test]
    fn test_diagonal_cut_is_rejected() {
        let mut scene = layout_scene();
        draw_rect(&mut scene, 0.0, 0.0, 100.0, 40.0);
        let cut = Segment::new(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        assert!(matches!(
            scene.cut_with_line(cut),
            Err(EditError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_renumber_instances_is_one_entry() {
        let mut scene = layout_scene();
        let mut items = Vec::new();
        for name in ["I7", "I3", "X"] {
            let id = scene.model.items.allocate_id();
            items.push(Item::new(
                id,
                Shape::Instance(InstanceShape {
                    library: "lib".to_string(),
                    cell: "inv".to_string(),
                    view: "layout".to_string(),
                    name: name.to_string(),
                    bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                }),
            ));
        }
        scene.push(EditCommand::add(items));
        let before = scene.undo_stack().count();

        assert_eq!(scene.renumber_instances(), 3);
        assert_eq!(scene.undo_stack().count(), before + 1);
        let names: Vec<_> = scene
            .items()
            .iter()
            .filter_map(|i| i.shape.text().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["I0", "I1", "I2"]);
        assert_eq!(scene.renumber_instances(), 0);
    }
}
