//! Applying schematic net clean-up to the scene.

use tracing::debug;

use super::EditorScene;
use crate::commands::EditCommand;
use crate::edit_mode::SceneKind;
use crate::geometry::{Point, Rect};
use crate::schematic::{junction_points, merge_split_nets, prune_short_nets};

impl EditorScene {
    /// Prune, merge and split the nets within `rect`.
    ///
    /// Pushes at most two commands; callers that want them to share a
    /// gesture's undo entry open a macro around both. Returns whether
    /// anything changed.
    pub fn normalize_nets(&mut self, rect: Rect) -> bool {
        let _span = self.enter_span();
        if self.kind != SceneKind::Schematic {
            return false;
        }
        let short = prune_short_nets(&self.model.items, &rect, self.context.grid.snap_distance());
        let pruned = !short.is_empty();
        if pruned {
            debug!(count = short.len(), "pruning short nets");
            self.push(EditCommand::delete(short));
        }

        let rewrite = merge_split_nets(&self.model.items, &rect);
        if rewrite.is_empty() {
            return pruned;
        }
        debug!(
            removed = rewrite.removed.len(),
            added = rewrite.added.len(),
            "merging and splitting nets"
        );
        let added = rewrite
            .added
            .into_iter()
            .map(|net| {
                let id = self.model.items.allocate_id();
                net.into_item(id)
            })
            .collect();
        self.undo.begin_macro("Normalize Nets");
        self.push(EditCommand::delete(rewrite.removed));
        self.push(EditCommand::add(added));
        self.undo.end_macro();
        true
    }

    /// Junction dots within the visible rectangle.
    pub fn junction_points(&self) -> Vec<Point> {
        if self.kind != SceneKind::Schematic {
            return Vec::new();
        }
        junction_points(&self.model.items, &self.scene_rect)
    }
}
