//! Keyboard bindings.

use tracing::debug;

use super::EditorView;
use crate::edit_mode::ModeKind;
use crate::input::{Key, Modifiers};
use crate::scene::EditorScene;

impl EditorView {
    /// Handle a key press. Returns false for keys the editor does not bind.
    ///
    /// | Key            | Action                                   |
    /// |----------------|------------------------------------------|
    /// | M / C / R / S  | move, copy, rotate, stretch mode         |
    /// | F              | fit items in view                        |
    /// | arrows         | shift the view by half its extent        |
    /// | PageUp         | cycle through stacked items              |
    /// | Z              | zoom mode; Ctrl zooms in, Shift out by 2 |
    /// | U / Shift+U    | undo / redo                              |
    /// | Escape         | cancel the gesture and deselect          |
    /// | Delete         | delete the selection                     |
    /// | Enter          | finish a path or polygon                 |
    pub fn key_press(&mut self, key: Key, modifiers: Modifiers) -> bool {
        debug!(?key, ?modifiers, "key press");
        let scene = &mut self.scene;
        let editable = !scene.is_read_only();
        match key {
            Key::Character(c) => match c.to_ascii_lowercase() {
                'm' if editable => enter_mode(scene, ModeKind::MoveItem),
                'c' if editable => enter_mode(scene, ModeKind::CopyItem),
                'r' if editable => enter_mode(scene, ModeKind::RotateItem),
                's' if editable => enter_mode(scene, ModeKind::StretchItem),
                'f' => {
                    scene.fit_items_in_view();
                    scene.context().message("Fit Items In View");
                }
                'z' if modifiers.ctrl => scene.zoom_in_by_2(),
                'z' if modifiers.shift => scene.zoom_out_by_2(),
                'z' => enter_mode(scene, ModeKind::ZoomView),
                'u' if editable => {
                    let result = if modifiers.shift || c.is_ascii_uppercase() {
                        scene.redo()
                    } else {
                        scene.undo()
                    };
                    if let Err(e) = result {
                        scene.report(&e);
                    }
                }
                _ => return false,
            },
            Key::Left => {
                scene.move_scene_left();
                scene.context().message("Move View Left");
            }
            Key::Right => {
                scene.move_scene_right();
                scene.context().message("Move View Right");
            }
            Key::Up => {
                scene.move_scene_up();
                scene.context().message("Move View Up");
            }
            Key::Down => {
                scene.move_scene_down();
                scene.context().message("Move View Down");
            }
            Key::PageUp => {
                scene.cycle_selection(modifiers);
            }
            Key::Escape => {
                scene.cancel();
                scene.deselect_all();
            }
            Key::Delete if editable => {
                if let Err(e) = scene.delete_selected() {
                    scene.report(&e);
                }
            }
            Key::Enter if editable => scene.finish_draft(),
            _ => return false,
        }
        self.sync();
        true
    }
}

fn enter_mode(scene: &mut EditorScene, kind: ModeKind) {
    // unsupported modes are reported by the scene
    let _ = scene.set_mode(kind);
}
