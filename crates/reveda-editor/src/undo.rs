//! Bounded linear undo history with nestable macros.

use reveda_core::constants::DEFAULT_UNDO_LIMIT;
use reveda_core::EditError;
use tracing::{debug, warn};

use crate::commands::{CompositeCommand, EditCommand};
use crate::model::SceneModel;

/// Linear history of applied commands.
///
/// `index` is the number of entries currently applied; entries past it are
/// the redo tail. Recording a new entry discards that tail, and once the
/// stack holds more than `limit` entries the oldest one is dropped without
/// reverting it.
#[derive(Debug)]
pub struct UndoStack {
    entries: Vec<EditCommand>,
    index: usize,
    limit: usize,
    macros: Vec<CompositeCommand>,
    clean_index: Option<usize>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    /// A limit of zero means unbounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            limit,
            macros: Vec::new(),
            clean_index: Some(0),
        }
    }

    /// Apply `cmd` to the model, then record it.
    ///
    /// While a macro is open the command becomes part of that macro.
    pub fn push(&mut self, mut cmd: EditCommand, model: &mut SceneModel) {
        cmd.apply(model);
        match self.macros.last_mut() {
            Some(open) => open.commands.push(cmd),
            None => self.record(cmd),
        }
    }

    fn record(&mut self, cmd: EditCommand) {
        debug!(text = %cmd.text(), index = self.index, "recording undo entry");
        self.entries.truncate(self.index);
        if matches!(self.clean_index, Some(clean) if clean > self.index) {
            self.clean_index = None;
        }
        self.entries.push(cmd);
        self.index += 1;
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() > self.limit {
            self.entries.remove(0);
            self.index = self.index.saturating_sub(1);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean) => Some(clean - 1),
            };
        }
    }

    /// Open a macro scope. Macros nest; only the outermost one is recorded.
    pub fn begin_macro(&mut self, name: impl Into<String>) {
        self.macros.push(CompositeCommand {
            name: name.into(),
            commands: Vec::new(),
        });
    }

    /// Close the innermost macro.
    ///
    /// An empty macro records nothing. An unnamed macro takes the text of
    /// its first command, and an unnamed single-command macro is recorded as
    /// that command alone.
    pub fn end_macro(&mut self) {
        let Some(mut closed) = self.macros.pop() else {
            warn!("end_macro called without an open macro");
            return;
        };
        if closed.commands.is_empty() {
            return;
        }
        let cmd = if closed.name.is_empty() {
            if closed.commands.len() == 1 {
                closed.commands.remove(0)
            } else {
                closed.name = closed.commands[0].text();
                EditCommand::Composite(closed)
            }
        } else {
            EditCommand::Composite(closed)
        };
        match self.macros.last_mut() {
            Some(outer) => outer.commands.push(cmd),
            None => self.record(cmd),
        }
    }

    pub fn is_macro_open(&self) -> bool {
        !self.macros.is_empty()
    }

    /// Revert the entry below the top. Returns false when nothing is left.
    pub fn undo(&mut self, model: &mut SceneModel) -> Result<bool, EditError> {
        if self.is_macro_open() {
            return Err(EditError::MacroOpen);
        }
        if self.index == 0 {
            return Ok(false);
        }
        self.index -= 1;
        self.entries[self.index].undo(model);
        Ok(true)
    }

    /// Re-apply the entry above the top. Returns false when at the end.
    pub fn redo(&mut self, model: &mut SceneModel) -> Result<bool, EditError> {
        if self.is_macro_open() {
            return Err(EditError::MacroOpen);
        }
        if self.index >= self.entries.len() {
            return Ok(false);
        }
        self.entries[self.index].apply(model);
        self.index += 1;
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0 && !self.is_macro_open()
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.entries.len() && !self.is_macro_open()
    }

    pub fn undo_text(&self) -> Option<String> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(EditCommand::text)
    }

    pub fn redo_text(&self) -> Option<String> {
        self.entries.get(self.index).map(EditCommand::text)
    }

    /// Number of recorded entries, including the redo tail.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn undo_limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest entries if the history is
    /// already longer.
    pub fn set_undo_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.enforce_limit();
    }

    /// Forget all history. The current model state becomes the baseline.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.macros.clear();
        self.index = 0;
        self.clean_index = Some(0);
    }

    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index) && !self.is_macro_open()
    }
}
