use std::collections::VecDeque;

use crate::error::{PaintError, PaintResult};
use crate::pixel_buffer::{PixelBuffer, Snapshot};

/// Number of undo steps kept by default
pub const DEFAULT_CAPACITY: usize = 30;

/// Bounded undo/redo of whole-canvas snapshots.
///
/// History is strictly linear: committing a new mutation after an undo
/// drops the redo branch.
pub struct History {
    /// Snapshots taken before each committed mutation, oldest first
    undo_stack: VecDeque<Snapshot>,
    /// Snapshots of states that were undone, most recent last
    redo_stack: Vec<Snapshot>,
    capacity: usize,
}

impl History {
    /// A history keeping at most `capacity` undo steps (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// Record the state of `buffer` right before a committed mutation.
    ///
    /// Call exactly once per commit and never for preview-only draws.
    pub fn begin_mutation(&mut self, buffer: &PixelBuffer) {
        self.push_undo(buffer.snapshot());
        self.redo_stack.clear();
    }

    /// Step back to the state before the latest commit.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> PaintResult<()> {
        let previous = self.undo_stack.back().ok_or(PaintError::NothingToUndo)?;
        buffer.ensure_same_size(previous)?;

        let current = buffer.snapshot();
        if let Some(previous) = self.undo_stack.pop_back() {
            buffer.replace(previous)?;
        }
        self.redo_stack.push(current);
        log::info!("Undo ({} left, {} redoable)", self.undo_stack.len(), self.redo_stack.len());
        Ok(())
    }

    /// Re-apply the most recently undone state.
    pub fn redo(&mut self, buffer: &mut PixelBuffer) -> PaintResult<()> {
        let next = self.redo_stack.last().ok_or(PaintError::NothingToRedo)?;
        buffer.ensure_same_size(next)?;

        let current = buffer.snapshot();
        if let Some(next) = self.redo_stack.pop() {
            buffer.replace(next)?;
        }
        self.push_undo(current);
        log::info!("Redo ({} undoable, {} left)", self.undo_stack.len(), self.redo_stack.len());
        Ok(())
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
            log::debug!("Undo history full, dropped oldest snapshot");
        }
        self.undo_stack.push_back(snapshot);
    }

    /// Returns true if there are states that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are states that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget all recorded states
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
