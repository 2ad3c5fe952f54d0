//! Bounded snapshot-based undo/redo stacks.
//!
//! - Two stacks: undo (past states) and redo (states undone)
//! - Recording a new entry clears the redo stack
//! - Both stacks are capped; the oldest entry is dropped on overflow
//! - Undo and redo always swap the current state onto the opposite stack,
//!   so redo after undo lands exactly where the user was

use std::collections::VecDeque;

/// Undo/redo stacks of full snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    undo: VecDeque<T>,
    redo: VecDeque<T>,
    depth: usize,
}

impl<T> History<T> {
    /// Create empty stacks holding at most `depth` entries each.
    pub fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            depth,
        }
    }

    /// Record the state *before* a mutation and invalidate the redo branch.
    pub fn record(&mut self, before: T) {
        self.redo.clear();
        push_bounded(&mut self.undo, before, self.depth);
        tracing::debug!(undo_depth = self.undo.len(), "History entry recorded");
    }

    /// Step back: returns the state to restore, having moved `current` onto
    /// the redo stack. `None` (and no change) when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current, self.depth);
        tracing::debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "Undo"
        );
        Some(previous)
    }

    /// Step forward: the mirror image of [`History::undo`].
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current, self.depth);
        tracing::debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "Redo"
        );
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.depth
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &T> {
        self.undo.iter()
    }

    /// Redo entries, oldest first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &T> {
        self.redo.iter()
    }
}

fn push_bounded<T>(stack: &mut VecDeque<T>, value: T, depth: usize) {
    if depth == 0 {
        return;
    }
    while stack.len() >= depth {
        stack.pop_front();
    }
    stack.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let h: History<u32> = History::new(50);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.undo_depth(), 0);
        assert_eq!(h.max_depth(), 50);
    }

    #[test]
    fn undo_empty_returns_none() {
        let mut h: History<u32> = History::new(50);
        assert_eq!(h.undo(7), None);
        // The current value must not leak onto the redo stack
        assert!(!h.can_redo());
    }

    #[test]
    fn redo_empty_returns_none() {
        let mut h: History<u32> = History::new(50);
        assert_eq!(h.redo(7), None);
        assert!(!h.can_undo());
    }

    #[test]
    fn undo_then_redo_swaps_current() {
        let mut h = History::new(50);
        h.record(1);
        // Current state is now 2
        assert_eq!(h.undo(2), Some(1));
        assert_eq!(h.redo_depth(), 1);
        assert_eq!(h.redo(1), Some(2));
        assert_eq!(h.undo_depth(), 1);
        assert!(!h.can_redo());
    }

    #[test]
    fn record_clears_redo() {
        let mut h = History::new(50);
        h.record(1);
        h.record(2);
        h.undo(3);
        assert!(h.can_redo());

        h.record(2);
        assert!(!h.can_redo());
    }

    #[test]
    fn depth_evicts_oldest_first() {
        let mut h = History::new(50);
        for i in 0..60 {
            h.record(i);
        }
        assert_eq!(h.undo_depth(), 50);
        let entries: Vec<_> = h.undo_entries().copied().collect();
        assert_eq!(entries.first(), Some(&10));
        assert_eq!(entries.last(), Some(&59));
    }

    #[test]
    fn redo_stack_is_bounded_too() {
        let mut h = History::new(3);
        for i in 0..3 {
            h.record(i);
        }
        let mut current = 3;
        while let Some(previous) = h.undo(current) {
            current = previous;
        }
        assert_eq!(h.redo_depth(), 3);
        assert_eq!(current, 0);
    }

    #[test]
    fn zero_depth_records_nothing() {
        let mut h = History::new(0);
        h.record(1);
        assert!(!h.can_undo());
    }
}
