//! Bounded undo/redo history.
//!
//! Two stacks of [`UndoStep`]s. Steps carry a group id; consecutive single-line insertions share
//! a group so one undo reverts a whole typed word. Any new edit clears the redo stack.

use crate::delta::EditDelta;
use crate::selection::Selection;

/// One recorded edit together with the selection around it.
#[derive(Debug, Clone)]
pub struct UndoStep {
    pub(crate) group_id: usize,
    /// Deltas in the order they were applied.
    pub edits: Vec<EditDelta>,
    /// Selection before the edit.
    pub before_selection: Selection,
    /// Selection after the edit.
    pub after_selection: Selection,
}

impl UndoStep {
    /// Create a step; the group id is assigned by [`UndoHistory::push_step`].
    pub fn new(edits: Vec<EditDelta>, before_selection: Selection, after_selection: Selection) -> Self {
        Self {
            group_id: 0,
            edits,
            before_selection,
            after_selection,
        }
    }
}

/// Undo/redo stacks with a size limit.
#[derive(Debug)]
pub struct UndoHistory {
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_undo: usize,
    next_group_id: usize,
    open_group_id: Option<usize>,
}

impl UndoHistory {
    /// Create an empty history keeping at most `max_undo` steps.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo: max_undo.max(1),
            next_group_id: 0,
            open_group_id: None,
        }
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo stack depth (counted in steps, not groups)
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Stop coalescing; the next edit starts a new group.
    pub fn end_group(&mut self) {
        self.open_group_id = None;
    }

    /// Forget everything (the document was replaced).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group_id = None;
    }

    /// Record a new edit. Returns the group id it was filed under.
    pub fn push_step(&mut self, mut step: UndoStep, coalescible_insert: bool) -> usize {
        self.redo_stack.clear();

        if self.undo_stack.len() >= self.max_undo {
            self.undo_stack.remove(0);
        }

        step.group_id = match self.open_group_id {
            Some(open) if coalescible_insert => open,
            _ => {
                let id = self.next_group_id;
                self.next_group_id = self.next_group_id.wrapping_add(1);
                id
            }
        };

        self.open_group_id = coalescible_insert.then_some(step.group_id);

        let group_id = step.group_id;
        self.undo_stack.push(step);
        group_id
    }

    /// Pop the newest group from the undo stack, newest step first.
    pub fn pop_undo_group(&mut self) -> Option<Vec<UndoStep>> {
        self.end_group();
        Self::pop_group(&mut self.undo_stack)
    }

    /// Pop the oldest undone group from the redo stack, oldest step first.
    pub fn pop_redo_group(&mut self) -> Option<Vec<UndoStep>> {
        self.end_group();
        Self::pop_group(&mut self.redo_stack)
    }

    /// Move undone steps (as returned by [`pop_undo_group`](Self::pop_undo_group)) to the redo stack.
    pub fn push_undone(&mut self, steps: Vec<UndoStep>) {
        // Same pop order (newest->oldest) so redo pops the oldest first.
        self.redo_stack.extend(steps);
    }

    /// Return redone steps (as returned by [`pop_redo_group`](Self::pop_redo_group)) to the undo stack.
    pub fn push_redone(&mut self, steps: Vec<UndoStep>) {
        self.undo_stack.extend(steps);
    }

    fn pop_group(stack: &mut Vec<UndoStep>) -> Option<Vec<UndoStep>> {
        let last_group_id = stack.last().map(|s| s.group_id)?;
        let mut steps = Vec::new();
        while stack.last().is_some_and(|s| s.group_id == last_group_id) {
            steps.extend(stack.pop());
        }
        Some(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_step(offset: usize, text: &str) -> UndoStep {
        let after = offset + text.chars().count();
        UndoStep::new(
            vec![EditDelta::insert(offset, text)],
            Selection::caret(offset),
            Selection::caret(after),
        )
    }

    #[test]
    fn coalescible_inserts_share_a_group() {
        let mut history = UndoHistory::new(10);
        let a = history.push_step(insert_step(0, "a"), true);
        let b = history.push_step(insert_step(1, "b"), true);
        assert_eq!(a, b);

        let group = history.pop_undo_group().unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].edits[0].inserted_text, "b");
        assert!(!history.can_undo());
    }

    #[test]
    fn end_group_splits_coalescing() {
        let mut history = UndoHistory::new(10);
        let a = history.push_step(insert_step(0, "a"), true);
        history.end_group();
        let b = history.push_step(insert_step(1, "b"), true);
        assert_ne!(a, b);
        assert_eq!(history.pop_undo_group().unwrap().len(), 1);
        assert!(history.can_undo());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut history = UndoHistory::new(10);
        history.push_step(insert_step(0, "a"), false);
        let undone = history.pop_undo_group().unwrap();
        history.push_undone(undone);
        assert!(history.can_redo());

        history.push_step(insert_step(0, "z"), false);
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_drops_oldest_steps() {
        let mut history = UndoHistory::new(2);
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            history.push_step(insert_step(i, text), false);
        }
        assert_eq!(history.undo_depth(), 2);
        let newest = history.pop_undo_group().unwrap();
        assert_eq!(newest[0].edits[0].inserted_text, "c");
        let older = history.pop_undo_group().unwrap();
        assert_eq!(older[0].edits[0].inserted_text, "b");
        assert!(history.pop_undo_group().is_none());
    }
}
