//! Editor buffer
//!
//! [`Editor`] aggregates the [`Document`], the caret/selection and the [`UndoHistory`]. Every
//! text mutation goes through it so the history always matches the document.
//!
//! # Example
//!
//! ```rust
//! use pad_core::Editor;
//!
//! let mut editor = Editor::new(100);
//! editor.insert_text("hello");
//! editor.select_all();
//! assert_eq!(editor.selected_text().as_deref(), Some("hello"));
//!
//! editor.insert_text("bye");
//! assert_eq!(editor.text(), "bye");
//!
//! editor.undo();
//! assert_eq!(editor.text(), "hello");
//! ```

use crate::delta::EditDelta;
use crate::document::Document;
use crate::error::CommandError;
use crate::history::{UndoHistory, UndoStep};
use crate::selection::{Position, Selection};
use ropey::RopeSlice;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Document plus caret, selection and edit history.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    selection: Selection,
    history: UndoHistory,
    /// Column kept across consecutive vertical moves.
    goal_column: Option<usize>,
}

impl Editor {
    /// Create an editor with an empty document and an undo limit.
    pub fn new(undo_limit: usize) -> Self {
        Self::with_document(Document::new(), undo_limit)
    }

    /// Create an editor around an existing document, caret at the start.
    pub fn with_document(document: Document, undo_limit: usize) -> Self {
        Self {
            document,
            selection: Selection::caret(0),
            history: UndoHistory::new(undo_limit),
            goal_column: None,
        }
    }

    /// The open document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Full text content
    pub fn text(&self) -> String {
        self.document.text().to_string()
    }

    /// Total character count
    pub fn char_count(&self) -> usize {
        self.document.text().len_chars()
    }

    /// Total line count
    pub fn line_count(&self) -> usize {
        self.document.text().len_lines()
    }

    /// Text of `line` without its line break.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }
        let slice = self.document.text().line(line);
        let content = slice.len_chars() - line_break_len(slice);
        Some(slice.slice(..content).to_string())
    }

    /// Current selection (may be empty).
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret offset in characters.
    pub fn cursor_offset(&self) -> usize {
        self.selection.head
    }

    /// Caret as line/column.
    pub fn cursor_position(&self) -> Position {
        self.offset_to_position(self.selection.head)
    }

    /// Convert a character offset to line/column.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let text = self.document.text();
        let offset = offset.min(text.len_chars());
        let line = text.char_to_line(offset);
        Position::new(line, offset - text.line_to_char(line))
    }

    /// Convert line/column to a character offset, clamping to the line content.
    pub fn position_to_offset(&self, position: Position) -> usize {
        let line_count = self.line_count();
        if position.line >= line_count {
            return self.char_count();
        }
        let line_start = self.document.text().line_to_char(position.line);
        line_start + position.column.min(self.line_content_len(position.line))
    }

    /// Selected text, or `None` when the selection is empty.
    pub fn selected_text(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        Some(self.document.text().slice(self.selection.range()).to_string())
    }

    // ---- document lifecycle -------------------------------------------------------------

    /// Load a file, replacing the document. History and caret are reset on success only.
    pub fn load(&mut self, path: &Path) -> Result<(), CommandError> {
        self.document.load(path)?;
        self.after_replace();
        Ok(())
    }

    /// Save (see [`Document::save`]). Closes the open undo group on success.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), CommandError> {
        self.document.save(path)?;
        self.history.end_group();
        Ok(())
    }

    /// Clear the document and its file association.
    pub fn reset(&mut self) {
        self.document.reset();
        self.after_replace();
    }

    /// Replace the document wholesale.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.after_replace();
    }

    fn after_replace(&mut self) {
        self.selection = Selection::caret(0);
        self.history.clear();
        self.goal_column = None;
    }

    // ---- edits --------------------------------------------------------------------------

    /// Type `text`: replaces the selection, caret ends after the inserted text.
    ///
    /// Consecutive single-line insertions coalesce into one undo group.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let coalescible = !text.contains('\n') && self.selection.is_empty();
        self.replace_selection(text, coalescible)
    }

    /// Paste `text`: like [`insert_text`](Self::insert_text) but always its own undo group.
    pub fn paste_text(&mut self, text: &str) -> bool {
        self.replace_selection(text, false)
    }

    /// Delete the selection. Returns `false` when nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.replace_selection("", false)
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn backspace(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let head = self.selection.head;
        let start = self.prev_boundary(head);
        self.delete_range(start, head, Selection::caret(start))
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let head = self.selection.head;
        let end = self.next_boundary(head);
        self.delete_range(head, end, Selection::caret(head))
    }

    fn delete_range(&mut self, start: usize, end: usize, after: Selection) -> bool {
        if start >= end {
            return false;
        }
        let deleted = self.document.text().slice(start..end).to_string();
        self.apply_edit(EditDelta::delete(start, deleted), after, false);
        true
    }

    fn replace_selection(&mut self, text: &str, coalescible: bool) -> bool {
        let range = self.selection.range();
        if range.is_empty() && text.is_empty() {
            return false;
        }
        let deleted = self.document.text().slice(range.clone()).to_string();
        let caret = range.start + text.chars().count();
        let delta = EditDelta {
            start: range.start,
            deleted_text: deleted,
            inserted_text: text.to_string(),
        };
        self.apply_edit(delta, Selection::caret(caret), coalescible);
        true
    }

    fn apply_edit(&mut self, delta: EditDelta, after: Selection, coalescible: bool) {
        let before = self.selection;
        self.document.apply(&delta);
        self.selection = after;
        self.goal_column = None;
        let group = self
            .history
            .push_step(UndoStep::new(vec![delta], before, after), coalescible);
        tracing::trace!(group, "recorded edit");
    }

    // ---- history ------------------------------------------------------------------------

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo stack depth in steps.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Close the current coalescing group.
    pub fn end_undo_group(&mut self) {
        self.history.end_group();
    }

    /// Revert the newest undo group. Returns `false` (and does nothing) when history is empty.
    pub fn undo(&mut self) -> bool {
        let Some(steps) = self.history.pop_undo_group() else {
            return false;
        };
        for step in &steps {
            for edit in step.edits.iter().rev() {
                self.document.apply(&edit.inverted());
            }
            self.selection = step.before_selection;
        }
        tracing::debug!(steps = steps.len(), "undo");
        self.history.push_undone(steps);
        self.goal_column = None;
        true
    }

    /// Reapply the oldest undone group. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(steps) = self.history.pop_redo_group() else {
            return false;
        };
        for step in &steps {
            for edit in &step.edits {
                self.document.apply(edit);
            }
            self.selection = step.after_selection;
        }
        tracing::debug!(steps = steps.len(), "redo");
        self.history.push_redone(steps);
        self.goal_column = None;
        true
    }

    // ---- caret & selection --------------------------------------------------------------

    /// Select the whole document; caret at the end.
    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.char_count());
        self.goal_column = None;
    }

    /// Set the selection, clamped to the document.
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        self.selection = Selection::new(anchor, head).clamped(self.char_count());
        self.goal_column = None;
    }

    /// Move the caret to `offset`, extending the selection if asked.
    pub fn move_to(&mut self, offset: usize, extend: bool) {
        self.move_head(offset.min(self.char_count()), extend);
        self.goal_column = None;
    }

    /// One grapheme left; collapses a selection to its start instead.
    pub fn move_left(&mut self, extend: bool) {
        let target = if !extend && !self.selection.is_empty() {
            self.selection.start()
        } else {
            self.prev_boundary(self.selection.head)
        };
        self.move_to(target, extend);
    }

    /// One grapheme right; collapses a selection to its end instead.
    pub fn move_right(&mut self, extend: bool) {
        let target = if !extend && !self.selection.is_empty() {
            self.selection.end()
        } else {
            self.next_boundary(self.selection.head)
        };
        self.move_to(target, extend);
    }

    /// One line up, keeping the goal column.
    pub fn move_up(&mut self, extend: bool) {
        self.move_vertically(-1, extend);
    }

    /// One line down, keeping the goal column.
    pub fn move_down(&mut self, extend: bool) {
        self.move_vertically(1, extend);
    }

    /// Start of the caret's line.
    pub fn move_to_line_start(&mut self, extend: bool) {
        let line = self.cursor_position().line;
        let target = self.document.text().line_to_char(line);
        self.move_to(target, extend);
    }

    /// End of the caret's line (before the line break).
    pub fn move_to_line_end(&mut self, extend: bool) {
        let line = self.cursor_position().line;
        let target = self.document.text().line_to_char(line) + self.line_content_len(line);
        self.move_to(target, extend);
    }

    fn move_vertically(&mut self, delta: isize, extend: bool) {
        let pos = self.cursor_position();
        let goal = self.goal_column.unwrap_or(pos.column);
        let last_line = self.line_count().saturating_sub(1);

        let target = match pos.line.checked_add_signed(delta) {
            Some(line) if line <= last_line => self.position_to_offset(Position::new(line, goal)),
            Some(_) => self.char_count(),
            None => 0,
        };

        self.move_head(target, extend);
        self.goal_column = Some(goal);
    }

    fn move_head(&mut self, head: usize, extend: bool) {
        self.selection = if extend {
            Selection::new(self.selection.anchor, head)
        } else {
            Selection::caret(head)
        };
    }

    // ---- grapheme helpers ---------------------------------------------------------------

    fn line_content_len(&self, line: usize) -> usize {
        let slice = self.document.text().line(line);
        slice.len_chars() - line_break_len(slice)
    }

    fn prev_boundary(&self, offset: usize) -> usize {
        let text = self.document.text();
        let offset = offset.min(text.len_chars());
        if offset == 0 {
            return 0;
        }

        let line = text.char_to_line(offset);
        let line_start = text.line_to_char(line);
        if offset == line_start {
            // Crossing a line break; CRLF counts as one.
            if offset >= 2 && text.char(offset - 1) == '\n' && text.char(offset - 2) == '\r' {
                return offset - 2;
            }
            return offset - 1;
        }

        let before = text.slice(line_start..offset).to_string();
        let step = before
            .graphemes(true)
            .next_back()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        offset - step
    }

    fn next_boundary(&self, offset: usize) -> usize {
        let text = self.document.text();
        let len = text.len_chars();
        if offset >= len {
            return len;
        }

        let line = text.char_to_line(offset);
        let content_end = text.line_to_char(line) + self.line_content_len(line);
        if offset >= content_end {
            if text.char(offset) == '\r' && offset + 1 < len && text.char(offset + 1) == '\n' {
                return offset + 2;
            }
            return offset + 1;
        }

        let after = text.slice(offset..content_end).to_string();
        let step = after
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        offset + step
    }
}

/// Number of trailing line-break characters in a line slice (0, 1, or 2 for CRLF).
fn line_break_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len >= 2 && line.char(len - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(text: &str) -> Editor {
        Editor::with_document(Document::from_text(text), 100)
    }

    #[test]
    fn test_typing_coalesces_into_one_undo() {
        let mut editor = Editor::new(100);
        for ch in ["a", "b", "c"] {
            editor.insert_text(ch);
        }
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.undo_depth(), 3);

        assert!(editor.undo());
        assert_eq!(editor.text(), "");
        assert!(editor.redo());
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor_offset(), 3);
    }

    #[test]
    fn test_newline_breaks_coalescing() {
        let mut editor = Editor::new(100);
        editor.insert_text("a");
        editor.insert_text("\n");
        editor.insert_text("b");
        editor.undo();
        assert_eq!(editor.text(), "a\n");
    }

    #[test]
    fn test_undo_restores_selection() {
        let mut editor = editor_with("hello world");
        editor.set_selection(6, 11);
        editor.insert_text("rust");
        assert_eq!(editor.text(), "hello rust");
        assert_eq!(editor.selection(), Selection::caret(10));

        editor.undo();
        assert_eq!(editor.text(), "hello world");
        assert_eq!(editor.selection(), Selection::new(6, 11));
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut editor = editor_with("x");
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert_eq!(editor.text(), "x");
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        // "e" + combining acute accent is one grapheme, two chars.
        let mut editor = editor_with("cafe\u{301}");
        editor.move_to(5, false);
        assert!(editor.backspace());
        assert_eq!(editor.text(), "caf");
    }

    #[test]
    fn test_backspace_joins_crlf_lines() {
        let mut editor = editor_with("a\r\nb");
        editor.move_to(3, false);
        assert!(editor.backspace());
        assert_eq!(editor.text(), "ab");
        assert_eq!(editor.cursor_offset(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = editor_with("abc");
        assert!(!editor.backspace());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_delete_forward_over_crlf() {
        let mut editor = editor_with("a\r\nb");
        editor.move_to(1, false);
        assert!(editor.delete_forward());
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn test_vertical_moves_keep_goal_column() {
        let mut editor = editor_with("abcdef\nab\nabcdef");
        editor.move_to(5, false);
        editor.move_down(false);
        assert_eq!(editor.cursor_position(), Position::new(1, 2));
        editor.move_down(false);
        assert_eq!(editor.cursor_position(), Position::new(2, 5));
        editor.move_down(false);
        assert_eq!(editor.cursor_offset(), editor.char_count());
        editor.move_to(2, false);
        editor.move_up(false);
        assert_eq!(editor.cursor_offset(), 0);
    }

    #[test]
    fn test_line_text_strips_breaks() {
        let editor = editor_with("one\r\ntwo\nthree");
        assert_eq!(editor.line_count(), 3);
        assert_eq!(editor.line_text(0).as_deref(), Some("one"));
        assert_eq!(editor.line_text(1).as_deref(), Some("two"));
        assert_eq!(editor.line_text(2).as_deref(), Some("three"));
        assert_eq!(editor.line_text(3), None);
    }

    #[test]
    fn test_extend_selection_and_collapse() {
        let mut editor = editor_with("hello");
        editor.move_right(true);
        editor.move_right(true);
        assert_eq!(editor.selected_text().as_deref(), Some("he"));
        editor.move_left(false);
        assert_eq!(editor.selection(), Selection::caret(0));
    }

    #[test]
    fn test_line_start_and_end() {
        let mut editor = editor_with("ab\ncde\n");
        editor.move_to(4, false);
        editor.move_to_line_end(true);
        assert_eq!(editor.selected_text().as_deref(), Some("de"));
        editor.move_to_line_start(false);
        assert_eq!(editor.cursor_offset(), 3);
    }
}
