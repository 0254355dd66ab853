use pad_core::{
    Clipboard, Command, CommandError, CursorCommand, Dispatcher, EditCommand, FileCommand, Outcome,
    PadConfig, Printer, Severity,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct ClipboardState {
    text: String,
    broken: bool,
}

/// Clipboard whose state stays observable after it is boxed into the dispatcher.
#[derive(Clone, Default)]
struct SharedClipboard(Rc<RefCell<ClipboardState>>);

impl SharedClipboard {
    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn set(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn break_it(&self) {
        self.0.borrow_mut().broken = true;
    }
}

impl Clipboard for SharedClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CommandError> {
        let mut state = self.0.borrow_mut();
        if state.broken {
            return Err(CommandError::Clipboard("unavailable".to_string()));
        }
        state.text = text.to_string();
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, CommandError> {
        let state = self.0.borrow();
        if state.broken {
            return Err(CommandError::Clipboard("unavailable".to_string()));
        }
        Ok(state.text.clone())
    }
}

#[derive(Clone, Default)]
struct RecordingPrinter {
    jobs: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl Printer for RecordingPrinter {
    fn print(&mut self, text: &str) -> Result<(), CommandError> {
        if self.fail {
            return Err(CommandError::Print("lp exited with exit status: 1".to_string()));
        }
        self.jobs.borrow_mut().push(text.to_string());
        Ok(())
    }
}

fn dispatcher_with(clipboard: &SharedClipboard, printer: &RecordingPrinter) -> Dispatcher {
    Dispatcher::new(
        PadConfig::default(),
        Box::new(clipboard.clone()),
        Box::new(printer.clone()),
    )
}

fn dispatcher(clipboard: &SharedClipboard) -> Dispatcher {
    dispatcher_with(clipboard, &RecordingPrinter::default())
}

fn edit(pad: &mut Dispatcher, command: EditCommand) -> Outcome {
    pad.dispatch(Command::Edit(command))
}

fn type_text(pad: &mut Dispatcher, text: &str) {
    edit(
        pad,
        EditCommand::InsertText {
            text: text.to_string(),
        },
    );
}

#[test]
fn test_select_all_cut_paste_scenario() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "hello");

    edit(&mut pad, EditCommand::SelectAll);
    assert_eq!(pad.editor().selection().start(), 0);
    assert_eq!(pad.editor().selection().end(), 5);
    assert_eq!(pad.editor().cursor_offset(), 5);

    assert_eq!(edit(&mut pad, EditCommand::Cut), Outcome::Done);
    assert_eq!(pad.editor().text(), "");
    assert_eq!(clipboard.text(), "hello");
    assert_eq!(pad.clipboard_snapshot(), Some("hello"));

    assert_eq!(edit(&mut pad, EditCommand::Paste), Outcome::Done);
    assert_eq!(pad.editor().text(), "hello");
    assert_eq!(pad.editor().cursor_offset(), 5);
}

#[test]
fn test_copy_then_paste_over_selection_is_idempotent() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "one two three");

    pad.dispatch(Command::Cursor(CursorCommand::SetSelection { anchor: 4, head: 7 }));
    edit(&mut pad, EditCommand::Copy);
    assert_eq!(clipboard.text(), "two");

    edit(&mut pad, EditCommand::Paste);
    assert_eq!(pad.editor().text(), "one two three");
    assert_eq!(pad.editor().cursor_offset(), 7);
}

#[test]
fn test_copy_does_not_modify_document() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "abc");
    edit(&mut pad, EditCommand::SelectAll);

    edit(&mut pad, EditCommand::Copy);

    assert_eq!(pad.editor().text(), "abc");
    assert_eq!(pad.clipboard_snapshot(), Some("abc"));
}

#[test]
fn test_cut_without_selection_warns() {
    let clipboard = SharedClipboard::default();
    clipboard.set("before");
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "abc");

    let Outcome::Notify(notice) = edit(&mut pad, EditCommand::Cut) else {
        panic!("cut without selection should notify");
    };

    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.title, "No Selection");
    assert!(notice.message.contains("cut"));
    assert_eq!(pad.editor().text(), "abc");
    assert_eq!(clipboard.text(), "before");
    assert_eq!(pad.clipboard_snapshot(), None);
}

#[test]
fn test_copy_without_selection_warns() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "abc");

    let Outcome::Notify(notice) = edit(&mut pad, EditCommand::Copy) else {
        panic!("copy without selection should notify");
    };
    assert!(notice.message.contains("copy"));
}

#[test]
fn test_clipboard_failure_leaves_document_unchanged() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "hello");
    edit(&mut pad, EditCommand::SelectAll);
    clipboard.break_it();

    let Outcome::Notify(notice) = edit(&mut pad, EditCommand::Cut) else {
        panic!("clipboard failure should notify");
    };
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.title, "Clipboard Error");
    assert_eq!(pad.editor().text(), "hello");
    assert_eq!(pad.clipboard_snapshot(), None);

    assert!(matches!(edit(&mut pad, EditCommand::Paste), Outcome::Notify(_)));
    assert_eq!(pad.editor().text(), "hello");
}

#[test]
fn test_paste_empty_clipboard_is_noop() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "abc");

    assert_eq!(edit(&mut pad, EditCommand::Paste), Outcome::Done);
    assert_eq!(pad.editor().text(), "abc");
    assert!(!pad.editor().can_redo());
}

#[test]
fn test_paste_is_its_own_undo_step() {
    let clipboard = SharedClipboard::default();
    clipboard.set("XY");
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "ab");

    edit(&mut pad, EditCommand::Paste);
    assert_eq!(pad.editor().text(), "abXY");

    edit(&mut pad, EditCommand::Undo);
    assert_eq!(pad.editor().text(), "ab");
    edit(&mut pad, EditCommand::Undo);
    assert_eq!(pad.editor().text(), "");
}

#[test]
fn test_undo_and_redo_on_empty_history_are_silent() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);

    assert_eq!(edit(&mut pad, EditCommand::Undo), Outcome::Done);
    assert_eq!(edit(&mut pad, EditCommand::Redo), Outcome::Done);
    assert_eq!(pad.editor().text(), "");
    assert!(!pad.document().is_dirty());
}

#[test]
fn test_typing_coalesces_until_another_command() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "a");
    type_text(&mut pad, "b");
    pad.dispatch(Command::Cursor(CursorCommand::DocumentEnd { extend: false }));
    type_text(&mut pad, "c");

    edit(&mut pad, EditCommand::Undo);
    assert_eq!(pad.editor().text(), "ab");
    edit(&mut pad, EditCommand::Undo);
    assert_eq!(pad.editor().text(), "");

    edit(&mut pad, EditCommand::Redo);
    assert_eq!(pad.editor().text(), "ab");
    edit(&mut pad, EditCommand::Redo);
    assert_eq!(pad.editor().text(), "abc");
}

#[test]
fn test_undo_after_cut_restores_selection() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "hello world");
    pad.dispatch(Command::Cursor(CursorCommand::SetSelection { anchor: 5, head: 11 }));

    edit(&mut pad, EditCommand::Cut);
    assert_eq!(pad.editor().text(), "hello");

    edit(&mut pad, EditCommand::Undo);
    assert_eq!(pad.editor().text(), "hello world");
    assert_eq!(pad.editor().selected_text().as_deref(), Some(" world"));
}

#[test]
fn test_backspace_and_delete_forward() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);
    type_text(&mut pad, "abc");

    edit(&mut pad, EditCommand::Backspace);
    assert_eq!(pad.editor().text(), "ab");

    pad.dispatch(Command::Cursor(CursorCommand::DocumentStart { extend: false }));
    edit(&mut pad, EditCommand::DeleteForward);
    assert_eq!(pad.editor().text(), "b");
}

#[test]
fn test_print_sends_whole_document() {
    let clipboard = SharedClipboard::default();
    let printer = RecordingPrinter::default();
    let mut pad = dispatcher_with(&clipboard, &printer);
    type_text(&mut pad, "line one\nline two");
    pad.dispatch(Command::Cursor(CursorCommand::SetSelection { anchor: 0, head: 4 }));

    assert_eq!(edit(&mut pad, EditCommand::Print), Outcome::Done);
    assert_eq!(*printer.jobs.borrow(), vec!["line one\nline two".to_string()]);
    assert!(pad.document().is_dirty());
}

#[test]
fn test_print_failure_reports_error_without_mutation() {
    let clipboard = SharedClipboard::default();
    let printer = RecordingPrinter {
        fail: true,
        ..RecordingPrinter::default()
    };
    let mut pad = dispatcher_with(&clipboard, &printer);
    type_text(&mut pad, "page");

    let Outcome::Notify(notice) = edit(&mut pad, EditCommand::Print) else {
        panic!("print failure should notify");
    };
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.title, "Print Error");
    assert_eq!(pad.editor().text(), "page");
}

#[test]
fn test_select_all_on_empty_document() {
    let clipboard = SharedClipboard::default();
    let mut pad = dispatcher(&clipboard);

    edit(&mut pad, EditCommand::SelectAll);
    assert!(pad.editor().selection().is_empty());
    assert!(matches!(edit(&mut pad, EditCommand::Copy), Outcome::Notify(_)));
}

#[test]
fn test_saved_document_stays_clean_through_non_editing_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.txt");
    std::fs::write(&path, "hello world").unwrap();
    let clipboard = SharedClipboard::default();
    let printer = RecordingPrinter::default();
    let mut pad = dispatcher_with(&clipboard, &printer);
    pad.open_initial(&path);

    type_text(&mut pad, "> ");
    assert_eq!(pad.dispatch(Command::File(FileCommand::Save)), Outcome::Done);
    assert!(!pad.document().is_dirty());

    let commands = [
        Command::Edit(EditCommand::SelectAll),
        Command::Edit(EditCommand::Copy),
        Command::Edit(EditCommand::Print),
        Command::Cursor(CursorCommand::DocumentStart { extend: false }),
        Command::Cursor(CursorCommand::Right { extend: true }),
        Command::Cursor(CursorCommand::LineEnd { extend: false }),
        Command::Cursor(CursorCommand::Down { extend: false }),
        Command::Edit(EditCommand::Redo),
        Command::Help,
    ];
    for command in commands {
        pad.dispatch(command.clone());
        assert!(!pad.document().is_dirty(), "{command:?} dirtied the document");
    }

    assert_eq!(clipboard.text(), "> hello world");
    assert_eq!(printer.jobs.borrow().len(), 1);
    assert_eq!(pad.editor().text(), "> hello world");
}
