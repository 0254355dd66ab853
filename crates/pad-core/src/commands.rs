//! Command Interface Layer
//!
//! Provides the command set of the editor behind a single dispatcher.
//!
//! # Overview
//!
//! [`Dispatcher`] owns the [`Editor`] (document, caret, history), the clipboard snapshot and the
//! host services. Frontends translate menu clicks and keystrokes into [`Command`]s and call
//! [`Dispatcher::dispatch`]; the returned [`Outcome`] tells them what to show next.
//!
//! Commands that need an answer from the user (file pickers, the unsaved-changes question)
//! suspend: they return [`Outcome::Prompt`] and the frontend later calls
//! [`Dispatcher::resume`] with a [`Reply`]. While a prompt is pending every other command is
//! refused, so two commands never interleave.
//!
//! Errors never escape: a failing command leaves the document untouched and comes back as
//! [`Outcome::Notify`].
//!
//! # Example
//!
//! ```rust
//! use pad_core::{
//!     Command, Dispatcher, EditCommand, FileCommand, MemoryClipboard, Outcome, PadConfig,
//!     Prompt, Reply, SystemPrinter,
//! };
//!
//! let mut pad = Dispatcher::new(
//!     PadConfig::default(),
//!     Box::new(MemoryClipboard::new()),
//!     Box::new(SystemPrinter::new()),
//! );
//!
//! pad.dispatch(Command::Edit(EditCommand::InsertText { text: "abc".to_string() }));
//! assert!(pad.document().is_dirty());
//!
//! // Saving an untitled document asks for a file name first.
//! let outcome = pad.dispatch(Command::File(FileCommand::Save));
//! assert!(matches!(outcome, Outcome::Prompt(Prompt::SavePath { .. })));
//!
//! // Cancelling leaves everything as it was.
//! assert_eq!(pad.resume(Reply::Cancel), Outcome::Done);
//! assert!(pad.document().is_dirty());
//! ```

use crate::config::PadConfig;
use crate::document::Document;
use crate::editor::Editor;
use crate::error::CommandError;
use crate::host::{Clipboard, Printer};
use crate::notice::Notice;
use std::path::{Path, PathBuf};

/// File menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCommand {
    /// Start an empty, untitled document (guarded).
    New,
    /// Pick a file and load it.
    Open,
    /// Save to the current file, or ask for one.
    Save,
    /// Pick a file and save to it.
    SaveAs,
    /// Quit the editor (guarded).
    Exit,
}

/// Edit menu commands plus the primitive typing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Undo the newest edit group; silently ignored when history is empty.
    Undo,
    /// Redo the oldest undone group; silently ignored when there is nothing to redo.
    Redo,
    /// Copy the selection to the clipboard and delete it.
    Cut,
    /// Copy the selection to the clipboard.
    Copy,
    /// Insert the clipboard text at the caret (replacing a selection).
    Paste,
    /// Select the whole document, caret at the end.
    SelectAll,
    /// Send the document to the printer.
    Print,
    /// Type text at the caret (replacing a selection).
    InsertText {
        /// Text to insert.
        text: String,
    },
    /// Delete the selection, or one grapheme before the caret.
    Backspace,
    /// Delete the selection, or one grapheme after the caret.
    DeleteForward,
}

/// Caret and selection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCommand {
    /// One grapheme left.
    Left {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// One grapheme right.
    Right {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// One line up.
    Up {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// One line down.
    Down {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// Start of the line.
    LineStart {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// End of the line.
    LineEnd {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// Start of the document.
    DocumentStart {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// End of the document.
    DocumentEnd {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// Move to a character offset.
    MoveTo {
        /// Target character offset (clamped).
        offset: usize,
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// Set the selection explicitly.
    SetSelection {
        /// Fixed end.
        anchor: usize,
        /// Caret end.
        head: usize,
    },
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// File menu
    File(FileCommand),
    /// Edit menu and typing
    Edit(EditCommand),
    /// Caret movement
    Cursor(CursorCommand),
    /// Show the help text
    Help,
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::File(FileCommand::New) => "new",
            Command::File(FileCommand::Open) => "open",
            Command::File(FileCommand::Save) => "save",
            Command::File(FileCommand::SaveAs) => "save-as",
            Command::File(FileCommand::Exit) => "exit",
            Command::Edit(EditCommand::Undo) => "undo",
            Command::Edit(EditCommand::Redo) => "redo",
            Command::Edit(EditCommand::Cut) => "cut",
            Command::Edit(EditCommand::Copy) => "copy",
            Command::Edit(EditCommand::Paste) => "paste",
            Command::Edit(EditCommand::SelectAll) => "select-all",
            Command::Edit(EditCommand::Print) => "print",
            Command::Edit(EditCommand::InsertText { .. }) => "insert-text",
            Command::Edit(EditCommand::Backspace) => "backspace",
            Command::Edit(EditCommand::DeleteForward) => "delete-forward",
            Command::Cursor(_) => "cursor",
            Command::Help => "help",
        }
    }

    /// Whether this is a typing command that may extend the open undo group.
    fn is_typing(&self) -> bool {
        matches!(
            self,
            Command::Edit(
                EditCommand::InsertText { .. } | EditCommand::Backspace | EditCommand::DeleteForward
            )
        )
    }
}

/// Answer to the unsaved-changes question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardChoice {
    /// Save first, then continue.
    Save,
    /// Throw the changes away and continue.
    Discard,
    /// Abort the command.
    Cancel,
}

/// A question the frontend must put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Three-way Save / Discard / Cancel question about unsaved changes.
    SaveChanges {
        /// Question text.
        message: String,
    },
    /// Choose a file to open.
    OpenPath,
    /// Choose a file to save to.
    SavePath {
        /// Current file, offered as the default.
        suggested: Option<PathBuf>,
    },
}

/// The user's answer to a [`Prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Answer to [`Prompt::SaveChanges`].
    Choice(GuardChoice),
    /// Answer to [`Prompt::OpenPath`] / [`Prompt::SavePath`].
    Path(PathBuf),
    /// The dialog was dismissed.
    Cancel,
}

/// What the frontend should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing further; redraw.
    Done,
    /// Ask the user, then call [`Dispatcher::resume`].
    Prompt(Prompt),
    /// Show a notification.
    Notify(Notice),
    /// Tear down and terminate.
    Exit,
}

/// Command that runs after the unsaved-changes guard lets it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardedAction {
    New,
    Exit,
}

/// A suspended command waiting for a [`Reply`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    ConfirmDiscard { action: GuardedAction },
    OpenPath,
    SavePath { then: Option<GuardedAction> },
}

/// Command dispatcher
///
/// `Dispatcher` is the main interface for the editor, responsible for:
///
/// - Executing commands against the document
/// - Running the unsaved-changes guard for New and Exit
/// - Suspending on prompts and resuming with the user's reply
/// - Turning every failure into a notification
pub struct Dispatcher {
    config: PadConfig,
    editor: Editor,
    clipboard: Box<dyn Clipboard>,
    printer: Box<dyn Printer>,
    /// Most recently cut or copied text.
    clipboard_snapshot: Option<String>,
    pending: Option<Pending>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty, untitled document.
    pub fn new(config: PadConfig, clipboard: Box<dyn Clipboard>, printer: Box<dyn Printer>) -> Self {
        let editor = Editor::new(config.undo_limit);
        Self {
            config,
            editor,
            clipboard,
            printer,
            clipboard_snapshot: None,
            pending: None,
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// The editor (document, caret, history).
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The open document.
    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    /// Most recently cut or copied text.
    pub fn clipboard_snapshot(&self) -> Option<&str> {
        self.clipboard_snapshot.as_deref()
    }

    /// Window title derived from the document's file.
    pub fn title(&self) -> String {
        self.document().title(self.config.app_name)
    }

    /// The prompt currently waiting for a reply, if any.
    pub fn pending_prompt(&self) -> Option<Prompt> {
        self.pending.as_ref().map(|pending| self.prompt_for(pending))
    }

    /// Open `path` at startup. A path that does not exist yet becomes the save target of an
    /// empty document.
    pub fn open_initial(&mut self, path: &Path) -> Outcome {
        if path.exists() {
            return match self.editor.load(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "opened");
                    Outcome::Done
                }
                Err(err) => self.report(err),
            };
        }
        self.editor.replace_document(Document::with_path(path));
        Outcome::Done
    }

    /// Execute a command.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        if self.pending.is_some() {
            return self.report(CommandError::PromptPending);
        }

        if !command.is_typing() {
            self.editor.end_undo_group();
        }

        tracing::trace!(command = command.name(), "dispatch");
        match self.run(command) {
            Ok(outcome) => outcome,
            Err(err) => self.report(err),
        }
    }

    /// Answer the pending prompt and continue the suspended command.
    pub fn resume(&mut self, reply: Reply) -> Outcome {
        let Some(pending) = self.pending.take() else {
            return self.report(CommandError::NoPendingPrompt);
        };

        match self.continue_with(pending, reply) {
            Ok(outcome) => outcome,
            Err(err) => self.report(err),
        }
    }

    fn run(&mut self, command: Command) -> Result<Outcome, CommandError> {
        match command {
            Command::File(file) => self.run_file(file),
            Command::Edit(edit) => self.run_edit(edit),
            Command::Cursor(cursor) => {
                self.run_cursor(cursor);
                Ok(Outcome::Done)
            }
            Command::Help => Ok(Outcome::Notify(Notice::info("Help", self.config.help_text))),
        }
    }

    fn run_file(&mut self, command: FileCommand) -> Result<Outcome, CommandError> {
        match command {
            FileCommand::New => Ok(self.guard(GuardedAction::New)),
            FileCommand::Exit => Ok(self.guard(GuardedAction::Exit)),
            FileCommand::Open => Ok(self.suspend(Pending::OpenPath)),
            FileCommand::Save => self.save_flow(None),
            FileCommand::SaveAs => Ok(self.suspend(Pending::SavePath { then: None })),
        }
    }

    fn run_edit(&mut self, command: EditCommand) -> Result<Outcome, CommandError> {
        match command {
            EditCommand::Undo => {
                self.editor.undo();
            }
            EditCommand::Redo => {
                self.editor.redo();
            }
            EditCommand::Cut => {
                self.copy_selection("cut")?;
                self.editor.delete_selection();
            }
            EditCommand::Copy => {
                self.copy_selection("copy")?;
            }
            EditCommand::Paste => {
                let text = self.clipboard.get_text()?;
                self.editor.paste_text(&text);
            }
            EditCommand::SelectAll => self.editor.select_all(),
            EditCommand::Print => {
                let text = self.editor.text();
                self.printer.print(&text)?;
            }
            EditCommand::InsertText { text } => {
                self.editor.insert_text(&text);
            }
            EditCommand::Backspace => {
                self.editor.backspace();
            }
            EditCommand::DeleteForward => {
                self.editor.delete_forward();
            }
        }
        Ok(Outcome::Done)
    }

    fn run_cursor(&mut self, command: CursorCommand) {
        let editor = &mut self.editor;
        match command {
            CursorCommand::Left { extend } => editor.move_left(extend),
            CursorCommand::Right { extend } => editor.move_right(extend),
            CursorCommand::Up { extend } => editor.move_up(extend),
            CursorCommand::Down { extend } => editor.move_down(extend),
            CursorCommand::LineStart { extend } => editor.move_to_line_start(extend),
            CursorCommand::LineEnd { extend } => editor.move_to_line_end(extend),
            CursorCommand::DocumentStart { extend } => editor.move_to(0, extend),
            CursorCommand::DocumentEnd { extend } => {
                let end = editor.char_count();
                editor.move_to(end, extend);
            }
            CursorCommand::MoveTo { offset, extend } => editor.move_to(offset, extend),
            CursorCommand::SetSelection { anchor, head } => editor.set_selection(anchor, head),
        }
    }

    /// Put the selection on the system clipboard and into the snapshot.
    fn copy_selection(&mut self, action: &'static str) -> Result<(), CommandError> {
        let text = self
            .editor
            .selected_text()
            .ok_or(CommandError::NoSelection { action })?;
        self.clipboard.set_text(&text)?;
        self.clipboard_snapshot = Some(text);
        Ok(())
    }

    // ---- guard & prompts ----------------------------------------------------------------

    fn guard(&mut self, action: GuardedAction) -> Outcome {
        if self.document().is_dirty() {
            self.suspend(Pending::ConfirmDiscard { action })
        } else {
            self.complete(action)
        }
    }

    fn complete(&mut self, action: GuardedAction) -> Outcome {
        match action {
            GuardedAction::New => {
                self.editor.reset();
                tracing::info!("new document");
                Outcome::Done
            }
            GuardedAction::Exit => {
                tracing::info!("exit");
                Outcome::Exit
            }
        }
    }

    /// Save to the current file, or ask for one. `then` runs after a successful save.
    fn save_flow(&mut self, then: Option<GuardedAction>) -> Result<Outcome, CommandError> {
        if self.document().path().is_none() {
            return Ok(self.suspend(Pending::SavePath { then }));
        }
        self.editor.save(None)?;
        tracing::info!(path = ?self.document().path(), "saved");
        Ok(then.map_or(Outcome::Done, |action| self.complete(action)))
    }

    fn suspend(&mut self, pending: Pending) -> Outcome {
        let prompt = self.prompt_for(&pending);
        self.pending = Some(pending);
        Outcome::Prompt(prompt)
    }

    fn prompt_for(&self, pending: &Pending) -> Prompt {
        match pending {
            Pending::ConfirmDiscard { .. } => Prompt::SaveChanges {
                message: format!(
                    "Do you want to save changes to {}?",
                    self.document().display_name()
                ),
            },
            Pending::OpenPath => Prompt::OpenPath,
            Pending::SavePath { .. } => Prompt::SavePath {
                suggested: self.document().path().map(Path::to_path_buf),
            },
        }
    }

    fn continue_with(&mut self, pending: Pending, reply: Reply) -> Result<Outcome, CommandError> {
        match (pending, reply) {
            (Pending::ConfirmDiscard { action }, Reply::Choice(GuardChoice::Save)) => {
                self.save_flow(Some(action))
            }
            (Pending::ConfirmDiscard { action }, Reply::Choice(GuardChoice::Discard)) => {
                Ok(self.complete(action))
            }
            (Pending::ConfirmDiscard { .. }, Reply::Choice(GuardChoice::Cancel) | Reply::Cancel)
            | (Pending::OpenPath | Pending::SavePath { .. }, Reply::Cancel) => Ok(Outcome::Done),
            (Pending::OpenPath, Reply::Path(path)) => {
                self.editor.load(&path)?;
                tracing::info!(path = %path.display(), "opened");
                Ok(Outcome::Done)
            }
            (Pending::SavePath { then }, Reply::Path(path)) => {
                let path = if self.document().path() == Some(path.as_path()) {
                    path
                } else {
                    self.with_default_extension(path)
                };
                self.editor.save(Some(&path))?;
                tracing::info!(path = %path.display(), "saved");
                Ok(then.map_or(Outcome::Done, |action| self.complete(action)))
            }
            (pending, _) => {
                self.pending = Some(pending);
                Err(CommandError::UnexpectedReply)
            }
        }
    }

    /// Append the default extension to a newly entered file name that has none.
    fn with_default_extension(&self, path: PathBuf) -> PathBuf {
        if path.extension().is_some() || self.config.default_extension.is_empty() {
            path
        } else {
            path.with_extension(self.config.default_extension)
        }
    }

    fn report(&self, err: CommandError) -> Outcome {
        match &err {
            CommandError::FileAccess { .. }
            | CommandError::Clipboard(_)
            | CommandError::Print(_) => tracing::error!(error = %err, "command failed"),
            _ => tracing::warn!(error = %err, "command refused"),
        }
        Outcome::Notify(err.to_notice())
    }
}
