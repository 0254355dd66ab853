#![warn(missing_docs)]
//! Pad Core - Headless Plain-Text Editor Kernel
//!
//! # Overview
//!
//! `pad-core` holds everything a minimal single-document text editor needs except the window:
//! the document and its save state, an editing buffer with undo/redo, and a dispatcher that
//! runs the File / Edit / Help commands. A frontend renders the buffer, turns input into
//! [`Command`]s and shows the prompts and notices the dispatcher hands back.
//!
//! # Core Features
//!
//! - **Single Document**: one file at a time, tracked clean/dirty against the last save
//! - **Unsaved-Changes Guard**: New and Exit ask before throwing edits away
//! - **Byte-Faithful Files**: text is saved exactly as it was loaded and edited
//! - **Undo/Redo**: grouped history, typing runs coalesce into one step
//! - **Host Services**: clipboard and printer sit behind traits
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Dispatcher (commands, prompts, notices)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Editor (caret, selection, undo history)    │  ← Editing
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope text, path, saved state)    │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pad_core::{Command, Dispatcher, EditCommand, MemoryClipboard, PadConfig, SystemPrinter};
//!
//! let mut pad = Dispatcher::new(
//!     PadConfig::default(),
//!     Box::new(MemoryClipboard::new()),
//!     Box::new(SystemPrinter::new()),
//! );
//!
//! pad.dispatch(Command::Edit(EditCommand::InsertText { text: "hello".to_string() }));
//! pad.dispatch(Command::Edit(EditCommand::SelectAll));
//! pad.dispatch(Command::Edit(EditCommand::Cut));
//! assert_eq!(pad.editor().text(), "");
//! assert_eq!(pad.clipboard_snapshot(), Some("hello"));
//!
//! pad.dispatch(Command::Edit(EditCommand::Paste));
//! assert_eq!(pad.editor().text(), "hello");
//! assert_eq!(pad.title(), "Pad - Untitled");
//! ```
//!
//! # Module Description
//!
//! - [`document`] - Document text, file association and dirty state
//! - [`editor`] - Caret, selection and edit operations
//! - [`history`] - Grouped undo/redo stacks
//! - [`commands`] - Command set and dispatcher
//! - [`host`] - Clipboard and printer traits
//! - [`print`] - Platform print spooling

pub mod commands;
pub mod config;
pub mod delta;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod host;
pub mod notice;
pub mod print;
pub mod selection;

pub use commands::{
    Command, CursorCommand, Dispatcher, EditCommand, FileCommand, GuardChoice, Outcome, Prompt,
    Reply,
};
pub use config::{FileFilter, HELP_TEXT, PadConfig};
pub use delta::EditDelta;
pub use document::{Document, DocumentState};
pub use editor::Editor;
pub use error::CommandError;
pub use history::{UndoHistory, UndoStep};
pub use host::{Clipboard, MemoryClipboard, Printer};
pub use notice::{Notice, Severity};
pub use print::{PrintMethod, SystemPrinter};
pub use selection::{Position, Selection};
