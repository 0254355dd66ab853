//! Built-in editor settings.
//!
//! The editor has no configuration file; every tunable lives in [`PadConfig`] and frontends
//! construct it with [`PadConfig::default`].

/// A named file-type filter offered by open/save dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human readable label, e.g. `"Text Files"`.
    pub label: &'static str,
    /// Glob pattern, e.g. `"*.txt"`.
    pub pattern: &'static str,
}

/// Static editor settings shared by the dispatcher and the frontend.
#[derive(Debug, Clone)]
pub struct PadConfig {
    /// Application name used as the window title prefix.
    pub app_name: &'static str,
    /// Maximum number of undo steps kept in the edit history.
    pub undo_limit: usize,
    /// Extension appended to entered file names that have none (without the dot).
    pub default_extension: &'static str,
    /// Filters offered by file dialogs, most specific first.
    pub file_filters: Vec<FileFilter>,
    /// Text shown by the Help command.
    pub help_text: &'static str,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            app_name: "Pad",
            undo_limit: 1000,
            default_extension: "txt",
            file_filters: vec![
                FileFilter {
                    label: "Text Files",
                    pattern: "*.txt",
                },
                FileFilter {
                    label: "All Files",
                    pattern: "*.*",
                },
            ],
            help_text: HELP_TEXT,
        }
    }
}

/// Help text listing the menus and their accelerators.
pub const HELP_TEXT: &str = "\
File menu:
  New          Ctrl+N        Start an empty document
  Open...      Ctrl+O        Open an existing document
  Save         Ctrl+S        Save the current document
  Save As...   Ctrl+Shift+S  Save under a new name
  Exit         Ctrl+Q        Close the editor

Edit menu:
  Undo         Ctrl+Z        Undo the last edit
  Redo         Ctrl+Y        Redo the last undone edit
  Cut          Ctrl+X        Cut the selection
  Copy         Ctrl+C        Copy the selection
  Paste        Ctrl+V        Paste from the clipboard
  Select All   Ctrl+A        Select the whole document
  Print        Ctrl+P        Print the document

Help menu:
  About        F1            Show this help

Menus open with F10 or Alt+F / Alt+E / Alt+H.";
