//! Host services the dispatcher talks to.
//!
//! The dispatcher never touches the platform directly for clipboard or printing; frontends
//! pass implementations of these traits in, and tests pass fakes.

use crate::error::CommandError;

/// Plain-text system clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &str) -> Result<(), CommandError>;
    /// Read the clipboard contents.
    fn get_text(&mut self) -> Result<String, CommandError>;
}

/// Print spooler.
pub trait Printer {
    /// Hand `text` to the platform print mechanism.
    fn print(&mut self, text: &str) -> Result<(), CommandError>;
}

/// Process-local clipboard, for headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: String,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CommandError> {
        self.contents = text.to_string();
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, CommandError> {
        Ok(self.contents.clone())
    }
}
