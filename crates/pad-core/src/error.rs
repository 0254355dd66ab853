//! Errors raised while executing commands.
//!
//! Every variant is caught at the dispatcher boundary and converted to a [`Notice`]; callers of
//! [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) never see them as `Err`.

use crate::notice::{Notice, Severity};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Failures of a single command.
pub enum CommandError {
    #[error("cannot access {}: {source}", path.display())]
    /// Reading or writing the document file failed.
    FileAccess {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("the document has no file name yet")]
    /// Save was requested without a target path.
    MissingPath,

    #[error("clipboard unavailable: {0}")]
    /// The system clipboard could not be read or written.
    Clipboard(String),

    #[error("please select text to {action}")]
    /// Cut or copy was attempted with nothing selected.
    NoSelection {
        /// The verb that needed a selection (`"cut"` or `"copy"`).
        action: &'static str,
    },

    #[error("printing failed: {0}")]
    /// The print mechanism was found but failed.
    Print(String),

    #[error("printing is not supported on {0}")]
    /// No print mechanism is known for this operating system.
    UnsupportedPlatform(String),

    #[error("finish the open prompt first")]
    /// A command was issued while a prompt is waiting for its reply.
    PromptPending,

    #[error("no prompt is waiting for a reply")]
    /// A reply arrived but nothing was suspended.
    NoPendingPrompt,

    #[error("the reply does not answer the pending prompt")]
    /// The reply kind does not match the pending prompt.
    UnexpectedReply,
}

impl CommandError {
    /// Severity used when surfacing this error to the user.
    pub fn severity(&self) -> Severity {
        match self {
            CommandError::NoSelection { .. }
            | CommandError::UnsupportedPlatform(_)
            | CommandError::PromptPending => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Notification title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            CommandError::FileAccess { .. } | CommandError::MissingPath => "File Error",
            CommandError::Clipboard(_) => "Clipboard Error",
            CommandError::NoSelection { .. } => "No Selection",
            CommandError::Print(_) => "Print Error",
            CommandError::UnsupportedPlatform(_) => "Not Supported",
            CommandError::PromptPending
            | CommandError::NoPendingPrompt
            | CommandError::UnexpectedReply => "Busy",
        }
    }

    /// Convert into the notification shown to the user.
    pub fn to_notice(&self) -> Notice {
        Notice::new(self.severity(), self.title(), self.to_string())
    }
}
