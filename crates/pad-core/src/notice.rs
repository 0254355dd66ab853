//! User-facing notifications produced by commands.

/// How prominently a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message (help text, confirmations).
    Info,
    /// Non-fatal problem the user can fix (nothing selected, unsupported platform).
    Warning,
    /// A command failed.
    Error,
}

/// A modal notification the frontend shows after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub severity: Severity,
    /// Short title.
    pub title: String,
    /// Body text (may span several lines).
    pub message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create an informational notice.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }
}
