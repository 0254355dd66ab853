//! Platform print spooling.
//!
//! The document is written to a temporary `.txt` file which is handed to the platform's
//! print command: `lp` on Unix-likes (CUPS), `notepad /p` on Windows. The temporary file is
//! removed once the command returns.

use crate::error::CommandError;
use crate::host::Printer;
use std::io::Write;
use std::path::Path;
use std::process::Command as ProcessCommand;

/// How a platform prints a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMethod {
    /// `lp <file>` (CUPS).
    Lp,
    /// `notepad /p <file>`.
    Notepad,
}

impl PrintMethod {
    /// Pick the method for an operating system name as reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Option<Self> {
        match os {
            "linux" | "macos" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some(Self::Lp),
            "windows" => Some(Self::Notepad),
            _ => None,
        }
    }

    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            Self::Lp => "lp",
            Self::Notepad => "notepad",
        }
    }

    fn command(self, file: &Path) -> ProcessCommand {
        let mut command = ProcessCommand::new(self.program());
        if self == Self::Notepad {
            command.arg("/p");
        }
        command.arg(file);
        command
    }
}

/// [`Printer`] backed by the host operating system.
#[derive(Debug, Clone)]
pub struct SystemPrinter {
    os: String,
}

impl SystemPrinter {
    /// Printer for the running operating system.
    pub fn new() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Printer for a named operating system.
    pub fn for_os(os: impl Into<String>) -> Self {
        Self { os: os.into() }
    }
}

impl Default for SystemPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer for SystemPrinter {
    fn print(&mut self, text: &str) -> Result<(), CommandError> {
        let method = PrintMethod::for_os(&self.os)
            .ok_or_else(|| CommandError::UnsupportedPlatform(self.os.clone()))?;

        let mut file = tempfile::Builder::new()
            .prefix("pad-print-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| CommandError::Print(format!("cannot create spool file: {e}")))?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| CommandError::Print(format!("cannot write spool file: {e}")))?;

        let status = method
            .command(file.path())
            .status()
            .map_err(|e| CommandError::Print(format!("cannot run {}: {e}", method.program())))?;

        if !status.success() {
            return Err(CommandError::Print(format!(
                "{} exited with {}",
                method.program(),
                status
            )));
        }

        tracing::info!(program = method.program(), "document sent to printer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_for_known_platforms() {
        assert_eq!(PrintMethod::for_os("linux"), Some(PrintMethod::Lp));
        assert_eq!(PrintMethod::for_os("macos"), Some(PrintMethod::Lp));
        assert_eq!(PrintMethod::for_os("windows"), Some(PrintMethod::Notepad));
        assert_eq!(PrintMethod::for_os("haiku"), None);
    }

    #[test]
    fn test_notepad_command_line() {
        let command = PrintMethod::Notepad.command(Path::new("doc.txt"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(command.get_program(), "notepad");
        assert_eq!(args, ["/p", "doc.txt"]);
    }

    #[test]
    fn test_unsupported_platform_is_reported() {
        let mut printer = SystemPrinter::for_os("plan9");
        let err = printer.print("hello").unwrap_err();
        assert!(matches!(err, CommandError::UnsupportedPlatform(ref os) if os == "plan9"));
    }
}
