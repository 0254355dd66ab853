//! System clipboard access through `arboard`.

use pad_core::{Clipboard, CommandError};

/// The OS clipboard. Creation may fail (no display server); every access then reports a
/// clipboard error instead of aborting the editor.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Connect to the system clipboard, best effort.
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!(error = %err, "system clipboard unavailable");
                None
            }
        };
        Self { inner }
    }

    fn inner(&mut self) -> Result<&mut arboard::Clipboard, CommandError> {
        self.inner
            .as_mut()
            .ok_or_else(|| CommandError::Clipboard("no system clipboard".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CommandError> {
        self.inner()?
            .set_text(text.to_string())
            .map_err(|err| CommandError::Clipboard(err.to_string()))
    }

    fn get_text(&mut self) -> Result<String, CommandError> {
        match self.inner()?.get_text() {
            Ok(text) => Ok(text),
            // Non-text contents paste as nothing.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(err) => Err(CommandError::Clipboard(err.to_string())),
        }
    }
}
