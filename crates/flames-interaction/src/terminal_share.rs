//! Share platform for terminal front ends.
//!
//! Terminals have no native share sheet. The clipboard is reached through
//! the OSC 52 escape sequence, which most modern terminal emulators (and
//! tmux with `set-clipboard on`) forward to the system clipboard.

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flames_core::error::{FlamesError, Result};
use flames_core::share::{SharePayload, SharePlatform};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Builds the OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Writes clipboard sequences and notices to a terminal stream.
#[derive(Clone)]
pub struct TerminalSharePlatform {
    out: SharedWriter,
}

impl TerminalSharePlatform {
    /// Uses the process stdout.
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(writer)),
        }
    }

    fn write_str(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| FlamesError::internal(format!("Terminal writer poisoned: {}", e)))?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl SharePlatform for TerminalSharePlatform {
    fn supports_native_share(&self) -> bool {
        false
    }

    async fn native_share(&self, _payload: &SharePayload) -> Result<()> {
        Err(FlamesError::internal(
            "Native share is not available in a terminal",
        ))
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        self.write_str(&osc52_sequence(text))
    }

    fn notify(&self, message: &str) {
        if let Err(e) = self.write_str(&format!("{}\n", message)) {
            tracing::warn!("[Share] Failed to show notice: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flames_core::share::{ShareOutcome, dispatch_share};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[tokio::test]
    async fn test_share_falls_back_to_clipboard_sequence() {
        let buffer = Buffer::default();
        let platform = TerminalSharePlatform::with_writer(Box::new(buffer.clone()));
        let payload = SharePayload {
            title: "FLAMES Calculator Result".to_string(),
            text: "Alice + Bob = Lovers! 💕 Check out your FLAMES result!".to_string(),
            url: "https://flames.example/?result=r1".to_string(),
        };

        let outcome = dispatch_share(&platform, payload.clone()).await;
        assert_eq!(outcome, ShareOutcome::Copied(payload.clone()));

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(written.starts_with(&osc52_sequence(&payload.clipboard_text())));
        assert!(written.ends_with("Result copied to clipboard! 📋\n"));
    }
}
