use super::{decode, encode, ClipboardProvider};
use crate::errors::*;

/// The clipboard of the host operating system, reached through `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    snapshot: Vec<u32>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(unavailable)?;
        info!("Opens system clipboard.");

        Ok(SystemClipboard {
            inner,
            snapshot: vec![0],
        })
    }
}

unsafe impl ClipboardProvider for SystemClipboard {
    fn get_unicode_string(&mut self) -> Result<*const u32> {
        let text = match self.inner.get_text() {
            Ok(text) => text,
            // Non-text contents read as an empty string.
            Err(arboard::Error::ContentNotAvailable) => String::new(),
            Err(err) => return Err(unavailable(err)),
        };

        self.snapshot = encode(&text);
        Ok(self.snapshot.as_ptr())
    }

    fn set_unicode_string(&mut self, text: &[u32]) -> Result<()> {
        self.inner.set_text(decode(text)).map_err(unavailable)
    }
}

fn unavailable(err: arboard::Error) -> Error {
    warn!("System clipboard is unavailable: {}", err);
    Error::ClipboardUnavailable(err.to_string())
}
