use std::sync::Arc;

use parking_lot::Mutex;

use super::ClipboardProvider;
use crate::errors::*;

/// A process-local clipboard.
///
/// Clones share the same contents, the way applications share the system
/// clipboard. It can be switched off to emulate a clipboard service that
/// refuses access.
#[derive(Clone)]
pub struct MemoryClipboard {
    shared: Arc<Mutex<Shared>>,
    snapshot: Vec<u32>,
}

struct Shared {
    units: Vec<u32>,
    available: bool,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        MemoryClipboard::new()
    }
}

impl MemoryClipboard {
    pub fn new() -> Self {
        MemoryClipboard {
            shared: Arc::new(Mutex::new(Shared {
                units: vec![0],
                available: true,
            })),
            snapshot: vec![0],
        }
    }

    /// Makes every later access through this clipboard, and its clones, fail
    /// with `Error::ClipboardUnavailable` until it is made available again.
    pub fn set_available(&self, available: bool) {
        self.shared.lock().available = available;
    }
}

unsafe impl ClipboardProvider for MemoryClipboard {
    fn get_unicode_string(&mut self) -> Result<*const u32> {
        let shared = self.shared.lock();
        if !shared.available {
            return Err(Error::ClipboardUnavailable("access denied".into()));
        }

        self.snapshot.clear();
        self.snapshot.extend_from_slice(&shared.units);
        Ok(self.snapshot.as_ptr())
    }

    fn set_unicode_string(&mut self, text: &[u32]) -> Result<()> {
        let mut shared = self.shared.lock();
        if !shared.available {
            return Err(Error::ClipboardUnavailable("access denied".into()));
        }

        let len = text.iter().position(|&v| v == 0).unwrap_or(text.len());
        shared.units.clear();
        shared.units.extend_from_slice(&text[..len]);
        shared.units.push(0);
        Ok(())
    }
}
