pub use crate::clipboard::{Clipboard, ClipboardProvider, MemoryClipboard};
#[cfg(all(feature = "system-clipboard", not(target_arch = "wasm32")))]
pub use crate::clipboard::SystemClipboard;

pub use crate::errors::{Error, Result};

pub use crate::utils::{Handle, HandleIndex, HandleLike, HandlePool};
