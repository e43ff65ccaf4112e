//! Text interchange with the system clipboard.
//!
//! Clipboard providers speak a raw protocol: strings cross the boundary as
//! zero-terminated sequences of 32-bit code units, one Unicode code point per
//! unit. `Clipboard` converts between that representation and `String` on every
//! call. It keeps no state of its own, so every `read` reflects the clipboard at
//! call time and every `write` replaces whatever was there before.

mod memory;
#[cfg(all(feature = "system-clipboard", not(target_arch = "wasm32")))]
mod system;

pub use self::memory::MemoryClipboard;
#[cfg(all(feature = "system-clipboard", not(target_arch = "wasm32")))]
pub use self::system::SystemClipboard;

use std::slice;

use crate::errors::*;

/// The raw clipboard protocol.
///
/// Failing to reach the clipboard at all (no clipboard service, access denied)
/// must be reported as `Error::ClipboardUnavailable`. An empty clipboard is not
/// a failure.
///
/// # Safety
///
/// The pointer returned by `get_unicode_string` must either be null or point to
/// readable memory holding a sequence of `u32` that contains a zero unit. It has
/// to stay valid until the next call on the provider. `Clipboard::read` relies on
/// this to scan for the terminator, and can not verify it.
pub unsafe trait ClipboardProvider {
    /// Returns the current contents as a zero-terminated buffer owned by the
    /// provider. A null pointer means the clipboard holds no text.
    fn get_unicode_string(&mut self) -> Result<*const u32>;

    /// Replaces the current contents with `text`, whose last unit is zero. The
    /// provider copies the units before returning.
    fn set_unicode_string(&mut self, text: &[u32]) -> Result<()>;
}

/// Reads and writes clipboard text through a `ClipboardProvider`.
pub struct Clipboard<P: ClipboardProvider> {
    provider: P,
}

#[cfg(all(feature = "system-clipboard", not(target_arch = "wasm32")))]
impl Clipboard<SystemClipboard> {
    /// Opens the clipboard of the host operating system.
    pub fn system() -> Result<Self> {
        Ok(Clipboard::new(SystemClipboard::new()?))
    }
}

impl<P: ClipboardProvider> Clipboard<P> {
    pub fn new(provider: P) -> Self {
        Clipboard { provider }
    }

    /// Copies the current clipboard text into a new `String`.
    pub fn read(&mut self) -> Result<String> {
        let ptr = self.provider.get_unicode_string()?;
        let units = unsafe { copy_terminated(ptr) };
        Ok(decode(&units))
    }

    /// Replaces the clipboard text with `text`. Text holding a NUL character
    /// can not be represented and is rejected, leaving the clipboard untouched.
    pub fn write(&mut self, text: &str) -> Result<()> {
        if let Some(at) = text.find('\0') {
            warn!("Rejects clipboard text with a NUL character at byte {}.", at);
            return Err(invalid_parameter!(
                "clipboard text holds a NUL character at byte {}",
                at
            ));
        }

        let units = encode(text);
        trace!("Writes {} code points into clipboard.", units.len() - 1);
        self.provider.set_unicode_string(&units)
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn into_inner(self) -> P {
        self.provider
    }
}

/// Encodes `text` as UTF-32 code units followed by a zero unit.
pub fn encode(text: &str) -> Vec<u32> {
    text.chars().map(|c| c as u32).chain(Some(0)).collect()
}

/// Decodes UTF-32 code units up to the first zero unit, or to the end of
/// `units` if it has none. Units that are not Unicode scalar values decode to
/// U+FFFD.
pub fn decode(units: &[u32]) -> String {
    units
        .iter()
        .take_while(|&&v| v != 0)
        .map(|&v| char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Copies the units in front of the first zero unit of a foreign buffer. The
/// scan never reads past the terminator.
///
/// # Safety
///
/// `ptr` must be null or point to readable `u32`s containing a zero unit.
unsafe fn copy_terminated(ptr: *const u32) -> Vec<u32> {
    if ptr.is_null() {
        return Vec::new();
    }

    let mut len = 0;
    while *ptr.add(len) != 0 {
        len += 1;
    }

    slice::from_raw_parts(ptr, len).to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_appends_terminator() {
        assert_eq!(encode(""), vec![0]);
        assert_eq!(encode("ab"), vec![0x61, 0x62, 0]);
        // Code points above the basic plane still take a single unit.
        assert_eq!(encode("\u{1F600}"), vec![0x1F600, 0]);
    }

    #[test]
    fn decode_stops_at_terminator() {
        assert_eq!(decode(&[0x68, 0x69, 0, 0x78]), "hi");
        assert_eq!(decode(&[0]), "");
        assert_eq!(decode(&[0x68, 0x69]), "hi");
        assert_eq!(decode(&[0xD800, 0x110000, 0x41, 0]), "\u{FFFD}\u{FFFD}A");
    }

    #[test]
    fn scan_never_passes_terminator() {
        let units = vec![0x61, 0x62, 0, 0x63, 0];
        let copied = unsafe { copy_terminated(units.as_ptr()) };
        assert_eq!(copied, vec![0x61, 0x62]);

        let units = vec![0];
        assert!(unsafe { copy_terminated(units.as_ptr()) }.is_empty());
        assert!(unsafe { copy_terminated(::std::ptr::null()) }.is_empty());
    }
}
