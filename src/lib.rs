//! # What is This?
//!
//! Pastel is a small binding layer over the multimedia services an application
//! usually wants from its host: sound playback and clipboard text.
//!
//! The root crate carries the shared pieces:
//!
//! - `errors`: the failure kinds every binding surfaces.
//! - `utils`: versioned handles and the pool that recycles them. Engine
//! resources are always addressed by these handles, never by pointers.
//! - `clipboard`: text interchange with the system clipboard through a raw,
//! zero-terminated UTF-32 protocol.
//!
//! Sound playback lives in the `pastel-audio` module crate.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate parking_lot;

#[cfg(all(feature = "system-clipboard", not(target_arch = "wasm32")))]
extern crate arboard;

#[macro_use]
pub mod errors;
#[macro_use]
pub mod utils;
pub mod clipboard;
pub mod prelude;
