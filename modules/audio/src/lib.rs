//! Sound playback bindings of pastel.
//!
//! An `AudioSystem` runs the mixer, the engine that renders sounds on its own
//! thread. Applications register sample data as `SoundBuffer`s, and play them
//! through `Sound`s:
//!
//! ```rust
//! use pastel_audio::prelude::*;
//!
//! let system = AudioSystem::manual();
//! let buffer = SoundBuffer::from_samples(&system, vec![0; 44100], 1, 44100).unwrap();
//!
//! let mut sound = Sound::with_buffer(&system, &buffer).unwrap();
//! sound.play().unwrap();
//! assert_eq!(sound.status().unwrap(), Status::Playing);
//! ```
//!
//! A sound never owns the buffer it plays. The buffer belongs to whoever
//! created it, and several sounds can share it.

#[cfg(all(feature = "device", not(target_arch = "wasm32")))]
extern crate cpal;

extern crate cgmath;
extern crate lewton;
#[macro_use]
extern crate log;
extern crate parking_lot;
#[macro_use]
extern crate pastel;
extern crate serde;

pub mod buffer;
pub mod settings;
pub mod sound;
pub mod spatial;

mod mixer;
mod system;

pub mod prelude {
    pub use crate::buffer::{SoundBuffer, SoundBufferData, SoundBufferHandle};
    pub use crate::settings::{AudioSettings, MixerBackend};
    pub use crate::sound::{Sound, SoundHandle, Status};
    pub use crate::spatial::Spatial;
    pub use crate::system::AudioSystem;
    pub use cgmath::Vector3;
    pub use pastel::errors::{Error, Result};
}

pub use self::system::AudioSystem;
