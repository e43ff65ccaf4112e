use std::sync::Arc;
use std::time::Duration;

use cgmath::Vector3;

use pastel::errors::*;

use super::buffer::{SoundBuffer, SoundBufferHandle};
use super::mixer::{Command, Mixer, Voice};
use super::spatial;
use super::system::AudioSystem;

impl_handle!(SoundHandle);

/// The playback state of a sound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Stopped,
    Paused,
    Playing,
}

impl Default for Status {
    fn default() -> Self {
        Status::Stopped
    }
}

/// A playable sound, owning one voice of the mixer.
///
/// A sound plays the samples of a `SoundBuffer` it is bound to. The binding is
/// a non-owning reference: the buffer is never copied, and dropping the sound
/// leaves the buffer untouched. Buffers must outlive the sounds bound to them,
/// so releasing a buffer stops and detaches its sounds.
///
/// The voice is released by `destroy`, or when the sound is dropped. Any
/// operation issued after that fails with `Error::InvalidHandleUse`.
///
/// Playback itself happens on the mixer, independently of the caller. None of
/// the methods wait for it. Mutating methods take `&mut self`, so concurrent
/// changes to one sound have to be serialized by its owner.
pub struct Sound {
    mixer: Arc<Mixer>,
    handle: Option<SoundHandle>,
}

impl Sound {
    /// Creates a stopped sound with no buffer and default parameters.
    pub fn new(system: &AudioSystem) -> Self {
        let mixer = system.mixer().clone();
        let handle = mixer.create_voice(Voice::default());
        debug!("Creates sound {}.", handle);

        Sound {
            mixer,
            handle: Some(handle),
        }
    }

    /// Creates a stopped sound bound to `buffer`.
    pub fn with_buffer(system: &AudioSystem, buffer: &SoundBuffer) -> Result<Self> {
        let mut sound = Sound::new(system);
        sound.set_buffer(Some(buffer))?;
        Ok(sound)
    }

    /// Creates a new sound with its own voice, mirroring the buffer binding,
    /// status, playing offset and every parameter of this one as they are now.
    /// Later changes to either sound do not affect the other.
    pub fn try_clone(&self) -> Result<Self> {
        let handle = self.mixer.duplicate_voice(self.alive()?)?;
        debug!("Creates sound {} from {}.", handle, self.alive()?);

        Ok(Sound {
            mixer: self.mixer.clone(),
            handle: Some(handle),
        })
    }

    /// Returns the handle of the voice, or `None` once destroyed.
    #[inline]
    pub fn handle(&self) -> Option<SoundHandle> {
        self.handle
    }

    /// Starts or resumes playback.
    ///
    /// A stopped sound starts from the beginning, and a paused one resumes from
    /// its current offset. Playing a sound that is already playing restarts it
    /// from the beginning.
    pub fn play(&mut self) -> Result<()> {
        self.submit(Command::Play)
    }

    /// Pauses a playing sound, keeping its playing offset.
    pub fn pause(&mut self) -> Result<()> {
        self.submit(Command::Pause)
    }

    /// Stops a playing or paused sound, and rewinds it to the beginning.
    pub fn stop(&mut self) -> Result<()> {
        self.submit(Command::Stop)
    }

    /// Binds the sound to `buffer`, or detaches it with `None`.
    ///
    /// The current playback is not stopped nor rewound. Stop the sound first to
    /// switch buffers cleanly.
    pub fn set_buffer(&mut self, buffer: Option<&SoundBuffer>) -> Result<()> {
        let handle = match buffer {
            Some(buffer) => {
                if !Arc::ptr_eq(buffer.mixer(), &self.mixer) {
                    return Err(invalid_parameter!(
                        "sound buffer {} belongs to another audio system",
                        buffer.handle()
                    ));
                }

                Some(buffer.handle())
            }
            None => None,
        };

        self.submit(|v| Command::SetBuffer(v, handle))
    }

    /// Returns the buffer the sound is bound to.
    pub fn buffer(&self) -> Result<Option<SoundBufferHandle>> {
        self.inspect(|v| v.buffer.as_ref().map(|(handle, _)| *handle))
    }

    /// Returns the current playback state, as seen by the mixer.
    pub fn status(&self) -> Result<Status> {
        self.inspect(|v| v.status)
    }

    pub fn set_loop(&mut self, looping: bool) -> Result<()> {
        self.submit(|v| Command::SetLoop(v, looping))
    }

    pub fn is_loop(&self) -> Result<bool> {
        self.inspect(|v| v.looping)
    }

    /// Sets the frequency-shift of the sound. The pitch also changes the
    /// playback speed, 1 being the original.
    pub fn set_pitch(&mut self, pitch: f32) -> Result<()> {
        if !(pitch.is_finite() && pitch > 0.0) {
            return Err(invalid_parameter!("pitch must be positive, got {}", pitch));
        }

        self.submit(|v| Command::SetPitch(v, pitch))
    }

    pub fn pitch(&self) -> Result<f32> {
        self.inspect(|v| v.pitch)
    }

    /// Sets the volume of the sound, clamped into `[0, 100]`.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        if volume.is_nan() {
            return Err(invalid_parameter!("volume is not a number"));
        }

        let volume = volume.max(0.0).min(100.0);
        self.submit(|v| Command::SetVolume(v, volume))
    }

    pub fn volume(&self) -> Result<f32> {
        self.inspect(|v| v.volume)
    }

    /// Moves the playhead. Offsets past the end of the buffer are clamped to
    /// its end. A stopped sound ignores it, since it always plays from the
    /// beginning.
    pub fn set_playing_offset(&mut self, offset: Duration) -> Result<()> {
        self.submit(|v| Command::SetOffset(v, offset))
    }

    pub fn playing_offset(&self) -> Result<Duration> {
        self.inspect(|v| v.offset())
    }

    pub fn set_position<T>(&mut self, position: T) -> Result<()>
    where
        T: Into<Vector3<f32>>,
    {
        let position = position.into();
        self.submit(|v| Command::SetPosition(v, position))
    }

    pub fn position(&self) -> Result<Vector3<f32>> {
        self.inspect(|v| v.spatial.position)
    }

    /// Makes the position relative to the listener instead of absolute.
    pub fn set_relative_to_listener(&mut self, relative: bool) -> Result<()> {
        self.submit(|v| Command::SetRelative(v, relative))
    }

    pub fn is_relative_to_listener(&self) -> Result<bool> {
        self.inspect(|v| v.spatial.relative)
    }

    /// Sets the distance under which the sound is heard at its maximum volume.
    /// Distances that are not strictly positive are rejected.
    pub fn set_min_distance(&mut self, distance: f32) -> Result<()> {
        let distance = spatial::check_min_distance(distance)?;
        self.submit(|v| Command::SetMinDistance(v, distance))
    }

    pub fn min_distance(&self) -> Result<f32> {
        self.inspect(|v| v.spatial.min_distance)
    }

    /// Sets the attenuation factor. Negative factors are rejected.
    pub fn set_attenuation(&mut self, attenuation: f32) -> Result<()> {
        let attenuation = spatial::check_attenuation(attenuation)?;
        self.submit(|v| Command::SetAttenuation(v, attenuation))
    }

    pub fn attenuation(&self) -> Result<f32> {
        self.inspect(|v| v.spatial.attenuation)
    }

    /// Releases the voice. Destroying a sound twice does nothing.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Deletes sound {}.", handle);
            self.mixer.delete_voice(handle);
        }
    }

    #[inline]
    fn alive(&self) -> Result<SoundHandle> {
        self.handle.ok_or_else(|| {
            warn!("Operation issued on a destroyed sound.");
            Error::InvalidHandleUse
        })
    }

    #[inline]
    fn submit<F>(&self, command: F) -> Result<()>
    where
        F: FnOnce(SoundHandle) -> Command,
    {
        let handle = self.alive()?;
        self.mixer.submit(handle, command(handle))
    }

    #[inline]
    fn inspect<F, T>(&self, func: F) -> Result<T>
    where
        F: FnOnce(&Voice) -> T,
    {
        self.mixer.inspect(self.alive()?, func)
    }
}

impl Drop for Sound {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl ::std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.debug_struct("Sound").field("handle", &self.handle).finish()
    }
}
