#[cfg(all(feature = "device", not(target_arch = "wasm32")))]
mod device;

mod headless;
mod sampler;

pub use self::sampler::Voice;

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use cgmath::Vector3;
use parking_lot::Mutex;

use pastel::errors::*;
use pastel::utils::HandlePool;

use self::sampler::Sampler;
use crate::buffer::{SoundBufferData, SoundBufferHandle};
use crate::settings::{AudioSettings, MixerBackend};
use crate::sound::SoundHandle;

/// The playback engine. It owns every voice and buffer registered by sounds,
/// and renders them on its own thread.
///
/// Mutations are expressed as `Command`s and applied to the sampler under its
/// lock, so queries issued right after a command already observe it.
pub struct Mixer {
    sounds: Mutex<HandlePool<SoundHandle>>,
    buffers: Mutex<HandlePool<SoundBufferHandle>>,
    sampler: Arc<Mutex<Sampler>>,
    worker: Option<JoinHandle<()>>,
}

impl Mixer {
    pub fn new(settings: &AudioSettings) -> Result<Self> {
        match settings.backend {
            MixerBackend::Device => Mixer::device(),
            MixerBackend::Headless => {
                let sampler = Mixer::sampler(settings);
                let worker = headless::run(sampler.clone(), settings.tick())?;
                Ok(Mixer::with(sampler, Some(worker)))
            }
            MixerBackend::Manual => Ok(Mixer::manual(settings)),
        }
    }

    /// Creates a mixer without any thread. It only renders on request.
    pub fn manual(settings: &AudioSettings) -> Self {
        info!("Create manual audio mixer.");
        Mixer::with(Mixer::sampler(settings), None)
    }

    #[cfg(all(feature = "device", not(target_arch = "wasm32")))]
    fn device() -> Result<Self> {
        let sampler = device::run()?;
        Ok(Mixer::with(sampler, None))
    }

    #[cfg(not(all(feature = "device", not(target_arch = "wasm32"))))]
    fn device() -> Result<Self> {
        Err(Error::DeviceUnavailable(
            "compiled without the `device` feature".into(),
        ))
    }

    fn sampler(settings: &AudioSettings) -> Arc<Mutex<Sampler>> {
        let sampler = Sampler::new(settings.channels, settings.sample_rate);
        Arc::new(Mutex::new(sampler))
    }

    fn with(sampler: Arc<Mutex<Sampler>>, worker: Option<JoinHandle<()>>) -> Self {
        Mixer {
            sounds: Mutex::new(HandlePool::new()),
            buffers: Mutex::new(HandlePool::new()),
            sampler,
            worker,
        }
    }
}

impl Drop for Mixer {
    fn drop(&mut self) {
        self.sampler.lock().update(Command::Discard);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Audio mixer thread panicked.");
            }
        }
    }
}

impl Mixer {
    pub fn create_buffer(&self, data: Arc<SoundBufferData>) -> SoundBufferHandle {
        let handle = self.buffers.lock().create();
        self.sampler.lock().update(Command::CreateBuffer(handle, data));
        handle
    }

    pub fn delete_buffer(&self, handle: SoundBufferHandle) {
        if self.buffers.lock().free(handle) {
            self.sampler.lock().update(Command::DeleteBuffer(handle));
        }
    }

    pub fn create_voice(&self, voice: Voice) -> SoundHandle {
        let handle = self.sounds.lock().create();
        self.sampler.lock().update(Command::CreateVoice(handle, voice));
        handle
    }

    /// Creates a new voice holding a copy of the state of `handle`.
    pub fn duplicate_voice(&self, handle: SoundHandle) -> Result<SoundHandle> {
        let mut sounds = self.sounds.lock();
        if !sounds.contains(handle) {
            return Err(Error::InvalidHandleUse);
        }

        let mut sampler = self.sampler.lock();
        let voice = sampler
            .voice(handle)
            .cloned()
            .ok_or(Error::InvalidHandleUse)?;

        let duplicated = sounds.create();
        sampler.update(Command::CreateVoice(duplicated, voice));
        Ok(duplicated)
    }

    pub fn delete_voice(&self, handle: SoundHandle) {
        if self.sounds.lock().free(handle) {
            self.sampler.lock().update(Command::DeleteVoice(handle));
        }
    }

    /// Applies `cmd` to the voice `handle`.
    pub fn submit(&self, handle: SoundHandle, cmd: Command) -> Result<()> {
        if !self.sounds.lock().contains(handle) {
            warn!("Sound {} is not available.", handle);
            return Err(Error::InvalidHandleUse);
        }

        if let Command::SetBuffer(_, Some(buffer)) = &cmd {
            if !self.buffers.lock().contains(*buffer) {
                warn!("Sound buffer {} is not available.", buffer);
                return Err(Error::InvalidHandleUse);
            }
        }

        self.sampler.lock().update(cmd);
        Ok(())
    }

    /// Reads the live state of the voice `handle`.
    pub fn inspect<F, T>(&self, handle: SoundHandle, func: F) -> Result<T>
    where
        F: FnOnce(&Voice) -> T,
    {
        if !self.sounds.lock().contains(handle) {
            return Err(Error::InvalidHandleUse);
        }

        self.sampler
            .lock()
            .voice(handle)
            .map(func)
            .ok_or(Error::InvalidHandleUse)
    }

    #[inline]
    pub fn set_listener(&self, position: Vector3<f32>) {
        self.sampler.lock().update(Command::SetListener(position));
    }

    #[inline]
    pub fn listener(&self) -> Vector3<f32> {
        self.sampler.lock().listener()
    }

    #[inline]
    pub fn set_global_volume(&self, volume: f32) {
        self.sampler.lock().update(Command::SetGlobalVolume(volume));
    }

    #[inline]
    pub fn global_volume(&self) -> f32 {
        self.sampler.lock().global_volume()
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.sampler.lock().channels()
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sampler.lock().sample_rate()
    }

    #[inline]
    pub fn render(&self, out: &mut [f32]) {
        self.sampler.lock().render(out);
    }

    #[inline]
    pub fn advance(&self, elapsed: Duration) {
        self.sampler.lock().advance(elapsed);
    }

    #[inline]
    pub fn sound_count(&self) -> usize {
        self.sounds.lock().len()
    }

    #[inline]
    pub fn buffer_count(&self) -> usize {
        self.buffers.lock().len()
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    SetListener(Vector3<f32>),
    SetGlobalVolume(f32),
    CreateBuffer(SoundBufferHandle, Arc<SoundBufferData>),
    DeleteBuffer(SoundBufferHandle),
    CreateVoice(SoundHandle, Voice),
    DeleteVoice(SoundHandle),
    Play(SoundHandle),
    Pause(SoundHandle),
    Stop(SoundHandle),
    SetBuffer(SoundHandle, Option<SoundBufferHandle>),
    SetLoop(SoundHandle, bool),
    SetPitch(SoundHandle, f32),
    SetVolume(SoundHandle, f32),
    SetOffset(SoundHandle, Duration),
    SetPosition(SoundHandle, Vector3<f32>),
    SetRelative(SoundHandle, bool),
    SetMinDistance(SoundHandle, f32),
    SetAttenuation(SoundHandle, f32),
    Discard,
}
