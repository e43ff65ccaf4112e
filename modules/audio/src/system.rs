use std::sync::Arc;
use std::time::Duration;

use cgmath::Vector3;

use pastel::errors::*;

use super::mixer::Mixer;
use super::settings::{AudioSettings, MixerBackend};

/// The centralized management of audio sub-system.
///
/// Sounds and sound buffers are created against a system, and keep its mixer
/// alive for as long as they exist.
pub struct AudioSystem {
    settings: AudioSettings,
    mixer: Arc<Mixer>,
}

impl AudioSystem {
    pub fn new(settings: AudioSettings) -> Result<Self> {
        settings.validate()?;

        let mixer = Mixer::new(&settings)?;
        Ok(AudioSystem {
            settings,
            mixer: Arc::new(mixer),
        })
    }

    /// Creates a system whose mixer advances in real time without output.
    pub fn headless() -> Result<Self> {
        AudioSystem::new(AudioSettings::with_backend(MixerBackend::Headless))
    }

    /// Creates a system that only advances when told to, through `advance` or
    /// `render`.
    pub fn manual() -> Self {
        let settings = AudioSettings::with_backend(MixerBackend::Manual);
        let mixer = Mixer::manual(&settings);

        AudioSystem {
            settings,
            mixer: Arc::new(mixer),
        }
    }

    /// Creates a system that plays through the default output device.
    pub fn device() -> Result<Self> {
        AudioSystem::new(AudioSettings::with_backend(MixerBackend::Device))
    }

    #[inline]
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Sets the position of listener.
    #[inline]
    pub fn set_listener_position<T>(&self, position: T)
    where
        T: Into<Vector3<f32>>,
    {
        self.mixer.set_listener(position.into());
    }

    #[inline]
    pub fn listener_position(&self) -> Vector3<f32> {
        self.mixer.listener()
    }

    /// Sets the volume applied on top of every sound, clamped into `[0, 100]`.
    pub fn set_global_volume(&self, volume: f32) -> Result<()> {
        if volume.is_nan() {
            return Err(invalid_parameter!("volume is not a number"));
        }

        self.mixer.set_global_volume(volume.max(0.0).min(100.0));
        Ok(())
    }

    #[inline]
    pub fn global_volume(&self) -> f32 {
        self.mixer.global_volume()
    }

    /// Returns the number of interleaved channels the mixer renders.
    #[inline]
    pub fn output_channels(&self) -> u8 {
        self.mixer.channels()
    }

    #[inline]
    pub fn output_sample_rate(&self) -> u32 {
        self.mixer.sample_rate()
    }

    /// Advances playback by `elapsed`, discarding what would have been heard.
    #[inline]
    pub fn advance(&self, elapsed: Duration) {
        self.mixer.advance(elapsed);
    }

    /// Renders interleaved frames into `out`, advancing playback by the
    /// duration they cover.
    #[inline]
    pub fn render(&self, out: &mut [f32]) {
        self.mixer.render(out);
    }

    /// Returns the number of sounds alive in this system.
    #[inline]
    pub fn sound_count(&self) -> usize {
        self.mixer.sound_count()
    }

    /// Returns the number of sound buffers alive in this system.
    #[inline]
    pub fn buffer_count(&self) -> usize {
        self.mixer.buffer_count()
    }

    #[inline]
    pub(crate) fn mixer(&self) -> &Arc<Mixer> {
        &self.mixer
    }
}
