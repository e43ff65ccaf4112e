//! Functions for configuring the audio system.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use pastel::errors::*;

/// Where the mixer sends what it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixerBackend {
    /// Renders into the default output device. Requires the `device` feature.
    Device,
    /// Advances playback in real time on a background thread, without any
    /// output.
    Headless,
    /// Never advances on its own. Playback only moves forward when the
    /// application calls `AudioSystem::advance` or `AudioSystem::render`.
    Manual,
}

/// A structure containing configuration data for the audio system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub backend: MixerBackend,
    /// Output sample rate of headless and manual mixers. The device backend
    /// uses the format of the device.
    pub sample_rate: u32,
    /// Output channels of headless and manual mixers.
    pub channels: u8,
    /// Period of the headless mixer thread, in milliseconds.
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        AudioSettings {
            backend: MixerBackend::Headless,
            sample_rate: 44100,
            channels: 2,
            tick_ms: 10,
        }
    }
}

impl AudioSettings {
    pub fn with_backend(backend: MixerBackend) -> Self {
        AudioSettings {
            backend,
            ..Default::default()
        }
    }

    #[inline]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(invalid_parameter!("sample rate must be positive"));
        }

        if self.channels == 0 {
            return Err(invalid_parameter!("channel count must be positive"));
        }

        if self.tick_ms == 0 {
            return Err(invalid_parameter!("mixer tick must be positive"));
        }

        Ok(())
    }
}
