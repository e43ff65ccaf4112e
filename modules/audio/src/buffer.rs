use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lewton::inside_ogg::OggStreamReader;

use pastel::errors::*;

use super::mixer::Mixer;
use super::system::AudioSystem;

impl_handle!(SoundBufferHandle);

/// Interleaved 16-bit samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundBufferData {
    pub samples: Vec<i16>,
    pub channels: u8,
    pub sample_rate: u32,
}

impl SoundBufferData {
    pub fn new(samples: Vec<i16>, channels: u8, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(Error::Malformed("sound buffer has no channels".into()));
        }

        if sample_rate == 0 {
            return Err(Error::Malformed("sound buffer has no sample rate".into()));
        }

        if samples.len() % channels as usize != 0 {
            return Err(Error::Malformed(format!(
                "{} samples can not be split into {} channels",
                samples.len(),
                channels
            )));
        }

        Ok(SoundBufferData {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Decodes an Ogg Vorbis stream.
    pub fn from_ogg(bytes: &[u8]) -> Result<Self> {
        let mut reader = OggStreamReader::new(Cursor::new(bytes)).map_err(malformed)?;

        let channels = reader.ident_hdr.audio_channels;
        let sample_rate = reader.ident_hdr.audio_sample_rate;

        let mut samples = Vec::new();
        while let Some(packet) = reader.read_dec_packet_itl().map_err(malformed)? {
            samples.extend(&packet);
        }

        SoundBufferData::new(samples, channels, sample_rate)
    }

    /// Returns the number of frames, a frame being one sample per channel.
    #[inline]
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        let frames = self.frames() as u64;
        let rate = u64::from(self.sample_rate);
        Duration::from_secs(frames / rate)
            + Duration::from_nanos((frames % rate) * 1_000_000_000 / rate)
    }

    #[inline]
    pub(crate) fn seconds(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

fn malformed(err: lewton::VorbisError) -> Error {
    Error::Malformed(format!("failed to decode ogg stream: {:?}", err))
}

/// Audio samples registered into the mixer.
///
/// The buffer is owned by whoever created it. Sounds only refer to it by
/// handle. Dropping the buffer releases it from the mixer, and every sound
/// still bound to it is stopped and detached.
pub struct SoundBuffer {
    mixer: Arc<Mixer>,
    handle: SoundBufferHandle,
    data: Arc<SoundBufferData>,
}

impl SoundBuffer {
    pub fn new(system: &AudioSystem, data: SoundBufferData) -> Self {
        let mixer = system.mixer().clone();
        let data = Arc::new(data);
        let handle = mixer.create_buffer(data.clone());

        info!(
            "Creates sound buffer {} (channels {} sample_rate {} frames {}).",
            handle,
            data.channels,
            data.sample_rate,
            data.frames()
        );

        SoundBuffer {
            mixer,
            handle,
            data,
        }
    }

    pub fn from_samples(
        system: &AudioSystem,
        samples: Vec<i16>,
        channels: u8,
        sample_rate: u32,
    ) -> Result<Self> {
        let data = SoundBufferData::new(samples, channels, sample_rate)?;
        Ok(SoundBuffer::new(system, data))
    }

    pub fn from_ogg(system: &AudioSystem, bytes: &[u8]) -> Result<Self> {
        let data = SoundBufferData::from_ogg(bytes)?;
        Ok(SoundBuffer::new(system, data))
    }

    #[inline]
    pub fn handle(&self) -> SoundBufferHandle {
        self.handle
    }

    #[inline]
    pub fn samples(&self) -> &[i16] {
        &self.data.samples
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.samples.len()
    }

    #[inline]
    pub fn channel_count(&self) -> u8 {
        self.data.channels
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.data.sample_rate
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.data.duration()
    }

    #[inline]
    pub(crate) fn mixer(&self) -> &Arc<Mixer> {
        &self.mixer
    }
}

impl Drop for SoundBuffer {
    fn drop(&mut self) {
        debug!("Deletes sound buffer {}.", self.handle);
        self.mixer.delete_buffer(self.handle);
    }
}
