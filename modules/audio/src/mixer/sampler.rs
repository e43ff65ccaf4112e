use std::sync::Arc;
use std::time::Duration;

use cgmath::Vector3;

use crate::buffer::{SoundBufferData, SoundBufferHandle};
use crate::sound::{SoundHandle, Status};
use crate::spatial::Spatial;

use super::Command;

/// Frames rendered per pass when playback is advanced without output.
const ADVANCE_CHUNK_FRAMES: usize = 1024;

/// The state of one sound, as the mixer sees it.
#[derive(Debug, Clone)]
pub struct Voice {
    pub buffer: Option<(SoundBufferHandle, Arc<SoundBufferData>)>,
    pub status: Status,
    pub looping: bool,
    pub pitch: f32,
    pub volume: f32,
    /// Playhead, in seconds.
    pub cursor: f64,
    pub spatial: Spatial,
}

impl Default for Voice {
    fn default() -> Self {
        Voice {
            buffer: None,
            status: Status::Stopped,
            looping: false,
            pitch: 1.0,
            volume: 100.0,
            cursor: 0.0,
            spatial: Spatial::default(),
        }
    }
}

impl Voice {
    #[inline]
    pub fn offset(&self) -> Duration {
        Duration::from_secs_f64(self.cursor)
    }

    fn play(&mut self) {
        if self.status != Status::Paused {
            self.cursor = 0.0;
        }

        self.status = Status::Playing;
    }

    fn pause(&mut self) {
        if self.status == Status::Playing {
            self.status = Status::Paused;
        }
    }

    fn stop(&mut self) {
        if self.status != Status::Stopped {
            self.status = Status::Stopped;
            self.cursor = 0.0;
        }
    }

    /// A stopped voice always starts from the beginning, so the offset is
    /// only applied while playing or paused.
    fn set_offset(&mut self, offset: Duration) {
        if self.status == Status::Stopped {
            return;
        }

        let seconds = offset.as_secs_f64();
        self.cursor = match self.buffer {
            Some((_, ref data)) => seconds.min(data.seconds()),
            None => seconds,
        };
    }

    fn mix(&self, frame: &mut [f32], listener: Vector3<f32>, master: f32) {
        if self.status != Status::Playing {
            return;
        }

        let data = match self.buffer {
            Some((_, ref data)) => data,
            None => return,
        };

        let index = (self.cursor * f64::from(data.sample_rate)) as usize;
        if index >= data.frames() {
            return;
        }

        let gain = (self.volume / 100.0) * self.spatial.gain(listener) * master;
        let channels = data.channels as usize;
        for (i, v) in frame.iter_mut().enumerate() {
            let sample = data.samples[index * channels + i % channels];
            *v += sample_i16_to_f32(sample) * gain;
        }
    }

    fn advance(&mut self, sample_rate: u32) {
        if self.status != Status::Playing {
            return;
        }

        let length = match self.buffer {
            Some((_, ref data)) => data.seconds(),
            None => return,
        };

        let pitch = self.pitch.min(100.0).max(0.01);
        self.cursor += f64::from(pitch) / f64::from(sample_rate);

        if self.cursor >= length {
            if self.looping && length > 0.0 {
                self.cursor %= length;
            } else {
                self.status = Status::Stopped;
                self.cursor = 0.0;
            }
        }
    }
}

/// Mixes every playing voice into interleaved output frames.
pub struct Sampler {
    channels: u8,
    sample_rate: u32,
    listener: Vector3<f32>,
    global_volume: f32,
    buffers: Vec<Option<(SoundBufferHandle, Arc<SoundBufferData>)>>,
    voices: Vec<Option<Voice>>,
    pending: f64,
    scratch: Vec<f32>,
    discarded: bool,
}

impl Sampler {
    pub fn new(channels: u8, sample_rate: u32) -> Self {
        Sampler {
            channels,
            sample_rate,
            listener: Vector3::new(0.0, 0.0, 0.0),
            global_volume: 100.0,
            buffers: Vec::new(),
            voices: Vec::new(),
            pending: 0.0,
            scratch: Vec::new(),
            discarded: false,
        }
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn listener(&self) -> Vector3<f32> {
        self.listener
    }

    #[inline]
    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    #[inline]
    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    #[inline]
    pub fn voice(&self, handle: SoundHandle) -> Option<&Voice> {
        self.voices
            .get(handle.index() as usize)
            .and_then(|v| v.as_ref())
    }

    /// Applies `cmd`. Returns false once the sampler has been discarded.
    pub fn update(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::SetListener(position) => self.listener = position,
            Command::SetGlobalVolume(volume) => self.global_volume = volume,
            Command::CreateBuffer(handle, data) => self.create_buffer(handle, data),
            Command::DeleteBuffer(handle) => self.delete_buffer(handle),
            Command::CreateVoice(handle, voice) => self.create_voice(handle, voice),
            Command::DeleteVoice(handle) => {
                if let Some(v) = self.voices.get_mut(handle.index() as usize) {
                    *v = None;
                }
            }
            Command::Play(handle) => self.with_voice(handle, Voice::play),
            Command::Pause(handle) => self.with_voice(handle, Voice::pause),
            Command::Stop(handle) => self.with_voice(handle, Voice::stop),
            Command::SetBuffer(handle, buffer) => self.set_buffer(handle, buffer),
            Command::SetLoop(handle, looping) => self.with_voice(handle, |v| v.looping = looping),
            Command::SetPitch(handle, pitch) => self.with_voice(handle, |v| v.pitch = pitch),
            Command::SetVolume(handle, volume) => self.with_voice(handle, |v| v.volume = volume),
            Command::SetOffset(handle, offset) => {
                self.with_voice(handle, |v| v.set_offset(offset))
            }
            Command::SetPosition(handle, position) => {
                self.with_voice(handle, |v| v.spatial.position = position)
            }
            Command::SetRelative(handle, relative) => {
                self.with_voice(handle, |v| v.spatial.relative = relative)
            }
            Command::SetMinDistance(handle, distance) => {
                self.with_voice(handle, |v| v.spatial.min_distance = distance)
            }
            Command::SetAttenuation(handle, attenuation) => {
                self.with_voice(handle, |v| v.spatial.attenuation = attenuation)
            }
            Command::Discard => {
                self.discarded = true;
                return false;
            }
        }

        true
    }

    /// Renders interleaved frames into `out`, advancing every playing voice by
    /// one frame per whole frame of output.
    pub fn render(&mut self, out: &mut [f32]) {
        for v in out.iter_mut() {
            *v = 0.0;
        }

        if self.discarded {
            return;
        }

        let listener = self.listener;
        let master = self.global_volume / 100.0;
        let sample_rate = self.sample_rate;

        // A trailing partial frame is left silent.
        for frame in out.chunks_exact_mut(self.channels as usize) {
            for voice in self.voices.iter_mut().filter_map(|v| v.as_mut()) {
                voice.mix(frame, listener, master);
                voice.advance(sample_rate);
            }
        }
    }

    /// Advances playback by `elapsed`, discarding the output. Fractions of a
    /// frame are carried over to the next call.
    pub fn advance(&mut self, elapsed: Duration) {
        let frames = elapsed.as_secs_f64() * f64::from(self.sample_rate) + self.pending;
        let mut remains = frames.floor() as usize;
        self.pending = frames - frames.floor();

        let mut scratch = ::std::mem::replace(&mut self.scratch, Vec::new());
        while remains > 0 {
            let len = remains.min(ADVANCE_CHUNK_FRAMES);
            scratch.resize(len * self.channels as usize, 0.0);
            self.render(&mut scratch);
            remains -= len;
        }

        self.scratch = scratch;
    }

    fn with_voice<F>(&mut self, handle: SoundHandle, func: F)
    where
        F: FnOnce(&mut Voice),
    {
        if let Some(v) = self
            .voices
            .get_mut(handle.index() as usize)
            .and_then(|v| v.as_mut())
        {
            func(v);
        }
    }

    fn create_buffer(&mut self, handle: SoundBufferHandle, data: Arc<SoundBufferData>) {
        let index = handle.index() as usize;
        if self.buffers.len() <= index {
            self.buffers.resize(index + 1, None);
        }

        self.buffers[index] = Some((handle, data));
    }

    fn delete_buffer(&mut self, handle: SoundBufferHandle) {
        if let Some(v) = self.buffers.get_mut(handle.index() as usize) {
            *v = None;
        }

        // Sounds can not keep playing samples their owner has released.
        for voice in self.voices.iter_mut().filter_map(|v| v.as_mut()) {
            let bound = voice.buffer.as_ref().map(|(h, _)| *h == handle);
            if bound == Some(true) {
                voice.buffer = None;
                voice.status = Status::Stopped;
                voice.cursor = 0.0;
            }
        }
    }

    fn create_voice(&mut self, handle: SoundHandle, voice: Voice) {
        let index = handle.index() as usize;
        if self.voices.len() <= index {
            self.voices.resize(index + 1, None);
        }

        self.voices[index] = Some(voice);
    }

    fn set_buffer(&mut self, handle: SoundHandle, buffer: Option<SoundBufferHandle>) {
        let buffer = match buffer {
            Some(buffer) => {
                let found = self
                    .buffers
                    .get(buffer.index() as usize)
                    .and_then(|v| v.as_ref())
                    .filter(|(h, _)| *h == buffer)
                    .cloned();

                if found.is_none() {
                    warn!("Sound buffer {} is not available.", buffer);
                    return;
                }

                found
            }
            None => None,
        };

        self.with_voice(handle, |v| v.buffer = buffer);
    }
}

#[inline]
pub fn sample_i16_to_f32(sample: i16) -> f32 {
    if sample < 0 {
        sample as f32 / -(::std::i16::MIN as f32)
    } else {
        sample as f32 / ::std::i16::MAX as f32
    }
}

#[allow(dead_code)]
#[inline]
pub fn sample_f32_to_i16(sample: f32) -> i16 {
    let sample = sample.max(-1.0).min(1.0);
    if sample >= 0.0 {
        (sample * ::std::i16::MAX as f32) as i16
    } else {
        (-sample * ::std::i16::MIN as f32) as i16
    }
}

#[allow(dead_code)]
#[inline]
pub fn sample_f32_to_u16(sample: f32) -> u16 {
    let sample = sample.max(-1.0).min(1.0);
    (((sample + 1.0) * 0.5) * ::std::u16::MAX as f32).round() as u16
}
