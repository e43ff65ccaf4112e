use std::sync::Arc;
use std::thread::Builder;

use cpal::{self, EventLoop, StreamData, UnknownTypeOutputBuffer};
use parking_lot::Mutex;

use pastel::errors::*;

use super::sampler::{self, Sampler};

/// Opens the default output device and renders into it from a dedicated
/// thread. The event loop never returns, so the thread is left running and
/// outputs silence once the sampler is discarded.
pub fn run() -> Result<Arc<Mutex<Sampler>>> {
    let device = cpal::default_output_device()
        .ok_or_else(|| Error::DeviceUnavailable("no available audio output device".into()))?;

    let format = device
        .default_output_format()
        .map_err(|err| Error::DeviceUnavailable(format!("{:?}", err)))?;

    let events = EventLoop::new();
    let stream = events
        .build_output_stream(&device, &format)
        .map_err(|err| Error::DeviceUnavailable(format!("{:?}", err)))?;
    events.play_stream(stream.clone());

    info!(
        "Create audio mixer based on CPAL. [{:?}] {:?}.",
        device.name(),
        format
    );

    let sampler = Arc::new(Mutex::new(Sampler::new(
        format.channels as u8,
        format.sample_rate.0 as u32,
    )));

    let shared = sampler.clone();
    Builder::new()
        .name("Audio".into())
        .spawn(move || {
            let mut scratch = Vec::new();

            events.run(move |id, data| {
                if stream != id {
                    return;
                }

                let mut sampler = shared.lock();
                if let StreamData::Output { buffer } = data {
                    match buffer {
                        UnknownTypeOutputBuffer::U16(mut buffer) => {
                            scratch.resize(buffer.len(), 0.0);
                            sampler.render(&mut scratch);
                            for (v, s) in buffer.iter_mut().zip(&scratch) {
                                *v = sampler::sample_f32_to_u16(*s);
                            }
                        }
                        UnknownTypeOutputBuffer::I16(mut buffer) => {
                            scratch.resize(buffer.len(), 0.0);
                            sampler.render(&mut scratch);
                            for (v, s) in buffer.iter_mut().zip(&scratch) {
                                *v = sampler::sample_f32_to_i16(*s);
                            }
                        }
                        UnknownTypeOutputBuffer::F32(mut buffer) => {
                            sampler.render(&mut *buffer);
                        }
                    }
                }
            })
        })
        .map_err(|err| Error::DeviceUnavailable(format!("failed to spawn mixer thread: {}", err)))?;

    Ok(sampler)
}
