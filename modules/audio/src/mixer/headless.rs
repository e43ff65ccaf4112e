use std::sync::Arc;
use std::thread::{self, Builder, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use pastel::errors::*;

use super::sampler::Sampler;

/// Spawns a thread that advances playback in real time, without output.
pub fn run(sampler: Arc<Mutex<Sampler>>, tick: Duration) -> Result<JoinHandle<()>> {
    info!("Create headless audio mixer.");

    Builder::new()
        .name("Audio".into())
        .spawn(move || {
            let mut last = Instant::now();

            loop {
                thread::sleep(tick);

                let now = Instant::now();
                let mut sampler = sampler.lock();
                if sampler.is_discarded() {
                    break;
                }

                sampler.advance(now - last);
                last = now;
            }

            info!("Discard headless audio mixer.");
        })
        .map_err(|err| Error::DeviceUnavailable(format!("failed to spawn mixer thread: {}", err)))
}
