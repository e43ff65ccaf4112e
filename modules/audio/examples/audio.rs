extern crate env_logger;
extern crate pastel_audio;

use std::f32::consts::PI;
use std::thread;
use std::time::Duration;

use pastel_audio::prelude::*;

fn sine(system: &AudioSystem, frequency: f32, seconds: u32) -> Result<SoundBuffer> {
    let rate = system.output_sample_rate();
    let samples = (0..rate * seconds)
        .map(|i| {
            let t = i as f32 / rate as f32;
            ((2.0 * PI * frequency * t).sin() * 8192.0) as i16
        })
        .collect();

    SoundBuffer::from_samples(system, samples, 1, rate)
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    // Falls back to a silent mixer when no output device can be opened.
    let system = match AudioSystem::device() {
        Ok(system) => system,
        Err(err) => {
            println!("{}, playing without output.", err);
            AudioSystem::headless()?
        }
    };

    let buffer = sine(&system, 440.0, 2)?;
    let mut sound = Sound::with_buffer(&system, &buffer)?;
    sound.set_loop(true)?;
    sound.set_attenuation(0.5)?;
    sound.play()?;

    // Sweeps the emitter from the left to the right of the listener.
    for i in 0..40 {
        let x = (i as f32 - 20.0) * 0.5;
        sound.set_position([x, 0.0, 1.0])?;
        thread::sleep(Duration::from_millis(100));

        println!(
            "position {:>5.1} offset {:?} status {:?}",
            x,
            sound.playing_offset()?,
            sound.status()?
        );
    }

    let mut echo = sound.try_clone()?;
    echo.set_pitch(1.5)?;
    echo.set_volume(40.0)?;
    thread::sleep(Duration::from_secs(1));

    echo.destroy();
    sound.stop()?;
    Ok(())
}
