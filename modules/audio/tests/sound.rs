extern crate env_logger;
extern crate pastel_audio;

use std::time::Duration;

use pastel_audio::prelude::*;

fn tone(system: &AudioSystem, seconds: usize) -> SoundBuffer {
    let rate = system.output_sample_rate() as usize;
    SoundBuffer::from_samples(system, vec![16384; rate * seconds], 1, rate as u32).unwrap()
}

fn assert_offset(sound: &Sound, expected: Duration) {
    let offset = sound.playing_offset().unwrap();
    let diff = if offset > expected {
        offset - expected
    } else {
        expected - offset
    };

    assert!(
        diff < Duration::from_millis(1),
        "offset {:?} expected {:?}",
        offset,
        expected
    );
}

#[test]
fn defaults() {
    let system = AudioSystem::manual();
    let sound = Sound::new(&system);

    assert_eq!(sound.status().unwrap(), Status::Stopped);
    assert_eq!(sound.buffer().unwrap(), None);
    assert_eq!(sound.is_loop().unwrap(), false);
    assert_eq!(sound.pitch().unwrap(), 1.0);
    assert_eq!(sound.volume().unwrap(), 100.0);
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));
    assert_eq!(sound.position().unwrap(), Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(sound.is_relative_to_listener().unwrap(), false);
    assert_eq!(sound.min_distance().unwrap(), 1.0);
    assert_eq!(sound.attenuation().unwrap(), 1.0);
}

#[test]
fn destroy() {
    let _ = env_logger::try_init();

    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);
    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();
    assert!(sound.handle().is_some());
    assert_eq!(system.sound_count(), 1);

    sound.destroy();
    assert!(sound.handle().is_none());
    assert_eq!(system.sound_count(), 0);

    sound.destroy();
    assert_eq!(system.sound_count(), 0);

    assert_eq!(sound.play(), Err(Error::InvalidHandleUse));
    assert_eq!(sound.status(), Err(Error::InvalidHandleUse));
    assert_eq!(sound.set_volume(50.0), Err(Error::InvalidHandleUse));
    assert_eq!(sound.volume(), Err(Error::InvalidHandleUse));
    assert_eq!(sound.set_buffer(Some(&buffer)), Err(Error::InvalidHandleUse));
    assert_eq!(sound.buffer(), Err(Error::InvalidHandleUse));
    assert!(sound.try_clone().is_err());

    // The buffer is owned by the caller, and survives the sound.
    assert_eq!(system.buffer_count(), 1);
    assert_eq!(buffer.sample_count(), 44100);
}

#[test]
fn drop_releases_voice() {
    let system = AudioSystem::manual();
    {
        let _a = Sound::new(&system);
        let _b = Sound::new(&system);
        assert_eq!(system.sound_count(), 2);
    }

    assert_eq!(system.sound_count(), 0);
}

#[test]
fn transport() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);
    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();

    sound.play().unwrap();
    assert_eq!(sound.status().unwrap(), Status::Playing);
    system.advance(Duration::from_millis(250));
    assert_offset(&sound, Duration::from_millis(250));

    sound.pause().unwrap();
    assert_eq!(sound.status().unwrap(), Status::Paused);
    system.advance(Duration::from_millis(500));
    assert_offset(&sound, Duration::from_millis(250));

    // Resumes where it was paused.
    sound.play().unwrap();
    system.advance(Duration::from_millis(250));
    assert_offset(&sound, Duration::from_millis(500));

    // Playing again restarts from the beginning.
    sound.play().unwrap();
    assert_eq!(sound.status().unwrap(), Status::Playing);
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));

    system.advance(Duration::from_millis(250));
    sound.stop().unwrap();
    assert_eq!(sound.status().unwrap(), Status::Stopped);
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));

    // Pausing a stopped sound does nothing.
    sound.pause().unwrap();
    assert_eq!(sound.status().unwrap(), Status::Stopped);
}

#[test]
fn stops_at_end() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);
    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();

    sound.play().unwrap();
    system.advance(Duration::from_millis(1500));
    assert_eq!(sound.status().unwrap(), Status::Stopped);
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));
}

#[test]
fn looping() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);
    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();

    sound.set_loop(true).unwrap();
    assert!(sound.is_loop().unwrap());

    sound.play().unwrap();
    system.advance(Duration::from_millis(1500));
    assert_eq!(sound.status().unwrap(), Status::Playing);
    assert_offset(&sound, Duration::from_millis(500));
}

#[test]
fn pitch_changes_speed() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 2);
    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();

    sound.set_pitch(2.0).unwrap();
    sound.play().unwrap();
    system.advance(Duration::from_millis(250));
    assert_offset(&sound, Duration::from_millis(500));

    match sound.set_pitch(0.0) {
        Err(Error::InvalidParameter(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(sound.set_pitch(-1.0).is_err());
    assert_eq!(sound.pitch().unwrap(), 2.0);
}

#[test]
fn volume_is_clamped() {
    let system = AudioSystem::manual();
    let mut sound = Sound::new(&system);

    sound.set_volume(150.0).unwrap();
    assert_eq!(sound.volume().unwrap(), 100.0);

    sound.set_volume(-5.0).unwrap();
    assert_eq!(sound.volume().unwrap(), 0.0);

    sound.set_volume(42.0).unwrap();
    assert!(sound.set_volume(::std::f32::NAN).is_err());
    assert_eq!(sound.volume().unwrap(), 42.0);
}

#[test]
fn playing_offset() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);
    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();

    sound.play().unwrap();
    sound.pause().unwrap();
    sound.set_playing_offset(Duration::from_millis(500)).unwrap();
    assert_offset(&sound, Duration::from_millis(500));

    sound.play().unwrap();
    system.advance(Duration::from_millis(250));
    assert_offset(&sound, Duration::from_millis(750));

    // Clamped to the length of the buffer.
    sound.pause().unwrap();
    sound.set_playing_offset(Duration::from_secs(5)).unwrap();
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(1));

    // A stopped sound always starts from the beginning, so the offset is
    // not taken.
    sound.stop().unwrap();
    sound.set_playing_offset(Duration::from_millis(500)).unwrap();
    assert_eq!(sound.status().unwrap(), Status::Stopped);
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));

    sound.play().unwrap();
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));
}

#[test]
fn spatial_parameters() {
    let system = AudioSystem::manual();
    let mut sound = Sound::new(&system);

    sound.set_position([1.0, 2.0, 3.0]).unwrap();
    assert_eq!(sound.position().unwrap(), Vector3::new(1.0, 2.0, 3.0));

    sound.set_relative_to_listener(true).unwrap();
    assert!(sound.is_relative_to_listener().unwrap());

    sound.set_min_distance(5.0).unwrap();
    assert_eq!(sound.min_distance().unwrap(), 5.0);

    sound.set_attenuation(0.0).unwrap();
    assert_eq!(sound.attenuation().unwrap(), 0.0);
}

#[test]
fn rejects_invalid_spatial_parameters() {
    let system = AudioSystem::manual();
    let mut sound = Sound::new(&system);

    match sound.set_min_distance(0.0) {
        Err(Error::InvalidParameter(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(sound.set_min_distance(-2.0).is_err());
    assert_eq!(sound.min_distance().unwrap(), 1.0);

    assert!(sound.set_attenuation(-1.0).is_err());
    assert_eq!(sound.attenuation().unwrap(), 1.0);
}

#[test]
fn swap_buffer_while_playing() {
    let system = AudioSystem::manual();
    let short = tone(&system, 1);
    let long = tone(&system, 2);

    let mut sound = Sound::with_buffer(&system, &short).unwrap();
    sound.play().unwrap();
    system.advance(Duration::from_millis(500));

    sound.set_buffer(Some(&long)).unwrap();
    assert_eq!(sound.buffer().unwrap(), Some(long.handle()));
    assert_eq!(sound.status().unwrap(), Status::Playing);
    assert_offset(&sound, Duration::from_millis(500));

    sound.stop().unwrap();
    sound.play().unwrap();
    system.advance(Duration::from_millis(1500));
    assert_eq!(sound.status().unwrap(), Status::Playing);
    assert_offset(&sound, Duration::from_millis(1500));

    sound.set_buffer(None).unwrap();
    assert_eq!(sound.buffer().unwrap(), None);
}

#[test]
fn buffer_shared_between_sounds() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);

    let mut a = Sound::with_buffer(&system, &buffer).unwrap();
    let b = Sound::with_buffer(&system, &buffer).unwrap();
    a.play().unwrap();
    system.advance(Duration::from_millis(250));

    assert_eq!(a.buffer().unwrap(), Some(buffer.handle()));
    assert_eq!(b.buffer().unwrap(), Some(buffer.handle()));
    assert_eq!(a.status().unwrap(), Status::Playing);
    assert_eq!(b.status().unwrap(), Status::Stopped);
}

#[test]
fn dropping_buffer_detaches_sounds() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 1);
    let handle = buffer.handle();

    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();
    sound.play().unwrap();
    system.advance(Duration::from_millis(250));
    assert_eq!(sound.buffer().unwrap(), Some(handle));

    drop(buffer);
    assert_eq!(system.buffer_count(), 0);
    assert_eq!(sound.buffer().unwrap(), None);
    assert_eq!(sound.status().unwrap(), Status::Stopped);
    assert_eq!(sound.playing_offset().unwrap(), Duration::from_secs(0));

    // The sound is still usable.
    let other = tone(&system, 1);
    sound.set_buffer(Some(&other)).unwrap();
    sound.play().unwrap();
    assert_eq!(sound.status().unwrap(), Status::Playing);
}

#[test]
fn buffer_from_another_system() {
    let a = AudioSystem::manual();
    let b = AudioSystem::manual();
    let buffer = tone(&a, 1);

    let mut sound = Sound::new(&b);
    match sound.set_buffer(Some(&buffer)) {
        Err(Error::InvalidParameter(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(sound.buffer().unwrap(), None);
    assert!(Sound::with_buffer(&b, &buffer).is_err());
    assert_eq!(b.sound_count(), 1);
}

#[test]
fn try_clone() {
    let system = AudioSystem::manual();
    let buffer = tone(&system, 2);

    let mut sound = Sound::with_buffer(&system, &buffer).unwrap();
    sound.set_volume(30.0).unwrap();
    sound.set_loop(true).unwrap();
    sound.set_position([2.0, 0.0, 0.0]).unwrap();
    sound.play().unwrap();
    system.advance(Duration::from_millis(500));

    let mut cloned = sound.try_clone().unwrap();
    assert_ne!(cloned.handle(), sound.handle());
    assert_eq!(system.sound_count(), 2);

    assert_eq!(cloned.buffer().unwrap(), Some(buffer.handle()));
    assert_eq!(cloned.status().unwrap(), Status::Playing);
    assert_eq!(cloned.volume().unwrap(), 30.0);
    assert!(cloned.is_loop().unwrap());
    assert_eq!(cloned.position().unwrap(), Vector3::new(2.0, 0.0, 0.0));
    assert_offset(&cloned, Duration::from_millis(500));

    // Both sounds evolve independently afterwards.
    cloned.set_volume(80.0).unwrap();
    cloned.stop().unwrap();
    assert_eq!(sound.volume().unwrap(), 30.0);
    assert_eq!(sound.status().unwrap(), Status::Playing);

    sound.destroy();
    assert_eq!(cloned.volume().unwrap(), 80.0);
    assert_eq!(system.sound_count(), 1);
}

#[test]
fn try_clone_keeps_buffer() {
    let system = AudioSystem::manual();
    let b1 = tone(&system, 1);
    let b2 = tone(&system, 2);

    let mut sound = Sound::with_buffer(&system, &b1).unwrap();
    let cloned = sound.try_clone().unwrap();
    assert_eq!(cloned.buffer().unwrap(), Some(b1.handle()));

    sound.set_buffer(Some(&b2)).unwrap();
    assert_eq!(sound.buffer().unwrap(), Some(b2.handle()));
    assert_eq!(cloned.buffer().unwrap(), Some(b1.handle()));

    sound.set_buffer(None).unwrap();
    assert_eq!(sound.buffer().unwrap(), None);
    assert_eq!(cloned.buffer().unwrap(), Some(b1.handle()));
}
