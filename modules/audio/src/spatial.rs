use cgmath::{InnerSpace, Vector3};

use pastel::errors::*;

/// The spatial information of a sound.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spatial {
    /// The emitter position of the sound.
    pub position: Vector3<f32>,
    /// Whether `position` is relative to the listener, rather than an absolute
    /// world coordinate.
    pub relative: bool,
    /// The distance under which the sound is heard at its maximum volume.
    /// Always positive.
    pub min_distance: f32,
    /// A multiplicative factor. The greater the attenuation, the less the sound
    /// is heard when it moves away from the listener. Zero gives a
    /// non-attenuated sound.
    pub attenuation: f32,
}

impl Default for Spatial {
    fn default() -> Self {
        Spatial {
            position: Vector3::new(0.0, 0.0, 0.0),
            relative: false,
            min_distance: 1.0,
            attenuation: 1.0,
        }
    }
}

impl Spatial {
    /// Returns the volume factor heard by a listener standing at `listener`.
    pub fn gain(&self, listener: Vector3<f32>) -> f32 {
        let emitter = if self.relative {
            self.position
        } else {
            self.position - listener
        };

        let distance = emitter.magnitude().max(self.min_distance);
        let attenuation = self.attenuation * (distance - self.min_distance);
        self.min_distance / (self.min_distance + attenuation)
    }
}

/// A minimum distance of zero would put the sound inside the listener's head.
pub fn check_min_distance(distance: f32) -> Result<f32> {
    if distance.is_finite() && distance > 0.0 {
        Ok(distance)
    } else {
        warn!("Rejects minimum distance {}.", distance);
        Err(invalid_parameter!(
            "minimum distance must be positive and finite, got {}",
            distance
        ))
    }
}

pub fn check_attenuation(attenuation: f32) -> Result<f32> {
    if attenuation.is_finite() && attenuation >= 0.0 {
        Ok(attenuation)
    } else {
        warn!("Rejects attenuation {}.", attenuation);
        Err(invalid_parameter!(
            "attenuation must be non-negative and finite, got {}",
            attenuation
        ))
    }
}
