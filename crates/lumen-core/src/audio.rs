//! Audio-band input boundary.
//!
//! Capture and FFT binning live outside the engine; everything in the core
//! consumes a per-frame [`AudioBands`] reading. A missing or disabled source
//! is a valid steady state and reads as [`AudioBands::ZERO`].

use crate::constants::{
    ENERGY_EMA_KEEP, ENERGY_HIGH_WEIGHT, ENERGY_LOW_WEIGHT, ENERGY_MID_WEIGHT,
};

/// One frame of smoothed band values, each conceptually in [0, 1].
///
/// `energy` is an exponentially smoothed composite of the three bands,
/// computed at the source level (see [`EnergySmoother`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioBands {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
    pub energy: f32,
}

impl AudioBands {
    /// Neutral reading used when no source is initialized.
    pub const ZERO: AudioBands = AudioBands {
        low: 0.0,
        mid: 0.0,
        high: 0.0,
        energy: 0.0,
    };

    /// Clamp every band into [0, 1], mapping non-finite inputs to 0.
    pub fn clamped(self) -> AudioBands {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        AudioBands {
            low: clamp(self.low),
            mid: clamp(self.mid),
            high: clamp(self.high),
            energy: clamp(self.energy),
        }
    }
}

/// Synchronous poll of the latest smoothed band values.
pub trait AudioFeatureSource {
    fn poll(&mut self) -> AudioBands;
}

/// Builds the `energy` composite for a source implementation: a weighted
/// sum of the three bands run through an exponential moving average.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnergySmoother {
    energy: f32,
}

impl EnergySmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame of raw band averages into a full reading.
    pub fn compose(&mut self, low: f32, mid: f32, high: f32) -> AudioBands {
        let raw = (low * ENERGY_LOW_WEIGHT + mid * ENERGY_MID_WEIGHT + high * ENERGY_HIGH_WEIGHT)
            .min(1.0);
        self.energy = self.energy * ENERGY_EMA_KEEP + raw * (1.0 - ENERGY_EMA_KEEP);
        AudioBands {
            low,
            mid,
            high,
            energy: self.energy,
        }
        .clamped()
    }
}
