//! Band-driven color derivation.
//!
//! A pure function from an [`AudioBands`] reading to a color/emissive/opacity
//! triple: the hue is a weighted average of three fixed anchor hues by the
//! normalized band weights, saturation/lightness/opacity are affine in the
//! (boosted) energy. Deterministic and total; the epsilon on the weight sum
//! keeps the all-zero-band case finite.

use crate::audio::AudioBands;
use crate::math::hsl_to_rgb;

// Anchor hues, in degrees: warm low, green mid, blue-violet high.
const HUE_ANCHOR_LOW: f32 = 24.0;
const HUE_ANCHOR_MID: f32 = 140.0;
const HUE_ANCHOR_HIGH: f32 = 235.0;
const WEIGHT_EPSILON: f32 = 1e-4;
const EMISSIVE_HUE_OFFSET: f32 = 18.0;

/// Per-stroke paint parameters. Channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub opacity: f32,
}

pub fn palette(bands: AudioBands, hue_shift: f32, energy_boost: f32) -> Paint {
    let low = bands.low.clamp(0.0, 1.0);
    let mid = bands.mid.clamp(0.0, 1.0);
    let high = bands.high.clamp(0.0, 1.0);
    let energy = (bands.energy + energy_boost).clamp(0.0, 1.0);

    let weight = low + mid + high + WEIGHT_EPSILON;
    let hue = (HUE_ANCHOR_LOW * (low / weight)
        + HUE_ANCHOR_MID * (mid / weight)
        + HUE_ANCHOR_HIGH * (high / weight)
        + hue_shift)
        .rem_euclid(360.0);
    let saturation = 0.35 + energy * 0.50;
    let lightness = 0.22 + energy * 0.25;

    let color = hsl_to_rgb(hue, saturation, lightness);
    let emissive = hsl_to_rgb(
        (hue + EMISSIVE_HUE_OFFSET).rem_euclid(360.0),
        (saturation + 0.10).min(1.0),
        (lightness + 0.08).min(1.0),
    );
    let opacity = 0.18 + energy * 0.22;

    Paint {
        color,
        emissive,
        opacity,
    }
}
