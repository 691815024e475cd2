//! Small math helpers shared by the brushes and the ribbon.

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cheap deterministic band-limited noise in [0, 1] built from two detuned
/// sines. Same value for the same `(t, seed)` pair, which keeps brush
/// placement reproducible for a fixed seed.
pub fn smooth_noise(t: f32, seed: f32) -> f32 {
    let a = (t * 0.6 + seed).sin() * 0.6;
    let b = (t * 0.13 + seed * 2.17).sin() * 0.4;
    (0.5 + a + b).clamp(0.0, 1.0)
}

/// [`smooth_noise`] remapped to [-1, 1].
#[inline]
pub fn noise_signed(t: f32, seed: f32) -> f32 {
    smooth_noise(t, seed) * 2.0 - 1.0
}

/// HSL to RGB. Hue in degrees (any value, wrapped), saturation and
/// lightness in [0, 1]. Output channels in [0, 1].
pub fn hsl_to_rgb(hue_deg: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue_deg.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s <= f32::EPSILON {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
